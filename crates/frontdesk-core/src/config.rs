//! Business configuration model.
//!
//! One JSON document per tenant, read-only to the engine. All field names
//! are camelCase on the wire to match the stored admin-panel documents.
//! Every section carries `#[serde(default)]` so partial documents load with
//! production defaults for the missing fields.

use serde::{Deserialize, Serialize};

/// Root business configuration document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessConfig {
    /// Display name used in menus and AI context.
    pub business_name: String,
    /// Free-form vertical tag (retail, services, restaurant, ...).
    pub business_type: String,
    /// Sent (with the top menu) on first contact.
    pub welcome_message: String,
    /// Sent outside operating hours when the bot stays silent otherwise.
    pub away_message: String,
    /// Operating-hours window, evaluated in the configured timezone.
    pub operating_hours: OperatingHours,
    /// Ordered top-level menu. Position defines the numeric selection index.
    pub menu_options: Vec<MenuOption>,
    /// Product catalogue summarized into the AI context.
    pub products: Vec<Product>,
    /// Behavior flags.
    pub behavior: BehaviorRules,
    /// Customizable reply templates.
    pub messages: MessageTemplates,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            business_name: "Frontdesk".to_owned(),
            business_type: "services".to_owned(),
            welcome_message: "Hello! Welcome. How can I help you today?".to_owned(),
            away_message: "We're currently closed. Business hours: 09:00-18:00.".to_owned(),
            operating_hours: OperatingHours::default(),
            menu_options: Vec::new(),
            products: Vec::new(),
            behavior: BehaviorRules::default(),
            messages: MessageTemplates::default(),
        }
    }
}

impl BusinessConfig {
    /// Look up a menu option by its keyword (exact match).
    pub fn option_by_keyword(&self, keyword: &str) -> Option<&MenuOption> {
        self.menu_options.iter().find(|o| o.keyword == keyword)
    }
}

/// Daily operating-hours window.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingHours {
    /// Opening time, `HH:MM`.
    pub opening: String,
    /// Closing time, `HH:MM`. A closing before the opening wraps past midnight.
    pub closing: String,
    /// IANA timezone the window is evaluated in.
    pub timezone: String,
}

impl Default for OperatingHours {
    fn default() -> Self {
        Self {
            opening: "09:00".to_owned(),
            closing: "18:00".to_owned(),
            timezone: "America/Sao_Paulo".to_owned(),
        }
    }
}

/// One configured top-level menu option.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuOption {
    /// Selection keyword; also the session tag while inside this option.
    pub keyword: String,
    /// Line shown in the rendered top menu.
    pub description: String,
    /// What selecting the option does.
    pub response: ResponseAction,
    /// Selecting this option hands the conversation to a human.
    #[serde(default)]
    pub requires_human: bool,
    /// Selecting this option enters the free-form AI conversation.
    #[serde(default)]
    pub starts_free_chat: bool,
}

/// What a menu option (or redirect target) resolves to.
///
/// Handled exhaustively at the orchestrator boundary — no ad hoc parsing of
/// loosely-typed response records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum ResponseAction {
    /// A direct text reply.
    Text {
        /// Reply body.
        text: String,
    },
    /// A rendered submenu.
    Menu {
        /// Submenu heading.
        title: String,
        /// Ordered submenu entries.
        options: Vec<SubOption>,
    },
    /// Re-enter the transition for another top-level option.
    Redirect {
        /// Keyword of the target option.
        target: String,
    },
}

/// One entry of a [`ResponseAction::Menu`] submenu.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubOption {
    /// Selection keyword shown to the contact.
    pub keyword: String,
    /// Entry text.
    pub text: String,
}

/// Catalogue product fed into the AI context summary.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product name.
    pub name: String,
    /// Category label.
    #[serde(default)]
    pub category: String,
    /// Unit price.
    #[serde(default)]
    pub price: f64,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Unavailable products are left out of the context summary.
    #[serde(default = "default_true")]
    pub available: bool,
}

/// Behavior flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BehaviorRules {
    /// Delegate to the AI when no menu/intent rule matches.
    pub use_ai_on_fallback: bool,
    /// On AI failure, hand off to a human instead of apologizing.
    pub forward_to_human_if_not_understood: bool,
    /// Keep matching outside operating hours instead of sending the away message.
    pub respond_outside_hours: bool,
}

impl Default for BehaviorRules {
    fn default() -> Self {
        Self {
            use_ai_on_fallback: true,
            forward_to_human_if_not_understood: false,
            respond_outside_hours: false,
        }
    }
}

/// Customizable reply templates.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageTemplates {
    /// Generic apology when nothing else applies.
    pub default_error: String,
    /// Sent when transitioning to the human hand-off state.
    pub human_forward: String,
    /// Preface sent when an unmatched message is handed to the AI.
    pub ai_fallback: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            default_error: "Sorry, I didn't understand your message.".to_owned(),
            human_forward: "I'll forward you to a human agent.".to_owned(),
            ai_fallback: "I couldn't find that option, but let me try to understand what you need."
                .to_owned(),
        }
    }
}

/// A named pattern/response bundle, independent of positional menus.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRule {
    /// Rule name (diagnostics only).
    pub name: String,
    /// Ordered case-insensitive substring patterns.
    pub patterns: Vec<String>,
    /// Candidate replies; one is chosen at random per match.
    pub responses: Vec<String>,
    /// Marks rules seeded from the command table (not matched as intents).
    #[serde(default)]
    pub is_command: bool,
    /// Higher priority wins; ties resolve to configuration order.
    #[serde(default = "default_priority")]
    pub priority: i32,
}

/// A business configuration plus its intent rules, as one read unit.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    /// The tenant's business configuration.
    pub business: BusinessConfig,
    /// Intent rules in configuration order.
    pub intents: Vec<IntentRule>,
}

fn default_true() -> bool {
    true
}

fn default_priority() -> i32 {
    1
}

/// Canned configurations for tests across the workspace.
pub mod test_fixtures {
    use super::{
        BusinessConfig, BusinessProfile, IntentRule, MenuOption, Product, ResponseAction,
        SubOption,
    };

    /// A small retail-flavored configuration exercising every option shape.
    pub fn demo_config() -> BusinessConfig {
        BusinessConfig {
            business_name: "Moreira Supplies".to_owned(),
            business_type: "retail".to_owned(),
            menu_options: vec![
                MenuOption {
                    keyword: "hours".to_owned(),
                    description: "Opening hours".to_owned(),
                    response: ResponseAction::Text {
                        text: "We're open 09:00-18:00, Monday to Saturday.".to_owned(),
                    },
                    requires_human: false,
                    starts_free_chat: false,
                },
                MenuOption {
                    keyword: "catalog".to_owned(),
                    description: "Browse our catalog".to_owned(),
                    response: ResponseAction::Menu {
                        title: "Catalog sections".to_owned(),
                        options: vec![
                            SubOption {
                                keyword: "tools".to_owned(),
                                text: "Hand and power tools".to_owned(),
                            },
                            SubOption {
                                keyword: "paint".to_owned(),
                                text: "Paint and finishes".to_owned(),
                            },
                        ],
                    },
                    requires_human: false,
                    starts_free_chat: false,
                },
                MenuOption {
                    keyword: "agent".to_owned(),
                    description: "Talk to a human".to_owned(),
                    response: ResponseAction::Text {
                        text: "One moment while I find someone for you.".to_owned(),
                    },
                    requires_human: true,
                    starts_free_chat: false,
                },
                MenuOption {
                    keyword: "chat".to_owned(),
                    description: "Just chat with me".to_owned(),
                    response: ResponseAction::Text {
                        text: "Sure! Ask me anything. Type \"exit\" to go back.".to_owned(),
                    },
                    requires_human: false,
                    starts_free_chat: true,
                },
            ],
            products: vec![Product {
                name: "Claw hammer".to_owned(),
                category: "tools".to_owned(),
                price: 19.9,
                description: "16oz fiberglass handle".to_owned(),
                available: true,
            }],
            ..BusinessConfig::default()
        }
    }

    /// [`demo_config`] wrapped in a profile with two greeting/thanks intents.
    pub fn demo_profile() -> BusinessProfile {
        BusinessProfile {
            business: demo_config(),
            intents: vec![
                IntentRule {
                    name: "greeting".to_owned(),
                    patterns: vec!["hello".to_owned(), "good morning".to_owned()],
                    responses: vec![
                        "Hi! How can I help?".to_owned(),
                        "Hello there! What can I do for you?".to_owned(),
                    ],
                    is_command: false,
                    priority: 2,
                },
                IntentRule {
                    name: "thanks".to_owned(),
                    patterns: vec!["thank".to_owned(), "thanks".to_owned()],
                    responses: vec!["You're welcome!".to_owned()],
                    is_command: false,
                    priority: 1,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let config: BusinessConfig =
            serde_json::from_str(r#"{"businessName":"Acme"}"#).unwrap();
        assert_eq!(config.business_name, "Acme");
        assert_eq!(config.operating_hours.opening, "09:00");
        assert!(config.behavior.use_ai_on_fallback);
        assert!(!config.behavior.respond_outside_hours);
    }

    #[test]
    fn response_action_is_tagged() {
        let json = serde_json::to_value(ResponseAction::Redirect {
            target: "hours".to_owned(),
        })
        .unwrap();
        assert_eq!(json["type"], "redirect");
        assert_eq!(json["target"], "hours");

        let menu: ResponseAction = serde_json::from_value(serde_json::json!({
            "type": "menu",
            "title": "Sections",
            "options": [{"keyword": "a", "text": "First"}]
        }))
        .unwrap();
        assert!(matches!(menu, ResponseAction::Menu { .. }));
    }

    #[test]
    fn option_lookup_is_exact() {
        let config = test_fixtures::demo_config();
        assert!(config.option_by_keyword("hours").is_some());
        assert!(config.option_by_keyword("HOURS").is_none());
    }
}

//! The rule matcher.
//!
//! A pure function of (text, session state, business profile, command
//! prefix) that always terminates in exactly one [`Match`]. Precedence is
//! strict — first satisfied rule wins:
//!
//! 1. command prefix (short-circuits everything, including session state)
//! 2. hand-off hold: in the awaiting-agent state only commands get through
//! 3. generic intents, priority descending, configuration order on ties
//! 4. free-chat continuation ("exit" leaves, anything else delegates)
//! 5. top-level menu selection (1-based numeric index or keyword substring)
//! 6. no match
//!
//! Randomized reply selection is deliberately NOT here: an intent match
//! returns all candidate responses and the orchestrator draws one from its
//! injected random source, keeping this function deterministic.

use frontdesk_core::config::BusinessProfile;
use frontdesk_core::text::normalize;
use frontdesk_core::SessionState;

/// Token that leaves the free-chat state (case-insensitive).
pub const FREE_CHAT_EXIT: &str = "exit";

/// The single action an inbound text resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Match {
    /// Command-prefixed text; `token` is lowercased without the prefix.
    Command {
        /// Command word.
        token: String,
    },
    /// A generic intent fired.
    Intent {
        /// Rule name, for diagnostics.
        name: String,
        /// All candidate responses; the orchestrator picks one.
        responses: Vec<String>,
    },
    /// Waiting for a human agent — acknowledge and stay put.
    AwaitingAck,
    /// "exit" inside free chat: back to the top menu.
    ExitFreeChat,
    /// Free-chat text for the generative delegate.
    Delegate,
    /// A top-level menu option was selected.
    MenuSelect {
        /// Index into `menu_options` (configuration order).
        index: usize,
    },
    /// Nothing applied.
    NoMatch,
}

/// Resolve inbound text to exactly one action.
pub fn resolve(
    text: &str,
    state: &SessionState,
    profile: &BusinessProfile,
    command_prefix: &str,
) -> Match {
    let trimmed = text.trim();

    // 1. Commands win over everything, in every state.
    if !command_prefix.is_empty() && trimmed.starts_with(command_prefix) {
        let token = trimmed[command_prefix.len()..]
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();
        return Match::Command { token };
    }

    // 2. Hand-off hold: the bot only acknowledges until an agent clears it.
    if *state == SessionState::AwaitingAgent {
        return Match::AwaitingAck;
    }

    let normalized = normalize(trimmed);

    // 3. Generic intents: priority descending, configuration order on ties,
    // first matching pattern wins. Stable sort preserves config order.
    let mut intents: Vec<_> = profile
        .intents
        .iter()
        .filter(|rule| !rule.is_command && !rule.responses.is_empty())
        .collect();
    intents.sort_by_key(|rule| std::cmp::Reverse(rule.priority));
    for rule in intents {
        let hit = rule
            .patterns
            .iter()
            .any(|pattern| !pattern.is_empty() && normalized.contains(&pattern.to_lowercase()));
        if hit {
            return Match::Intent {
                name: rule.name.clone(),
                responses: rule.responses.clone(),
            };
        }
    }

    // 4. Free-chat continuation.
    if *state == SessionState::FreeChat {
        return if normalized == FREE_CHAT_EXIT {
            Match::ExitFreeChat
        } else {
            Match::Delegate
        };
    }

    // 5. Top-level menu selection: numeric position first, then keyword.
    let options = &profile.business.menu_options;
    if let Ok(position) = normalized.parse::<usize>()
        && position >= 1
        && position <= options.len()
    {
        return Match::MenuSelect { index: position - 1 };
    }
    if let Some(index) = options
        .iter()
        .position(|o| !o.keyword.is_empty() && normalized.contains(&o.keyword.to_lowercase()))
    {
        return Match::MenuSelect { index };
    }

    // 6. Nothing applied.
    Match::NoMatch
}

#[cfg(test)]
mod tests {
    use frontdesk_core::config::test_fixtures::demo_profile;
    use frontdesk_core::config::IntentRule;

    use super::*;

    fn top() -> SessionState {
        SessionState::Top
    }

    #[test]
    fn command_prefix_short_circuits_everything() {
        let profile = demo_profile();
        // "hello" would otherwise fire the greeting intent.
        let m = resolve("/hello now", &SessionState::FreeChat, &profile, "/");
        assert_eq!(
            m,
            Match::Command {
                token: "hello".into()
            }
        );
        // Commands also pierce the hand-off hold.
        let m = resolve("/help", &SessionState::AwaitingAgent, &profile, "/");
        assert_eq!(m, Match::Command { token: "help".into() });
    }

    #[test]
    fn awaiting_agent_only_acknowledges() {
        let profile = demo_profile();
        assert_eq!(
            resolve("hello there", &SessionState::AwaitingAgent, &profile, "/"),
            Match::AwaitingAck
        );
    }

    #[test]
    fn intent_matches_by_substring_case_insensitive() {
        let profile = demo_profile();
        let m = resolve("well HELLO friend", &top(), &profile, "/");
        assert_eq!(
            m,
            Match::Intent {
                name: "greeting".into(),
                responses: profile.intents[0].responses.clone()
            }
        );
    }

    #[test]
    fn higher_priority_intent_wins() {
        let mut profile = demo_profile();
        // Both intents match "hello thanks"; greeting has priority 2 over 1.
        profile.intents[1].patterns.push("hello".into());
        let m = resolve("hello", &top(), &profile, "/");
        assert_matches::assert_matches!(m, Match::Intent { name, .. } if name == "greeting");
    }

    #[test]
    fn equal_priority_resolves_to_configuration_order() {
        let mut profile = demo_profile();
        profile.intents = vec![
            IntentRule {
                name: "first".into(),
                patterns: vec!["ping".into()],
                responses: vec!["a".into()],
                is_command: false,
                priority: 1,
            },
            IntentRule {
                name: "second".into(),
                patterns: vec!["ping".into()],
                responses: vec!["b".into()],
                is_command: false,
                priority: 1,
            },
        ];
        let m = resolve("ping", &top(), &profile, "/");
        assert_matches::assert_matches!(m, Match::Intent { name, .. } if name == "first");
    }

    #[test]
    fn free_chat_exit_is_case_insensitive() {
        let profile = demo_profile();
        assert_eq!(
            resolve("  EXIT ", &SessionState::FreeChat, &profile, "/"),
            Match::ExitFreeChat
        );
        assert_eq!(
            resolve("what's the weather", &SessionState::FreeChat, &profile, "/"),
            Match::Delegate
        );
    }

    #[test]
    fn numeric_selection_is_one_based() {
        let profile = demo_profile();
        assert_eq!(resolve("2", &top(), &profile, "/"), Match::MenuSelect { index: 1 });
        assert_eq!(resolve("1", &top(), &profile, "/"), Match::MenuSelect { index: 0 });
        // Out of range falls through to no-match.
        assert_eq!(resolve("9", &top(), &profile, "/"), Match::NoMatch);
        assert_eq!(resolve("0", &top(), &profile, "/"), Match::NoMatch);
    }

    #[test]
    fn keyword_selection_is_substring() {
        let profile = demo_profile();
        assert_eq!(
            resolve("show me the CATALOG please", &top(), &profile, "/"),
            Match::MenuSelect { index: 1 }
        );
    }

    #[test]
    fn menu_selection_works_from_inside_an_option() {
        let profile = demo_profile();
        let state = SessionState::Menu("hours".into());
        assert_eq!(resolve("catalog", &state, &profile, "/"), Match::MenuSelect { index: 1 });
    }

    #[test]
    fn gibberish_is_no_match() {
        let profile = demo_profile();
        assert_eq!(resolve("xyzzy", &top(), &profile, "/"), Match::NoMatch);
        // Unknown continuation tags behave like the top level here.
        let state = SessionState::Continuation("legacy:9".into());
        assert_eq!(resolve("xyzzy", &state, &profile, "/"), Match::NoMatch);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            // Any in-range numeric input selects exactly that option.
            #[test]
            fn numeric_selection_total(position in 1usize..=4) {
                let profile = demo_profile();
                let m = resolve(&position.to_string(), &SessionState::Top, &profile, "/");
                prop_assert_eq!(m, Match::MenuSelect { index: position - 1 });
            }

            // The matcher is total and deterministic over arbitrary text.
            #[test]
            fn always_exactly_one_action(text in ".{0,64}") {
                let profile = demo_profile();
                let a = resolve(&text, &SessionState::Top, &profile, "/");
                let b = resolve(&text, &SessionState::Top, &profile, "/");
                prop_assert_eq!(a, b);
            }
        }
    }
}

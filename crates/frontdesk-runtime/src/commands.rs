//! The administrative command table.
//!
//! Three built-in commands (`help`, `topics`, `reset`) plus fixed-reply
//! extras from settings. Commands behave identically in every session
//! state and never mutate the session.

use std::collections::BTreeMap;

use frontdesk_settings::FrontdeskSettings;

/// Reply for an unrecognized command token.
pub const UNKNOWN_COMMAND_REPLY: &str =
    "⚠️ Unknown command. Use /help to see the available commands.";

/// Confirmation for the reset command.
pub const RESET_REPLY: &str = "🔄 Conversation reset! Let's start fresh.";

/// Built-in command tokens.
pub const HELP: &str = "help";
/// Topic listing command token.
pub const TOPICS: &str = "topics";
/// Message-log reset command token.
pub const RESET: &str = "reset";

/// Static command table: prefix, built-ins, and configured extras.
#[derive(Clone, Debug)]
pub struct CommandTable {
    prefix: String,
    extra: BTreeMap<String, String>,
}

impl CommandTable {
    /// Build from settings (prefix + extra fixed-reply commands).
    pub fn from_settings(settings: &FrontdeskSettings) -> Self {
        Self {
            prefix: settings.conversation.command_prefix.clone(),
            extra: settings.commands.clone(),
        }
    }

    /// The configured command prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Fixed reply for a configured extra command.
    pub fn extra_reply(&self, token: &str) -> Option<&str> {
        self.extra.get(token).map(String::as_str)
    }

    /// The `/help` listing: built-ins first, then extras in name order.
    pub fn help_text(&self) -> String {
        let p = &self.prefix;
        let mut out = format!(
            "📌 Available commands:\n\
             {p}{HELP} - show this help\n\
             {p}{TOPICS} - topics we've talked about\n\
             {p}{RESET} - restart our conversation"
        );
        for token in self.extra.keys() {
            out.push_str(&format!("\n{p}{token}"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(extra: &[(&str, &str)]) -> CommandTable {
        let mut settings = FrontdeskSettings::default();
        for (token, reply) in extra {
            let _ = settings
                .commands
                .insert((*token).to_owned(), (*reply).to_owned());
        }
        CommandTable::from_settings(&settings)
    }

    #[test]
    fn help_lists_builtins_and_extras() {
        let table = table_with(&[("hours", "We open at nine.")]);
        let help = table.help_text();
        assert!(help.contains("/help"));
        assert!(help.contains("/topics"));
        assert!(help.contains("/reset"));
        assert!(help.contains("/hours"));
    }

    #[test]
    fn extras_resolve_and_unknowns_do_not() {
        let table = table_with(&[("hours", "We open at nine.")]);
        assert_eq!(table.extra_reply("hours"), Some("We open at nine."));
        assert_eq!(table.extra_reply("nope"), None);
    }
}

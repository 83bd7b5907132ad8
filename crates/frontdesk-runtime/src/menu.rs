//! Menu rendering.

use frontdesk_core::config::{BusinessConfig, SubOption};

/// Render the numbered top-level menu.
pub fn render_top_menu(config: &BusinessConfig) -> String {
    let mut out = format!("🤖 *{}* 🤖\n\nPlease choose an option:\n", config.business_name);
    for (position, option) in config.menu_options.iter().enumerate() {
        out.push_str(&format!("{} - {}\n", position + 1, option.description));
    }
    out.push_str("\nReply with the *number* or keyword of an option.");
    out
}

/// Render a submenu response.
pub fn render_submenu(title: &str, options: &[SubOption]) -> String {
    let mut out = format!("📌 *{title}*:\n\n");
    for option in options {
        out.push_str(&format!("{} - {}\n", option.keyword, option.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use frontdesk_core::config::test_fixtures::demo_config;

    use super::*;

    #[test]
    fn top_menu_lists_options_in_configuration_order() {
        let rendered = render_top_menu(&demo_config());
        let hours_at = rendered.find("1 - Opening hours").unwrap();
        let catalog_at = rendered.find("2 - Browse our catalog").unwrap();
        let chat_at = rendered.find("4 - Just chat with me").unwrap();
        assert!(hours_at < catalog_at && catalog_at < chat_at);
        assert!(rendered.contains("Moreira Supplies"));
    }

    #[test]
    fn submenu_keeps_keywords_visible() {
        let config = demo_config();
        let frontdesk_core::config::ResponseAction::Menu { title, options } =
            &config.menu_options[1].response
        else {
            panic!("catalog option should be a submenu");
        };
        let rendered = render_submenu(title, options);
        assert!(rendered.contains("tools - Hand and power tools"));
        assert!(rendered.contains("paint - Paint and finishes"));
    }
}

use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::utility::{page_out_of_range_message, spawn_session};
use crate::{COMMANDS, CommandMeta};
use folio_core::Context;
use folio_utils::pagination::{ListPages, total_pages};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page|category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 10;
const HELP_FOOTER_NOTE: &str = "Use !usage <command> for syntax";

/// Render the command catalog as a pagination session, optionally filtered by
/// category or opened on a given page.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let (requested_page, category) = match help_target(arg1) {
        HelpTarget::Page(page) => (page, None),
        HelpTarget::Category(category) => (1, Some(category)),
    };

    let categories = categories();
    if let Some(wanted) = category.as_deref()
        && !categories.contains(&wanted)
    {
        let out = format!(
            "Unknown category `{wanted}`. Available categories: {}.",
            categories.join(", ")
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let lines = help_lines(category.as_deref());
    let total = total_pages(lines.len(), HELP_COMMANDS_PER_PAGE);

    if let Some(out) = page_rejection(requested_page, total) {
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let provider = ListPages::new(help_title(category.as_deref()), lines, HELP_COMMANDS_PER_PAGE)
        .footer_note(HELP_FOOTER_NOTE);
    spawn_session(&ctx, &msg, provider, requested_page - 1);

    Ok(())
}

/// What `!help`'s argument asks for.
#[derive(Debug, PartialEq, Eq)]
enum HelpTarget {
    /// One-based page number as typed.
    Page(usize),
    Category(String),
}

fn help_target(arg1: Option<&str>) -> HelpTarget {
    let Some(raw) = arg1.map(str::trim) else {
        return HelpTarget::Page(1);
    };

    match raw.parse::<usize>() {
        Ok(page) => HelpTarget::Page(page),
        Err(_) => HelpTarget::Category(raw.to_ascii_lowercase()),
    }
}

fn page_rejection(requested_page: usize, total: usize) -> Option<String> {
    (requested_page == 0 || requested_page > total)
        .then(|| page_out_of_range_message(requested_page, total))
}

fn categories() -> Vec<&'static str> {
    let mut categories: Vec<&str> = COMMANDS.iter().map(|command| command.category).collect();
    categories.sort_unstable();
    categories.dedup();
    categories
}

fn help_title(category: Option<&str>) -> String {
    match category {
        Some(category) => format!("Commands: {category}"),
        None => "Commands".to_owned(),
    }
}

/// One catalog line per command, sorted by category then name.
fn help_lines(category: Option<&str>) -> Vec<String> {
    let mut commands: Vec<&CommandMeta> = COMMANDS
        .iter()
        .filter(|command| category.is_none_or(|wanted| command.category == wanted))
        .collect();
    commands.sort_by_key(|command| (command.category, command.name));

    commands
        .into_iter()
        .map(|command| format!("`{}`: {}", command.usage, command.desc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lists_every_command() {
        let lines = help_lines(None);

        assert_eq!(lines.len(), COMMANDS.len());
        assert!(lines.contains(&"`!ping`: Replies with Pong! and the API round trip.".to_owned()));
    }

    #[test]
    fn unknown_category_is_empty() {
        assert!(help_lines(Some("moderation")).is_empty());
        assert!(!categories().contains(&"moderation"));
    }

    #[test]
    fn lines_are_sorted_by_name_within_category() {
        let lines = help_lines(Some("utility"));
        let mut sorted = lines.clone();
        sorted.sort();

        assert_eq!(lines, sorted);
    }

    #[test]
    fn numeric_argument_is_always_a_page() {
        assert_eq!(help_target(None), HelpTarget::Page(1));
        assert_eq!(help_target(Some("0")), HelpTarget::Page(0));
        assert_eq!(help_target(Some("3")), HelpTarget::Page(3));
        assert_eq!(
            help_target(Some("Utility")),
            HelpTarget::Category("utility".to_owned())
        );
    }

    #[test]
    fn page_zero_is_out_of_range() {
        assert_eq!(
            page_rejection(0, 1).as_deref(),
            Some("Page 0 does not exist. Available pages: 1-1.")
        );
        assert!(page_rejection(1, 1).is_none());
        assert!(page_rejection(2, 1).is_some());
    }

    #[test]
    fn title_names_category() {
        assert_eq!(help_title(None), "Commands");
        assert_eq!(help_title(Some("utility")), "Commands: utility");
    }
}

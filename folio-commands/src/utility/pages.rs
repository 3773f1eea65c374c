use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::utility::spawn_session;
use folio_core::Context;
use folio_utils::pagination::ListPages;

pub const META: CommandMeta = CommandMeta {
    name: "pages",
    desc: "Open a sample pagination session.",
    category: "utility",
    usage: "!pages [count]",
};

const DEFAULT_ITEM_COUNT: usize = 24;
const MAX_ITEM_COUNT: usize = 500;
const ITEMS_PER_PAGE: usize = 5;

/// Open a demo session over `count` generated items, starting on page 1.
///
/// Invalid or out-of-range counts reply with this command's usage.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(count) = parse_count(arg1) else {
        let usage = format!("Usage: `{}` (count from 0 to {MAX_ITEM_COUNT})", META.usage);
        ctx.http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let provider = ListPages::new("Pagination Demo", sample_items(count), ITEMS_PER_PAGE)
        .footer_note(format!("{count} items"));
    spawn_session(&ctx, &msg, provider, 0);

    Ok(())
}

fn parse_count(raw: Option<&str>) -> Option<usize> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|count| *count <= MAX_ITEM_COUNT),
        None => Some(DEFAULT_ITEM_COUNT),
    }
}

fn sample_items(count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("Sample item {n}")).collect()
}

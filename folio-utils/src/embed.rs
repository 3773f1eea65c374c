use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;
/// Color of the placeholder shown when a page has no content.
pub const NOT_FOUND_COLOR: u32 = 0xED_42_45;

/// Build a page embed with a `Page n/m` footer.
///
/// `index` is zero-based; the footer is one-based. Single-page sets only
/// show the footer note, if any.
pub fn build_page_embed(
    title: &str,
    description: impl Into<String>,
    index: usize,
    total_pages: usize,
    footer_note: Option<&str>,
) -> anyhow::Result<Embed> {
    let page = index + 1;
    let total_pages = total_pages.max(1);

    let footer_text = match footer_note {
        Some(note) if !note.is_empty() && total_pages > 1 => {
            format!("Page {page}/{total_pages} • {note}")
        }
        Some(note) if !note.is_empty() => note.to_owned(),
        _ if total_pages > 1 => format!("Page {page}/{total_pages}"),
        _ => String::new(),
    };

    let builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    let embed = if footer_text.is_empty() {
        builder.validate()?.build()
    } else {
        let footer = EmbedFooterBuilder::new(footer_text).build();
        builder.footer(footer).validate()?.build()
    };

    Ok(embed)
}

/// Placeholder shown instead of a page when the provider has nothing.
pub fn not_found_embed() -> Embed {
    EmbedBuilder::new()
        .color(NOT_FOUND_COLOR)
        .description("No results found.")
        .build()
}

pub mod help;
pub mod pages;
pub mod ping;
pub mod usage;

use std::sync::Arc;

use tracing::debug;
use twilight_model::gateway::payload::incoming::MessageCreate;

use folio_core::Context;
use folio_utils::pagination::{Origin, PageProvider, Paginator};

/// Start a pagination session for `msg`'s author in its channel.
///
/// The session runs on its own task; this returns as soon as it is spawned.
pub(crate) fn spawn_session(
    ctx: &Context,
    msg: &MessageCreate,
    provider: impl PageProvider + 'static,
    index: usize,
) {
    let session = Paginator::new(
        Arc::clone(&ctx.surface),
        ctx.collector.clone(),
        provider,
        Origin::Channel(msg.channel_id),
        msg.author.id,
    )
    .idle_timeout(ctx.config.pagination_idle)
    .initial_index(index)
    .spawn();

    let channel_id = msg.channel_id;
    tokio::spawn(async move {
        match session.await {
            Ok(phase) => {
                debug!(channel_id = channel_id.get(), ?phase, "pagination session finished");
            }
            Err(source) => debug!(?source, "pagination session task failed"),
        }
    });
}

/// Reply for a page number past the end of a listing.
pub(crate) fn page_out_of_range_message(page: usize, total: usize) -> String {
    format!("Page {page} does not exist. Available pages: 1-{total}.")
}

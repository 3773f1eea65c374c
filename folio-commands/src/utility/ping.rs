use tokio::time::Instant;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use folio_core::Context;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Replies with Pong! and the API round trip.",
    category: "utility",
    usage: "!ping",
};

/// Send a connectivity response, then edit in the measured round trip.
pub async fn run(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let started = Instant::now();
    let reply = http
        .create_message(msg.channel_id)
        .content("Pong!")
        .await?
        .model()
        .await?;

    let out = format!("Pong! `{} ms`", started.elapsed().as_millis());
    http.update_message(reply.channel_id, reply.id)
        .content(Some(&out))
        .await?;

    Ok(())
}

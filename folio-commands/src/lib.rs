pub mod utility;

use tracing::debug;
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use folio_core::{Context, CooldownStatus};
use folio_utils::{
    COMMAND_PREFIX,
    pagination::{Activation, RouteOutcome},
};

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::ping::META,
    utility::help::META,
    utility::usage::META,
    utility::pages::META,
    // Add new commands here
];

/// A prefix command split into its name and first argument.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    pub name: String,
    pub arg1: Option<&'a str>,
}

/// Split `content` into a command invocation, or `None` when it does not
/// carry the command prefix.
pub fn parse_command(content: &str) -> Option<ParsedCommand<'_>> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();

    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let name = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    let arg1 = command_and_rest
        .next()
        .and_then(|rest| rest.split_whitespace().next());

    Some(ParsedCommand { name, arg1 })
}

/// Reply sent while a command is still cooling down for its caller.
pub fn cooldown_notice(command: &str, expires_at_unix: u64) -> String {
    format!("You are on cooldown for `{COMMAND_PREFIX}{command}`. Try again <t:{expires_at_unix}:R>.")
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.clone();
    let Some(parsed) = parse_command(&content) else {
        return Ok(());
    };

    let Some(command) = COMMANDS.iter().find(|command| command.name == parsed.name) else {
        return Ok(());
    };

    if let CooldownStatus::Cooling {
        expires_at_unix, ..
    } = ctx.cooldowns.check_default(command.name, msg.author.id)
    {
        let out = cooldown_notice(command.name, expires_at_unix);
        ctx.http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    debug!(command = command.name, user = msg.author.id.get(), "running command");

    let arg1 = parsed.arg1;
    match command.name {
        "ping" => utility::ping::run(ctx.clone(), msg).await?,
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        "usage" => utility::usage::run(ctx.clone(), msg, arg1).await?,
        "pages" => utility::pages::run(ctx.clone(), msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

/// Forward component and modal interactions to the session that owns their message.
pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let Some(activation) = Activation::from_interaction(&interaction) else {
        return Ok(());
    };

    let outcome = ctx.collector.route(ctx.surface.as_ref(), activation).await;
    if outcome != RouteOutcome::Delivered {
        debug!(?outcome, "interaction not delivered to a pagination session");
    }

    Ok(())
}

// File: ultrabot-core/src/services/discord/commands.rs

use tracing::debug;
use twilight_model::channel::message::{Component, Embed};

use crate::Error;
use crate::services::discord::components::account_controls;
use crate::services::discord::embeds;
use crate::services::event_context::EventContext;

/// Prefix chat commands, e.g. `!status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixCommand {
    Status,
    Accounts,
    Ultras,
    Help,
}

impl PrefixCommand {
    /// Returns `None` for anything that is not one of our commands,
    /// including text that lacks the prefix. An empty prefix matches nothing.
    pub fn parse(prefix: &str, content: &str) -> Option<Self> {
        if prefix.is_empty() {
            return None;
        }
        let rest = content.trim_start().strip_prefix(prefix)?;
        if rest.starts_with(char::is_whitespace) {
            return None;
        }
        let name = rest.split_whitespace().next()?;
        match name {
            "status" => Some(PrefixCommand::Status),
            "accounts" => Some(PrefixCommand::Accounts),
            "ultras" => Some(PrefixCommand::Ultras),
            "help" => Some(PrefixCommand::Help),
            _ => None,
        }
    }
}

/// A message the bot should post in reply to a command.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMessage {
    pub embed: Embed,
    pub components: Vec<Component>,
}

impl OutgoingMessage {
    fn embed_only(embed: Embed) -> Self {
        Self { embed, components: Vec::new() }
    }
}

/// Builds the replies for `command`. `status`, `ultras` and `help` are pure
/// reads; `accounts` produces one card plus controls per account.
pub async fn handle_command(ctx: &EventContext, command: PrefixCommand) -> Result<Vec<OutgoingMessage>, Error> {
    debug!("Handling command {:?}", command);
    match command {
        PrefixCommand::Status => {
            let accounts = ctx.account_service.list_accounts().await?;
            Ok(vec![OutgoingMessage::embed_only(embeds::status_embed(&accounts))])
        }
        PrefixCommand::Accounts => {
            let accounts = ctx.account_service.list_accounts().await?;
            Ok(accounts
                .iter()
                .map(|acc| OutgoingMessage {
                    embed: embeds::account_embed(acc),
                    components: account_controls(acc).into_components(),
                })
                .collect())
        }
        PrefixCommand::Ultras => {
            let accounts = ctx.account_service.list_accounts().await?;
            Ok(vec![OutgoingMessage::embed_only(embeds::ultras_embed(&accounts))])
        }
        PrefixCommand::Help => Ok(vec![OutgoingMessage::embed_only(embeds::help_embed(
            &ctx.command_prefix,
        ))]),
    }
}

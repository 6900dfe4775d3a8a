// File: ultrabot-core/src/services/discord/interactions.rs

use tracing::{debug, warn};
use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::channel::message::MessageFlags;
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType};

use ultrabot_common::models::Account;

use crate::Error;
use crate::services::discord::components::{account_controls, ControlAction};
use crate::services::discord::embeds;
use crate::services::event_context::EventContext;

/// Applies a button press or select-menu submission from an account card.
///
/// Returns the response that redraws the same message in place, or `None`
/// if the component does not belong to us.
pub async fn handle_component(
    ctx: &EventContext,
    data: &MessageComponentInteractionData,
    actor: &str,
) -> Result<Option<InteractionResponse>, Error> {
    let Some((action, username)) = ControlAction::parse_custom_id(&data.custom_id) else {
        debug!("Ignoring component with unknown custom id '{}'", data.custom_id);
        return Ok(None);
    };

    let service = &ctx.account_service;
    let updated = match action {
        ControlAction::Dailies => service.toggle_dailies(username).await,
        ControlAction::Claim => service.toggle_claim(username, actor).await.map(|(acc, _)| acc),
        ControlAction::Ultras => service.set_ultra_bosses(username, &data.values).await,
    };

    match updated {
        Ok(account) => Ok(Some(redraw_card(&account))),
        Err(Error::NotFound(what)) => {
            warn!("{:?} on {} from {}, which is gone", action, what, actor);
            Ok(Some(ephemeral_notice(format!("`{username}` is no longer tracked."))))
        }
        Err(e) => Err(e),
    }
}

/// Replaces the card embed and its controls on the message the user clicked.
pub fn redraw_card(account: &Account) -> InteractionResponse {
    InteractionResponse {
        kind: InteractionResponseType::UpdateMessage,
        data: Some(InteractionResponseData {
            embeds: Some(vec![embeds::account_embed(account)]),
            components: Some(account_controls(account).into_components()),
            ..Default::default()
        }),
    }
}

fn ephemeral_notice(content: String) -> InteractionResponse {
    InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(InteractionResponseData {
            content: Some(content),
            flags: Some(MessageFlags::EPHEMERAL),
            ..Default::default()
        }),
    }
}

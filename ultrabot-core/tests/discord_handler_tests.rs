// tests/discord_handler_tests.rs

mod test_utils;

use std::sync::Arc;

use twilight_model::application::interaction::message_component::MessageComponentInteractionData;
use twilight_model::channel::message::component::{ButtonStyle, ComponentType};
use twilight_model::channel::message::{Component, MessageFlags};
use twilight_model::http::interaction::{InteractionResponse, InteractionResponseType};

use ultrabot_common::models::{Claim, Completion};
use ultrabot_core::Error;
use ultrabot_core::services::discord::{handle_command, handle_component, PrefixCommand};
use ultrabot_core::services::{AccountService, EventContext};

use test_utils::{account, roster, MemoryAccountStore};

fn context(store: Arc<MemoryAccountStore>) -> EventContext {
    EventContext::new(Arc::new(AccountService::new(store)), "!")
}

fn button_press(custom_id: &str) -> MessageComponentInteractionData {
    MessageComponentInteractionData {
        custom_id: custom_id.to_string(),
        component_type: ComponentType::Button,
        resolved: None,
        values: Vec::new(),
    }
}

fn select(custom_id: &str, values: &[&str]) -> MessageComponentInteractionData {
    MessageComponentInteractionData {
        custom_id: custom_id.to_string(),
        component_type: ComponentType::TextSelectMenu,
        resolved: None,
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

/// (label, style) of every button in the response's first row.
fn buttons(response: &InteractionResponse) -> Vec<(String, ButtonStyle)> {
    let components = response.data.as_ref().and_then(|d| d.components.as_ref()).unwrap();
    let Component::ActionRow(row) = &components[0] else {
        panic!("expected action row");
    };
    row.components
        .iter()
        .filter_map(|c| match c {
            Component::Button(b) => Some((b.label.clone().unwrap_or_default(), b.style)),
            _ => None,
        })
        .collect()
}

fn card_description(response: &InteractionResponse) -> String {
    let embeds = response.data.as_ref().and_then(|d| d.embeds.as_ref()).unwrap();
    embeds[0].description.clone().unwrap_or_default()
}

#[tokio::test]
async fn accounts_command_sends_one_card_per_account() -> Result<(), Error> {
    let ctx = context(Arc::new(MemoryAccountStore::with(roster())));
    let replies = handle_command(&ctx, PrefixCommand::Accounts).await?;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].embed.title.as_deref(), Some("⚙️ alt1"));
    assert_eq!(replies[1].embed.title.as_deref(), Some("⚙️ alt2"));
    // buttons row + boss select row
    assert_eq!(replies[0].components.len(), 2);
    Ok(())
}

#[tokio::test]
async fn status_and_ultras_are_read_only() -> Result<(), Error> {
    let store = Arc::new(MemoryAccountStore::with(vec![
        account("X", &[("A", Completion::NotDone)]),
        account("Y", &[("A", Completion::Done)]),
    ]));
    let ctx = context(store.clone());

    let status = handle_command(&ctx, PrefixCommand::Status).await?;
    assert_eq!(status.len(), 1);
    assert_eq!(status[0].embed.title.as_deref(), Some("📊 Account Status"));
    assert!(status[0].components.is_empty());

    let ultras = handle_command(&ctx, PrefixCommand::Ultras).await?;
    assert_eq!(ultras[0].embed.description.as_deref(), Some("**A ❌**: X\n"));

    assert_eq!(store.save_count(), 0);
    Ok(())
}

#[tokio::test]
async fn help_lists_commands_with_configured_prefix() -> Result<(), Error> {
    let store = Arc::new(MemoryAccountStore::with(roster()));
    let ctx = EventContext::new(Arc::new(AccountService::new(store)), "?");
    let help = handle_command(&ctx, PrefixCommand::Help).await?;
    let text = help[0].embed.description.clone().unwrap_or_default();
    assert!(text.contains("`?status`"));
    assert!(text.contains("`?ultras`"));
    Ok(())
}

#[tokio::test]
async fn dailies_button_redraws_label_in_place() -> Result<(), Error> {
    let store = Arc::new(MemoryAccountStore::with(roster()));
    let ctx = context(store.clone());

    let response = handle_component(&ctx, &button_press("dailies:alt1"), "alice")
        .await?
        .unwrap();
    assert_eq!(response.kind, InteractionResponseType::UpdateMessage);
    assert_eq!(buttons(&response)[0].0, "Dailies: ✅");
    assert!(card_description(&response).contains("**Dailies:** ✅"));
    assert_eq!(store.snapshot()[0].dailies, Completion::Done);
    Ok(())
}

#[tokio::test]
async fn claim_button_flips_between_use_and_release() -> Result<(), Error> {
    let store = Arc::new(MemoryAccountStore::with(roster()));
    let ctx = context(store.clone());

    let claimed = handle_component(&ctx, &button_press("claim:alt2"), "alice")
        .await?
        .unwrap();
    assert_eq!(buttons(&claimed)[1], ("Release".to_string(), ButtonStyle::Danger));
    assert!(card_description(&claimed).contains("**User:** alice"));
    assert_eq!(store.snapshot()[1].claim().user(), Some("alice"));

    let released = handle_component(&ctx, &button_press("claim:alt2"), "bob")
        .await?
        .unwrap();
    assert_eq!(buttons(&released)[1], ("Use".to_string(), ButtonStyle::Success));
    assert!(card_description(&released).contains("**User:** -"));
    assert_eq!(store.snapshot()[1].claim(), &Claim::Available);
    Ok(())
}

#[tokio::test]
async fn boss_select_replaces_checklist() -> Result<(), Error> {
    let store = Arc::new(MemoryAccountStore::with(roster()));
    let ctx = context(store.clone());

    handle_component(&ctx, &select("ultras:alt1", &["A", "B"]), "alice").await?;
    let response = handle_component(&ctx, &select("ultras:alt1", &["C"]), "alice")
        .await?
        .unwrap();

    assert!(card_description(&response).ends_with("**Ultras:** A:❌, B:❌, C:✅"));
    let saved = &store.snapshot()[0];
    assert_eq!(saved.ultra_bosses.get("A"), Some(Completion::NotDone));
    assert_eq!(saved.ultra_bosses.get("C"), Some(Completion::Done));
    Ok(())
}

#[tokio::test]
async fn vanished_account_gets_ephemeral_notice() -> Result<(), Error> {
    let store = Arc::new(MemoryAccountStore::with(roster()));
    let ctx = context(store.clone());

    let response = handle_component(&ctx, &button_press("dailies:ghost"), "alice")
        .await?
        .unwrap();
    assert_eq!(response.kind, InteractionResponseType::ChannelMessageWithSource);
    let data = response.data.unwrap();
    assert_eq!(data.flags, Some(MessageFlags::EPHEMERAL));
    assert!(data.content.unwrap().contains("ghost"));
    assert_eq!(store.save_count(), 0);
    Ok(())
}

#[tokio::test]
async fn foreign_components_are_ignored() -> Result<(), Error> {
    let store = Arc::new(MemoryAccountStore::with(roster()));
    let ctx = context(store.clone());

    assert!(handle_component(&ctx, &button_press("poll:yes"), "alice").await?.is_none());
    assert_eq!(store.save_count(), 0);
    Ok(())
}

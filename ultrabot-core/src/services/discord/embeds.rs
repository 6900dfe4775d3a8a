use twilight_model::channel::message::Embed;
use twilight_util::builder::embed::EmbedBuilder;

use ultrabot_common::models::Account;

use crate::services::render;

pub const STATUS_COLOR: u32 = 0x00ff00;
pub const ACCOUNT_COLOR: u32 = 0x3498db;
pub const ULTRAS_COLOR: u32 = 0xff0000;
pub const HELP_COLOR: u32 = 0x95a5a6;

pub fn status_embed(accounts: &[Account]) -> Embed {
    EmbedBuilder::new()
        .title("📊 Account Status")
        .description(render::status_table(accounts))
        .color(STATUS_COLOR)
        .build()
}

pub fn account_embed(account: &Account) -> Embed {
    EmbedBuilder::new()
        .title(format!("⚙️ {}", account.username))
        .description(render::account_card(account))
        .color(ACCOUNT_COLOR)
        .build()
}

pub fn ultras_embed(accounts: &[Account]) -> Embed {
    let roster = render::ultra_roster(accounts);
    EmbedBuilder::new()
        .title("💀 Ultra Boss Progress")
        .description(render::ultra_roster_text(&roster))
        .color(ULTRAS_COLOR)
        .build()
}

pub fn help_embed(prefix: &str) -> Embed {
    let description = format!(
        "`{prefix}status` table of every account\n\
         `{prefix}accounts` one card per account with Dailies / Use / Ultra controls\n\
         `{prefix}ultras` which accounts still need each ultra boss\n\
         `{prefix}help` this message"
    );
    EmbedBuilder::new()
        .title("Commands")
        .description(description)
        .color(HELP_COLOR)
        .build()
}

// File: ultrabot-core/src/services/discord/components.rs

use twilight_model::channel::message::component::{
    ActionRow, Button, ButtonStyle, Component, SelectMenu, SelectMenuOption, SelectMenuType,
};

use ultrabot_common::models::Account;

pub const ULTRA_PLACEHOLDER: &str = "Select Ultra Bosses Done";

/// Which per-account control fired. Encoded into the component custom id
/// together with the account username, e.g. `claim:alt1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Dailies,
    Claim,
    Ultras,
}

impl ControlAction {
    fn tag(self) -> &'static str {
        match self {
            ControlAction::Dailies => "dailies",
            ControlAction::Claim => "claim",
            ControlAction::Ultras => "ultras",
        }
    }

    pub fn custom_id(self, username: &str) -> String {
        format!("{}:{}", self.tag(), username)
    }

    /// Splits on the first `:` so usernames may themselves contain colons.
    pub fn parse_custom_id(custom_id: &str) -> Option<(ControlAction, &str)> {
        let (tag, username) = custom_id.split_once(':')?;
        let action = match tag {
            "dailies" => ControlAction::Dailies,
            "claim" => ControlAction::Claim,
            "ultras" => ControlAction::Ultras,
            _ => return None,
        };
        Some((action, username))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlStyle {
    Primary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonControl {
    pub custom_id: String,
    pub label: String,
    pub style: ControlStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossOption {
    pub name: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossSelect {
    pub custom_id: String,
    pub placeholder: String,
    pub options: Vec<BossOption>,
}

/// The control set rendered under an account card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountControls {
    pub dailies: ButtonControl,
    pub claim: ButtonControl,
    /// Absent when the account has no bosses; a select menu needs at least one option.
    pub ultras: Option<BossSelect>,
}

pub fn dailies_label(account: &Account) -> String {
    format!("Dailies: {}", account.dailies.mark())
}

/// Describes the controls for `account` from its current state.
pub fn account_controls(account: &Account) -> AccountControls {
    let claim = if account.claim().is_in_use() {
        ("Release", ControlStyle::Danger)
    } else {
        ("Use", ControlStyle::Success)
    };

    let ultras = (!account.ultra_bosses.is_empty()).then(|| BossSelect {
        custom_id: ControlAction::Ultras.custom_id(&account.username),
        placeholder: ULTRA_PLACEHOLDER.to_string(),
        options: account
            .ultra_bosses
            .iter()
            .map(|(name, done)| BossOption { name: name.to_string(), done: done.is_done() })
            .collect(),
    });

    AccountControls {
        dailies: ButtonControl {
            custom_id: ControlAction::Dailies.custom_id(&account.username),
            label: dailies_label(account),
            style: ControlStyle::Primary,
        },
        claim: ButtonControl {
            custom_id: ControlAction::Claim.custom_id(&account.username),
            label: claim.0.to_string(),
            style: claim.1,
        },
        ultras,
    }
}

impl From<ControlStyle> for ButtonStyle {
    fn from(style: ControlStyle) -> Self {
        match style {
            ControlStyle::Primary => ButtonStyle::Primary,
            ControlStyle::Success => ButtonStyle::Success,
            ControlStyle::Danger => ButtonStyle::Danger,
        }
    }
}

impl From<ButtonControl> for Component {
    fn from(control: ButtonControl) -> Self {
        Component::Button(Button {
            custom_id: Some(control.custom_id),
            disabled: false,
            emoji: None,
            label: Some(control.label),
            style: control.style.into(),
            url: None,
            sku_id: None,
        })
    }
}

impl From<BossSelect> for Component {
    fn from(select: BossSelect) -> Self {
        let max_values = u8::try_from(select.options.len()).unwrap_or(u8::MAX);
        Component::SelectMenu(SelectMenu {
            channel_types: None,
            custom_id: select.custom_id,
            default_values: None,
            disabled: false,
            kind: SelectMenuType::Text,
            max_values: Some(max_values),
            min_values: Some(0),
            options: Some(
                select
                    .options
                    .into_iter()
                    .map(|opt| SelectMenuOption {
                        default: opt.done,
                        description: None,
                        emoji: None,
                        label: opt.name.clone(),
                        value: opt.name,
                    })
                    .collect(),
            ),
            placeholder: Some(select.placeholder),
        })
    }
}

impl AccountControls {
    /// Buttons share the first row; the select menu needs a row of its own.
    pub fn into_components(self) -> Vec<Component> {
        let mut rows = vec![Component::ActionRow(ActionRow {
            components: vec![self.dailies.into(), self.claim.into()],
        })];
        if let Some(select) = self.ultras {
            rows.push(Component::ActionRow(ActionRow { components: vec![select.into()] }));
        }
        rows
    }
}

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Error;

/// Done / Not Done, used for both the dailies flag and each ultra boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    #[serde(rename = "Done")]
    Done,
    #[serde(rename = "Not Done")]
    NotDone,
}

impl Completion {
    pub fn is_done(self) -> bool {
        matches!(self, Completion::Done)
    }

    pub fn toggled(self) -> Self {
        match self {
            Completion::Done => Completion::NotDone,
            Completion::NotDone => Completion::Done,
        }
    }

    /// Check mark / cross shown in tables, cards and button labels.
    pub fn mark(self) -> &'static str {
        match self {
            Completion::Done => "✅",
            Completion::NotDone => "❌",
        }
    }
}

impl From<bool> for Completion {
    fn from(done: bool) -> Self {
        if done { Completion::Done } else { Completion::NotDone }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Done => f.write_str("Done"),
            Completion::NotDone => f.write_str("Not Done"),
        }
    }
}

/// Who holds an account. The claiming user only exists while the account
/// is in use, so "in use without a user" cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    Available,
    InUse { user: String },
}

impl Claim {
    pub fn status_label(&self) -> &'static str {
        match self {
            Claim::Available => "Available",
            Claim::InUse { .. } => "In Use",
        }
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            Claim::Available => None,
            Claim::InUse { user } => Some(user.as_str()),
        }
    }

    pub fn is_in_use(&self) -> bool {
        matches!(self, Claim::InUse { .. })
    }
}

/// Result of pressing the Use/Release control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimChange {
    Claimed { user: String },
    /// `previous_user` may differ from whoever released it.
    Released { previous_user: String },
}

/// Ordered boss checklist. Boss names come from the account file and are
/// never added or removed while the bot runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UltraBosses(Vec<(String, Completion)>);

impl UltraBosses {
    pub fn iter(&self) -> impl Iterator<Item = (&str, Completion)> {
        self.0.iter().map(|(name, done)| (name.as_str(), *done))
    }

    pub fn get(&self, boss: &str) -> Option<Completion> {
        self.0.iter().find(|(name, _)| name == boss).map(|(_, done)| *done)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Full replace: every boss named in `selected` becomes Done, every other
    /// boss becomes Not Done. Names that are not on the checklist are ignored.
    pub fn apply_selection<S: AsRef<str>>(&mut self, selected: &[S]) {
        for (name, done) in &mut self.0 {
            *done = selected.iter().any(|s| s.as_ref() == name.as_str()).into();
        }
    }
}

impl<S: Into<String>> FromIterator<(S, Completion)> for UltraBosses {
    fn from_iter<I: IntoIterator<Item = (S, Completion)>>(iter: I) -> Self {
        UltraBosses(iter.into_iter().map(|(name, done)| (name.into(), done)).collect())
    }
}

impl Serialize for UltraBosses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, done) in &self.0 {
            map.serialize_entry(name, done)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UltraBosses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BossVisitor;

        impl<'de> Visitor<'de> for BossVisitor {
            type Value = UltraBosses;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of boss name to \"Done\" / \"Not Done\"")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, Completion)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, done)) = access.next_entry::<String, Completion>()? {
                    if entries.iter().any(|(existing, _)| *existing == name) {
                        return Err(serde::de::Error::custom(format!("duplicate boss '{name}'")));
                    }
                    entries.push((name, done));
                }
                Ok(UltraBosses(entries))
            }
        }

        deserializer.deserialize_map(BossVisitor)
    }
}

/// One shared game account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccountRecord", into = "AccountRecord")]
pub struct Account {
    pub username: String,
    claim: Claim,
    pub dailies: Completion,
    pub ultra_bosses: UltraBosses,
    /// Keys in the file that the bot does not use (passwords, notes...).
    /// Written back untouched on every save.
    extra: Map<String, Value>,
}

impl Account {
    /// A freshly provisioned account: available, dailies not done.
    pub fn new(username: impl Into<String>, ultra_bosses: UltraBosses) -> Self {
        Self {
            username: username.into(),
            claim: Claim::Available,
            dailies: Completion::NotDone,
            ultra_bosses,
            extra: Map::new(),
        }
    }

    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    pub fn extra_fields(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn toggle_dailies(&mut self) -> Completion {
        self.dailies = self.dailies.toggled();
        self.dailies
    }

    /// Available -> In Use by `actor`; In Use -> Available whoever `actor` is.
    pub fn toggle_claim(&mut self, actor: &str) -> Result<ClaimChange, Error> {
        match std::mem::replace(&mut self.claim, Claim::Available) {
            Claim::Available => {
                if actor.trim().is_empty() {
                    return Err(Error::Parse(format!(
                        "cannot claim '{}' without a user name",
                        self.username
                    )));
                }
                self.claim = Claim::InUse { user: actor.to_string() };
                Ok(ClaimChange::Claimed { user: actor.to_string() })
            }
            Claim::InUse { user } => Ok(ClaimChange::Released { previous_user: user }),
        }
    }

    pub fn set_completed_bosses<S: AsRef<str>>(&mut self, selected: &[S]) {
        self.ultra_bosses.apply_selection(selected);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum StatusField {
    Available,
    #[serde(rename = "In Use")]
    InUse,
}

/// On-disk shape of an account: `status` and `user` as separate fields,
/// with `""` standing for "no user".
#[derive(Serialize, Deserialize)]
struct AccountRecord {
    username: String,
    status: StatusField,
    #[serde(default, deserialize_with = "string_or_null")]
    user: String,
    dailies: Completion,
    #[serde(default)]
    ultra_bosses: UltraBosses,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn string_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TryFrom<AccountRecord> for Account {
    type Error = String;

    fn try_from(rec: AccountRecord) -> Result<Self, Self::Error> {
        let claim = match (rec.status, rec.user.trim().is_empty()) {
            (StatusField::Available, true) => Claim::Available,
            (StatusField::InUse, false) => Claim::InUse { user: rec.user },
            (StatusField::Available, false) => {
                return Err(format!(
                    "account '{}' is Available but lists user '{}'",
                    rec.username, rec.user
                ));
            }
            (StatusField::InUse, true) => {
                return Err(format!("account '{}' is In Use without a user", rec.username));
            }
        };
        Ok(Account {
            username: rec.username,
            claim,
            dailies: rec.dailies,
            ultra_bosses: rec.ultra_bosses,
            extra: rec.extra,
        })
    }
}

impl From<Account> for AccountRecord {
    fn from(acc: Account) -> Self {
        let (status, user) = match acc.claim {
            Claim::Available => (StatusField::Available, String::new()),
            Claim::InUse { user } => (StatusField::InUse, user),
        };
        AccountRecord {
            username: acc.username,
            status,
            user,
            dailies: acc.dailies,
            ultra_bosses: acc.ultra_bosses,
            extra: acc.extra,
        }
    }
}

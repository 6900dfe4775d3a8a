//! Plain-text views of the roster. Nothing here touches Discord types.

use ultrabot_common::models::{Account, Claim, Completion};

/// Placeholder shown when an account has no claiming user.
pub const NO_USER: &str = "-";

pub fn user_or_placeholder(claim: &Claim) -> &str {
    claim.user().unwrap_or(NO_USER)
}

/// Fixed-width overview, one row per account, wrapped in a code block so the
/// columns line up in a chat client.
pub fn status_table(accounts: &[Account]) -> String {
    let mut out = String::from("```\n");
    out.push_str(&format!("{:<12} {:<12} {:<8} {:<15}\n", "Account", "Status", "Dailies", "User"));
    let rows: Vec<String> = accounts
        .iter()
        .map(|acc| {
            format!(
                "{:<12} {:<12} {:<8} {:<15}",
                acc.username,
                acc.claim().status_label(),
                acc.dailies.mark(),
                user_or_placeholder(acc.claim())
            )
        })
        .collect();
    out.push_str(&rows.join("\n"));
    out.push_str("\n```");
    out
}

/// `boss:✅, boss:❌, ...` in checklist order.
pub fn ultra_summary(account: &Account) -> String {
    account
        .ultra_bosses
        .iter()
        .map(|(boss, done)| format!("{boss}:{}", done.mark()))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn account_card(account: &Account) -> String {
    format!(
        "**Status:** {}\n**User:** {}\n**Dailies:** {}\n**Ultras:** {}",
        account.claim().status_label(),
        user_or_placeholder(account.claim()),
        account.dailies.mark(),
        ultra_summary(account)
    )
}

/// One boss and the accounts that still have it open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossProgress {
    pub boss: String,
    pub pending: Vec<String>,
}

impl BossProgress {
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Groups every boss seen across the roster (first-seen order) with the
/// usernames that have not completed it.
pub fn ultra_roster(accounts: &[Account]) -> Vec<BossProgress> {
    let mut roster: Vec<BossProgress> = Vec::new();
    for acc in accounts {
        for (boss, done) in acc.ultra_bosses.iter() {
            let idx = match roster.iter().position(|p| p.boss == boss) {
                Some(idx) => idx,
                None => {
                    roster.push(BossProgress { boss: boss.to_string(), pending: Vec::new() });
                    roster.len() - 1
                }
            };
            if done == Completion::NotDone {
                roster[idx].pending.push(acc.username.clone());
            }
        }
    }
    roster
}

pub fn ultra_roster_text(roster: &[BossProgress]) -> String {
    roster
        .iter()
        .map(|p| {
            if p.is_complete() {
                format!("**{} ✅**: All done\n", p.boss)
            } else {
                format!("**{} ❌**: {}\n", p.boss, p.pending.join(", "))
            }
        })
        .collect()
}

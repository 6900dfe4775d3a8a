use std::sync::Arc;

use crate::services::account_service::AccountService;

/// EventContext carries everything a command or control handler needs,
/// so handlers never reach for shared module-level state.
#[derive(Clone)]
pub struct EventContext {
    pub account_service: Arc<AccountService>,
    pub command_prefix: String,
}

impl EventContext {
    pub fn new(account_service: Arc<AccountService>, command_prefix: impl Into<String>) -> Self {
        Self {
            account_service,
            command_prefix: command_prefix.into(),
        }
    }
}

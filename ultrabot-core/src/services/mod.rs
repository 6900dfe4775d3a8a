pub mod account_service;
pub mod render;
pub mod event_context;
pub mod discord;

pub use account_service::AccountService;
pub use event_context::EventContext;

pub mod commands;
pub mod components;
pub mod embeds;
pub mod interactions;

pub use commands::{handle_command, OutgoingMessage, PrefixCommand};
pub use interactions::handle_component;

pub mod json;

pub use json::accounts::JsonAccountStore;

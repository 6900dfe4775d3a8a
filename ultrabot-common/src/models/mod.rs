pub mod account;

pub use account::{Account, Claim, ClaimChange, Completion, UltraBosses};

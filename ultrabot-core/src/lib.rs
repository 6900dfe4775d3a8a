// src/lib.rs

pub mod repositories;
pub mod platforms;
pub mod services;

pub use ultrabot_common::error::Error;

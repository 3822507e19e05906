pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod network;
pub mod sheet;
pub mod types;

pub use error::{Result, SocialsError};

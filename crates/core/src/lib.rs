pub mod config;
pub mod emotion;
pub mod message;

pub use message::{ChatMessage, MessageId, SYSTEM_USERNAME};

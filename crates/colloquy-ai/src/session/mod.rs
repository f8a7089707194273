//! Conversation session management.
//!
//! A [`ChatOrchestrator`] owns one session's history and system prompt,
//! builds each outbound sequence, calls the backend, and folds the result
//! (reply or diagnostic) back into history as a complete [`Turn`].

mod chat;
mod manager;
mod types;


pub use manager::ChatOrchestrator;
pub use types::{BackendInfo, ChatState, Session, Turn, DIAGNOSTIC_PREFIX};

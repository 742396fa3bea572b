//! Assistant worker API: request/response wire types, the backend seam and
//! the stored chat history model.

pub mod client;
pub mod history;

pub use client::{AssistantBackend, CartItemPayload, HttpBackend};
pub use history::{ChatMessage, HistoryEntry, Role, StructuredRequest};

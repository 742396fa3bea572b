//! # Hermes
//!
//! Core of an AI shopping assistant for a storefront chat widget. The
//! assistant replies with free-form prose that may carry embedded JSON action
//! directives; this crate extracts them, applies them to a session-owned
//! cart, and renders the confirmation messages the shopper sees.
//!
//! ```text
//! user message ──► llm (worker API) ──► raw reply
//!                                          │
//!                        engine: extract → decode → dispatch
//!                                          │
//!                          session ──► messages + cart + redirect
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod llm;
pub mod session;

pub use cart::{Cart, LineItem};
pub use catalog::{CatalogClient, Product};
pub use config::AssistantConfig;
pub use engine::{handle_reply, ActionDirective, DispatchOutcome, ReplyOutcome};
pub use error::{CatalogError, ClientError, ConfigError};
pub use llm::{AssistantBackend, ChatMessage, HistoryEntry, HttpBackend, Role};
pub use session::{ChatSession, CheckoutRedirect, Turn};

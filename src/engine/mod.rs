//! Response-interpretation pipeline.
//!
//! ```text
//! raw reply → extract (JSON span) → directive decode → dispatch (cart) → messages
//! ```
//!
//! Everything here is pure and synchronous; the network lives in `llm` and
//! the session driver in `session`.

pub mod directive;
pub mod dispatch;
pub mod extract;
pub mod reply;
pub mod templates;
pub mod types;

pub use directive::ActionDirective;
pub use dispatch::dispatch;
pub use extract::{extract, Extraction};
pub use reply::handle_reply;
pub use types::{DispatchOutcome, ReplyOutcome};

//! Shared result structs for the dispatch pipeline.

use crate::catalog::Product;

/// What one dispatched directive produced: the confirmation message, whether
/// the action navigates away, and an optional product to present in detail.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    pub message: String,
    pub navigates: bool,
    pub detail: Option<Product>,
}

impl DispatchOutcome {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            navigates: false,
            detail: None,
        }
    }
}

/// Everything one assistant reply turned into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyOutcome {
    /// Chat messages in presentation order.
    pub messages: Vec<String>,
    /// True when a directive asked to leave the current view.
    pub navigate: bool,
    /// Products the caller should present in full detail.
    pub details: Vec<Product>,
}

//! Turns one raw assistant reply into the messages the user sees.

use tracing::debug;

use crate::cart::Cart;
use crate::config::AssistantConfig;

use super::directive::ActionDirective;
use super::dispatch::dispatch;
use super::extract::extract;
use super::templates;
use super::types::ReplyOutcome;

/// Orchestrates one reply: extract the embedded JSON, decode directives,
/// dispatch them in order against `cart`, then merge the leftover narrative.
pub fn handle_reply(raw: &str, cart: &mut Cart, config: &AssistantConfig) -> ReplyOutcome {
    let extraction = extract(raw);
    let directives = match &extraction.parsed {
        Some(parsed) => ActionDirective::normalize(parsed),
        None => Vec::new(),
    };

    // No actionable directive: the whole reply is ordinary prose, shown as-is.
    if directives.is_empty() {
        let mut outcome = ReplyOutcome::default();
        if !raw.trim().is_empty() {
            outcome.messages.push(raw.to_string());
        }
        return outcome;
    }

    debug!(count = directives.len(), "Dispatching directives from reply");
    let narrative = extraction.remaining.trim().to_string();
    let directive_count = directives.len();
    let mut add_names: Vec<String> = Vec::new();
    let mut outcome = ReplyOutcome::default();

    for directive in directives {
        if let ActionDirective::AddToCart { product_name, .. } = &directive {
            add_names.push(product_name.clone());
        }
        let is_detail = matches!(directive, ActionDirective::ViewProductDetails { .. });
        let dispatched = dispatch(directive, cart, config);

        if is_detail {
            // Detail presentations prefer the assistant's own prose over the
            // templated default.
            let message = if narrative.is_empty() {
                dispatched.message
            } else {
                narrative.clone()
            };
            outcome.messages.push(message);
            if let Some(product) = dispatched.detail {
                outcome.details.push(product);
            }
            continue;
        }

        outcome.messages.push(dispatched.message);
        if dispatched.navigates {
            // Navigation is terminal for this turn; later directives are
            // dropped, earlier mutations stand.
            outcome.navigate = true;
            return outcome;
        }
    }

    if !narrative.is_empty() {
        // Only the assistant's own add echo passes through; other leftover
        // prose would restate the dispatch confirmations above.
        if templates::echoes_add_confirmation(&narrative) {
            outcome.messages.push(narrative);
        }
    } else {
        outcome
            .messages
            .push(templates::default_narrative(directive_count, &add_names));
    }
    outcome
}

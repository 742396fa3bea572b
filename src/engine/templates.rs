//! User-visible message skeletons in the assistant's voice.

use chrono::{DateTime, Local};

use crate::cart::Cart;
use crate::config::CurrencyConfig;

/// Marker the orchestrator checks to let the assistant's own add-to-cart echo
/// through; any other leftover prose would repeat the dispatch confirmations.
pub const ADD_ECHO_MARKER: &str = "i'll add";

pub fn greeting(persona: &str) -> String {
    format!("Hi! I'm {persona}, this store's AI shopping assistant. Ask me anything about our products! 🤗")
}

pub fn added(quantity: u32, name: &str, color: Option<&str>) -> String {
    match color {
        Some(color) => format!("Okay, I'll add {quantity} {name} in {color} to your cart."),
        None => format!("Okay, I'll add {quantity} {name} to your cart."),
    }
}

pub fn remove_needs_name() -> &'static str {
    "Sorry, I can't remove an item without a product name."
}

pub fn removed(quantity: u32, name: &str, color: Option<&str>) -> String {
    match color {
        Some(color) => format!("Okay, I removed {quantity} {name} in {color} from your cart."),
        None => format!("Okay, I removed {quantity} {name} from your cart."),
    }
}

pub fn not_found(name: &str, color: Option<&str>) -> String {
    match color {
        Some(color) => format!("Sorry, I couldn't find {name} in {color} in your cart."),
        None => format!("Sorry, I couldn't find {name} in your cart."),
    }
}

pub fn update_needs_fields() -> &'static str {
    "Sorry, I need a product name and a new quantity to update your cart."
}

pub fn quantity_changed(name: &str, from: u32, to: u32) -> String {
    format!("Okay, I updated {name} from {from} to {to} pieces.")
}

pub fn line_removed(name: &str) -> String {
    format!("Okay, I removed {name} from your cart.")
}

pub fn emptied() -> &'static str {
    "Okay, your cart has been emptied."
}

pub fn cart_empty() -> &'static str {
    "Your cart is still empty. Have a look around the store first! 😊"
}

/// Line-by-line summary with a grouped total and a follow-up question.
pub fn cart_summary(cart: &Cart, currency: &CurrencyConfig) -> String {
    let mut lines = vec!["Here's what's in your cart right now:".to_string()];
    for item in cart.items() {
        let color_tag = item
            .color
            .as_deref()
            .map(|color| format!(" (Color: {color})"))
            .unwrap_or_default();
        lines.push(format!(
            "- {}x {}{} @ {}",
            item.quantity,
            item.name,
            color_tag,
            price_tag(item.price, currency)
        ));
    }
    lines.push(format!("\nTotal: {}", price_tag(cart.total(), currency)));
    lines.push("\nAnything you'd like to change, or shall we continue to checkout?".to_string());
    lines.join("\n")
}

pub fn checkout_started() -> &'static str {
    "Great! Taking you to the checkout page now. One moment..."
}

pub fn details_for(title: &str) -> String {
    format!("Here are the details for {title}:")
}

pub fn not_understood() -> &'static str {
    "Sorry, I don't understand that request."
}

pub fn detail_question(title: &str) -> String {
    format!("Could I see the details for {title}?")
}

pub fn rate_limited(detail: Option<&str>) -> String {
    match detail {
        Some(detail) if !detail.trim().is_empty() => detail.to_string(),
        _ => "You've reached the daily chat limit. Please try again tomorrow!".to_string(),
    }
}

pub fn trouble(detail: &str) -> String {
    format!("Sorry, something went wrong: {detail}")
}

pub fn connection_trouble() -> &'static str {
    "My connection is acting up right now. Please try again later! 😔"
}

pub fn echoes_add_confirmation(narrative: &str) -> bool {
    narrative.to_lowercase().contains(ADD_ECHO_MARKER)
}

/// Synthesized prose for replies that carried directives but no narrative.
pub fn default_narrative(directive_count: usize, add_names: &[String]) -> String {
    if directive_count == 1 && add_names.len() == 1 {
        format!("Okay, I'll add {} to your shopping cart.", add_names[0])
    } else if add_names.len() > 1 {
        "Okay, I'll add the items you mentioned to your shopping cart.".to_string()
    } else {
        "Your request has been processed.".to_string()
    }
}

/// Presence label shown when the assistant is unreachable, e.g. "Active 14:05".
pub fn active_label(at: DateTime<Local>) -> String {
    format!("Active {}", at.format("%H:%M"))
}

pub fn price_tag(value: f64, currency: &CurrencyConfig) -> String {
    format!(
        "{} {}",
        currency.prefix,
        format_amount(value, currency.thousands_separator)
    )
}

/// Thousands-grouped amount, id-ID style by default: `1250500.5` with a `.`
/// separator renders as `1.250.500,5`. Fractions are kept to two digits.
pub fn format_amount(value: f64, separator: char) -> String {
    let negative = value < 0.0;
    let cents_total = (value.abs() * 100.0).round() as u64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    if cents > 0 {
        let decimal_mark = if separator == '.' { ',' } else { '.' };
        grouped.push(decimal_mark);
        if cents % 10 == 0 {
            grouped.push_str(&(cents / 10).to_string());
        } else {
            grouped.push_str(&format!("{cents:02}"));
        }
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_group_thousands() {
        assert_eq!(format_amount(0.0, '.'), "0");
        assert_eq!(format_amount(999.0, '.'), "999");
        assert_eq!(format_amount(15_600.0, '.'), "15.600");
        assert_eq!(format_amount(1_234_567.0, '.'), "1.234.567");
        assert_eq!(format_amount(1_234_567.0, ','), "1,234,567");
    }

    #[test]
    fn fractional_amounts_use_the_opposite_mark() {
        assert_eq!(format_amount(15_600.5, '.'), "15.600,5");
        assert_eq!(format_amount(15_600.25, '.'), "15.600,25");
        assert_eq!(format_amount(15_600.25, ','), "15,600.25");
        // rounding across the unit boundary carries into the whole part
        assert_eq!(format_amount(999.999, '.'), "1.000");
    }

    #[test]
    fn add_echo_marker_matches_case_insensitively() {
        assert!(echoes_add_confirmation("Sure, I'll add two of those."));
        assert!(echoes_add_confirmation("OKAY, I'LL ADD IT NOW"));
        assert!(!echoes_add_confirmation("Your cart looks great."));
    }

    #[test]
    fn default_narratives_follow_add_counts() {
        let one = vec!["Shirt".to_string()];
        assert_eq!(
            default_narrative(1, &one),
            "Okay, I'll add Shirt to your shopping cart."
        );

        let two = vec!["Shirt".to_string(), "Hat".to_string()];
        assert_eq!(
            default_narrative(2, &two),
            "Okay, I'll add the items you mentioned to your shopping cart."
        );

        assert_eq!(default_narrative(1, &[]), "Your request has been processed.");
    }

    #[test]
    fn synthesized_add_narrative_carries_the_echo_marker() {
        let narrative = default_narrative(1, &["Shirt".to_string()]);
        assert!(echoes_add_confirmation(&narrative));
    }
}

//! Product records as served by the storefront feed.

use serde::{Deserialize, Serialize};

/// One product from the read-only feed.
///
/// The feed preformats money: `discount` is the effective price shown to the
/// customer, `price` the normal price before discount. Both arrive as display
/// strings, not numbers, and are passed through untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub title: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub discount: String,
    #[serde(rename = "stok", default)]
    pub stock: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub styles: Vec<StyleVariant>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StyleVariant {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Stock marker the feed uses for purchasable products.
pub const STOCK_AVAILABLE: &str = "tersedia";

impl Product {
    pub fn is_available(&self) -> bool {
        self.stock.eq_ignore_ascii_case(STOCK_AVAILABLE)
    }

    /// Case-insensitive match against title or description.
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.title.to_lowercase().contains(&keyword)
            || self.description.to_lowercase().contains(&keyword)
    }

    /// Plain-text rendering for chat: title, price (with normal price when
    /// discounted), stock, description and variant names.
    pub fn as_text(&self, currency_prefix: &str) -> String {
        let mut details = format!("*{}*\n", self.title);
        if !self.price.is_empty() && self.price != self.discount {
            details.push_str(&format!(
                "Price: {currency} {} (normal price: {currency} {})\n",
                self.discount,
                self.price,
                currency = currency_prefix
            ));
        } else {
            details.push_str(&format!("Price: {} {}\n", currency_prefix, self.discount));
        }
        details.push_str(&format!("Stock: {}\n", self.stock));
        if !self.description.is_empty() {
            details.push_str(&format!("Description: {}\n", self.description));
        }
        if !self.styles.is_empty() {
            let variants: Vec<&str> = self.styles.iter().map(|s| s.name.as_str()).collect();
            details.push_str(&format!("Color variants: {}\n", variants.join(", ")));
        }
        details
    }
}

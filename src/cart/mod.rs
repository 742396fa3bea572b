//! Session-owned shopping cart state.
//!
//! The cart is an explicit value owned by the conversation session and passed
//! into every dispatch call. Mutation is synchronous; a directive earlier in a
//! reply is visible to every directive after it.


/// One cart line. Identity is the (name, color, size) tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub image: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub weight: Option<f64>,
}

impl LineItem {
    /// Quantity is clamped to at least 1 and price to at least 0; a line item
    /// never exists with a non-positive quantity.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price: if price.is_finite() { price.max(0.0) } else { 0.0 },
            quantity: clamp_quantity(quantity),
            image: None,
            color: None,
            size: None,
            weight: None,
        }
    }

    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: Option<String>) -> Self {
        self.size = size;
        self
    }

    pub fn with_weight(mut self, weight: Option<f64>) -> Self {
        self.weight = weight;
        self
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Filter match: an unset color/size filter matches anything, a set one
    /// must equal the line's value exactly.
    pub fn matches(&self, name: &str, color: Option<&str>, size: Option<&str>) -> bool {
        if self.name != name {
            return false;
        }
        if let Some(color) = color {
            if self.color.as_deref() != Some(color) {
                return false;
            }
        }
        if let Some(size) = size {
            if self.size.as_deref() != Some(size) {
                return false;
            }
        }
        true
    }

    fn same_identity(&self, other: &LineItem) -> bool {
        self.name == other.name && self.color == other.color && self.size == other.size
    }
}

fn clamp_quantity(quantity: i64) -> u32 {
    quantity.clamp(1, i64::from(u32::MAX)) as u32
}

/// Outcome of a quantity update, so the caller can word its confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated { from: u32, to: u32 },
    Removed { had: u32 },
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines, not units.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Append a line, or when `merge_duplicates` is set, fold it into an
    /// existing line with the same (name, color, size) identity.
    pub fn add(&mut self, item: LineItem, merge_duplicates: bool) {
        if merge_duplicates {
            if let Some(existing) = self
                .items
                .iter_mut()
                .find(|line| line.same_identity(&item))
            {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                return;
            }
        }
        self.items.push(item);
    }

    /// Remove every line matching name (and color, when given). Returns the
    /// total quantity removed across matches; 0 means nothing matched.
    pub fn remove_matching(&mut self, name: &str, color: Option<&str>) -> u32 {
        let mut removed = 0u32;
        self.items.retain(|item| {
            if item.matches(name, color, None) {
                removed = removed.saturating_add(item.quantity);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Set the quantity of the first line matching name + optional color +
    /// optional size. A target of 0 or below removes the line entirely.
    pub fn set_quantity(
        &mut self,
        name: &str,
        color: Option<&str>,
        size: Option<&str>,
        target: i64,
    ) -> Option<QuantityChange> {
        let index = self
            .items
            .iter()
            .position(|item| item.matches(name, color, size))?;
        if target > 0 {
            let from = self.items[index].quantity;
            let to = clamp_quantity(target);
            self.items[index].quantity = to;
            Some(QuantityChange::Updated { from, to })
        } else {
            let removed = self.items.remove(index);
            Some(QuantityChange::Removed {
                had: removed.quantity,
            })
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

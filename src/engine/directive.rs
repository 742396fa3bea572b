//! Closed set of actions an assistant reply may request.
//!
//! The wire shape is `{ "action": "<kind>", ...fields }` or an array of such
//! objects. Variant fields accept the storefront's Indonesian field names
//! (`warna`, `ukuran`, `berat`) as aliases next to the English ones. Decoding
//! never fails outward: an unrecognized kind, or a known kind with an
//! undecodable payload, collapses into `Unknown` and is answered with a soft
//! "not understood" message downstream.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::catalog::Product;

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ActionDirective {
    #[serde(rename_all = "camelCase")]
    AddToCart {
        product_name: String,
        #[serde(default)]
        price: f64,
        #[serde(default = "default_quantity")]
        quantity: i64,
        #[serde(default)]
        image: Option<String>,
        #[serde(default, alias = "warna")]
        color: Option<String>,
        #[serde(default, alias = "ukuran")]
        size: Option<String>,
        #[serde(default, alias = "berat")]
        weight: Option<f64>,
    },
    /// Name and color stay optional here; dispatch answers a missing name
    /// with a message instead of refusing to decode.
    #[serde(rename_all = "camelCase")]
    RemoveFromCart {
        #[serde(default)]
        product_name: Option<String>,
        #[serde(default, alias = "warna")]
        color: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    UpdateCartQuantity {
        #[serde(default)]
        product_name: Option<String>,
        #[serde(default)]
        new_quantity: Option<i64>,
        #[serde(default, alias = "warna")]
        color: Option<String>,
        #[serde(default, alias = "ukuran")]
        size: Option<String>,
    },
    EmptyCart,
    ViewCart,
    Checkout,
    ViewProductDetails {
        product: Product,
    },
    #[serde(skip)]
    Unknown {
        kind: String,
    },
}

fn default_quantity() -> i64 {
    1
}

impl ActionDirective {
    /// Decode one JSON value into a directive, falling back to `Unknown`.
    pub fn from_value(value: &Value) -> ActionDirective {
        let kind = value
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match serde_json::from_value(value.clone()) {
            Ok(directive) => directive,
            Err(error) => {
                warn!(kind = %kind, %error, "Undecodable action directive");
                ActionDirective::Unknown { kind }
            }
        }
    }

    /// Normalize an extracted JSON value into a directive list: arrays decode
    /// element-wise, a single object with a string `action` field wraps into
    /// a one-element list, anything else yields no directives.
    pub fn normalize(parsed: &Value) -> Vec<ActionDirective> {
        match parsed {
            Value::Array(items) => items.iter().map(Self::from_value).collect(),
            Value::Object(map) if map.get("action").map_or(false, Value::is_string) => {
                vec![Self::from_value(parsed)]
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn add_to_cart_decodes_with_defaults() {
        let directive = ActionDirective::from_value(&json!({
            "action": "addToCart",
            "productName": "Shirt",
            "price": 50000
        }));
        assert_eq!(
            directive,
            ActionDirective::AddToCart {
                product_name: "Shirt".to_string(),
                price: 50000.0,
                quantity: 1,
                image: None,
                color: None,
                size: None,
                weight: None,
            }
        );
    }

    #[test]
    fn add_to_cart_carries_variant_fields() {
        let directive = ActionDirective::from_value(&json!({
            "action": "addToCart",
            "productName": "Shirt",
            "price": 50000,
            "quantity": 2,
            "color": "Blue",
            "size": "L",
            "weight": 0.3
        }));
        match directive {
            ActionDirective::AddToCart {
                quantity,
                color,
                size,
                weight,
                ..
            } => {
                assert_eq!(quantity, 2);
                assert_eq!(color.as_deref(), Some("Blue"));
                assert_eq!(size.as_deref(), Some("L"));
                assert_eq!(weight, Some(0.3));
            }
            other => panic!("unexpected directive: {:?}", other),
        }
    }

    #[test]
    fn variant_fields_decode_from_indonesian_wire_names() {
        let directive = ActionDirective::from_value(&json!({
            "action": "addToCart",
            "productName": "Kemeja Flanel",
            "price": 95000,
            "warna": "Merah",
            "ukuran": "L",
            "berat": 0.3
        }));
        match directive {
            ActionDirective::AddToCart {
                color,
                size,
                weight,
                ..
            } => {
                assert_eq!(color.as_deref(), Some("Merah"));
                assert_eq!(size.as_deref(), Some("L"));
                assert_eq!(weight, Some(0.3));
            }
            other => panic!("unexpected directive: {:?}", other),
        }

        let directive = ActionDirective::from_value(&json!({
            "action": "removeFromCart",
            "productName": "Kemeja Flanel",
            "warna": "Merah"
        }));
        assert_eq!(
            directive,
            ActionDirective::RemoveFromCart {
                product_name: Some("Kemeja Flanel".to_string()),
                color: Some("Merah".to_string()),
            }
        );
    }

    #[test]
    fn update_uses_its_wire_tag_and_field_names() {
        let directive = ActionDirective::from_value(&json!({
            "action": "updateCartQuantity",
            "productName": "Shirt",
            "newQuantity": 0
        }));
        assert_eq!(
            directive,
            ActionDirective::UpdateCartQuantity {
                product_name: Some("Shirt".to_string()),
                new_quantity: Some(0),
                color: None,
                size: None,
            }
        );
    }

    #[test]
    fn bare_kinds_decode_from_tag_alone() {
        for (raw, expected) in [
            (json!({"action": "emptyCart"}), ActionDirective::EmptyCart),
            (json!({"action": "viewCart"}), ActionDirective::ViewCart),
            (json!({"action": "checkout"}), ActionDirective::Checkout),
        ] {
            assert_eq!(ActionDirective::from_value(&raw), expected);
        }
    }

    #[test]
    fn unknown_tag_keeps_its_kind() {
        let directive = ActionDirective::from_value(&json!({"action": "teleport"}));
        assert_eq!(
            directive,
            ActionDirective::Unknown {
                kind: "teleport".to_string()
            }
        );
    }

    #[test]
    fn known_tag_with_broken_payload_degrades_to_unknown() {
        // addToCart without a product name is not a usable add
        let directive = ActionDirective::from_value(&json!({"action": "addToCart"}));
        assert_eq!(
            directive,
            ActionDirective::Unknown {
                kind: "addToCart".to_string()
            }
        );

        // viewProductDetails without its product payload
        let directive = ActionDirective::from_value(&json!({"action": "viewProductDetails"}));
        assert_eq!(
            directive,
            ActionDirective::Unknown {
                kind: "viewProductDetails".to_string()
            }
        );
    }

    #[test]
    fn view_product_details_carries_the_product() {
        let directive = ActionDirective::from_value(&json!({
            "action": "viewProductDetails",
            "product": {
                "title": "Kemeja Flanel",
                "price": "120.000",
                "discount": "95.000",
                "stok": "tersedia"
            }
        }));
        match directive {
            ActionDirective::ViewProductDetails { product } => {
                assert_eq!(product.title, "Kemeja Flanel");
                assert!(product.is_available());
            }
            other => panic!("unexpected directive: {:?}", other),
        }
    }

    #[test]
    fn normalize_handles_arrays_objects_and_noise() {
        let list = ActionDirective::normalize(&json!([
            {"action": "emptyCart"},
            {"action": "levitate"},
            "just a string"
        ]));
        assert_eq!(list.len(), 3);
        assert_eq!(list[0], ActionDirective::EmptyCart);
        assert_eq!(
            list[1],
            ActionDirective::Unknown {
                kind: "levitate".to_string()
            }
        );
        // array noise still dispatches, as an unknown with no kind
        assert_eq!(
            list[2],
            ActionDirective::Unknown {
                kind: String::new()
            }
        );

        let single = ActionDirective::normalize(&json!({"action": "viewCart"}));
        assert_eq!(single, vec![ActionDirective::ViewCart]);

        assert!(ActionDirective::normalize(&json!({"foo": 1})).is_empty());
        assert!(ActionDirective::normalize(&json!({"action": 5})).is_empty());
        assert!(ActionDirective::normalize(&json!(42)).is_empty());
    }
}

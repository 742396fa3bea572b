//! Applies one directive to the cart and words the confirmation.

use tracing::{debug, warn};

use crate::cart::{Cart, LineItem, QuantityChange};
use crate::config::AssistantConfig;

use super::directive::ActionDirective;
use super::templates;
use super::types::DispatchOutcome;

/// Mutates `cart` in place for the mutating kinds. Soft failures (missing
/// fields, no matching line, unknown kind) come back as ordinary messages,
/// never as errors, and leave the cart untouched.
pub fn dispatch(
    directive: ActionDirective,
    cart: &mut Cart,
    config: &AssistantConfig,
) -> DispatchOutcome {
    match directive {
        ActionDirective::AddToCart {
            product_name,
            price,
            quantity,
            image,
            color,
            size,
            weight,
        } => {
            let item = LineItem::new(product_name, price, quantity)
                .with_image(image)
                .with_color(color)
                .with_size(size)
                .with_weight(weight);
            let message = templates::added(item.quantity, &item.name, item.color.as_deref());
            debug!(name = %item.name, quantity = item.quantity, "Adding cart line");
            cart.add(item, config.cart.merge_duplicates);
            DispatchOutcome::message(message)
        }

        ActionDirective::RemoveFromCart {
            product_name,
            color,
        } => {
            let Some(name) = product_name else {
                return DispatchOutcome::message(templates::remove_needs_name());
            };
            let removed = cart.remove_matching(&name, color.as_deref());
            if removed > 0 {
                debug!(name = %name, removed, "Removed cart lines");
                DispatchOutcome::message(templates::removed(removed, &name, color.as_deref()))
            } else {
                DispatchOutcome::message(templates::not_found(&name, color.as_deref()))
            }
        }

        ActionDirective::UpdateCartQuantity {
            product_name,
            new_quantity,
            color,
            size,
        } => {
            let (Some(name), Some(target)) = (product_name, new_quantity) else {
                return DispatchOutcome::message(templates::update_needs_fields());
            };
            match cart.set_quantity(&name, color.as_deref(), size.as_deref(), target) {
                Some(QuantityChange::Updated { from, to }) => {
                    debug!(name = %name, from, to, "Updated line quantity");
                    DispatchOutcome::message(templates::quantity_changed(&name, from, to))
                }
                Some(QuantityChange::Removed { .. }) => {
                    debug!(name = %name, "Removed line via zero target quantity");
                    DispatchOutcome::message(templates::line_removed(&name))
                }
                None => DispatchOutcome::message(templates::not_found(&name, color.as_deref())),
            }
        }

        ActionDirective::EmptyCart => {
            debug!("Emptying cart");
            cart.clear();
            DispatchOutcome::message(templates::emptied())
        }

        ActionDirective::ViewCart => {
            if cart.is_empty() {
                DispatchOutcome::message(templates::cart_empty())
            } else {
                DispatchOutcome::message(templates::cart_summary(cart, &config.currency))
            }
        }

        ActionDirective::Checkout => DispatchOutcome {
            message: templates::checkout_started().to_string(),
            navigates: true,
            detail: None,
        },

        ActionDirective::ViewProductDetails { product } => DispatchOutcome {
            message: templates::details_for(&product.title),
            navigates: false,
            detail: Some(product),
        },

        ActionDirective::Unknown { kind } => {
            warn!(kind = %kind, "Assistant requested an unknown action");
            DispatchOutcome::message(templates::not_understood())
        }
    }
}

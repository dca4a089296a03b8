//! Cart commands.
//!
//! Each invocation rehydrates the cart from client storage, applies one
//! operation and exits; the store writes the result back.

use fsblends_core::{CandleSize, ContainerColor, Quantity, Selection};
use fsblends_storefront::{AppState, CartStore, ClientStorage};

/// Errors specific to cart commands.
#[derive(Debug, thiserror::Error)]
pub enum CartCommandError {
    /// No line with this id.
    #[error("No cart line with id {0}")]
    UnknownLine(String),
}

/// Print line items, unit count and subtotal.
#[allow(clippy::print_stdout)]
pub fn show<S: ClientStorage>(cart: &CartStore<S>) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for line in cart.line_items() {
        println!(
            "{:<36} {:<24} {:>3} x {:>8} = {:>9}",
            line.line_id.as_str(),
            line.display_name,
            line.quantity,
            line.unit_price.display(),
            line.line_total().display()
        );
    }
    println!("{} item(s), subtotal {}", cart.unit_count(), cart.subtotal());
}

/// Resolve a selection and add it to the cart.
///
/// Single-variant products need no size or color.
///
/// # Errors
///
/// Returns an error if the product is unknown or the selection does not
/// resolve to an in-stock variant.
#[allow(clippy::print_stdout)]
pub fn add<S: ClientStorage>(
    state: &mut AppState<S>,
    slug: &str,
    size: Option<CandleSize>,
    color: Option<ContainerColor>,
    qty: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = state.resolver();
    let mut selection = Selection::new(size, color);
    if selection.is_empty() && !resolver.needs_choice(slug) {
        selection = resolver.default_selection(slug);
    }

    let line = state.add_selection(slug, selection, Quantity::clamped(qty))?;
    let cart = state.cart();
    if let Some(item) = cart.line(line.as_str()) {
        println!("{line}: {} x {}", item.quantity, item.display_name);
    }
    println!("{} item(s), subtotal {}", cart.unit_count(), cart.subtotal());
    Ok(())
}

/// Add one unit to a line.
///
/// # Errors
///
/// Returns `UnknownLine` if the cart has no such line.
pub fn increment<S: ClientStorage>(
    cart: &mut CartStore<S>,
    line: &str,
) -> Result<(), CartCommandError> {
    ensure_line(cart, line)?;
    cart.increment_item(line);
    show(cart);
    Ok(())
}

/// Remove one unit from a line.
///
/// # Errors
///
/// Returns `UnknownLine` if the cart has no such line.
pub fn decrement<S: ClientStorage>(
    cart: &mut CartStore<S>,
    line: &str,
) -> Result<(), CartCommandError> {
    ensure_line(cart, line)?;
    cart.decrement_item(line);
    show(cart);
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns `UnknownLine` if the cart has no such line.
pub fn remove<S: ClientStorage>(cart: &mut CartStore<S>, line: &str) -> Result<(), CartCommandError> {
    ensure_line(cart, line)?;
    cart.remove_item(line);
    show(cart);
    Ok(())
}

/// Empty the cart.
pub fn clear<S: ClientStorage>(cart: &mut CartStore<S>) {
    cart.clear();
    show(cart);
}

fn ensure_line<S: ClientStorage>(cart: &CartStore<S>, line: &str) -> Result<(), CartCommandError> {
    if cart.line(line).is_some() {
        Ok(())
    } else {
        Err(CartCommandError::UnknownLine(line.to_owned()))
    }
}

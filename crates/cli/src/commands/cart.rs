//! Cart and checkout commands.

use fakestore_core::ProductId;
use fakestore_storefront::error::AppError;
use fakestore_storefront::intent::{Intent, UiEvent};
use fakestore_storefront::views::{CartTemplate, ReceiptTemplate};

use super::{Session, print_line, print_view, take_notices};

/// Show the cart.
///
/// # Errors
///
/// Returns an error if the view fails to render.
pub fn show(session: &Session) -> Result<(), AppError> {
    print_view(&CartTemplate::new(&session.storefront.cart_snapshot()))
}

/// Add one unit of `id`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the view fails to render.
pub async fn add(session: &mut Session, id: ProductId) -> Result<(), AppError> {
    session.load_catalog().await?;
    let events = session.storefront.dispatch(Intent::AddToCart(id));
    if events.is_empty() {
        print_line(&format!("Product {id} is not in the catalog; nothing added."));
        return Ok(());
    }
    render_cart_changes(events)
}

/// Remove every unit of `id`.
///
/// # Errors
///
/// Returns an error if the view fails to render.
pub fn remove(session: &mut Session, id: ProductId) -> Result<(), AppError> {
    let events = session.storefront.dispatch(Intent::RemoveFromCart(id));
    if events.is_empty() {
        print_line(&format!("Product {id} is not in your cart."));
        return Ok(());
    }
    render_cart_changes(events)
}

/// Set the quantity of `id` from raw input.
///
/// # Errors
///
/// Returns an error if the view fails to render.
pub fn set_quantity(session: &mut Session, id: ProductId, input: String) -> Result<(), AppError> {
    let events = session.storefront.dispatch(Intent::SetQuantity(id, input));
    if events.is_empty() {
        print_line(&format!("Product {id} is not in your cart."));
        return Ok(());
    }
    render_cart_changes(events)
}

/// Place the order.
///
/// # Errors
///
/// Returns `AppError::EmptyCart` if there is nothing to buy.
pub fn checkout(session: &mut Session) -> Result<(), AppError> {
    for event in take_notices(session.storefront.dispatch(Intent::Checkout)) {
        match event {
            UiEvent::CheckoutCompleted(receipt) => {
                print_view(&ReceiptTemplate::from(&receipt))?;
            }
            UiEvent::CheckoutRejected(e) => return Err(e.into()),
            _ => {}
        }
    }
    Ok(())
}

fn render_cart_changes(events: Vec<UiEvent>) -> Result<(), AppError> {
    for event in take_notices(events) {
        if let UiEvent::CartChanged(snapshot) = event {
            print_view(&CartTemplate::new(&snapshot))?;
        }
    }
    Ok(())
}

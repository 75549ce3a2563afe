/// Checkout and "repeat last order"
///
/// Checkout validates the delivery form against the cart, persists a
/// snapshot of the order and only then empties the cart and the form.
/// A failed checkout leaves everything untouched.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use super::cart::Cart;
use super::data::{rupees, OrderSnapshot, PaymentMethod};
use super::library::{OrderStore, StorageError};

/// Largest tip the order form accepts, in rupees
pub const MAX_TIP: u32 = 10_000;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Please fill in your name and room number")]
    MissingDetails,

    #[error("Please add items to your cart before ordering")]
    EmptyCart,

    #[error("Tip must be a whole number")]
    InvalidTip,

    #[error("Tip cannot be more than ₹{}", MAX_TIP)]
    TipTooLarge,

    #[error("No previous order found")]
    NoPreviousOrder,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CheckoutError {
    /// Short title for the toast that reports this error
    pub fn title(&self) -> &'static str {
        match self {
            CheckoutError::MissingDetails | CheckoutError::InvalidTip => "Missing Information",
            CheckoutError::TipTooLarge => "Invalid Tip",
            CheckoutError::EmptyCart => "Empty Cart",
            CheckoutError::NoPreviousOrder => "Nothing to Repeat",
            CheckoutError::Storage(_) => "Storage Error",
        }
    }
}

/// Delivery details entered on the order page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderForm {
    pub name: String,
    pub room_number: String,
    /// Raw text of the tip field, empty means no tip
    pub tip: String,
    pub payment: PaymentMethod,
}

impl OrderForm {
    /// Parse the tip field, at most `MAX_TIP`
    pub fn tip_amount(&self) -> Result<u32, CheckoutError> {
        let tip = self.tip.trim();
        if tip.is_empty() {
            return Ok(0);
        }
        if !tip.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CheckoutError::InvalidTip);
        }

        match tip.parse::<u32>() {
            Ok(amount) if amount <= MAX_TIP => Ok(amount),
            _ => Err(CheckoutError::TipTooLarge),
        }
    }

    /// Grand total shown in the order summary, falling back to no tip
    /// while the tip field holds something unparseable
    pub fn grand_total(&self, cart: &Cart) -> u32 {
        cart.total().saturating_add(self.tip_amount().unwrap_or(0))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Outcome of a successful checkout
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    /// Cart total plus tip
    pub total: u32,
    /// Confirmation text, depends on the payment method
    pub message: String,
    pub snapshot: OrderSnapshot,
}

/// Place the order in the cart
pub fn checkout(
    form: &mut OrderForm,
    cart: &mut Cart,
    store: &OrderStore,
) -> Result<Receipt, CheckoutError> {
    let name = form.name.trim();
    let room = form.room_number.trim();

    if name.is_empty() || room.is_empty() {
        return Err(CheckoutError::MissingDetails);
    }
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    let tip = form.tip_amount()?;

    let total = cart.total().saturating_add(tip);
    let message = match form.payment {
        PaymentMethod::PayNow => format!(
            "Thank you {}! Payment of {} received. Your order will be delivered to room {} within 30 minutes.",
            name,
            rupees(total),
            room
        ),
        PaymentMethod::PayOnDelivery => format!(
            "Thank you {}! Please pay {} on delivery to room {} within 30 minutes.",
            name,
            rupees(total),
            room
        ),
    };

    let snapshot = OrderSnapshot {
        name: name.to_string(),
        room_number: room.to_string(),
        tip,
        items: cart.items().to_vec(),
        date: Utc::now(),
    };

    // Persist first so a storage failure keeps the cart intact
    store.save_last_order(&snapshot)?;

    info!(
        "Order placed: {} units, total {} ({})",
        cart.item_count(),
        rupees(total),
        form.payment
    );

    cart.clear();
    form.reset();

    Ok(Receipt {
        total,
        message,
        snapshot,
    })
}

/// Put the last stored order back into the cart and refill the form
///
/// Items are merged into whatever is already in the cart. They are not
/// checked against the current catalog.
pub fn repeat_last_order(
    form: &mut OrderForm,
    cart: &mut Cart,
    store: &OrderStore,
) -> Result<OrderSnapshot, CheckoutError> {
    let snapshot = store
        .load_last_order()?
        .ok_or(CheckoutError::NoPreviousOrder)?;

    for item in &snapshot.items {
        cart.add_quantity(item.clone(), item.quantity);
    }

    form.name = snapshot.name.clone();
    form.room_number = snapshot.room_number.clone();
    form.tip = if snapshot.tip == 0 {
        String::new()
    } else {
        snapshot.tip.to_string()
    };

    info!("Repeated last order from {}", snapshot.date);
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::cart::MAX_QUANTITY;
    use crate::state::catalog;
    use crate::state::data::CartItem;

    fn filled_form() -> OrderForm {
        OrderForm {
            name: "Asha".to_string(),
            room_number: "B-204".to_string(),
            tip: "20".to_string(),
            payment: PaymentMethod::PayNow,
        }
    }

    #[test]
    fn test_checkout_pay_now_adds_tip_and_persists() {
        let store = OrderStore::in_memory().unwrap();
        let mut cart = Cart::new();
        cart.add(catalog::find("2").unwrap()); // 249
        let mut form = filled_form();

        assert_eq!(form.grand_total(&cart), 269);

        let receipt = checkout(&mut form, &mut cart, &store).unwrap();

        assert_eq!(receipt.total, 269);
        assert!(receipt.message.contains("Payment of ₹269 received"));
        assert!(receipt.message.contains("room B-204"));

        let saved = store.load_last_order().unwrap().unwrap();
        assert_eq!(saved.tip, 20);
        assert_eq!(saved.items.len(), 1);
        assert_eq!(saved, receipt.snapshot);

        assert!(cart.is_empty());
        assert_eq!(form, OrderForm::default());
    }

    #[test]
    fn test_checkout_pay_on_delivery_message() {
        let store = OrderStore::in_memory().unwrap();
        let mut cart = Cart::new();
        cart.add(catalog::find("5").unwrap()); // 30
        let mut form = OrderForm {
            tip: String::new(),
            payment: PaymentMethod::PayOnDelivery,
            ..filled_form()
        };

        let receipt = checkout(&mut form, &mut cart, &store).unwrap();
        assert_eq!(receipt.total, 30);
        assert!(receipt.message.contains("Please pay ₹30 on delivery"));
        assert_eq!(receipt.snapshot.tip, 0);
    }

    #[test]
    fn test_missing_details_leave_cart_and_storage_alone() {
        let store = OrderStore::in_memory().unwrap();
        let mut cart = Cart::new();
        cart.add(catalog::find("1").unwrap());

        for (name, room) in [("", "B-204"), ("Asha", ""), ("   ", "  ")] {
            let mut form = OrderForm {
                name: name.to_string(),
                room_number: room.to_string(),
                ..filled_form()
            };
            let before = form.clone();

            let result = checkout(&mut form, &mut cart, &store);

            assert!(matches!(result, Err(CheckoutError::MissingDetails)));
            assert_eq!(form, before);
        }

        assert_eq!(cart.quantity_of("1"), 1);
        assert!(store.load_last_order().unwrap().is_none());
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let store = OrderStore::in_memory().unwrap();
        let mut cart = Cart::new();
        let mut form = filled_form();

        let result = checkout(&mut form, &mut cart, &store);

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert_eq!(form.name, "Asha");
        assert!(store.load_last_order().unwrap().is_none());
    }

    #[test]
    fn test_invalid_tip_is_rejected() {
        let store = OrderStore::in_memory().unwrap();
        let mut cart = Cart::new();
        cart.add(catalog::find("1").unwrap());
        let mut form = OrderForm {
            tip: "ten".to_string(),
            ..filled_form()
        };

        assert!(matches!(
            checkout(&mut form, &mut cart, &store),
            Err(CheckoutError::InvalidTip)
        ));
        assert!(!cart.is_empty());
        assert_eq!(form.grand_total(&cart), 199);
    }

    #[test]
    fn test_oversized_tip_is_rejected_without_overflow() {
        let store = OrderStore::in_memory().unwrap();
        let mut cart = Cart::new();
        cart.add(catalog::find("2").unwrap()); // 249

        for tip in ["4294967295", "99999999999999999999", "10001"] {
            let mut form = OrderForm {
                tip: tip.to_string(),
                ..filled_form()
            };

            assert_eq!(form.grand_total(&cart), 249);
            assert!(matches!(
                checkout(&mut form, &mut cart, &store),
                Err(CheckoutError::TipTooLarge)
            ));
            assert_eq!(cart.quantity_of("2"), 1);
        }
        assert!(store.load_last_order().unwrap().is_none());

        let mut form = OrderForm {
            tip: MAX_TIP.to_string(),
            ..filled_form()
        };
        assert_eq!(form.grand_total(&cart), 249 + MAX_TIP);
        let receipt = checkout(&mut form, &mut cart, &store).unwrap();
        assert_eq!(receipt.total, 249 + MAX_TIP);
    }

    #[test]
    fn test_repeat_last_order_restores_items_and_form() {
        let store = OrderStore::in_memory().unwrap();
        let mut cart = Cart::new();
        let thali = catalog::find("1").unwrap();
        let chai = catalog::find("9").unwrap();
        cart.add(thali);
        cart.add(chai);
        cart.update_quantity("9", 3);
        let mut form = filled_form();

        checkout(&mut form, &mut cart, &store).unwrap();
        assert!(cart.is_empty());

        let snapshot = repeat_last_order(&mut form, &mut cart, &store).unwrap();

        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.quantity_of("1"), 1);
        assert_eq!(cart.quantity_of("9"), 3);
        assert_eq!(form.name, "Asha");
        assert_eq!(form.room_number, "B-204");
        assert_eq!(form.tip, "20");
    }

    #[test]
    fn test_repeat_caps_merged_quantities() {
        let store = OrderStore::in_memory().unwrap();
        let mut item = CartItem::from(catalog::find("12").unwrap());
        item.quantity = u32::MAX;
        store
            .save_last_order(&OrderSnapshot {
                name: "Asha".to_string(),
                room_number: "B-204".to_string(),
                tip: 0,
                items: vec![item],
                date: Utc::now(),
            })
            .unwrap();

        let mut cart = Cart::new();
        cart.add(catalog::find("12").unwrap());
        let mut form = OrderForm::default();

        repeat_last_order(&mut form, &mut cart, &store).unwrap();

        assert_eq!(cart.quantity_of("12"), MAX_QUANTITY);
        assert_eq!(cart.total(), 549 * MAX_QUANTITY);
        assert_eq!(form.tip, "");
    }

    #[test]
    fn test_repeat_without_history() {
        let store = OrderStore::in_memory().unwrap();
        let mut cart = Cart::new();
        let mut form = OrderForm::default();

        let result = repeat_last_order(&mut form, &mut cart, &store);

        assert!(matches!(result, Err(CheckoutError::NoPreviousOrder)));
        assert_eq!(result.unwrap_err().to_string(), "No previous order found");
        assert!(cart.is_empty());
    }
}

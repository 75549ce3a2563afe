/// Shopping cart
///
/// The cart is owned by the application and lent to whoever needs it:
/// the header badge, the menu quantity steppers and the order page all
/// read the same value, so every change is visible everywhere at once.

use super::data::{CartItem, MenuItem};

/// Most units a single cart line can hold
pub const MAX_QUANTITY: u32 = 99;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of an item
    /// Inserts a new line with quantity 1, or bumps the existing line.
    pub fn add(&mut self, item: &MenuItem) {
        self.add_quantity(CartItem::from(item), 1);
    }

    /// Add `quantity` units of a cart line, merging with an existing line
    /// The line never grows past `MAX_QUANTITY`.
    pub fn add_quantity(&mut self, item: CartItem, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity).min(MAX_QUANTITY)
            }
            None => self.items.push(CartItem {
                quantity: quantity.min(MAX_QUANTITY),
                ..item
            }),
        }
    }

    /// Set the quantity of a line
    /// Zero or negative removes the line; unknown ids are ignored.
    /// Anything above `MAX_QUANTITY` is clamped to it.
    pub fn update_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|line| line.id == id) {
            line.quantity = u32::try_from(quantity)
                .unwrap_or(MAX_QUANTITY)
                .min(MAX_QUANTITY);
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|line| line.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of price times quantity over every line
    pub fn total(&self) -> u32 {
        self.items
            .iter()
            .map(CartItem::line_total)
            .fold(0, u32::saturating_add)
    }

    /// Quantity of an item, 0 when it is not in the cart
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.items
            .iter()
            .find(|line| line.id == id)
            .map_or(0, |line| line.quantity)
    }

    /// Total number of units, shown on the header badge
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .map(|line| line.quantity)
            .fold(0, u32::saturating_add)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog;

    fn item(id: &str) -> &'static MenuItem {
        catalog::find(id).unwrap()
    }

    #[test]
    fn test_add_twice_increments() {
        let mut cart = Cart::new();
        let thali = item("1");
        assert_eq!(thali.price, 199);

        cart.add(thali);
        cart.add(thali);

        assert_eq!(cart.quantity_of("1"), 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].line_total(), 398);
        assert_eq!(cart.total(), 398);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add(item("1"));
        cart.add(item("2"));

        cart.update_quantity("1", 0);

        assert_eq!(cart.quantity_of("1"), 0);
        assert_eq!(cart.items().len(), 1);

        cart.update_quantity("2", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_unknown_id_is_ignored() {
        let mut cart = Cart::new();
        cart.add(item("5"));
        cart.update_quantity("nope", 4);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_total_tracks_every_mutation() {
        let mut cart = Cart::new();
        let expected = |cart: &Cart| {
            cart.items()
                .iter()
                .map(|l| l.price * l.quantity)
                .sum::<u32>()
        };

        cart.add(item("1"));
        assert_eq!(cart.total(), expected(&cart));
        cart.add(item("9"));
        cart.add(item("9"));
        assert_eq!(cart.total(), expected(&cart));
        cart.update_quantity("9", 5);
        assert_eq!(cart.total(), 199 + 5 * 20);
        cart.remove("1");
        assert_eq!(cart.total(), expected(&cart));
        assert_eq!(cart.total(), 100);
        cart.clear();
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_quantity_merges_lines() {
        let mut cart = Cart::new();
        cart.add(item("6"));
        cart.add_quantity(CartItem::from(item("6")), 3);
        cart.add_quantity(CartItem::from(item("7")), 0);

        assert_eq!(cart.quantity_of("6"), 4);
        assert_eq!(cart.quantity_of("7"), 0);
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_quantity_is_capped_per_line() {
        let mut cart = Cart::new();
        cart.add(item("12"));

        cart.update_quantity("12", 10_000_000);
        assert_eq!(cart.quantity_of("12"), MAX_QUANTITY);
        assert_eq!(cart.total(), item("12").price * MAX_QUANTITY);

        cart.update_quantity("12", i64::MAX);
        assert_eq!(cart.quantity_of("12"), MAX_QUANTITY);

        // Merging more units never pushes the line past the cap
        cart.add(item("12"));
        cart.add_quantity(CartItem::from(item("12")), u32::MAX);
        assert_eq!(cart.quantity_of("12"), MAX_QUANTITY);

        cart.add_quantity(CartItem::from(item("9")), 500);
        assert_eq!(cart.quantity_of("9"), MAX_QUANTITY);
        assert_eq!(cart.item_count(), 2 * MAX_QUANTITY);
    }
}

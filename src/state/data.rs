/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the storage layer, the cart and the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu categories shown as filter buttons on the menu page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    All,
    Meals,
    Snacks,
    Beverages,
    Cakes,
}

impl Category {
    /// Every category in the order the filter bar shows them
    pub const ALL: [Category; 5] = [
        Category::All,
        Category::Meals,
        Category::Snacks,
        Category::Beverages,
        Category::Cakes,
    ];

    /// Cakes use the "eggless" toggle instead of "vegetarian"
    pub fn is_cake(&self) -> bool {
        matches!(self, Category::Cakes)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::All => "All",
            Category::Meals => "Meals",
            Category::Snacks => "Snacks",
            Category::Beverages => "Beverages",
            Category::Cakes => "Cakes",
        };
        f.write_str(name)
    }
}

/// A single dish in the static catalog
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Catalog identity, unique across the menu
    pub id: &'static str,
    pub name: &'static str,
    /// Price in whole rupees
    pub price: u32,
    pub category: Category,
    pub description: &'static str,
    /// `None` when the flag does not apply to this item
    pub vegetarian: Option<bool>,
    pub eggless: Option<bool>,
    /// Optional image reference (file name under the assets folder)
    pub image: Option<&'static str>,
}

/// A line in the cart
///
/// Quantity is always positive while the item is in the cart.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub price: u32,
    pub category: Category,
    pub description: String,
    pub quantity: u32,
}

impl CartItem {
    /// Price times quantity for this line
    pub fn line_total(&self) -> u32 {
        self.price.saturating_mul(self.quantity)
    }
}

impl From<&MenuItem> for CartItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.to_string(),
            price: item.price,
            category: item.category,
            description: item.description.to_string(),
            quantity: 1,
        }
    }
}

/// How the customer settles the bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    PayNow,
    PayOnDelivery,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::PayNow => f.write_str("Pay now"),
            PaymentMethod::PayOnDelivery => f.write_str("Pay on delivery"),
        }
    }
}

/// Copy of the last completed order, kept in local storage
///
/// Stored as JSON with camelCase keys so the stored blob reads
/// `{"name", "roomNumber", "tip", "items", "date"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSnapshot {
    pub name: String,
    pub room_number: String,
    /// Tip in whole rupees
    pub tip: u32,
    pub items: Vec<CartItem>,
    pub date: DateTime<Utc>,
}

impl OrderSnapshot {
    /// Convert to JSON string for storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string (from storage)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Destructive,
}

/// Short-lived notification shown above the page
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub body: String,
    pub kind: ToastKind,
    /// Remaining seconds before the toast disappears
    pub ttl: u32,
}

impl Toast {
    /// How long a toast stays on screen, in ticks
    pub const LIFETIME: u32 = 4;

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: ToastKind::Success,
            ttl: Self::LIFETIME,
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            kind: ToastKind::Destructive,
            ttl: Self::LIFETIME,
        }
    }
}

/// Format a rupee amount for display
pub fn rupees(amount: u32) -> String {
    format!("₹{}", amount)
}

/// Static menu catalog and in-memory filtering
///
/// The menu is defined at build time. Filtering never reorders items,
/// it only drops the ones that do not match the current selection.

use super::data::{Category, MenuItem};

/// Every item sold in the canteen, in display order
pub const MENU: &[MenuItem] = &[
    // ========== Meals ==========
    MenuItem {
        id: "1",
        name: "Veg Thali",
        price: 199,
        category: Category::Meals,
        description: "Dal, two sabzis, rice, three rotis and a sweet",
        vegetarian: Some(true),
        eggless: None,
        image: Some("veg-thali.jpg"),
    },
    MenuItem {
        id: "2",
        name: "Chicken Biryani",
        price: 249,
        category: Category::Meals,
        description: "Dum-cooked basmati rice with spiced chicken and raita",
        vegetarian: Some(false),
        eggless: None,
        image: Some("chicken-biryani.jpg"),
    },
    MenuItem {
        id: "3",
        name: "Paneer Butter Masala",
        price: 179,
        category: Category::Meals,
        description: "Cottage cheese in a rich tomato gravy, served with two naans",
        vegetarian: Some(true),
        eggless: None,
        image: Some("paneer-butter-masala.jpg"),
    },
    MenuItem {
        id: "4",
        name: "Egg Fried Rice",
        price: 129,
        category: Category::Meals,
        description: "Wok-tossed rice with scrambled egg and spring onions",
        vegetarian: Some(false),
        eggless: None,
        image: None,
    },
    // ========== Snacks ==========
    MenuItem {
        id: "5",
        name: "Samosa (2 pcs)",
        price: 30,
        category: Category::Snacks,
        description: "Crispy pastry stuffed with spiced potatoes, with mint chutney",
        vegetarian: Some(true),
        eggless: None,
        image: Some("samosa.jpg"),
    },
    MenuItem {
        id: "6",
        name: "Chicken Momos",
        price: 99,
        category: Category::Snacks,
        description: "Eight steamed dumplings with fiery red chutney",
        vegetarian: Some(false),
        eggless: None,
        image: Some("momos.jpg"),
    },
    MenuItem {
        id: "7",
        name: "Vada Pav",
        price: 40,
        category: Category::Snacks,
        description: "Spiced potato fritter in a soft bun with dry garlic chutney",
        vegetarian: Some(true),
        eggless: None,
        image: None,
    },
    MenuItem {
        id: "8",
        name: "French Fries",
        price: 79,
        category: Category::Snacks,
        description: "Golden fries tossed in peri-peri seasoning",
        vegetarian: Some(true),
        eggless: None,
        image: Some("fries.jpg"),
    },
    // ========== Beverages ==========
    MenuItem {
        id: "9",
        name: "Masala Chai",
        price: 20,
        category: Category::Beverages,
        description: "Strong tea brewed with ginger and cardamom",
        vegetarian: Some(true),
        eggless: None,
        image: None,
    },
    MenuItem {
        id: "10",
        name: "Cold Coffee",
        price: 69,
        category: Category::Beverages,
        description: "Chilled coffee blended with milk and ice cream",
        vegetarian: Some(true),
        eggless: None,
        image: Some("cold-coffee.jpg"),
    },
    MenuItem {
        id: "11",
        name: "Fresh Lime Soda",
        price: 49,
        category: Category::Beverages,
        description: "Sweet or salted, made with fresh lime",
        vegetarian: Some(true),
        eggless: None,
        image: None,
    },
    // ========== Cakes ==========
    MenuItem {
        id: "12",
        name: "Chocolate Truffle Cake (500g)",
        price: 549,
        category: Category::Cakes,
        description: "Layers of chocolate sponge and dark truffle ganache",
        vegetarian: None,
        eggless: Some(false),
        image: Some("truffle-cake.jpg"),
    },
    MenuItem {
        id: "13",
        name: "Eggless Black Forest (500g)",
        price: 499,
        category: Category::Cakes,
        description: "Cherries, whipped cream and chocolate shavings, no egg",
        vegetarian: None,
        eggless: Some(true),
        image: Some("black-forest.jpg"),
    },
    MenuItem {
        id: "14",
        name: "Eggless Red Velvet Pastry",
        price: 89,
        category: Category::Cakes,
        description: "Single slice with cream cheese frosting",
        vegetarian: None,
        eggless: Some(true),
        image: None,
    },
];

/// Current selection on the menu page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuFilter {
    pub category: Category,
    /// Applies to every category except cakes
    pub vegetarian_only: bool,
    /// Applies only to cakes
    pub eggless_only: bool,
}

impl Default for MenuFilter {
    fn default() -> Self {
        Self {
            category: Category::All,
            vegetarian_only: false,
            eggless_only: false,
        }
    }
}

impl MenuFilter {
    /// Check a single item against the selection
    pub fn matches(&self, item: &MenuItem) -> bool {
        let in_category = self.category == Category::All || item.category == self.category;
        if !in_category {
            return false;
        }

        if self.category.is_cake() {
            !self.eggless_only || item.eggless == Some(true)
        } else {
            !self.vegetarian_only || item.vegetarian == Some(true)
        }
    }

    /// Filter a list of items, keeping catalog order
    pub fn apply<'a>(&self, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Look up an item by its catalog id
pub fn find(id: &str) -> Option<&'static MenuItem> {
    MENU.iter().find(|item| item.id == id)
}

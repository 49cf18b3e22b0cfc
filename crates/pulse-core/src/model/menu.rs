//! Static menu catalog.
//!
//! The catalog fixes the universe of valid order keys: a record's orders map
//! always holds exactly the item ids listed here, in this order.

use serde::Serialize;

/// A single orderable menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: &'static str,
    pub label: &'static str,
}

/// An ordered group of menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuCategory {
    pub id: &'static str,
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

const fn item(id: &'static str, label: &'static str) -> MenuItem {
    MenuItem { id, label }
}

/// The catering menu, in display order.
pub static MENU: &[MenuCategory] = &[
    MenuCategory {
        id: "grazing",
        title: "Grazing Tables",
        items: &[
            item("charcuterie-board", "Charcuterie board"),
            item("artisan-cheese", "Artisan cheese board"),
            item("crudites", "Crudités & dips"),
            item("fruit-platter", "Seasonal fruit platter"),
        ],
    },
    MenuCategory {
        id: "live-station",
        title: "Live Stations",
        items: &[
            item("pasta-station", "Hand-tossed pasta"),
            item("taco-station", "Street taco bar"),
            item("carving-station", "Carving station"),
            item("sushi-station", "Sushi hand rolls"),
        ],
    },
    MenuCategory {
        id: "pre-order",
        title: "Pre-Order Plates",
        items: &[
            item("herb-chicken", "Herb roasted chicken"),
            item("citrus-salmon", "Citrus glazed salmon"),
            item("harvest-bowl", "Harvest grain bowl"),
            item("kids-plate", "Kids plate"),
        ],
    },
    MenuCategory {
        id: "desserts",
        title: "Desserts",
        items: &[
            item("mini-pastries", "Mini pastries"),
            item("gelato-cart", "Gelato cart"),
        ],
    },
];

/// Every menu item id, in catalog order.
pub fn item_ids() -> impl Iterator<Item = &'static str> {
    MENU.iter()
        .flat_map(|category| category.items.iter().map(|item| item.id))
}

/// Find a menu item by id.
#[must_use]
pub fn find_item(id: &str) -> Option<&'static MenuItem> {
    MENU.iter()
        .flat_map(|category| category.items.iter())
        .find(|item| item.id == id)
}

/// Find a category by id.
#[must_use]
pub fn find_category(id: &str) -> Option<&'static MenuCategory> {
    MENU.iter().find(|category| category.id == id)
}

/// Whether `id` names a currently defined menu item.
#[must_use]
pub fn is_known_item(id: &str) -> bool {
    find_item(id).is_some()
}

use serde::Serialize;
use std::collections::BTreeMap;

use super::menu::{self, MenuCategory};

/// Per-menu-item order quantities for one booking.
///
/// Built through [`Orders::empty`] the key set is exactly the catalog's item
/// ids; [`Orders::set`] refuses ids outside the catalog so the key set never
/// drifts. There is no `Deserialize`: stored maps re-enter through
/// [`crate::normalize::normalize_orders`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Orders(BTreeMap<String, u32>);

impl Orders {
    /// A zero-filled map over every current menu item.
    #[must_use]
    pub fn empty() -> Self {
        Self(menu::item_ids().map(|id| (id.to_string(), 0)).collect())
    }

    /// Quantity ordered for `id`; zero for unknown ids.
    #[must_use]
    pub fn get(&self, id: &str) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Set the quantity for a known menu item.
    ///
    /// Returns `false` (and leaves the map untouched) for ids that are not
    /// in the catalog.
    pub fn set(&mut self, id: &str, quantity: u32) -> bool {
        match self.0.get_mut(id) {
            Some(slot) => {
                *slot = quantity;
                true
            }
            None => false,
        }
    }

    /// Sum of every quantity.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().map(|&q| u64::from(q)).sum()
    }

    /// Sum of the quantities of items belonging to `category`.
    #[must_use]
    pub fn category_total(&self, category: &MenuCategory) -> u64 {
        category
            .items
            .iter()
            .map(|item| u64::from(self.get(item.id)))
            .sum()
    }

    /// Item ids present in the map (sorted).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(id, quantity)` pairs, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, &q)| (id.as_str(), q))
    }
}

impl Default for Orders {
    fn default() -> Self {
        Self::empty()
    }
}

//! # Cart aggregation
//!
//! [`Cart`] holds what a customer intends to order. Each line is keyed by
//! `(menu item id, spice level)`:
//!
//! - no two lines share a key;
//! - every line has a quantity of at least 1.
//!
//! Lines keep insertion order. A `HashMap` from key to position sits next to the
//! line vector so the add / merge / relabel decisions are single lookups.
//!
//! The cart does no I/O and keeps no clock; persistence and the "item added"
//! pulse live in [`cart_actor`](crate::cart_actor).

use crate::model::{Diet, MenuItem, MenuItemId, SpiceLevel};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use tracing::warn;

/// Type-safe identifier for cart sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub u32);

impl From<u32> for CartId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cart_{}", self.0)
    }
}

/// One entry in the cart: a menu item's fields plus the chosen spice level and
/// a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub diet: Diet,
    pub spice_level: SpiceLevel,
    pub quantity: u32,
}

impl CartLineItem {
    /// Builds a line from a menu item; the item's own default spice level is
    /// replaced by `spice_level`.
    pub fn from_menu_item(item: &MenuItem, spice_level: SpiceLevel, quantity: u32) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
            image: item.image.clone(),
            description: item.description.clone(),
            diet: item.diet,
            spice_level,
            quantity,
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id,
            spice_level: self.spice_level,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Natural key of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub id: MenuItemId,
    pub spice_level: SpiceLevel,
}

impl LineKey {
    pub fn new(id: MenuItemId, spice_level: SpiceLevel) -> Self {
        Self { id, spice_level }
    }
}

/// What `add_item` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended with quantity 1.
    Appended,
    /// An existing line was bumped to `quantity`.
    Incremented { quantity: u32 },
}

/// What `change_spice_level` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiceChange {
    /// Same level requested, or no line under the current level.
    Unchanged,
    /// The line moved to the new level in place.
    Relabelled,
    /// The line was folded into an existing line, which now holds `quantity`.
    Merged { quantity: u32 },
}

/// The ordered set of cart lines.
///
/// Serializes as a plain JSON array of lines. Deserializing goes through
/// [`Cart::from_lines`], so stored data that breaks the key or quantity rules
/// is repaired on load. A line that cannot be read at all is skipped; the
/// rest of the cart survives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<StoredLine>", into = "Vec<CartLineItem>")]
pub struct Cart {
    lines: Vec<CartLineItem>,
    index: HashMap<LineKey, usize>,
}

/// One element of a stored cart array.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredLine {
    Line(CartLineItem),
    Unreadable(IgnoredAny),
}

impl From<Vec<StoredLine>> for Cart {
    fn from(stored: Vec<StoredLine>) -> Self {
        let total = stored.len();
        let lines: Vec<CartLineItem> = stored
            .into_iter()
            .filter_map(|line| match line {
                StoredLine::Line(line) => Some(line),
                StoredLine::Unreadable(_) => None,
            })
            .collect();
        if lines.len() < total {
            warn!(skipped = total - lines.len(), "Dropped unreadable cart lines");
        }
        Cart::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from raw lines, dropping zero-quantity lines and folding
    /// repeated keys into their first occurrence.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.index.get(&line.key()) {
                Some(&pos) => {
                    let existing = &mut cart.lines[pos];
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => {
                    cart.index.insert(line.key(), cart.lines.len());
                    cart.lines.push(line);
                }
            }
        }
        cart
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    pub fn get(&self, id: MenuItemId, spice_level: SpiceLevel) -> Option<&CartLineItem> {
        self.index
            .get(&LineKey::new(id, spice_level))
            .map(|&pos| &self.lines[pos])
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `item` at `spice_level`.
    pub fn add_item(&mut self, item: &MenuItem, spice_level: SpiceLevel) -> AddOutcome {
        let key = LineKey::new(item.id, spice_level);
        match self.index.get(&key) {
            Some(&pos) => {
                let line = &mut self.lines[pos];
                line.quantity = line.quantity.saturating_add(1);
                AddOutcome::Incremented {
                    quantity: line.quantity,
                }
            }
            None => {
                self.index.insert(key, self.lines.len());
                self.lines
                    .push(CartLineItem::from_menu_item(item, spice_level, 1));
                AddOutcome::Appended
            }
        }
    }

    /// Removes every line for `id`, whatever its spice level. Returns how many
    /// lines went away.
    pub fn remove_item(&mut self, id: MenuItemId) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        let removed = before - self.lines.len();
        if removed > 0 {
            self.reindex();
        }
        removed
    }

    /// Sets the quantity of every line for `id`, across spice levels.
    ///
    /// A quantity of zero or less removes those lines instead. Returns how many
    /// lines were touched.
    pub fn set_quantity(&mut self, id: MenuItemId, quantity: i64) -> usize {
        if quantity <= 0 {
            return self.remove_item(id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut touched = 0;
        for line in self.lines.iter_mut().filter(|line| line.id == id) {
            line.quantity = quantity;
            touched += 1;
        }
        touched
    }

    /// Moves the `(id, from)` line to spice level `to`.
    ///
    /// If a `(id, to)` line already exists the two are merged: the existing
    /// line keeps its position and absorbs the quantity, the moved line is
    /// dropped. Otherwise the line is relabelled where it stands.
    pub fn change_spice_level(
        &mut self,
        id: MenuItemId,
        from: SpiceLevel,
        to: SpiceLevel,
    ) -> SpiceChange {
        if from == to {
            return SpiceChange::Unchanged;
        }
        let Some(&source) = self.index.get(&LineKey::new(id, from)) else {
            return SpiceChange::Unchanged;
        };

        match self.index.get(&LineKey::new(id, to)) {
            Some(&target) => {
                let moved = self.lines[source].quantity;
                let merged = self.lines[target].quantity.saturating_add(moved);
                self.lines[target].quantity = merged;
                self.lines.remove(source);
                self.reindex();
                SpiceChange::Merged { quantity: merged }
            }
            None => {
                self.lines[source].spice_level = to;
                self.index.remove(&LineKey::new(id, from));
                self.index.insert(LineKey::new(id, to), source);
                SpiceChange::Relabelled
            }
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.index.clear();
    }

    /// Sum of price × quantity over all lines. `0.0` for an empty cart.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLineItem::subtotal).sum()
    }

    /// Sum of quantities over all lines.
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    fn reindex(&mut self) {
        self.index = self
            .lines
            .iter()
            .enumerate()
            .map(|(pos, line)| (line.key(), pos))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dish(id: u32, price: f64) -> MenuItem {
        MenuItem::new(MenuItemId(id), format!("dish {id}"), price, "Main Course")
    }

    fn keys(cart: &Cart) -> Vec<(u32, SpiceLevel, u32)> {
        cart.lines()
            .iter()
            .map(|l| (l.id.0, l.spice_level, l.quantity))
            .collect()
    }

    #[test]
    fn adding_same_variant_twice_bumps_quantity() {
        let mut cart = Cart::new();
        let item = dish(1, 10.0);

        assert_eq!(cart.add_item(&item, SpiceLevel::Mild), AddOutcome::Appended);
        assert_eq!(
            cart.add_item(&item, SpiceLevel::Mild),
            AddOutcome::Incremented { quantity: 2 }
        );

        assert_eq!(keys(&cart), vec![(1, SpiceLevel::Mild, 2)]);
        assert_eq!(cart.total_price(), 20.0);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn different_spice_levels_are_separate_lines() {
        let mut cart = Cart::new();
        let item = dish(1, 10.0).with_spice_level(SpiceLevel::Hot);

        cart.add_item(&item, SpiceLevel::Mild);
        cart.add_item(&item, SpiceLevel::Medium);

        assert_eq!(
            keys(&cart),
            vec![(1, SpiceLevel::Mild, 1), (1, SpiceLevel::Medium, 1)]
        );
    }

    #[test]
    fn increment_keeps_original_position() {
        let mut cart = Cart::new();
        cart.add_item(&dish(1, 10.0), SpiceLevel::Mild);
        cart.add_item(&dish(2, 5.0), SpiceLevel::Mild);
        cart.add_item(&dish(1, 10.0), SpiceLevel::Mild);

        assert_eq!(
            keys(&cart),
            vec![(1, SpiceLevel::Mild, 2), (2, SpiceLevel::Mild, 1)]
        );
    }

    #[test]
    fn remove_drops_every_spice_variant_and_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&dish(1, 10.0), SpiceLevel::Mild);
        cart.add_item(&dish(2, 5.0), SpiceLevel::Hot);
        cart.add_item(&dish(1, 10.0), SpiceLevel::Hot);

        assert_eq!(cart.remove_item(MenuItemId(1)), 2);
        let once = cart.clone();
        assert_eq!(cart.remove_item(MenuItemId(1)), 0);

        assert_eq!(cart, once);
        assert_eq!(keys(&cart), vec![(2, SpiceLevel::Hot, 1)]);
        assert!(cart.get(MenuItemId(2), SpiceLevel::Hot).is_some());
    }

    #[test]
    fn set_quantity_matches_on_id_only() {
        let mut cart = Cart::new();
        cart.add_item(&dish(1, 10.0), SpiceLevel::Mild);
        cart.add_item(&dish(1, 10.0), SpiceLevel::Hot);

        assert_eq!(cart.set_quantity(MenuItemId(1), 4), 2);
        assert_eq!(
            keys(&cart),
            vec![(1, SpiceLevel::Mild, 4), (1, SpiceLevel::Hot, 4)]
        );
    }

    #[test]
    fn set_quantity_zero_removes_all_variants() {
        let mut cart = Cart::new();
        let item = dish(1, 10.0);
        cart.add_item(&item, SpiceLevel::Mild);
        cart.add_item(&item, SpiceLevel::Mild);
        cart.add_item(&item, SpiceLevel::Hot);

        cart.set_quantity(MenuItemId(1), 0);
        assert!(cart.is_empty());

        cart.add_item(&item, SpiceLevel::Mild);
        cart.set_quantity(MenuItemId(1), -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_on_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&dish(1, 10.0), SpiceLevel::Mild);
        assert_eq!(cart.set_quantity(MenuItemId(9), 3), 0);
        assert_eq!(keys(&cart), vec![(1, SpiceLevel::Mild, 1)]);
    }

    #[test]
    fn spice_change_without_collision_relabels_in_place() {
        let mut cart = Cart::new();
        let item = dish(1, 10.0);
        cart.add_item(&item, SpiceLevel::Mild);
        cart.add_item(&item, SpiceLevel::Mild);
        cart.add_item(&dish(2, 5.0), SpiceLevel::Mild);

        let change = cart.change_spice_level(MenuItemId(1), SpiceLevel::Mild, SpiceLevel::Hot);

        assert_eq!(change, SpiceChange::Relabelled);
        assert_eq!(
            keys(&cart),
            vec![(1, SpiceLevel::Hot, 2), (2, SpiceLevel::Mild, 1)]
        );
        assert!(cart.get(MenuItemId(1), SpiceLevel::Mild).is_none());
    }

    #[test]
    fn spice_change_onto_existing_line_merges_into_target() {
        let mut cart = Cart::new();
        let item = dish(1, 10.0);
        cart.add_item(&item, SpiceLevel::Hot);
        cart.set_quantity(MenuItemId(1), 3);
        cart.add_item(&dish(2, 5.0), SpiceLevel::Mild);
        cart.add_item(&item, SpiceLevel::Mild);
        cart.add_item(&item, SpiceLevel::Mild);

        let change = cart.change_spice_level(MenuItemId(1), SpiceLevel::Mild, SpiceLevel::Hot);

        assert_eq!(change, SpiceChange::Merged { quantity: 5 });
        assert_eq!(
            keys(&cart),
            vec![(1, SpiceLevel::Hot, 5), (2, SpiceLevel::Mild, 1)]
        );
        assert_eq!(cart.total_items(), 6);
    }

    #[test]
    fn merge_keeps_target_position_when_source_comes_first() {
        let mut cart = Cart::new();
        let item = dish(1, 10.0);
        cart.add_item(&item, SpiceLevel::Mild);
        cart.add_item(&dish(2, 5.0), SpiceLevel::Mild);
        cart.add_item(&item, SpiceLevel::Hot);
        cart.add_item(&dish(3, 7.0), SpiceLevel::Mild);

        cart.change_spice_level(MenuItemId(1), SpiceLevel::Mild, SpiceLevel::Hot);

        assert_eq!(
            keys(&cart),
            vec![
                (2, SpiceLevel::Mild, 1),
                (1, SpiceLevel::Hot, 2),
                (3, SpiceLevel::Mild, 1)
            ]
        );
        // Index must follow the shifted positions.
        assert_eq!(cart.get(MenuItemId(3), SpiceLevel::Mild).unwrap().id, MenuItemId(3));
        assert_eq!(
            cart.add_item(&dish(3, 7.0), SpiceLevel::Mild),
            AddOutcome::Incremented { quantity: 2 }
        );
    }

    #[test]
    fn spice_change_noops() {
        let mut cart = Cart::new();
        cart.add_item(&dish(1, 10.0), SpiceLevel::Mild);
        let before = cart.clone();

        assert_eq!(
            cart.change_spice_level(MenuItemId(1), SpiceLevel::Mild, SpiceLevel::Mild),
            SpiceChange::Unchanged
        );
        assert_eq!(
            cart.change_spice_level(MenuItemId(1), SpiceLevel::Hot, SpiceLevel::Mild),
            SpiceChange::Unchanged
        );
        assert_eq!(
            cart.change_spice_level(MenuItemId(4), SpiceLevel::Mild, SpiceLevel::Hot),
            SpiceChange::Unchanged
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total_price(), 0.0);
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn clear_empties_lines_and_index() {
        let mut cart = Cart::new();
        cart.add_item(&dish(1, 10.0), SpiceLevel::Mild);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.add_item(&dish(1, 10.0), SpiceLevel::Mild), AddOutcome::Appended);
    }

    #[test]
    fn line_takes_chosen_spice_not_menu_default() {
        let mut cart = Cart::new();
        let item = dish(1, 10.0).with_spice_level(SpiceLevel::Hot);
        cart.add_item(&item, SpiceLevel::Mild);
        assert_eq!(cart.lines()[0].spice_level, SpiceLevel::Mild);
    }

    #[test]
    fn serializes_as_storefront_array() {
        let mut cart = Cart::new();
        cart.add_item(&dish(1, 10.0).with_diet(Diet::Nonveg), SpiceLevel::Hot);

        let json = serde_json::to_value(&cart).unwrap();
        let line = &json.as_array().unwrap()[0];
        assert_eq!(line["id"], 1);
        assert_eq!(line["spiceLevel"], "hot");
        assert_eq!(line["type"], "nonveg");
        assert_eq!(line["quantity"], 1);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn loading_repairs_duplicate_and_zero_quantity_lines() {
        let raw = r#"[
            {"id":1,"name":"a","price":10,"category":"x","spiceLevel":"mild","quantity":2},
            {"id":2,"name":"b","price":5,"category":"x","spiceLevel":"mild","quantity":0},
            {"id":1,"name":"a","price":10,"category":"x","spiceLevel":"mild","quantity":3}
        ]"#;
        let cart: Cart = serde_json::from_str(raw).unwrap();
        assert_eq!(keys(&cart), vec![(1, SpiceLevel::Mild, 5)]);
    }

    #[test]
    fn unreadable_lines_are_skipped_not_the_whole_cart() {
        let raw = r#"[
            {"id":"3","name":"Dosa","price":120,"category":"x","spiceLevel":"hot","quantity":2},
            {"id":"65f0c2a9e1","name":"Synced","price":50,"category":"x","quantity":1},
            {"id":4,"name":"Lassi","price":80,"category":"x","spiceLevel":"lava","quantity":1},
            "garbage",
            {"id":5,"name":"Tea","price":30,"category":"Beverages","spiceLevel":"mild","quantity":1}
        ]"#;
        let cart: Cart = serde_json::from_str(raw).unwrap();
        assert_eq!(keys(&cart), vec![(3, SpiceLevel::Hot, 2), (5, SpiceLevel::Mild, 1)]);
        assert_eq!(cart.total_price(), 270.0);
    }
}

//! Locally persisted cart
//!
//! A plain JSON file with an explicit schema. Adding a product that is
//! already in the cart merges quantities; nothing here talks to the
//! network.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ClientResult;

/// One cart line. Name and price are snapshots from the catalog at
/// add-to-cart time; the server re-reads the product and recomputes the
/// total at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product record id ("product:xyz")
    pub product_id: String,
    pub slug: String,
    pub name: String,
    pub quantity: u32,
    /// Unit price in minor units
    pub price: i64,
}

/// Persisted cart state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Load a cart from disk. A missing file is an empty cart; a corrupt
    /// file is an error — silently dropping someone's cart is worse than
    /// failing loudly.
    pub fn load(path: &Path) -> ClientResult<Self> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> ClientResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Add a line, merging quantities when the product is already present.
    /// `min_quantity` is the catalog floor applied on first add.
    pub fn add(&mut self, item: CartItem, min_quantity: u32) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => existing.quantity += item.quantity,
            None => {
                let mut item = item;
                item.quantity = item.quantity.max(min_quantity.max(1));
                self.items.push(item);
            }
        }
    }

    /// Set a line's quantity; zero removes the line
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            item.quantity = quantity;
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|item| item.product_id != product_id);
    }

    /// Cart total in minor units
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.price * item.quantity as i64)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tulip(quantity: u32) -> CartItem {
        CartItem {
            product_id: "product:p1".into(),
            slug: "tulip-red-princess".into(),
            name: "Tulip Red Princess".into(),
            quantity,
            price: 4500,
        }
    }

    #[test]
    fn add_merges_quantities_for_same_product() {
        let mut cart = Cart::default();
        cart.add(tulip(2), 1);
        cart.add(tulip(3), 1);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
        assert_eq!(cart.total(), 5 * 4500);
    }

    #[test]
    fn min_quantity_applies_on_first_add_only() {
        let mut cart = Cart::default();
        cart.add(tulip(1), 5);
        assert_eq!(cart.items[0].quantity, 5);
        cart.add(tulip(1), 5);
        assert_eq!(cart.items[0].quantity, 6, "merge adds, floor does not reapply");
    }

    #[test]
    fn set_quantity_zero_removes_line() {
        let mut cart = Cart::default();
        cart.add(tulip(2), 1);
        cart.set_quantity("product:p1", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn missing_file_loads_as_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let cart = Cart::load(&dir.path().join("cart.json")).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state/cart.json");

        let mut cart = Cart::default();
        cart.add(tulip(2), 1);
        cart.save(&path).unwrap();

        let loaded = Cart::load(&path).unwrap();
        assert_eq!(loaded, cart);
    }

    #[test]
    fn corrupt_file_is_an_error_not_an_empty_cart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        std::fs::write(&path, b"{not json").unwrap();
        assert!(Cart::load(&path).is_err());
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::local::{keys, KvStore};

/// VAT applied on top of the subtotal.
pub const TAX_RATE: f64 = 0.20;

/// The static storefront catalog. Prices in GBP.
pub const CATALOG: &[Product] = &[
    Product { id: "starter", name: "Starter Package", price: 499.0 },
    Product { id: "professional", name: "Professional Package", price: 999.0 },
    Product { id: "ecommerce", name: "E-commerce Package", price: 1499.0 },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub price: f64,
}

pub fn product(id: &str) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}

/// One cart entry: a product id and when it was added. Quantity is expressed
/// by repetition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Sum of catalog prices, VAT, and grand total. An id missing from the
/// catalog contributes zero without complaint.
pub fn totals(items: &[CartItem]) -> Totals {
    let subtotal: f64 = items
        .iter()
        .map(|item| product(&item.id).map_or(0.0, |p| p.price))
        .sum();
    let tax = subtotal * TAX_RATE;
    Totals { subtotal, tax, total: subtotal + tax }
}

pub fn format_price(amount: f64) -> String {
    format!("£{amount:.2}")
}

/// The persisted cart. Every mutation rewrites both the item list and the
/// mirrored count key the navbar badge reads.
pub struct Cart<'a, S: KvStore> {
    store: &'a S,
}

impl<'a, S: KvStore> Cart<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn items(&self) -> Vec<CartItem> {
        let Some(raw) = self.store.get(keys::CART_ITEMS) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                log::error!("Failed to parse cart items: {e}");
                Vec::new()
            }
        }
    }

    pub fn count(&self) -> usize {
        self.store
            .get(keys::CART_COUNT)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(0)
    }

    pub fn add(&self, product_id: &str) {
        let mut items = self.items();
        items.push(CartItem { id: product_id.to_string(), added_at: Utc::now() });
        self.write(&items);
    }

    pub fn remove(&self, index: usize) {
        let mut items = self.items();
        if index < items.len() {
            items.remove(index);
            self.write(&items);
        }
    }

    fn write(&self, items: &[CartItem]) {
        match serde_json::to_string(items) {
            Ok(raw) => self.store.set(keys::CART_ITEMS, &raw),
            Err(e) => log::error!("Failed to save cart items: {e}"),
        }
        self.store.set(keys::CART_COUNT, &items.len().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::MemoryStore;

    fn item(id: &str) -> CartItem {
        CartItem { id: id.to_string(), added_at: Utc::now() }
    }

    #[test]
    fn starter_plus_professional_at_twenty_percent_vat() {
        let t = totals(&[item("starter"), item("professional")]);
        assert_eq!(format_price(t.subtotal), "£1498.00");
        assert_eq!(format_price(t.tax), "£299.60");
        assert_eq!(format_price(t.total), "£1797.60");
    }

    #[test]
    fn unknown_ids_contribute_zero() {
        let t = totals(&[item("starter"), item("discontinued")]);
        assert_eq!(t.subtotal, 499.0);
        assert_eq!(totals(&[]).total, 0.0);
    }

    #[test]
    fn total_is_subtotal_times_one_plus_rate() {
        let items = [item("starter"), item("professional"), item("ecommerce")];
        let t = totals(&items);
        assert!((t.total - t.subtotal * (1.0 + TAX_RATE)).abs() < 1e-9);
    }

    #[test]
    fn add_and_remove_keep_the_count_key_in_step() {
        let store = MemoryStore::new();
        let cart = Cart::new(&store);
        assert_eq!(cart.count(), 0);

        cart.add("starter");
        cart.add("professional");
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.count(), 2);
        assert_eq!(store.get(keys::CART_COUNT).as_deref(), Some("2"));

        cart.remove(0);
        assert_eq!(cart.items()[0].id, "professional");
        assert_eq!(cart.count(), 1);

        // Out-of-range removals change nothing.
        cart.remove(7);
        assert_eq!(cart.count(), 1);
    }

    #[test]
    fn corrupt_stored_json_reads_as_an_empty_cart() {
        let store = MemoryStore::new();
        store.set(keys::CART_ITEMS, "{not json");
        let cart = Cart::new(&store);
        assert!(cart.items().is_empty());
    }
}

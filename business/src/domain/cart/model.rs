use serde::{Deserialize, Serialize};

use crate::domain::product::model::Product;

/// A product snapshot plus the number of units in the cart.
///
/// Serialized flat (`{ "code": ..., "product_name": ..., "quantity": 2 }`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn code(&self) -> &str {
        &self.product.code
    }
}

/// Cart line items, at most one per product code, in insertion order.
///
/// The item list is private so the one-item-per-code invariant can only be
/// changed through the operations below.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from stored items, merging duplicate codes and
    /// dropping zero-quantity entries.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            cart.add(item.product, item.quantity);
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Increments the existing line item or appends a new one.
    pub fn add(&mut self, product: Product, quantity: u32) {
        match self.position(&product.code) {
            Some(index) => {
                let item = &mut self.items[index];
                item.quantity = item.quantity.saturating_add(quantity);
            }
            None => self.items.push(CartItem { product, quantity }),
        }
    }

    /// Returns true when a line item was removed.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.code() != code);
        self.items.len() != before
    }

    /// Sets the quantity exactly; zero or negative removes the item.
    /// Returns true when the cart changed.
    pub fn update_quantity(&mut self, code: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(code);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.position(code) {
            Some(index) if self.items[index].quantity != quantity => {
                self.items[index].quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities, not the number of distinct items.
    pub fn total(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    pub fn quantity_of(&self, code: &str) -> u32 {
        self.position(code)
            .map(|index| self.items[index].quantity)
            .unwrap_or(0)
    }

    fn position(&self, code: &str) -> Option<usize> {
        self.items.iter().position(|item| item.code() == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product(code: &str) -> Product {
        Product {
            product_name: Some(format!("Product {code}")),
            ..Product::with_code(code)
        }
    }

    #[test]
    fn should_merge_repeat_adds_into_one_line_item() {
        let mut cart = Cart::new();

        cart.add(product("1"), 2);
        cart.add(product("1"), 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("1"), 5);
    }

    #[test]
    fn should_keep_insertion_order() {
        let mut cart = Cart::new();

        cart.add(product("b"), 1);
        cart.add(product("a"), 1);
        cart.add(product("b"), 1);

        let codes: Vec<&str> = cart.items().iter().map(CartItem::code).collect();
        assert_eq!(codes, vec!["b", "a"]);
    }

    #[test]
    fn should_ignore_remove_of_absent_code() {
        let mut cart = Cart::new();
        cart.add(product("1"), 2);
        let before = cart.clone();

        assert!(!cart.remove("missing"));
        assert_eq!(cart, before);
        assert_eq!(cart.total(), 2);
    }

    #[test]
    fn should_remove_item_when_quantity_updated_to_zero() {
        let mut cart = Cart::new();
        cart.add(product("1"), 4);

        assert!(cart.update_quantity("1", 0));

        assert!(!cart.contains("1"));
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn should_set_quantity_exactly_when_updated() {
        let mut cart = Cart::new();
        cart.add(product("1"), 4);

        cart.update_quantity("1", 2);

        assert_eq!(cart.quantity_of("1"), 2);
    }

    #[test]
    fn should_not_create_item_when_updating_absent_code() {
        let mut cart = Cart::new();

        assert!(!cart.update_quantity("1", 3));
        assert!(cart.is_empty());
    }

    #[test]
    fn should_report_zero_quantity_for_absent_code() {
        let cart = Cart::new();

        assert_eq!(cart.quantity_of("1"), 0);
        assert!(!cart.contains("1"));
    }

    #[test]
    fn should_merge_duplicates_when_rebuilt_from_stored_items() {
        let items = vec![
            CartItem { product: product("1"), quantity: 1 },
            CartItem { product: product("2"), quantity: 0 },
            CartItem { product: product("1"), quantity: 2 },
        ];

        let cart = Cart::from_items(items);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of("1"), 3);
    }

    #[test]
    fn should_serialize_line_items_flat() {
        let item = CartItem { product: Product::with_code("42"), quantity: 3 };

        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value, serde_json::json!({ "code": "42", "quantity": 3 }));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(u8, u32),
        Remove(u8),
        Update(u8, i64),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..5, 1u32..10).prop_map(|(c, q)| Op::Add(c, q)),
            (0u8..5).prop_map(Op::Remove),
            (0u8..5, -3i64..10).prop_map(|(c, q)| Op::Update(c, q)),
            Just(Op::Clear),
        ]
    }

    proptest! {
        #[test]
        fn should_keep_total_equal_to_sum_of_quantities(ops in prop::collection::vec(op(), 0..50)) {
            let mut cart = Cart::new();
            for op in ops {
                match op {
                    Op::Add(c, q) => cart.add(product(&c.to_string()), q),
                    Op::Remove(c) => {
                        cart.remove(&c.to_string());
                    }
                    Op::Update(c, q) => {
                        cart.update_quantity(&c.to_string(), q);
                    }
                    Op::Clear => cart.clear(),
                }

                let sum: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
                prop_assert_eq!(cart.total(), sum);
                prop_assert!(cart.items().iter().all(|i| i.quantity > 0));

                let mut codes: Vec<&str> = cart.items().iter().map(CartItem::code).collect();
                codes.sort_unstable();
                codes.dedup();
                prop_assert_eq!(codes.len(), cart.items().len());
            }
        }
    }
}

use async_trait::async_trait;

use crate::domain::cart::model::CartItem;
use crate::domain::product::model::Product;

/// The cart operation set.
///
/// Mutations return the cart contents after the change and have already
/// been persisted when they return.
#[async_trait]
pub trait ManageCartUseCase: Send + Sync {
    async fn items(&self) -> Vec<CartItem>;
    async fn add_to_cart(&self, product: Product, quantity: u32) -> Vec<CartItem>;
    async fn remove_from_cart(&self, code: &str) -> Vec<CartItem>;
    /// `quantity <= 0` removes the line item.
    async fn update_quantity(&self, code: &str, quantity: i64) -> Vec<CartItem>;
    async fn clear_cart(&self) -> Vec<CartItem>;
    async fn cart_total(&self) -> u64;
    async fn is_in_cart(&self, code: &str) -> bool;
    async fn item_quantity(&self, code: &str) -> u32;
}

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::cart::model::{Cart, CartItem};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::use_cases::manage::ManageCartUseCase;
use crate::domain::logger::Logger;
use crate::domain::product::model::Product;

/// The single writer of the cart.
///
/// Loaded once from the repository; every mutation writes the whole item
/// list back before the lock is released, so callers never observe an
/// unpersisted state. Write failures are logged and otherwise ignored.
pub struct CartStore {
    cart: Mutex<Cart>,
    repository: Arc<dyn CartRepository>,
    logger: Arc<dyn Logger>,
}

impl CartStore {
    /// Rehydrates the cart. Missing or unreadable data yields an empty cart.
    pub async fn load(repository: Arc<dyn CartRepository>, logger: Arc<dyn Logger>) -> Self {
        let cart = match repository.load().await {
            Ok(items) => {
                let cart = Cart::from_items(items);
                logger.info(&format!("Cart loaded with {} items", cart.items().len()));
                cart
            }
            Err(err) => {
                logger.warn(&format!("Discarding stored cart: {}", err));
                Cart::new()
            }
        };

        Self {
            cart: Mutex::new(cart),
            repository,
            logger,
        }
    }

    async fn mutate<F>(&self, change: F) -> Vec<CartItem>
    where
        F: FnOnce(&mut Cart) -> bool + Send,
    {
        let mut cart = self.cart.lock().await;
        if change(&mut *cart) {
            if let Err(err) = self.repository.save(cart.items()).await {
                self.logger
                    .warn(&format!("Failed to persist cart: {}", err));
            }
        }
        cart.items().to_vec()
    }
}

#[async_trait]
impl ManageCartUseCase for CartStore {
    async fn items(&self) -> Vec<CartItem> {
        self.cart.lock().await.items().to_vec()
    }

    async fn add_to_cart(&self, product: Product, quantity: u32) -> Vec<CartItem> {
        self.logger.debug(&format!(
            "Adding {} x{} to cart",
            product.code, quantity
        ));
        self.mutate(|cart| {
            cart.add(product, quantity);
            true
        })
        .await
    }

    async fn remove_from_cart(&self, code: &str) -> Vec<CartItem> {
        self.mutate(|cart| cart.remove(code)).await
    }

    async fn update_quantity(&self, code: &str, quantity: i64) -> Vec<CartItem> {
        self.mutate(|cart| cart.update_quantity(code, quantity))
            .await
    }

    async fn clear_cart(&self) -> Vec<CartItem> {
        self.mutate(|cart| {
            cart.clear();
            true
        })
        .await
    }

    async fn cart_total(&self) -> u64 {
        self.cart.lock().await.total()
    }

    async fn is_in_cart(&self, code: &str) -> bool {
        self.cart.lock().await.contains(code)
    }

    async fn item_quantity(&self, code: &str) -> u32 {
        self.cart.lock().await.quantity_of(code)
    }
}

use async_trait::async_trait;

use business::domain::cart::model::CartItem;
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;

use super::codec::{decode, encode};
use crate::kv_store::FileKeyValueStore;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "foodCart";

pub struct CartRepositoryFile {
    store: FileKeyValueStore,
}

impl CartRepositoryFile {
    pub fn new(store: FileKeyValueStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartRepository for CartRepositoryFile {
    async fn load(&self) -> Result<Vec<CartItem>, RepositoryError> {
        let raw = self
            .store
            .get(CART_STORAGE_KEY)
            .await
            .map_err(|_| RepositoryError::Persistence)?;

        match raw {
            Some(raw) => decode(&raw),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, items: &[CartItem]) -> Result<(), RepositoryError> {
        let raw = encode(items)?;
        self.store
            .set(CART_STORAGE_KEY, &raw)
            .await
            .map_err(|_| RepositoryError::Persistence)
    }
}

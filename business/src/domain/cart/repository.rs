use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::CartItem;

/// Durable storage of the whole cart.
///
/// The cart is always read and written wholesale: `load` once at startup,
/// `save` with the full list after every mutation. An unparsable stored
/// value is reported as [`RepositoryError::Corrupted`].
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn load(&self) -> Result<Vec<CartItem>, RepositoryError>;
    async fn save(&self, items: &[CartItem]) -> Result<(), RepositoryError>;
}

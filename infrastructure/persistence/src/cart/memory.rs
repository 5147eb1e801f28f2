use async_trait::async_trait;
use tokio::sync::Mutex;

use business::domain::cart::model::CartItem;
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;

/// Process-local cart storage, lost on restart.
#[derive(Default)]
pub struct CartRepositoryMemory {
    items: Mutex<Vec<CartItem>>,
}

impl CartRepositoryMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for CartRepositoryMemory {
    async fn load(&self) -> Result<Vec<CartItem>, RepositoryError> {
        Ok(self.items.lock().await.clone())
    }

    async fn save(&self, items: &[CartItem]) -> Result<(), RepositoryError> {
        *self.items.lock().await = items.to_vec();
        Ok(())
    }
}

use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct GetPopularProductsParams {
    pub limit: u32,
}

#[async_trait]
pub trait GetPopularProductsUseCase: Send + Sync {
    async fn execute(&self, params: GetPopularProductsParams)
    -> Result<Vec<Product>, ProductError>;
}

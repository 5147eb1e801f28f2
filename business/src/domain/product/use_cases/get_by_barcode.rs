use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;

pub struct GetProductByBarcodeParams {
    pub code: String,
}

#[async_trait]
pub trait GetProductByBarcodeUseCase: Send + Sync {
    async fn execute(&self, params: GetProductByBarcodeParams) -> Result<Product, ProductError>;
}

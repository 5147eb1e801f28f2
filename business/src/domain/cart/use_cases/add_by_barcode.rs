use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartItem;

pub struct AddToCartByBarcodeParams {
    pub code: String,
    pub quantity: i64,
}

#[async_trait]
pub trait AddToCartByBarcodeUseCase: Send + Sync {
    async fn execute(&self, params: AddToCartByBarcodeParams) -> Result<Vec<CartItem>, CartError>;
}

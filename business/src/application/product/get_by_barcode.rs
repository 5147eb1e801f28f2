use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::services::ProductCatalogService;
use crate::domain::product::use_cases::get_by_barcode::{
    GetProductByBarcodeParams, GetProductByBarcodeUseCase,
};

pub struct GetProductByBarcodeUseCaseImpl {
    pub catalog: Arc<dyn ProductCatalogService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductByBarcodeUseCase for GetProductByBarcodeUseCaseImpl {
    async fn execute(&self, params: GetProductByBarcodeParams) -> Result<Product, ProductError> {
        let code = params.code.trim();
        if code.is_empty() {
            return Err(ProductError::InvalidInput("Barcode is required"));
        }

        self.logger
            .info(&format!("Fetching product by barcode: {}", code));

        match self.catalog.get_product_by_barcode(code).await {
            Ok(product) => Ok(product),
            Err(ProductError::NotFound) => {
                self.logger.info(&format!("Product not found: {}", code));
                Err(ProductError::NotFound)
            }
            Err(err @ ProductError::InvalidInput(_)) => Err(err),
            Err(err) => {
                self.logger
                    .error(&format!("Error fetching product {}: {}", code, err));
                Err(ProductError::FetchFailed)
            }
        }
    }
}

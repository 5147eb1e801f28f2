use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::query::SearchResultPage;

pub struct GetProductsByBrandParams {
    pub brand: String,
    pub page: u32,
    pub page_size: u32,
}

#[async_trait]
pub trait GetProductsByBrandUseCase: Send + Sync {
    async fn execute(
        &self,
        params: GetProductsByBrandParams,
    ) -> Result<SearchResultPage, ProductError>;
}

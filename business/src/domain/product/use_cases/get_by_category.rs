use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::query::SearchResultPage;

pub struct GetProductsByCategoryParams {
    pub category: String,
    pub page: u32,
    pub page_size: u32,
}

#[async_trait]
pub trait GetProductsByCategoryUseCase: Send + Sync {
    async fn execute(
        &self,
        params: GetProductsByCategoryParams,
    ) -> Result<SearchResultPage, ProductError>;
}

use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::query::{SearchQuery, SearchResultPage};

#[async_trait]
pub trait SearchProductsUseCase: Send + Sync {
    async fn execute(&self, query: SearchQuery) -> Result<SearchResultPage, ProductError>;
}

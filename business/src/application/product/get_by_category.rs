use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::query::{SearchQuery, SearchResultPage};
use crate::domain::product::use_cases::get_by_category::{
    GetProductsByCategoryParams, GetProductsByCategoryUseCase,
};
use crate::domain::product::use_cases::search::SearchProductsUseCase;

pub struct GetProductsByCategoryUseCaseImpl {
    pub search: Arc<dyn SearchProductsUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductsByCategoryUseCase for GetProductsByCategoryUseCaseImpl {
    async fn execute(
        &self,
        params: GetProductsByCategoryParams,
    ) -> Result<SearchResultPage, ProductError> {
        self.logger
            .debug(&format!("Listing products in category: {}", params.category));

        self.search
            .execute(SearchQuery {
                categories: params.category,
                page: params.page,
                page_size: params.page_size,
                ..SearchQuery::default()
            })
            .await
    }
}

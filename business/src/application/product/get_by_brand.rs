use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::query::{SearchQuery, SearchResultPage};
use crate::domain::product::use_cases::get_by_brand::{
    GetProductsByBrandParams, GetProductsByBrandUseCase,
};
use crate::domain::product::use_cases::search::SearchProductsUseCase;

pub struct GetProductsByBrandUseCaseImpl {
    pub search: Arc<dyn SearchProductsUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetProductsByBrandUseCase for GetProductsByBrandUseCaseImpl {
    async fn execute(
        &self,
        params: GetProductsByBrandParams,
    ) -> Result<SearchResultPage, ProductError> {
        self.logger
            .debug(&format!("Listing products of brand: {}", params.brand));

        self.search
            .execute(SearchQuery {
                brands: params.brand,
                page: params.page,
                page_size: params.page_size,
                ..SearchQuery::default()
            })
            .await
    }
}

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::query::SearchQuery;
use crate::domain::product::use_cases::popular::{
    GetPopularProductsParams, GetPopularProductsUseCase,
};
use crate::domain::product::use_cases::search::SearchProductsUseCase;
use crate::domain::product::value_objects::SortKey;

pub const DEFAULT_POPULAR_LIMIT: u32 = 10;

pub struct GetPopularProductsUseCaseImpl {
    pub search: Arc<dyn SearchProductsUseCase>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetPopularProductsUseCase for GetPopularProductsUseCaseImpl {
    async fn execute(
        &self,
        params: GetPopularProductsParams,
    ) -> Result<Vec<Product>, ProductError> {
        let query = SearchQuery {
            page_size: params.limit,
            sort_by: SortKey::Popularity.to_string(),
            ..SearchQuery::default()
        };

        match self.search.execute(query).await {
            Ok(page) => Ok(page.products),
            Err(err) => {
                self.logger
                    .error(&format!("Error fetching popular products: {}", err));
                Err(ProductError::FetchFailed)
            }
        }
    }
}

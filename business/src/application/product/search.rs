use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::query::{SearchQuery, SearchResultPage};
use crate::domain::product::services::ProductCatalogService;
use crate::domain::product::use_cases::search::SearchProductsUseCase;

pub struct SearchProductsUseCaseImpl {
    pub catalog: Arc<dyn ProductCatalogService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SearchProductsUseCase for SearchProductsUseCaseImpl {
    async fn execute(&self, query: SearchQuery) -> Result<SearchResultPage, ProductError> {
        self.logger.info(&format!(
            "Searching products: term='{}' page={} page_size={}",
            query.search, query.page, query.page_size
        ));

        match self.catalog.search_products(&query).await {
            Ok(page) => {
                self.logger.info(&format!(
                    "Search returned {} products ({} total, {} pages)",
                    page.products.len(),
                    page.count,
                    page.total_pages
                ));
                Ok(page)
            }
            Err(err) => {
                self.logger
                    .error(&format!("Error searching products: {}", err));
                Err(ProductError::SearchFailed)
            }
        }
    }
}

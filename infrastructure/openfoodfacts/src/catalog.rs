use async_trait::async_trait;
use reqwest::StatusCode;

use business::domain::product::errors::ProductError;
use business::domain::product::model::Product;
use business::domain::product::query::{SearchQuery, SearchResultPage};
use business::domain::product::services::ProductCatalogService;

use crate::client::OpenFoodFactsClient;
use crate::dto::{ProductResponse, SearchResponse};
use crate::fields::PRODUCT_FIELDS;
use crate::query::build_search_params;

/// [`ProductCatalogService`] backed by the Open Food Facts HTTP API.
///
/// Transport, status and decoding failures are logged here and surface only
/// as [`ProductError`] kinds.
pub struct OpenFoodFactsCatalog {
    client: OpenFoodFactsClient,
}

impl OpenFoodFactsCatalog {
    pub fn new(client: OpenFoodFactsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductCatalogService for OpenFoodFactsCatalog {
    async fn search_products(&self, query: &SearchQuery) -> Result<SearchResultPage, ProductError> {
        let response = self
            .client
            .client
            .get(self.client.search_url())
            .query(&build_search_params(query))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error searching products: {e}");
                ProductError::SearchFailed
            })?;

        if !response.status().is_success() {
            tracing::error!("Error searching products: HTTP {}", response.status());
            return Err(ProductError::SearchFailed);
        }

        let data: SearchResponse = response.json().await.map_err(|e| {
            tracing::error!("Error decoding search response: {e}");
            ProductError::SearchFailed
        })?;

        let page = data
            .page
            .and_then(|p| u32::try_from(p).ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);
        let page_size = data
            .page_size
            .and_then(|s| u32::try_from(s).ok())
            .filter(|s| *s > 0)
            .unwrap_or(query.page_size);

        Ok(SearchResultPage::new(
            data.products,
            data.count.unwrap_or(0),
            page,
            page_size,
            query.page_size,
        ))
    }

    async fn get_product_by_barcode(&self, code: &str) -> Result<Product, ProductError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ProductError::InvalidInput("Barcode is required"));
        }

        let response = self
            .client
            .client
            .get(self.client.product_url(code))
            .query(&[("fields", PRODUCT_FIELDS.join(","))])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Error fetching product {code}: {e}");
                ProductError::FetchFailed
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProductError::NotFound);
        }
        if !response.status().is_success() {
            tracing::error!("Error fetching product {code}: HTTP {}", response.status());
            return Err(ProductError::FetchFailed);
        }

        let data: ProductResponse = response.json().await.map_err(|e| {
            tracing::error!("Error decoding product {code}: {e}");
            ProductError::FetchFailed
        })?;

        let mut product = data.into_product().ok_or(ProductError::NotFound)?;
        if product.code.is_empty() {
            product.code = code.to_string();
        }
        Ok(product)
    }
}

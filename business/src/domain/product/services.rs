use async_trait::async_trait;

use super::errors::ProductError;
use super::model::Product;
use super::query::{SearchQuery, SearchResultPage};

/// Service port for the external nutrition database.
///
/// Implementations are stateless and safe to call concurrently. Transport
/// failures must be translated into [`ProductError`] variants:
/// - search failures -> `SearchFailed`
/// - empty barcode -> `InvalidInput`, unknown barcode -> `NotFound`,
///   other lookup failures -> `FetchFailed`
#[async_trait]
pub trait ProductCatalogService: Send + Sync {
    async fn search_products(&self, query: &SearchQuery)
    -> Result<SearchResultPage, ProductError>;

    async fn get_product_by_barcode(&self, code: &str) -> Result<Product, ProductError>;
}

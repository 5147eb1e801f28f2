use std::sync::Arc;
use std::time::Duration;

use super::cache::{CacheOptions, QueryCache};
use super::key::QueryKey;
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::query::{SearchQuery, SearchResultPage, Suggestion};
use crate::domain::product::use_cases::get_by_barcode::{
    GetProductByBarcodeParams, GetProductByBarcodeUseCase,
};
use crate::domain::product::use_cases::get_by_brand::{
    GetProductsByBrandParams, GetProductsByBrandUseCase,
};
use crate::domain::product::use_cases::get_by_category::{
    GetProductsByCategoryParams, GetProductsByCategoryUseCase,
};
use crate::domain::product::use_cases::popular::{
    GetPopularProductsParams, GetPopularProductsUseCase,
};
use crate::domain::product::use_cases::search::SearchProductsUseCase;
use crate::domain::product::use_cases::suggestions::{
    GetSearchSuggestionsUseCase, GetSuggestionsParams,
};

pub const SUGGESTIONS_STALE_TIME: Duration = Duration::from_secs(60);
pub const POPULAR_STALE_TIME: Duration = Duration::from_secs(30 * 60);

pub struct CatalogUseCases {
    pub search: Arc<dyn SearchProductsUseCase>,
    pub get_by_barcode: Arc<dyn GetProductByBarcodeUseCase>,
    pub get_by_category: Arc<dyn GetProductsByCategoryUseCase>,
    pub get_by_brand: Arc<dyn GetProductsByBrandUseCase>,
    pub suggestions: Arc<dyn GetSearchSuggestionsUseCase>,
    pub popular: Arc<dyn GetPopularProductsUseCase>,
}

/// Cached entry point to the catalog use cases.
///
/// Queries that are not enabled for their parameters resolve to `Ok(None)`
/// without touching the cache or the network.
pub struct CatalogQueryClient {
    use_cases: CatalogUseCases,
    searches: QueryCache<SearchResultPage, ProductError>,
    products: QueryCache<Product, ProductError>,
    categories: QueryCache<SearchResultPage, ProductError>,
    brands: QueryCache<SearchResultPage, ProductError>,
    suggestions: QueryCache<Vec<Suggestion>, ProductError>,
    popular: QueryCache<Vec<Product>, ProductError>,
}

impl CatalogQueryClient {
    pub fn new(use_cases: CatalogUseCases, options: CacheOptions, logger: Arc<dyn Logger>) -> Self {
        Self {
            use_cases,
            searches: QueryCache::new("search", options, Arc::clone(&logger)),
            products: QueryCache::new("product", options, Arc::clone(&logger)),
            categories: QueryCache::new("category", options, Arc::clone(&logger)),
            brands: QueryCache::new("brand", options, Arc::clone(&logger)),
            suggestions: QueryCache::new(
                "suggestions",
                CacheOptions {
                    stale_time: SUGGESTIONS_STALE_TIME,
                    ..options
                },
                Arc::clone(&logger),
            ),
            popular: QueryCache::new(
                "popular",
                CacheOptions {
                    stale_time: POPULAR_STALE_TIME,
                    ..options
                },
                logger,
            ),
        }
    }

    /// The search cache, shared with observers that follow a search session.
    pub fn search_cache(&self) -> QueryCache<SearchResultPage, ProductError> {
        self.searches.clone()
    }

    pub fn search_use_case(&self) -> Arc<dyn SearchProductsUseCase> {
        Arc::clone(&self.use_cases.search)
    }

    pub fn barcode_use_case(&self) -> Arc<dyn GetProductByBarcodeUseCase> {
        Arc::clone(&self.use_cases.get_by_barcode)
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Option<SearchResultPage>, ProductError> {
        if !query.is_enabled() {
            return Ok(None);
        }
        let use_case = self.search_use_case();
        let params = query.clone();
        self.searches
            .fetch(QueryKey::search(query), move || {
                let use_case = Arc::clone(&use_case);
                let params = params.clone();
                async move { use_case.execute(params).await }
            })
            .await
            .map(Some)
    }

    pub async fn product(&self, code: &str) -> Result<Option<Product>, ProductError> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }
        self.products
            .fetch(QueryKey::product(code), self.product_fetcher(code))
            .await
            .map(Some)
    }

    /// Starts loading a product detail so a later `product` call is served
    /// from the cache.
    pub fn prefetch_product(&self, code: &str) {
        let code = code.trim();
        if !code.is_empty() {
            self.products
                .prefetch(QueryKey::product(code), self.product_fetcher(code));
        }
    }

    pub async fn category(
        &self,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Option<SearchResultPage>, ProductError> {
        if category.is_empty() {
            return Ok(None);
        }
        let use_case = Arc::clone(&self.use_cases.get_by_category);
        let category = category.to_string();
        self.categories
            .fetch(QueryKey::category(&category, page, page_size), move || {
                let use_case = Arc::clone(&use_case);
                let category = category.clone();
                async move {
                    use_case
                        .execute(GetProductsByCategoryParams {
                            category,
                            page,
                            page_size,
                        })
                        .await
                }
            })
            .await
            .map(Some)
    }

    pub async fn brand(
        &self,
        brand: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Option<SearchResultPage>, ProductError> {
        if brand.is_empty() {
            return Ok(None);
        }
        let use_case = Arc::clone(&self.use_cases.get_by_brand);
        let brand = brand.to_string();
        self.brands
            .fetch(QueryKey::brand(&brand, page, page_size), move || {
                let use_case = Arc::clone(&use_case);
                let brand = brand.clone();
                async move {
                    use_case
                        .execute(GetProductsByBrandParams {
                            brand,
                            page,
                            page_size,
                        })
                        .await
                }
            })
            .await
            .map(Some)
    }

    /// Best-effort; terms under two characters yield an empty list.
    pub async fn suggestions(&self, term: &str) -> Vec<Suggestion> {
        if term.chars().count() < 2 {
            return Vec::new();
        }
        let use_case = Arc::clone(&self.use_cases.suggestions);
        let term = term.to_string();
        self.suggestions
            .fetch(QueryKey::suggestions(&term), move || {
                let use_case = Arc::clone(&use_case);
                let term = term.clone();
                async move {
                    Ok::<_, ProductError>(use_case.execute(GetSuggestionsParams { term }).await)
                }
            })
            .await
            .unwrap_or_default()
    }

    pub async fn popular(&self, limit: u32) -> Result<Vec<Product>, ProductError> {
        let use_case = Arc::clone(&self.use_cases.popular);
        self.popular
            .fetch(QueryKey::popular(limit), move || {
                let use_case = Arc::clone(&use_case);
                async move { use_case.execute(GetPopularProductsParams { limit }).await }
            })
            .await
    }

    pub fn invalidate_products(&self) -> usize {
        self.searches.invalidate_prefix(&["products"])
            + self.products.invalidate_prefix(&["products"])
            + self.categories.invalidate_prefix(&["products"])
            + self.brands.invalidate_prefix(&["products"])
            + self.suggestions.invalidate_prefix(&["products"])
            + self.popular.invalidate_prefix(&["products"])
    }

    /// Runs garbage collection on every cache; returns the number of
    /// entries dropped.
    pub fn collect_garbage(&self) -> usize {
        self.searches.collect_garbage()
            + self.products.collect_garbage()
            + self.categories.collect_garbage()
            + self.brands.collect_garbage()
            + self.suggestions.collect_garbage()
            + self.popular.collect_garbage()
    }

    fn product_fetcher(
        &self,
        code: &str,
    ) -> impl Fn() -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Product, ProductError>> + Send>,
    > + Send
    + Sync
    + 'static {
        let use_case = self.barcode_use_case();
        let code = code.to_string();
        move || {
            let use_case = Arc::clone(&use_case);
            let code = code.clone();
            Box::pin(async move {
                use_case
                    .execute(GetProductByBarcodeParams { code })
                    .await
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Search {}

        #[async_trait]
        impl SearchProductsUseCase for Search {
            async fn execute(&self, query: SearchQuery) -> Result<SearchResultPage, ProductError>;
        }
    }

    mock! {
        pub Barcode {}

        #[async_trait]
        impl GetProductByBarcodeUseCase for Barcode {
            async fn execute(&self, params: GetProductByBarcodeParams) -> Result<Product, ProductError>;
        }
    }

    mock! {
        pub Category {}

        #[async_trait]
        impl GetProductsByCategoryUseCase for Category {
            async fn execute(&self, params: GetProductsByCategoryParams) -> Result<SearchResultPage, ProductError>;
        }
    }

    mock! {
        pub Brand {}

        #[async_trait]
        impl GetProductsByBrandUseCase for Brand {
            async fn execute(&self, params: GetProductsByBrandParams) -> Result<SearchResultPage, ProductError>;
        }
    }

    mock! {
        pub Suggestions {}

        #[async_trait]
        impl GetSearchSuggestionsUseCase for Suggestions {
            async fn execute(&self, params: GetSuggestionsParams) -> Vec<Suggestion>;
        }
    }

    mock! {
        pub Popular {}

        #[async_trait]
        impl GetPopularProductsUseCase for Popular {
            async fn execute(&self, params: GetPopularProductsParams) -> Result<Vec<Product>, ProductError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    struct Mocks {
        search: MockSearch,
        barcode: MockBarcode,
        suggestions: MockSuggestions,
        popular: MockPopular,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                search: MockSearch::new(),
                barcode: MockBarcode::new(),
                suggestions: MockSuggestions::new(),
                popular: MockPopular::new(),
            }
        }

        fn into_client(self) -> CatalogQueryClient {
            let use_cases = CatalogUseCases {
                search: Arc::new(self.search),
                get_by_barcode: Arc::new(self.barcode),
                get_by_category: Arc::new(MockCategory::new()),
                get_by_brand: Arc::new(MockBrand::new()),
                suggestions: Arc::new(self.suggestions),
                popular: Arc::new(self.popular),
            };
            CatalogQueryClient::new(use_cases, CacheOptions::default(), mock_logger())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_issue_search_when_every_parameter_is_default() {
        let mut mocks = Mocks::new();
        mocks.search.expect_execute().never();
        let client = mocks.into_client();

        let result = client.search(&SearchQuery::default()).await;

        assert_eq!(result, Ok(None));
    }

    #[tokio::test(start_paused = true)]
    async fn should_serve_repeated_search_from_cache() {
        let mut mocks = Mocks::new();
        mocks
            .search
            .expect_execute()
            .times(1)
            .returning(|q| Ok(SearchResultPage::new(Vec::new(), 125, q.page, 24, 24)));
        let client = mocks.into_client();
        let query = SearchQuery {
            search: "milk".to_string(),
            page_size: 24,
            ..SearchQuery::default()
        };

        let first = client.search(&query).await.unwrap().unwrap();
        let second = client.search(&query).await.unwrap().unwrap();

        assert_eq!(first, second);
        assert_eq!(second.total_pages, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn should_retry_failed_product_lookup_once() {
        let mut mocks = Mocks::new();
        mocks
            .barcode
            .expect_execute()
            .times(2)
            .returning(|_| Err(ProductError::FetchFailed));
        let client = mocks.into_client();

        let result = client.product("737628064502").await;

        assert_eq!(result, Err(ProductError::FetchFailed));
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_retry_missing_product() {
        let mut mocks = Mocks::new();
        mocks
            .barcode
            .expect_execute()
            .times(1)
            .returning(|_| Err(ProductError::NotFound));
        let client = mocks.into_client();

        let result = client.product("737628064502").await;

        assert_eq!(result, Err(ProductError::NotFound));
    }

    #[tokio::test(start_paused = true)]
    async fn should_disable_product_query_for_blank_barcode() {
        let mut mocks = Mocks::new();
        mocks.barcode.expect_execute().never();
        let client = mocks.into_client();

        assert_eq!(client.product("  ").await, Ok(None));
    }

    #[tokio::test(start_paused = true)]
    async fn should_serve_prefetched_product_from_cache() {
        let mut mocks = Mocks::new();
        mocks
            .barcode
            .expect_execute()
            .times(1)
            .returning(|params| Ok(Product::with_code(params.code)));
        let client = mocks.into_client();

        client.prefetch_product("42");
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        let product = client.product("42").await;

        assert_eq!(product.unwrap().unwrap().code, "42");
    }

    #[tokio::test(start_paused = true)]
    async fn should_skip_suggestions_for_short_terms() {
        let mut mocks = Mocks::new();
        mocks.suggestions.expect_execute().never();
        let client = mocks.into_client();

        assert!(client.suggestions("a").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_cache_empty_suggestions_from_failed_lookup() {
        let mut mocks = Mocks::new();
        mocks
            .suggestions
            .expect_execute()
            .times(1)
            .returning(|_| Vec::new());
        let client = mocks.into_client();

        assert!(client.suggestions("choc").await.is_empty());
        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(client.suggestions("choc").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn should_refetch_popular_only_after_its_longer_stale_window() {
        let mut mocks = Mocks::new();
        mocks
            .popular
            .expect_execute()
            .times(1)
            .returning(|_| Ok(vec![Product::with_code("1")]));
        let client = mocks.into_client();

        client.popular(10).await.unwrap();
        tokio::time::advance(Duration::from_secs(20 * 60)).await;
        let cached = client.popular(10).await.unwrap();

        assert_eq!(cached.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_refetch_popular_in_background_after_invalidation() {
        let mut mocks = Mocks::new();
        let mut sequence = mockall::Sequence::new();
        mocks
            .popular
            .expect_execute()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(vec![Product::with_code("1")]));
        mocks
            .popular
            .expect_execute()
            .times(1)
            .in_sequence(&mut sequence)
            .returning(|_| Ok(vec![Product::with_code("1"), Product::with_code("2")]));
        let client = mocks.into_client();

        client.popular(10).await.unwrap();
        assert_eq!(client.invalidate_products(), 1);
        let stale = client.popular(10).await.unwrap();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        let refreshed = client.popular(10).await.unwrap();

        assert_eq!(stale.len(), 1);
        assert_eq!(refreshed.len(), 2);
    }
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::debounce::Debouncer;
use crate::application::query::client::CatalogQueryClient;
use crate::application::query::key::QueryKey;
use crate::application::query::observer::{QueryObserver, QueryState};
use crate::domain::logger::Logger;
use crate::domain::product::errors::ProductError;
use crate::domain::product::model::Product;
use crate::domain::product::query::{DEFAULT_SORT_BY, SearchQuery, SearchResultPage};
use crate::domain::product::sorting::sort_products;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);
pub const HOME_PAGE_SIZE: u32 = 24;

pub const EMPTY_BARCODE_MESSAGE: &str = "Please enter a barcode";
pub const BARCODE_NOT_FOUND_MESSAGE: &str =
    "Product not found. Please check the barcode and try again.";

/// Committed search parameters of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub term: String,
    pub category: String,
    pub nutriscore_grade: String,
    pub sort_by: String,
    pub page: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            term: String::new(),
            category: String::new(),
            nutriscore_grade: String::new(),
            sort_by: DEFAULT_SORT_BY.to_string(),
            page: 1,
        }
    }
}

impl SearchFilters {
    /// Remote query for these filters. Ordering other than popularity is
    /// applied locally, so the remote sort is always popularity.
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            search: self.term.trim().to_string(),
            page: self.page,
            page_size: HOME_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            categories: self.category.clone(),
            brands: String::new(),
            nutriscore_grade: self.nutriscore_grade.clone(),
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.term.trim().is_empty()
            || !self.category.is_empty()
            || !self.nutriscore_grade.is_empty()
            || self.sort_by != DEFAULT_SORT_BY
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarcodeOutcome {
    /// The product exists; show its detail view.
    Navigate(String),
    /// Inline error to display while staying on the listing.
    Error(String),
    /// A lookup is already running; the submission was ignored.
    InProgress,
}

struct SearchingGuard<'a>(&'a AtomicBool);

impl Drop for SearchingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Orchestrates the product listing: debounced text input, immediate filter
/// changes, paging and the independent barcode lookup.
///
/// Filter changes are published on a watch channel; [`SearchSession::drive`]
/// turns each change into a cached search whose state is exposed through
/// [`SearchSession::state`].
pub struct SearchSession {
    client: Arc<CatalogQueryClient>,
    observer: QueryObserver<SearchResultPage, ProductError>,
    filters: Arc<watch::Sender<SearchFilters>>,
    input: Mutex<String>,
    debouncer: Mutex<Debouncer<String>>,
    barcode_searching: AtomicBool,
    logger: Arc<dyn Logger>,
}

impl SearchSession {
    pub fn new(client: Arc<CatalogQueryClient>, logger: Arc<dyn Logger>) -> Arc<Self> {
        let (filters, _) = watch::channel(SearchFilters::default());
        let filters = Arc::new(filters);

        let commit = {
            let filters = Arc::clone(&filters);
            let logger = Arc::clone(&logger);
            move |term: String| {
                logger.debug(&format!("Committing search term '{}'", term));
                filters.send_modify(|f| {
                    f.term = term;
                    f.page = 1;
                });
            }
        };

        Arc::new(Self {
            observer: QueryObserver::new(client.search_cache()),
            client,
            filters,
            input: Mutex::new(String::new()),
            debouncer: Mutex::new(Debouncer::new(SEARCH_DEBOUNCE, commit)),
            barcode_searching: AtomicBool::new(false),
            logger,
        })
    }

    /// Records a keystroke. The term is committed once typing pauses.
    pub fn set_search_term(&self, term: &str) {
        *lock(&self.input) = term.to_string();
        lock(&self.debouncer).push(term.to_string());
    }

    /// The raw, possibly uncommitted, text input.
    pub fn search_input(&self) -> String {
        lock(&self.input).clone()
    }

    pub fn is_debouncing(&self) -> bool {
        lock(&self.debouncer).is_pending()
    }

    pub fn set_category(&self, category: &str) {
        self.update_filters(|f| f.category = category.to_string());
    }

    pub fn set_nutriscore_grade(&self, grade: &str) {
        self.update_filters(|f| f.nutriscore_grade = grade.to_string());
    }

    pub fn set_sort_by(&self, sort_by: &str) {
        self.update_filters(|f| f.sort_by = sort_by.to_string());
    }

    /// Advances while there is a next page. Returns true when it moved.
    pub fn next_page(&self) -> bool {
        let total_pages = self
            .observer
            .state()
            .data
            .map(|page| page.total_pages)
            .unwrap_or(0);
        self.filters.send_if_modified(|f| {
            if f.page < total_pages {
                f.page += 1;
                true
            } else {
                false
            }
        })
    }

    /// Goes back one page, never below the first.
    pub fn previous_page(&self) -> bool {
        self.filters.send_if_modified(|f| {
            if f.page > 1 {
                f.page -= 1;
                true
            } else {
                false
            }
        })
    }

    pub fn clear_filters(&self) {
        lock(&self.debouncer).cancel();
        lock(&self.input).clear();
        self.filters.send_if_modified(|f| {
            let cleared = SearchFilters::default();
            let changed = *f != cleared;
            *f = cleared;
            changed
        });
    }

    pub fn filters(&self) -> SearchFilters {
        self.filters.borrow().clone()
    }

    pub fn subscribe_filters(&self) -> watch::Receiver<SearchFilters> {
        self.filters.subscribe()
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.borrow().has_active_filters()
    }

    pub fn state(&self) -> QueryState<SearchResultPage, ProductError> {
        self.observer.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState<SearchResultPage, ProductError>> {
        self.observer.subscribe()
    }

    /// Current results in the selected display order.
    pub fn visible_products(&self) -> Vec<Product> {
        let sort_by = self.filters.borrow().sort_by.clone();
        self.observer
            .state()
            .data
            .map(|page| sort_products(&page.products, &sort_by))
            .unwrap_or_default()
    }

    /// Resolves the current filters and waits for the result.
    pub async fn load_results(&self) {
        let query = self.filters.borrow().to_query();
        search(self.observer.clone(), Arc::clone(&self.client), query).await;
    }

    /// Runs a search for the current filters and for every later change,
    /// until the session is dropped. Superseded searches finish in the
    /// background and their results are not shown.
    pub fn drive(&self) -> JoinHandle<()> {
        let mut filters = self.filters.subscribe();
        let observer = self.observer.clone();
        let client = Arc::clone(&self.client);
        tokio::spawn(async move {
            loop {
                let query = filters.borrow_and_update().to_query();
                tokio::spawn(search(observer.clone(), Arc::clone(&client), query));
                if filters.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    pub fn is_barcode_searching(&self) -> bool {
        self.barcode_searching.load(Ordering::SeqCst)
    }

    /// Looks a barcode up directly, bypassing the listing filters.
    pub async fn submit_barcode(&self, input: &str) -> BarcodeOutcome {
        let code = input.trim();
        if code.is_empty() {
            return BarcodeOutcome::Error(EMPTY_BARCODE_MESSAGE.to_string());
        }

        if self
            .barcode_searching
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return BarcodeOutcome::InProgress;
        }
        let _searching = SearchingGuard(&self.barcode_searching);

        match self.client.product(code).await {
            Ok(Some(_)) => BarcodeOutcome::Navigate(code.to_string()),
            Ok(None) | Err(ProductError::NotFound) => {
                BarcodeOutcome::Error(BARCODE_NOT_FOUND_MESSAGE.to_string())
            }
            Err(err) => {
                self.logger
                    .warn(&format!("Barcode lookup for {} failed: {}", code, err));
                BarcodeOutcome::Error(err.user_message())
            }
        }
    }

    fn update_filters<F>(&self, change: F)
    where
        F: FnOnce(&mut SearchFilters),
    {
        self.filters.send_if_modified(|f| {
            let before = f.clone();
            change(f);
            f.page = 1;
            *f != before
        });
    }
}

async fn search(
    observer: QueryObserver<SearchResultPage, ProductError>,
    client: Arc<CatalogQueryClient>,
    query: SearchQuery,
) {
    let key = QueryKey::search(&query);
    let use_case = client.search_use_case();
    observer
        .observe(Some(key), move || {
            let use_case = Arc::clone(&use_case);
            let query = query.clone();
            async move { use_case.execute(query).await }
        })
        .await;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::query::cache::CacheOptions;
    use crate::application::query::client::CatalogUseCases;
    use crate::domain::product::query::Suggestion;
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

    fn named(code: &str, name: &str) -> Product {
        Product {
            product_name: Some(name.to_string()),
            ..Product::with_code(code)
        }
    }

    fn session(search: MockSearch, barcode: MockBarcode) -> Arc<SearchSession> {
        let use_cases = CatalogUseCases {
            search: Arc::new(search),
            get_by_barcode: Arc::new(barcode),
            get_by_category: Arc::new(MockCategory::new()),
            get_by_brand: Arc::new(MockBrand::new()),
            suggestions: Arc::new(MockSuggestions::new()),
            popular: Arc::new(MockPopular::new()),
        };
        let client = CatalogQueryClient::new(use_cases, CacheOptions::default(), mock_logger());
        SearchSession::new(Arc::new(client), mock_logger())
    }

    fn paged_search(count: u64) -> MockSearch {
        let mut search = MockSearch::new();
        search.expect_execute().returning(move |q| {
            Ok(SearchResultPage::new(
                vec![named("1", "banana"), named("2", "Apple"), named("3", "cherry")],
                count,
                q.page,
                q.page_size,
                q.page_size,
            ))
        });
        search
    }

    #[tokio::test(start_paused = true)]
    async fn should_commit_term_once_when_typing_quickly() {
        let session = session(MockSearch::new(), MockBarcode::new());
        session.set_category("dairy");
        let mut filters = session.subscribe_filters();
        filters.mark_unchanged();

        for term in ["m", "mi", "mil", "milk", "milky"] {
            session.set_search_term(term);
            tokio::time::advance(Duration::from_millis(100)).await;
            tokio::task::yield_now().await;
            assert!(!filters.has_changed().unwrap());
        }

        tokio::time::advance(SEARCH_DEBOUNCE).await;
        tokio::task::yield_now().await;

        assert!(filters.has_changed().unwrap());
        let committed = filters.borrow_and_update().clone();
        assert_eq!(committed.term, "milky");
        assert_eq!(committed.page, 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(!filters.has_changed().unwrap());
        assert_eq!(session.search_input(), "milky");
    }

    #[tokio::test(start_paused = true)]
    async fn should_reset_page_when_category_changes() {
        let session = session(paged_search(100), MockBarcode::new());
        session.load_results().await;
        assert!(session.next_page());
        assert_eq!(session.filters().page, 2);

        session.set_category("snacks");

        let filters = session.filters();
        assert_eq!(filters.category, "snacks");
        assert_eq!(filters.page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_apply_sort_immediately_without_debounce() {
        let session = session(MockSearch::new(), MockBarcode::new());

        session.set_sort_by("product_name");

        assert_eq!(session.filters().sort_by, "product_name");
        assert_eq!(session.filters().to_query().sort_by, "popularity");
        assert!(!session.is_debouncing());
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_paging_at_total_pages() {
        let session = session(paged_search(30), MockBarcode::new());
        session.load_results().await;

        assert!(session.next_page());
        assert!(!session.next_page());
        assert_eq!(session.filters().page, 2);

        assert!(session.previous_page());
        assert!(!session.previous_page());
        assert_eq!(session.filters().page, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_sort_visible_products_locally() {
        let session = session(paged_search(3), MockBarcode::new());
        session.load_results().await;

        session.set_sort_by("product_name");
        let names: Vec<String> = session
            .visible_products()
            .into_iter()
            .filter_map(|p| p.product_name)
            .collect();

        assert_eq!(names, vec!["Apple", "banana", "cherry"]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_reset_everything_when_filters_cleared() {
        let session = session(MockSearch::new(), MockBarcode::new());
        session.set_category("dairy");
        session.set_nutriscore_grade("a");
        session.set_sort_by("nutriscore_desc");
        session.set_search_term("milk");
        assert!(session.has_active_filters());

        session.clear_filters();
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio::task::yield_now().await;

        assert_eq!(session.filters(), SearchFilters::default());
        assert_eq!(session.search_input(), "");
        assert!(!session.has_active_filters());
    }

    #[tokio::test(start_paused = true)]
    async fn should_publish_results_when_driven() {
        let mut search = MockSearch::new();
        search
            .expect_execute()
            .withf(|q| q.page_size == HOME_PAGE_SIZE && q.page == 1)
            .returning(|_| Ok(SearchResultPage::new(vec![named("1", "Milk")], 1, 1, 24, 24)));
        let session = session(search, MockBarcode::new());
        let mut state = session.subscribe();

        let driver = session.drive();
        while state.borrow_and_update().data.is_none() {
            state.changed().await.unwrap();
        }
        driver.abort();

        assert_eq!(session.state().data.unwrap().count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_require_barcode_before_lookup() {
        let mut barcode = MockBarcode::new();
        barcode.expect_execute().never();
        let session = session(MockSearch::new(), barcode);

        let outcome = session.submit_barcode("   ").await;

        assert_eq!(outcome, BarcodeOutcome::Error(EMPTY_BARCODE_MESSAGE.to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn should_navigate_when_barcode_found() {
        let mut barcode = MockBarcode::new();
        barcode
            .expect_execute()
            .returning(|params| Ok(Product::with_code(params.code)));
        let session = session(MockSearch::new(), barcode);

        let outcome = session.submit_barcode(" 737628064502 ").await;

        assert_eq!(outcome, BarcodeOutcome::Navigate("737628064502".to_string()));
        assert!(!session.is_barcode_searching());
    }

    #[tokio::test(start_paused = true)]
    async fn should_show_not_found_copy_when_barcode_unknown() {
        let mut barcode = MockBarcode::new();
        barcode
            .expect_execute()
            .returning(|_| Err(ProductError::NotFound));
        let session = session(MockSearch::new(), barcode);

        let outcome = session.submit_barcode("737628064502").await;

        assert_eq!(
            outcome,
            BarcodeOutcome::Error(BARCODE_NOT_FOUND_MESSAGE.to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn should_show_failure_copy_when_lookup_fails() {
        let mut barcode = MockBarcode::new();
        barcode
            .expect_execute()
            .times(2)
            .returning(|_| Err(ProductError::FetchFailed));
        let session = session(MockSearch::new(), barcode);

        let outcome = session.submit_barcode("737628064502").await;

        assert_eq!(
            outcome,
            BarcodeOutcome::Error(ProductError::FetchFailed.user_message())
        );
        assert!(!session.is_barcode_searching());
    }

    #[tokio::test(start_paused = true)]
    async fn should_ignore_resubmission_while_lookup_in_flight() {
        let mut barcode = MockBarcode::new();
        barcode
            .expect_execute()
            .times(1)
            .returning(|params| Ok(Product::with_code(params.code)));
        let session = session(MockSearch::new(), barcode);
        session.barcode_searching.store(true, Ordering::SeqCst);

        let outcome = session.submit_barcode("737628064502").await;

        assert_eq!(outcome, BarcodeOutcome::InProgress);

        session.barcode_searching.store(false, Ordering::SeqCst);
        let outcome = session.submit_barcode("737628064502").await;
        assert_eq!(outcome, BarcodeOutcome::Navigate("737628064502".to_string()));
    }
}

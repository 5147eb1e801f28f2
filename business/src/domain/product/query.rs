use serde::{Deserialize, Serialize};

use super::model::Product;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SORT_BY: &str = "popularity";

/// Parameters of a catalog search.
///
/// Empty strings mean "no filter". `sort_by` is forwarded to the database
/// as-is; client-side ordering is applied separately by `sort_products`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    pub search: String,
    pub page: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub categories: String,
    pub brands: String,
    pub nutriscore_grade: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            categories: String::new(),
            brands: String::new(),
            nutriscore_grade: String::new(),
        }
    }
}

impl SearchQuery {
    /// True when at least one parameter differs from its default, which is
    /// what makes a search worth issuing.
    pub fn is_enabled(&self) -> bool {
        let defaults = Self::default();
        !self.search.trim().is_empty()
            || !self.categories.is_empty()
            || !self.brands.is_empty()
            || !self.nutriscore_grade.is_empty()
            || self.page != defaults.page
            || self.page_size != defaults.page_size
            || self.sort_by != defaults.sort_by
    }
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultPage {
    pub products: Vec<Product>,
    pub count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl SearchResultPage {
    /// Builds a page, deriving `total_pages` from the *requested* page size.
    pub fn new(
        products: Vec<Product>,
        count: u64,
        page: u32,
        page_size: u32,
        requested_page_size: u32,
    ) -> Self {
        Self {
            products,
            count,
            page,
            page_size,
            total_pages: total_pages(count, requested_page_size),
        }
    }

    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            page,
            page_size,
            ..Self::default()
        }
    }
}

/// ceil(count / page_size), 0 for a zero page size.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(count.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

/// Compact projection used by the search-as-you-type box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub code: String,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub image_url: Option<String>,
}

impl From<&Product> for Suggestion {
    fn from(product: &Product) -> Self {
        Self {
            code: product.code.clone(),
            name: product.product_name.clone(),
            brand: product.brands.clone(),
            image_url: product
                .image_small_url
                .clone()
                .filter(|u| !u.is_empty())
                .or_else(|| product.image_url.clone()),
        }
    }
}

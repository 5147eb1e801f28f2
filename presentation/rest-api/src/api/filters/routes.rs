use poem_openapi::{OpenApi, payload::Json};

use business::domain::product::catalog_options::{
    FilterOption, NUTRISCORE_OPTIONS, POPULAR_CATEGORIES, SORT_OPTIONS,
};

use crate::api::filters::dto::{FilterOptionResponse, FiltersResponse};
use crate::api::tags::ApiTags;

pub struct FiltersApi;

impl FiltersApi {
    pub fn new() -> Self {
        Self
    }
}

#[OpenApi]
impl FiltersApi {
    /// Filter bar options
    ///
    /// Returns the fixed category, sort and nutrition grade choices.
    #[oai(path = "/filters", method = "get", tag = "ApiTags::Filters")]
    async fn get_filters(&self) -> Json<FiltersResponse> {
        Json(filters())
    }
}

fn filters() -> FiltersResponse {
    FiltersResponse {
        categories: options(POPULAR_CATEGORIES),
        sort_options: options(SORT_OPTIONS),
        nutriscore_options: options(NUTRISCORE_OPTIONS),
    }
}

fn options(options: &[FilterOption]) -> Vec<FilterOptionResponse> {
    options.iter().map(FilterOptionResponse::from).collect()
}

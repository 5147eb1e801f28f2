use std::sync::Arc;

use poem_openapi::{
    OpenApi,
    param::{Path, Query},
    payload::Json,
};

use business::application::product::popular::DEFAULT_POPULAR_LIMIT;
use business::application::query::client::CatalogQueryClient;
use business::application::search::session::{HOME_PAGE_SIZE, SearchFilters};
use business::domain::product::errors::ProductError;
use business::domain::product::query::{
    DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, MAX_PAGE_SIZE, SearchResultPage,
};
use business::domain::product::sorting::sort_products;
use business::domain::product::value_objects::NutritionGrade;

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::product::dto::{
    ProductDetailResponse, ProductResponse, SearchResultResponse, SuggestionResponse,
};
use crate::api::tags::ApiTags;

pub struct ProductApi {
    client: Arc<CatalogQueryClient>,
}

impl ProductApi {
    pub fn new(client: Arc<CatalogQueryClient>) -> Self {
        Self { client }
    }
}

/// Product catalog API
///
/// Read-only endpoints backed by the Open Food Facts database through the
/// shared query cache.
#[OpenApi]
impl ProductApi {
    /// Search products
    ///
    /// Returns one page of 24 products matching the term and filters. The
    /// requested ordering is applied to the returned page.
    #[oai(path = "/products/search", method = "get", tag = "ApiTags::Products")]
    async fn search_products(
        &self,
        q: Query<Option<String>>,
        category: Query<Option<String>>,
        nutriscore_grade: Query<Option<String>>,
        sort_by: Query<Option<String>>,
        page: Query<Option<u32>>,
    ) -> SearchProductsResponse {
        let page = page.0.unwrap_or(1);
        if page == 0 {
            return SearchProductsResponse::BadRequest(validation_error("product.invalid_page"));
        }

        let nutriscore_grade = nutriscore_grade.0.unwrap_or_default().to_lowercase();
        if !nutriscore_grade.is_empty() && nutriscore_grade.parse::<NutritionGrade>().is_err() {
            return SearchProductsResponse::BadRequest(validation_error("product.invalid_grade"));
        }

        let filters = SearchFilters {
            term: q.0.unwrap_or_default(),
            category: category.0.unwrap_or_default(),
            nutriscore_grade,
            sort_by: sort_by.0.unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
            page,
        };

        match self.client.search(&filters.to_query()).await {
            Ok(result) => {
                let mut result =
                    result.unwrap_or_else(|| SearchResultPage::empty(page, HOME_PAGE_SIZE));
                result.products = sort_products(&result.products, &filters.sort_by);
                SearchProductsResponse::Ok(Json(result.into()))
            }
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => SearchProductsResponse::BadRequest(json),
                    502 => SearchProductsResponse::BadGateway(json),
                    _ => SearchProductsResponse::InternalError(json),
                }
            }
        }
    }

    /// Search suggestions
    ///
    /// Returns up to five compact matches for a term of at least two
    /// characters. Failures yield an empty list.
    #[oai(path = "/products/suggestions", method = "get", tag = "ApiTags::Products")]
    async fn get_suggestions(&self, q: Query<Option<String>>) -> Json<Vec<SuggestionResponse>> {
        let term = q.0.unwrap_or_default();
        let suggestions = self.client.suggestions(term.trim()).await;
        Json(suggestions.into_iter().map(Into::into).collect())
    }

    /// Popular products
    ///
    /// Returns the most scanned products.
    #[oai(path = "/products/popular", method = "get", tag = "ApiTags::Products")]
    async fn get_popular(&self, limit: Query<Option<u32>>) -> ProductListResponse {
        let limit = limit.0.unwrap_or(DEFAULT_POPULAR_LIMIT);
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return ProductListResponse::BadRequest(validation_error("product.invalid_limit"));
        }

        match self.client.popular(limit).await {
            Ok(products) => ProductListResponse::Ok(Json(
                products.into_iter().map(ProductResponse::from).collect(),
            )),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    502 => ProductListResponse::BadGateway(json),
                    _ => ProductListResponse::InternalError(json),
                }
            }
        }
    }

    /// Products by category
    #[oai(
        path = "/products/category/:category",
        method = "get",
        tag = "ApiTags::Products"
    )]
    async fn get_by_category(
        &self,
        category: Path<String>,
        page: Query<Option<u32>>,
        page_size: Query<Option<u32>>,
    ) -> SearchProductsResponse {
        let (page, page_size) = match paging(page.0, page_size.0) {
            Ok(paging) => paging,
            Err(json) => return SearchProductsResponse::BadRequest(json),
        };

        let result = self.client.category(category.0.trim(), page, page_size).await;
        page_response(result, page, page_size)
    }

    /// Products by brand
    #[oai(path = "/products/brand/:brand", method = "get", tag = "ApiTags::Products")]
    async fn get_by_brand(
        &self,
        brand: Path<String>,
        page: Query<Option<u32>>,
        page_size: Query<Option<u32>>,
    ) -> SearchProductsResponse {
        let (page, page_size) = match paging(page.0, page_size.0) {
            Ok(paging) => paging,
            Err(json) => return SearchProductsResponse::BadRequest(json),
        };

        let result = self.client.brand(brand.0.trim(), page, page_size).await;
        page_response(result, page, page_size)
    }

    /// Product detail
    ///
    /// Returns the full record for a barcode together with the display
    /// strings derived from it.
    #[oai(path = "/products/:barcode", method = "get", tag = "ApiTags::Products")]
    async fn get_by_barcode(&self, barcode: Path<String>) -> ProductDetailResult {
        let result = match self.client.product(&barcode.0).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(ProductError::InvalidInput("Barcode is required")),
            Err(err) => Err(err),
        };

        match result {
            Ok(product) => ProductDetailResult::Ok(Json(product.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    400 => ProductDetailResult::BadRequest(json),
                    404 => ProductDetailResult::NotFound(json),
                    502 => ProductDetailResult::BadGateway(json),
                    _ => ProductDetailResult::InternalError(json),
                }
            }
        }
    }
}

fn validation_error(message: &str) -> Json<ErrorResponse> {
    Json(ErrorResponse {
        name: "ValidationError".to_string(),
        message: message.to_string(),
    })
}

fn paging(page: Option<u32>, page_size: Option<u32>) -> Result<(u32, u32), Json<ErrorResponse>> {
    let page = page.unwrap_or(1);
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page == 0 {
        return Err(validation_error("product.invalid_page"));
    }
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(validation_error("product.invalid_page_size"));
    }
    Ok((page, page_size))
}

fn page_response(
    result: Result<Option<SearchResultPage>, ProductError>,
    page: u32,
    page_size: u32,
) -> SearchProductsResponse {
    match result {
        Ok(result) => SearchProductsResponse::Ok(Json(
            result
                .unwrap_or_else(|| SearchResultPage::empty(page, page_size))
                .into(),
        )),
        Err(err) => {
            let (status, json) = err.into_error_response();
            match status.as_u16() {
                400 => SearchProductsResponse::BadRequest(json),
                502 => SearchProductsResponse::BadGateway(json),
                _ => SearchProductsResponse::InternalError(json),
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum SearchProductsResponse {
    #[oai(status = 200)]
    Ok(Json<SearchResultResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ProductListResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ProductResponse>>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum ProductDetailResult {
    #[oai(status = 200)]
    Ok(Json<ProductDetailResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 502)]
    BadGateway(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_paging_when_absent() {
        let (page, page_size) = paging(None, None).unwrap();

        assert_eq!(page, 1);
        assert_eq!(page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn should_reject_paging_when_page_is_zero() {
        let err = paging(Some(0), None).unwrap_err();

        assert_eq!(err.0.message, "product.invalid_page");
    }

    #[test]
    fn should_reject_paging_when_page_size_exceeds_max() {
        let err = paging(Some(1), Some(MAX_PAGE_SIZE + 1)).unwrap_err();

        assert_eq!(err.0.message, "product.invalid_page_size");
    }

    #[test]
    fn should_return_empty_page_when_query_is_disabled() {
        let response = page_response(Ok(None), 3, 20);

        match response {
            SearchProductsResponse::Ok(json) => {
                assert!(json.0.products.is_empty());
                assert_eq!(json.0.page, 3);
                assert_eq!(json.0.total_pages, 0);
            }
            _ => panic!("expected an empty page"),
        }
    }

    #[test]
    fn should_map_upstream_failure_to_bad_gateway() {
        let response = page_response(Err(ProductError::SearchFailed), 1, 20);

        assert!(matches!(response, SearchProductsResponse::BadGateway(_)));
    }
}

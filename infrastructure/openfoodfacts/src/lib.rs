mod catalog;
mod client;
mod dto;
mod fields;
mod query;

pub use catalog::OpenFoodFactsCatalog;
pub use client::{OpenFoodFactsClient, OpenFoodFactsConfig};
pub use fields::{PRODUCT_FIELDS, SEARCH_FIELDS};
pub use query::build_search_params;

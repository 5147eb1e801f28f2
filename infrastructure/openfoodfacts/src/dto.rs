use serde::Deserialize;

use business::domain::product::model::Product;
use business::domain::shared::lenient;

/// Envelope of `/cgi/search.pl?json=true`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default, deserialize_with = "lenient::option_u64")]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "lenient::option_u64")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient::option_u64")]
    pub page_size: Option<u64>,
}

/// Envelope of `/api/v0/product/{code}.json`. `status` 0 means unknown barcode.
#[derive(Debug, Deserialize)]
pub struct ProductResponse {
    #[serde(default, deserialize_with = "lenient::option_u64")]
    pub status: Option<u64>,
    pub product: Option<Product>,
}

impl ProductResponse {
    pub fn into_product(self) -> Option<Product> {
        match self.status {
            Some(0) => None,
            _ => self.product,
        }
    }
}

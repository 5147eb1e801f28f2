use std::time::Duration;

use reqwest::Client;

pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_USER_AGENT: &str = "FoodOrderApp/1.0";

const SEARCH_PATH: &str = "/cgi/search.pl";
const PRODUCT_PATH: &str = "/api/v0/product";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFoodFactsConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Shared Open Food Facts HTTP client configuration.
pub struct OpenFoodFactsClient {
    pub client: Client,
    pub base_url: String,
}

impl OpenFoodFactsClient {
    /// Fails when the configuration cannot produce an HTTP client, e.g. a
    /// user agent that is not a valid header value.
    pub fn new(config: OpenFoodFactsConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the full-text search endpoint URL.
    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    /// Returns the single-product endpoint URL for a barcode.
    pub fn product_url(&self, code: &str) -> String {
        format!("{}{}/{}.json", self.base_url, PRODUCT_PATH, code)
    }
}

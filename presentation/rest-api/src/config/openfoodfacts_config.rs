use std::time::Duration;

use openfoodfacts::OpenFoodFactsConfig;

use super::env;

/// Load the Open Food Facts client configuration
///
/// Environment variables:
/// - OFF_BASE_URL: API origin (default: "https://world.openfoodfacts.org")
/// - OFF_TIMEOUT_SECS: Per-request timeout in seconds (default: 10)
/// - OFF_USER_AGENT: User agent sent with every request (default: "FoodOrderApp/1.0")
pub fn from_env() -> OpenFoodFactsConfig {
    let defaults = OpenFoodFactsConfig::default();
    OpenFoodFactsConfig {
        base_url: env::string_or("OFF_BASE_URL", &defaults.base_url),
        timeout: Duration::from_secs(env::parse_or(
            "OFF_TIMEOUT_SECS",
            defaults.timeout.as_secs(),
        )),
        user_agent: env::string_or("OFF_USER_AGENT", &defaults.user_agent),
    }
}

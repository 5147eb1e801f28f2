use persistence::kv_store::StorageConfig;

use super::env;

const DEFAULT_STORAGE_DIR: &str = "./data";

/// Load the local storage configuration
///
/// Environment variables:
/// - CART_STORAGE_DIR: Directory holding the cart file (default: "./data")
pub fn from_env() -> StorageConfig {
    StorageConfig::new(env::string_or("CART_STORAGE_DIR", DEFAULT_STORAGE_DIR))
}

use business::application::query::cache::CacheOptions;
use openfoodfacts::OpenFoodFactsConfig;
use persistence::kv_store::StorageConfig;
use poem::middleware::Cors;

use super::{
    cache_config, cors_config, openfoodfacts_config, server_config::ServerConfig, storage_config,
};

pub struct AppConfig {
    pub server: ServerConfig,
    pub cors: Cors,
    pub openfoodfacts: OpenFoodFactsConfig,
    pub cache: CacheOptions,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cors: cors_config::init_cors(),
            openfoodfacts: openfoodfacts_config::from_env(),
            cache: cache_config::from_env(),
            storage: storage_config::from_env(),
        }
    }
}

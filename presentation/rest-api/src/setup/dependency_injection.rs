use std::sync::Arc;

use business::application::cart::add_by_barcode::AddToCartByBarcodeUseCaseImpl;
use business::application::cart::store::CartStore;
use business::application::product::get_by_barcode::GetProductByBarcodeUseCaseImpl;
use business::application::product::get_by_brand::GetProductsByBrandUseCaseImpl;
use business::application::product::get_by_category::GetProductsByCategoryUseCaseImpl;
use business::application::product::popular::GetPopularProductsUseCaseImpl;
use business::application::product::search::SearchProductsUseCaseImpl;
use business::application::product::suggestions::GetSearchSuggestionsUseCaseImpl;
use business::application::query::client::{CatalogQueryClient, CatalogUseCases};
use business::domain::cart::repository::CartRepository;
use business::domain::logger::Logger;
use logger::TracingLogger;
use openfoodfacts::{OpenFoodFactsCatalog, OpenFoodFactsClient};
use persistence::cart::memory::CartRepositoryMemory;
use persistence::cart::repository::CartRepositoryFile;
use persistence::kv_store::{FileKeyValueStore, StorageConfig};

use crate::api::cart::routes::CartApi;
use crate::api::filters::routes::FiltersApi;
use crate::api::health::routes::HealthApi;
use crate::api::product::routes::ProductApi;
use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: HealthApi,
    pub product_api: ProductApi,
    pub filters_api: FiltersApi,
    pub cart_api: CartApi,
    pub query_client: Arc<CatalogQueryClient>,
}

impl DependencyContainer {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);

        // Infrastructure adapters
        let catalog = Arc::new(OpenFoodFactsCatalog::new(OpenFoodFactsClient::new(
            config.openfoodfacts.clone(),
        )?));
        let cart_repository = cart_repository(&config.storage).await;

        // Product use cases
        let search = Arc::new(SearchProductsUseCaseImpl {
            catalog: catalog.clone(),
            logger: logger.clone(),
        });
        let get_by_barcode = Arc::new(GetProductByBarcodeUseCaseImpl {
            catalog,
            logger: logger.clone(),
        });
        let get_by_category = Arc::new(GetProductsByCategoryUseCaseImpl {
            search: search.clone(),
            logger: logger.clone(),
        });
        let get_by_brand = Arc::new(GetProductsByBrandUseCaseImpl {
            search: search.clone(),
            logger: logger.clone(),
        });
        let suggestions = Arc::new(GetSearchSuggestionsUseCaseImpl {
            search: search.clone(),
            logger: logger.clone(),
        });
        let popular = Arc::new(GetPopularProductsUseCaseImpl {
            search: search.clone(),
            logger: logger.clone(),
        });

        let query_client = Arc::new(CatalogQueryClient::new(
            CatalogUseCases {
                search,
                get_by_barcode: get_by_barcode.clone(),
                get_by_category,
                get_by_brand,
                suggestions,
                popular,
            },
            config.cache,
            logger.clone(),
        ));

        // Cart use cases
        let cart = Arc::new(CartStore::load(cart_repository, logger.clone()).await);
        let add_by_barcode = Arc::new(AddToCartByBarcodeUseCaseImpl {
            cart: cart.clone(),
            get_product: get_by_barcode,
            logger,
        });

        Ok(Self {
            health_api: HealthApi::new(),
            product_api: ProductApi::new(query_client.clone()),
            filters_api: FiltersApi::new(),
            cart_api: CartApi::new(cart, add_by_barcode),
            query_client,
        })
    }
}

/// File-backed cart storage, or an in-memory one when the storage directory
/// cannot be opened. The cart then still works but is lost on restart.
async fn cart_repository(config: &StorageConfig) -> Arc<dyn CartRepository> {
    match FileKeyValueStore::open(config).await {
        Ok(store) => Arc::new(CartRepositoryFile::new(store)),
        Err(err) => {
            tracing::warn!(
                "Cannot open cart storage at {}: {}, keeping cart in memory",
                config.directory.display(),
                err
            );
            Arc::new(CartRepositoryMemory::new())
        }
    }
}

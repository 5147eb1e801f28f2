use std::sync::Arc;

use business::application::query::client::CatalogQueryClient;
use poem::{EndpointExt, Route, Server as PoemServer, listener::TcpListener, middleware::Tracing};
use poem_openapi::OpenApiService;
use tokio::task::JoinHandle;

use crate::config::{app_config::AppConfig, cache_config::GC_INTERVAL};
use crate::setup::dependency_injection::DependencyContainer;

pub struct Server;

impl Server {
    pub async fn run(config: AppConfig, container: DependencyContainer) -> anyhow::Result<()> {
        let addr = config.server.bind_address();
        let gc_task = spawn_cache_gc(container.query_client);

        let api_service = OpenApiService::new(
            (
                container.health_api,
                container.product_api,
                container.filters_api,
                container.cart_api,
            ),
            "Food Explorer API",
            env!("CARGO_PKG_VERSION"),
        )
        .server(format!("http://{}", addr));
        let ui = api_service.swagger_ui();
        let spec = api_service.spec_endpoint();
        let app = Route::new()
            .nest("/", api_service)
            .nest("/docs", ui)
            .nest("/openapi.json", spec)
            .with(config.cors)
            .with(Tracing);

        tracing::info!("Server running at http://{}", addr);
        tracing::info!("Swagger UI at http://{}/docs", addr);
        tracing::info!("OpenAPI JSON at http://{}/openapi.json", addr);

        let result = PoemServer::new(TcpListener::bind(&addr)).run(app).await;
        gc_task.abort();
        result?;
        Ok(())
    }
}

/// Periodically drops cache entries nobody has read within the gc time.
fn spawn_cache_gc(client: Arc<CatalogQueryClient>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(GC_INTERVAL);
        loop {
            interval.tick().await;
            let dropped = client.collect_garbage();
            if dropped > 0 {
                tracing::debug!("Collected {} expired cache entries", dropped);
            }
        }
    })
}

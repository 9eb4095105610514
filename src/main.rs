mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::Config;
use state::AppState;
use store::StoreClient;

fn app(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            routes::CUSTOMERS,
            post(handlers::create_handler).get(handlers::list_handler),
        )
        .route(routes::CUSTOMER_ITEM, put(handlers::update_handler))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api_doc::ApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment; absence is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    tracing::info!("customers-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store = StoreClient::from_config(&config).await?;

    let bind_addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

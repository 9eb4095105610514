//! Shared setup for handler tests. Each test gets its own instance and
//! database on the local Spanner emulator; when the emulator is not
//! running, setup yields `None` and the test skips with a notice.

use crate::config::Config;
use crate::routes;
use crate::state::AppState;
use crate::store::StoreClient;
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;

pub const SKIP_NOTICE: &str = "handler test skipped (emulator may not be running)";

pub async fn setup_test_app(label: &str) -> Option<Router> {
    unsafe {
        std::env::set_var("SPANNER_EMULATOR_HOST", "localhost:9010");
    }

    let config = Config {
        spanner_emulator_host: Some("localhost:9010".to_string()),
        spanner_project: "test-project".to_string(),
        spanner_instance: format!("{}-instance", label),
        spanner_database: format!("{}-db", label),
        customers_table: "customers".to_string(),
        service_port: 3000,
        service_host: "0.0.0.0".to_string(),
    };

    let store = StoreClient::from_config(&config).await.ok()?;

    let state = AppState {
        store,
        config: Arc::new(config),
    };

    Some(
        Router::new()
            .route(routes::HEALTH, get(crate::handlers::health_handler))
            .route(
                routes::CUSTOMERS,
                post(crate::handlers::create_handler).get(crate::handlers::list_handler),
            )
            .route(routes::CUSTOMER_ITEM, put(crate::handlers::update_handler))
            .with_state(state),
    )
}

use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{Customer, CustomerInput};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "customers-api",
        version = "1.0.0",
        description = "A minimal customer record API backed by a key-value store"
    ),
    paths(
        handlers::health::health_handler,
        handlers::create::create_handler,
        handlers::list::list_handler,
        handlers::update::update_handler
    ),
    components(
        schemas(
            Customer,
            CustomerInput,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "customers", description = "Customer record operations")
    )
)]
pub struct ApiDoc;

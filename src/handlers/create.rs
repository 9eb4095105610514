use crate::error::{ApiError, ErrorResponse};
use crate::models::{Customer, CustomerInput};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /customers handler - Create a new customer
///
/// Generates the id and both timestamps server-side; the caller supplies
/// only the name fields. The full record is written in one put and echoed
/// back in the response.
#[utoipa::path(
    post,
    path = routes::CUSTOMERS,
    request_body = CustomerInput,
    responses(
        (status = 200, description = "Customer created", body = Customer),
        (status = 400, description = "Required field missing", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    Json(input): Json<CustomerInput>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let (first_name, last_name) = input.validate()?;

    let customer = Customer::new(first_name, last_name);
    state.store.put(&customer).await?;

    tracing::info!("Created customer with id: {}", customer.id);
    Ok((StatusCode::OK, Json(customer)))
}

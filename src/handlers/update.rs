use crate::error::{ApiError, ErrorResponse};
use crate::models::{now_timestamp, Customer, CustomerInput};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};
use uuid::Uuid;

/// PUT /customers/{id} handler - Update an existing customer's names
///
/// A merge-update: exactly `firstName`, `lastName`, and `updatedAt` are
/// written; `id` and `createdAt` are preserved by omission. Updating an
/// unknown id is a 404, never a silent upsert of a partial record.
#[utoipa::path(
    put,
    path = routes::CUSTOMER_ITEM,
    params(
        ("id" = String, Path, description = "Customer id (UUID)")
    ),
    request_body = CustomerInput,
    responses(
        (status = 200, description = "Full post-update record", body = Customer),
        (status = 400, description = "Invalid id or required field missing", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(input): Json<CustomerInput>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let id = Uuid::parse_str(&id_str).map_err(|_| ApiError::InvalidId(id_str.clone()))?;

    let (first_name, last_name) = input.validate()?;
    let updated_at = now_timestamp();

    match state
        .store
        .merge_update(&id.to_string(), &first_name, &last_name, &updated_at)
        .await?
    {
        Some(customer) => {
            tracing::info!("Updated customer with id: {}", id);
            Ok((StatusCode::OK, Json(customer)))
        }
        None => {
            tracing::info!("Customer not found with id: {}", id);
            Err(ApiError::NotFound(id))
        }
    }
}

use crate::error::{ApiError, ErrorResponse};
use crate::models::Customer;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /customers handler - List every customer
///
/// Full unbounded scan of the table; the response is the whole array in
/// store order. No pagination or filtering is offered, so response size
/// grows with the table.
#[utoipa::path(
    get,
    path = routes::CUSTOMERS,
    responses(
        (status = 200, description = "All stored customers", body = [Customer]),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "customers"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Customer>>), ApiError> {
    let customers = state.store.scan_all().await?;

    tracing::info!("Listed {} customers", customers.len());
    Ok((StatusCode::OK, Json(customers)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{setup_test_app, SKIP_NOTICE};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_empty_table_returns_empty_array() {
        let Some(app) = setup_test_app("list-empty").await else {
            println!("{}", SKIP_NOTICE);
            return;
        };

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/customers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let customers: Vec<Customer> = serde_json::from_slice(&body).unwrap();
        assert!(customers.is_empty());
    }

    #[tokio::test]
    async fn test_created_customer_appears_exactly_once_in_list() {
        let Some(app) = setup_test_app("list-round-trip").await else {
            println!("{}", SKIP_NOTICE);
            return;
        };

        let create_response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/customers")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"firstName": "Ada", "lastName": "Lovelace"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(create_response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(create_response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created: Customer = serde_json::from_slice(&body).unwrap();

        let list_response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/customers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(list_response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(list_response.into_body(), usize::MAX)
            .await
            .unwrap();
        let customers: Vec<Customer> = serde_json::from_slice(&body).unwrap();

        let matches: Vec<_> = customers.iter().filter(|c| c.id == created.id).collect();
        assert_eq!(matches.len(), 1, "Created customer should appear exactly once");
        assert_eq!(*matches[0], created, "Listed record should match the created one");
    }
}

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// A stored customer record. Wire names are camelCase; every field is
/// populated on every record the store ever holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Primary key, a time-ordered UUID generated server-side at creation.
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// Fractional seconds since the epoch, set once at creation.
    pub created_at: String,
    /// Same encoding; equals `created_at` until the first update.
    pub updated_at: String,
}

impl Customer {
    /// Build a brand-new record: fresh id, one timestamp shared by
    /// `created_at` and `updated_at`.
    pub fn new(first_name: String, last_name: String) -> Self {
        let timestamp = now_timestamp();
        Customer {
            id: Uuid::now_v7().to_string(),
            first_name,
            last_name,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }
}

/// Request body for create and update. Both fields are deserialized as
/// optional so that a missing key surfaces as a validation error rather
/// than an extractor rejection.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl CustomerInput {
    /// Check the presence of both name fields, yielding them by value.
    pub fn validate(self) -> Result<(String, String), ApiError> {
        let first_name = self
            .first_name
            .ok_or_else(|| ApiError::Validation("firstName".to_string()))?;
        let last_name = self
            .last_name
            .ok_or_else(|| ApiError::Validation("lastName".to_string()))?;
        Ok((first_name, last_name))
    }
}

/// Current wall-clock time as a string of fractional seconds since the
/// epoch, microsecond precision.
pub fn now_timestamp() -> String {
    let micros = Utc::now().timestamp_micros();
    format!("{:.6}", micros as f64 / 1_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_has_generated_id_and_equal_timestamps() {
        let customer = Customer::new("Ada".to_string(), "Lovelace".to_string());

        assert!(!customer.id.is_empty());
        assert!(Uuid::parse_str(&customer.id).is_ok());
        assert_eq!(customer.created_at, customer.updated_at);
        assert_eq!(customer.first_name, "Ada");
        assert_eq!(customer.last_name, "Lovelace");
    }

    #[test]
    fn test_new_customer_ids_are_unique_and_time_ordered() {
        let a = Customer::new("A".to_string(), "A".to_string());
        let b = Customer::new("B".to_string(), "B".to_string());

        assert_ne!(a.id, b.id);
        // v7 UUIDs sort by creation time in their textual form
        assert!(a.id < b.id);
    }

    #[test]
    fn test_customer_serializes_with_camel_case_names() {
        let customer = Customer {
            id: "abc".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            created_at: "1700000000.000001".to_string(),
            updated_at: "1700000000.000001".to_string(),
        };

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["createdAt"], "1700000000.000001");
        assert_eq!(json["updatedAt"], "1700000000.000001");
    }

    #[test]
    fn test_input_validation_accepts_both_names() {
        let input: CustomerInput =
            serde_json::from_str(r#"{"firstName": "Ada", "lastName": "Lovelace"}"#).unwrap();

        let (first, last) = input.validate().unwrap();
        assert_eq!(first, "Ada");
        assert_eq!(last, "Lovelace");
    }

    #[test]
    fn test_input_validation_rejects_missing_first_name() {
        let input: CustomerInput =
            serde_json::from_str(r#"{"lastName": "Lovelace"}"#).unwrap();

        match input.validate() {
            Err(ApiError::Validation(field)) => assert_eq!(field, "firstName"),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_input_validation_rejects_missing_last_name() {
        let input: CustomerInput = serde_json::from_str(r#"{"firstName": "Ada"}"#).unwrap();

        match input.validate() {
            Err(ApiError::Validation(field)) => assert_eq!(field, "lastName"),
            other => panic!("expected validation error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_input_ignores_unknown_keys() {
        let input: CustomerInput = serde_json::from_str(
            r#"{"firstName": "Ada", "lastName": "Lovelace", "id": "ignored"}"#,
        )
        .unwrap();

        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_timestamp_is_fractional_epoch_seconds() {
        let ts = now_timestamp();
        let parsed: f64 = ts.parse().unwrap();

        // Sanity: after 2020-01-01, before 2100-01-01
        assert!(parsed > 1_577_836_800.0);
        assert!(parsed < 4_102_444_800.0);
        assert!(ts.contains('.'));
    }

    #[test]
    fn test_timestamps_are_monotonic_under_parsing() {
        let first = now_timestamp();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = now_timestamp();

        let first: f64 = first.parse().unwrap();
        let second: f64 = second.parse().unwrap();
        assert!(second > first);
    }
}

use std::sync::LazyLock;

use chrono::NaiveDate;
use nutrigoal_core::domain::daily_goals::{
    errors::DailyGoalsError, value_objects::RecalculateDailyGoalsInput,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::application::http::server::api_entities::api_error::ApiError;

// ASCII digits only; `\d` would also accept other Unicode digits.
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid regex"));

/// Request body once both fields are present strings.
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RecalculateDailyGoalsRequest {
    #[serde(rename = "userId")]
    #[schema(example = "3f2a7c1e-8d4b-4a8e-9c1f-2b6d5e7a9f00")]
    pub user_id: String,

    #[validate(regex(path = *DATE_PATTERN, message = "date must be YYYY-MM-DD"))]
    #[schema(example = "2024-01-05")]
    pub date: String,
}

/// Untyped body fields, checked in order by [`validate`](Self::validate).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecalculateDailyGoalsValidator {
    pub user_id: Option<Value>,
    pub date: Option<Value>,
}

impl RecalculateDailyGoalsValidator {
    /// A body that is valid JSON but not an object carries neither field.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let payload: Value =
            serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(Self {
            user_id: payload.get("userId").cloned(),
            date: payload.get("date").cloned(),
        })
    }

    pub fn validate(self) -> Result<RecalculateDailyGoalsInput, DailyGoalsError> {
        let (Some(user_id), Some(date)) = (
            self.user_id.filter(is_present),
            self.date.filter(is_present),
        ) else {
            return Err(DailyGoalsError::MissingParameter);
        };

        let Value::String(user_id) = user_id else {
            return Err(DailyGoalsError::InvalidType);
        };

        let Value::String(date) = date else {
            return Err(DailyGoalsError::InvalidFormat);
        };

        let request = RecalculateDailyGoalsRequest { user_id, date };
        request
            .validate()
            .map_err(|_| DailyGoalsError::InvalidFormat)?;

        let date = NaiveDate::parse_from_str(&request.date, "%Y-%m-%d")
            .map_err(|_| DailyGoalsError::InvalidDate(request.date.clone()))?;

        Ok(RecalculateDailyGoalsInput {
            user_id: request.user_id,
            date,
        })
    }
}

/// `null`, `false`, `0` and `""` count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn validator(user_id: Value, date: Value) -> RecalculateDailyGoalsValidator {
        RecalculateDailyGoalsValidator {
            user_id: Some(user_id),
            date: Some(date),
        }
    }

    #[test]
    fn test_valid_request() {
        let input = validator(json!("user-1"), json!("2024-01-05"))
            .validate()
            .unwrap();

        assert_eq!(input.user_id, "user-1");
        assert_eq!(input.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_missing_fields() {
        let missing_user = RecalculateDailyGoalsValidator {
            user_id: None,
            date: Some(json!("2024-01-05")),
        };

        assert_eq!(missing_user.validate(), Err(DailyGoalsError::MissingParameter));
        assert_eq!(
            validator(json!(""), json!("2024-01-05")).validate(),
            Err(DailyGoalsError::MissingParameter)
        );
        assert_eq!(
            validator(json!("user-1"), Value::Null).validate(),
            Err(DailyGoalsError::MissingParameter)
        );
    }

    #[test]
    fn test_presence_is_checked_before_type() {
        assert_eq!(
            validator(json!(0), json!("2024-1-5")).validate(),
            Err(DailyGoalsError::MissingParameter)
        );
    }

    #[test]
    fn test_non_string_user_id() {
        assert_eq!(
            validator(json!(42), json!("2024-01-05")).validate(),
            Err(DailyGoalsError::InvalidType)
        );
        assert_eq!(
            validator(json!(["user-1"]), json!("2024-01-05")).validate(),
            Err(DailyGoalsError::InvalidType)
        );
    }

    #[test]
    fn test_type_is_checked_before_format() {
        assert_eq!(
            validator(json!(true), json!("yesterday")).validate(),
            Err(DailyGoalsError::InvalidType)
        );
    }

    #[test]
    fn test_date_format() {
        for date in [
            json!("2024-1-5"),
            json!("2024-01-05T00:00:00"),
            json!(" 2024-01-05"),
            json!("２０２４-01-05"),
            json!(20240105),
        ] {
            assert_eq!(
                validator(json!("user-1"), date).validate(),
                Err(DailyGoalsError::InvalidFormat)
            );
        }
    }

    #[test]
    fn test_request_date_pattern() {
        let request = RecalculateDailyGoalsRequest {
            user_id: "user-1".to_string(),
            date: "2024-1-5".to_string(),
        };

        let errors = request.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("date"));
        assert!(!errors.field_errors().contains_key("user_id"));
    }

    #[test]
    fn test_impossible_calendar_date() {
        assert_eq!(
            validator(json!("user-1"), json!("2024-02-30")).validate(),
            Err(DailyGoalsError::InvalidDate("2024-02-30".to_string()))
        );
    }

    #[test]
    fn test_from_body() {
        let parsed =
            RecalculateDailyGoalsValidator::from_body(br#"{"userId":"user-1","date":"2024-01-05","extra":1}"#)
                .unwrap();

        assert_eq!(parsed, validator(json!("user-1"), json!("2024-01-05")));
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        let parsed = RecalculateDailyGoalsValidator::from_body(b"[1, 2]").unwrap();

        assert_eq!(parsed, RecalculateDailyGoalsValidator::default());
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            RecalculateDailyGoalsValidator::from_body(b"{\"userId\":"),
            Err(ApiError::BadRequest(_))
        ));
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::PayloadRangeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request or control value was rejected before any chart was built.
    Validation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }
}

impl From<PayloadRangeError> for ApiError {
    fn from(value: PayloadRangeError) -> Self {
        Self::validation(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_range_maps_to_validation_error() {
        let err = crate::domain::PayloadRange::new(2.0, 1.0).expect_err("inverted");
        let api_error = ApiError::from(err);
        assert_eq!(api_error.code, ErrorCode::Validation);
        assert!(api_error.message.contains("exceeds"));
        assert_eq!(
            serde_json::to_value(&api_error).expect("json")["code"],
            "validation"
        );
    }
}

//! Response envelopes
//!
//! Successful CRUD calls wrap their payload as
//! `{"data": [payload], "code": 200, "message": "..."}`. Lookups that find
//! nothing answer with `{"error": "...", "code": 404, "message": "..."}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Vec<T>,
    pub code: u16,
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Wrap a single payload in a 200 envelope
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data: vec![data],
            code: 200,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope_wraps_payload_in_list() {
        let response = ApiResponse::ok("user with ID: 1 removed", "user deleted successfully");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["data"][0], "user with ID: 1 removed");
        assert_eq!(json["code"], 200);
    }
}

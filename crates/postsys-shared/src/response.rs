//! Response envelopes.
//!
//! Every body carries `success` and an optional `message`; payload fields
//! sit next to them rather than under a `data` key.

use serde::{Deserialize, Serialize};

/// Successful response: `{ "success": true, "message"?: .., ..payload }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
        }
    }
}

/// Failed response: `{ "success": false, "message": .., "status": .. }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub status: u16,

    /// Offending field, for validation and reference failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(
        default,
        rename = "requestId",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status,
            field: None,
            request_id: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(401, "Authentication required")
    }

    pub fn forbidden() -> Self {
        Self::new(403, "You are not allowed to perform this action")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn too_many_requests() -> Self {
        Self::new(429, "Too many requests, try again later")
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Payload {
        total: u64,
    }

    #[test]
    fn payload_is_flattened_next_to_success() {
        let body = serde_json::to_value(ApiResponse::ok(Payload { total: 3 })).unwrap();
        assert_eq!(body, json!({ "success": true, "total": 3 }));
    }

    #[test]
    fn message_is_included_when_set() {
        let body =
            serde_json::to_value(ApiResponse::ok_with_message(Payload { total: 0 }, "Done"))
                .unwrap();
        assert_eq!(body["message"], "Done");
    }

    #[test]
    fn error_envelope_reports_failure() {
        let body =
            serde_json::to_value(ErrorResponse::bad_request("title is required").with_field("title"))
                .unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "title is required",
                "status": 400,
                "field": "title"
            })
        );
    }
}

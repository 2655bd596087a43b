/**
 * Error Conversion
 *
 * Renders `BackendError` as an HTTP response.
 *
 * - 401s carry `WWW-Authenticate: Bearer`
 * - 404s use the resource error envelope `{"error", "code", "message"}`
 * - everything else is `{"error": message, "status": code}`
 */

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;
use crate::shared::ErrorResponse;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let mut response = match &self {
            BackendError::NotFound { error, message } => (
                status,
                Json(ErrorResponse::new(error.clone(), status.as_u16(), message.clone())),
            )
                .into_response(),
            _ => {
                let body = serde_json::json!({
                    "error": self.message(),
                    "status": status.as_u16(),
                });
                (status, Json(body)).into_response()
            }
        };

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::error::AuthFailure;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthenticated_response() {
        let response = BackendError::Unauthenticated(AuthFailure::Disabled).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");

        let body = body_json(response).await;
        assert_eq!(body["error"], "Could not validate credentials");
        assert_eq!(body["status"], 401);
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response =
            BackendError::not_found("An error occurred.", "product doesn't exist.").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::WWW_AUTHENTICATE).is_none());

        let body = body_json(response).await;
        assert_eq!(body["error"], "An error occurred.");
        assert_eq!(body["code"], 404);
        assert_eq!(body["message"], "product doesn't exist.");
    }
}

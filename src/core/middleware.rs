use crate::core::error::AppError;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::prelude::*;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let response = Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .header(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")
                .body(Body::from("Unauthorized"))
                .unwrap();

            Err(response)
        })
    }
}

/// Guard for mutating routes: expects `Authorization: Bearer <api-key>` and
/// compares SHA-256 digests of the presented key and the configured one.
pub async fn api_key_middleware(
    State(secret_key): State<Arc<String>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let key = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".to_string()))?;

    let expected = Sha256::digest(secret_key.as_bytes());
    let presented = Sha256::digest(key.as_bytes());

    // Constant-time compare on the digests; hashing alone does not make the
    // comparison itself constant-time.
    if !bool::from(expected.as_slice().ct_eq(presented.as_slice())) {
        return Err(AppError::Unauthorized("Invalid API key".to_string()));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use axum_test::TestServer;

    fn guarded_server(secret: &str) -> TestServer {
        let router = Router::new()
            .route("/guarded", get(|| async { "ok" }))
            .route_layer(from_fn_with_state(
                Arc::new(secret.to_string()),
                api_key_middleware,
            ));
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_api_key_matching_key_passes() {
        let server = guarded_server("s3cret");

        let response = server
            .get("/guarded")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer s3cret"))
            .await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_api_key_wrong_key_is_401() {
        let server = guarded_server("s3cret");

        let response = server
            .get("/guarded")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer wrong"))
            .await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_api_key_missing_header_is_401() {
        let server = guarded_server("s3cret");

        let response = server.get("/guarded").await;
        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_api_key_non_bearer_scheme_is_401() {
        let server = guarded_server("s3cret");

        let response = server
            .get("/guarded")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static("Basic s3cret"))
            .await;
        response.assert_status_unauthorized();
    }
}

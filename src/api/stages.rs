//! Middleware composed in front of the `/ask` handler.
//!
//! `validate_question` runs first and stores the parsed [`Question`] in the
//! request extensions, `enforce_rate_limit` runs second. Neither touches the
//! providers, so a rejected request never reaches them.

use axum::{
    body::{self, Body},
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use crate::data_models::Question;
use crate::errors::ValidationError;
use crate::rate_limiter::RateLimiter;

use super::errors::ApiError;
use super::models::AskRequest;

/// Same cap as axum's default `Json` body limit.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub async fn validate_question(request: Request, next: Next) -> Result<Response, ApiError> {
    let (mut parts, raw_body) = request.into_parts();

    let bytes = body::to_bytes(raw_body, MAX_BODY_BYTES)
        .await
        .map_err(|e| {
            if is_length_limit(&e) {
                ApiError::PayloadTooLarge {
                    limit: MAX_BODY_BYTES,
                }
            } else {
                ValidationError::InvalidBody(e.to_string()).into()
            }
        })?;
    let AskRequest { question } = serde_json::from_slice(&bytes)
        .map_err(|e| ValidationError::InvalidBody(e.to_string()))?;
    let question = Question::parse(question)?;

    parts.extensions.insert(question);
    Ok(next.run(Request::from_parts(parts, Body::empty())).await)
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.to_string() == "length limit exceeded" {
            return true;
        }
        source = e.source();
    }
    false
}

/// The `ConnectInfo` extractor also honours `MockConnectInfo`; requests served
/// without connect info share one key.
pub async fn enforce_rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = connect_info
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    if let Err(e) = limiter.check(client) {
        tracing::debug!(%client, "rate limit exceeded");
        return Err(e.into());
    }
    Ok(next.run(request).await)
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Router,
        http::StatusCode,
        middleware::{from_fn, from_fn_with_state},
        routing::post,
    };
    use std::time::Duration;
    use tower::ServiceExt;

    async fn echo(Extension(question): Extension<Question>) -> String {
        question.into_inner()
    }

    fn post_body(body: &'static str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_validated_question_reaches_the_handler() {
        let app = Router::new()
            .route("/", post(echo))
            .layer(from_fn(validate_question));

        let response = app
            .oneshot(post_body(r#"{"question": "  why is the sky blue "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "  why is the sky blue ");
    }

    #[tokio::test]
    async fn test_short_question_stops_at_validation() {
        let app = Router::new()
            .route("/", post(echo))
            .layer(from_fn(validate_question));

        let response = app
            .oneshot(post_body(r#"{"question": " hi "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_text(response).await, r#"{"error":"Query too short"}"#);
    }

    #[tokio::test]
    async fn test_rate_limit_stage_without_connect_info_uses_shared_key() {
        let limiter = Arc::new(RateLimiter::new(1, Duration::from_secs(60)));
        let app = Router::new()
            .route("/", post(|| async { "ok" }))
            .layer(from_fn_with_state(limiter.clone(), enforce_rate_limit));

        let first = app.clone().oneshot(post_body("")).await.unwrap();
        let second = app.oneshot(post_body("")).await.unwrap();

        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(
            limiter
                .check(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
                .is_err()
        );
    }
}

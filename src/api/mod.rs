use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::answer_engine::AnswerEngine;
use crate::rate_limiter::RateLimiter;

pub mod errors;
pub mod handlers;
pub mod models;
pub mod stages;

pub fn create_router(answer_engine: Arc<AnswerEngine>, rate_limiter: Arc<RateLimiter>) -> Router {
    // open CORS with credentials: wildcards are not allowed alongside
    // credentials, so the request's origin, method and headers are echoed back
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    // the last layer added runs first: validate, then rate limit, then answer
    let ask = post(handlers::ask_handler)
        .layer(middleware::from_fn_with_state(
            rate_limiter,
            stages::enforce_rate_limit,
        ))
        .layer(middleware::from_fn(stages::validate_question));

    Router::new()
        .route("/", get(handlers::status_handler))
        .route("/ask", ask)
        .with_state(answer_engine)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

//! Shared application router builder.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use aima_mail::ServerSettings;

use crate::routes;
use crate::state::AppState;

/// Build the full application [`Router`] with all middleware layers.
///
/// The middleware stack is applied bottom-up:
///
/// 1. CORS
/// 2. Set request ID on incoming requests
/// 3. Structured request/response tracing
/// 4. Propagate request ID to response
/// 5. Request timeout
/// 6. Panic recovery (catch panics, return 500)
pub fn build_app_router(state: AppState, settings: &ServerSettings) -> Result<Router> {
    let cors = build_cors_layer(settings)?;
    let request_id_header = HeaderName::from_static("x-request-id");

    Ok(Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(settings.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state))
}

/// Build the CORS layer. No configured origins means any origin may call.
pub fn build_cors_layer(settings: &ServerSettings) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    if settings.cors_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = settings
        .cors_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(layer.allow_origin(origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origin_is_an_error() {
        let settings = ServerSettings {
            cors_origins: vec!["https://allureima.com".into(), "bad\norigin".into()],
            ..ServerSettings::default()
        };
        let err = build_cors_layer(&settings).unwrap_err();
        assert!(err.to_string().contains("invalid CORS origin"));
    }
}

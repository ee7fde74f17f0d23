pub mod config;
pub mod error;
pub mod state;
pub mod models;
pub mod routes;
pub mod integrations;
pub mod submission;
pub mod rate_limit;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::integrations::{OwnerNotifier, SheetAppender};
use crate::rate_limit::SubmissionRateLimiter;
use crate::state::{AppState, SharedState};
use crate::submission::SubmissionHandler;

/// Wire the configured integrations into shared application state.
pub fn build_state(config: Config) -> Result<SharedState, String> {
    let sheet = integrations::build_sheet_appender(&config)?;
    let notifier = integrations::build_owner_notifier(&config)?;
    Ok(build_state_with(config, sheet, notifier))
}

pub fn build_state_with(
    config: Config,
    sheet: Arc<dyn SheetAppender>,
    notifier: Arc<dyn OwnerNotifier>,
) -> SharedState {
    let handler = SubmissionHandler::new(sheet, notifier, config.adapter_timeout);

    Arc::new(AppState {
        config,
        handler,
        submission_limiter: SubmissionRateLimiter::new(),
    })
}

pub fn build_app(state: SharedState) -> Router {
    let config = &state.config;

    let allow_origin = if config.cors_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            config
                .cors_origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::warn!("Ignoring invalid CORS origin '{origin}': {e}");
                        None
                    }
                }),
        )
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    let static_files = ServeDir::new(&config.static_dir);
    let body_limit = DefaultBodyLimit::max(config.max_body_size);

    Router::new()
        .merge(routes::form_routes().layer(cors))
        .route("/health", axum::routing::get(health))
        .fallback_service(static_files)
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

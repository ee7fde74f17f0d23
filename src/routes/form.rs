use std::net::SocketAddr;

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{honeypot, metadata, parser, SubmitResponse};

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let config = &state.config;
    let ip = metadata::client_ip(&headers, Some(addr.ip()), &config.trusted_proxies);

    if let Err(retry_after) =
        state
            .submission_limiter
            .check(ip, config.rate_limit, config.rate_limit_window_secs)
    {
        tracing::debug!("Rate limited submission from {ip}");
        return Err(AppError::RateLimited(format!(
            "Rate limited. Retry after {retry_after}s"
        )));
    }

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let raw_data = if content_type.is_some_and(|ct| ct.contains("multipart/form-data")) {
        parser::parse_multipart(&headers, body)
            .await
            .map_err(AppError::BadRequest)?
    } else {
        parser::parse_body(content_type, &body).map_err(AppError::BadRequest)?
    };

    let is_form_post = content_type.is_some_and(|ct| ct.contains("form"));

    if honeypot::is_spam(&raw_data, config.honeypot_field.as_deref()) {
        // Answer like a normal submission so bots learn nothing
        tracing::debug!(
            "Honeypot triggered from {ip} ({})",
            metadata::user_agent(&headers)
        );
        return Ok(accepted(SubmitResponse::accepted(), config.redirect_url.as_deref(), is_form_post));
    }

    let input = parser::into_input(raw_data).map_err(AppError::BadRequest)?;

    let request_id = Uuid::now_v7();
    let span = tracing::info_span!("form_submission", %request_id, %ip);
    let response = state.handler.submit(input).instrument(span).await?;

    Ok(accepted(response, config.redirect_url.as_deref(), is_form_post))
}

/// HTML form posts follow the configured redirect; API callers get JSON.
fn accepted(response: SubmitResponse, redirect_url: Option<&str>, is_form_post: bool) -> Response {
    match redirect_url {
        Some(url) if is_form_post => Redirect::to(url).into_response(),
        _ => Json(response).into_response(),
    }
}

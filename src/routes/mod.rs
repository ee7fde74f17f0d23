pub mod form;

use axum::routing::post;
use axum::Router;

use crate::state::SharedState;

pub fn form_routes() -> Router<SharedState> {
    Router::new().route("/api/form/submit", post(form::submit))
}

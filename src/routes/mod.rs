pub mod admin;
pub mod ingest;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn ingest_routes() -> Router<SharedState> {
    Router::new()
        .route("/v1/leads", post(ingest::ingest))
        .route("/v1/leads", axum::routing::options(ingest::ingest_options))
}

pub fn admin_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/admin/sheets", get(admin::list_sheets))
        .route("/api/v1/admin/sheets/ensure", post(admin::ensure_sheet))
        .route("/api/v1/admin/sheets/headers", get(admin::headers))
}

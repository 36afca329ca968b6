use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::state::SharedState;
use crate::store::{SheetRef, StoreError};
use crate::submission::mapper;

fn store_error(e: StoreError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
    )
        .into_response()
}

/// Every sheet in the container, flagging the configured target.
pub async fn list_sheets(State(state): State<SharedState>) -> Result<Json<Value>, Response> {
    let sheets = state.store.list_sheets().await.map_err(store_error)?;

    let sheets: Vec<Value> = sheets
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "rows": s.rows,
                "expected": s.name == state.config.target_sheet,
            })
        })
        .collect();

    Ok(Json(json!({ "sheets": sheets })))
}

/// Force-create the configured target sheet with headers if missing.
pub async fn ensure_sheet(State(state): State<SharedState>) -> Result<Json<Value>, Response> {
    let existing = state.store.list_sheets().await.map_err(store_error)?;
    let already = existing.iter().any(|s| s.name == state.config.target_sheet);

    let header = mapper::header_row(state.config.field_set);
    let sheet = state
        .store
        .get_or_create_sheet(&state.config.target_sheet, &header)
        .await
        .map_err(store_error)?;

    Ok(Json(json!({
        "sheetName": sheet.name,
        "created": !already,
    })))
}

/// Current header row of the target, next to the expected order, for manual
/// verification.
pub async fn headers(State(state): State<SharedState>) -> Result<Json<Value>, Response> {
    let sheet = SheetRef {
        name: state.config.target_sheet.clone(),
    };
    let current = state.store.header_row(&sheet).await.map_err(store_error)?;
    let expected = mapper::header_row(state.config.field_set);

    Ok(Json(json!({
        "headers": current,
        "expected": expected,
        "matches": current == expected,
    })))
}

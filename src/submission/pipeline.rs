use chrono::Utc;

use crate::config::SheetPolicy;
use crate::error::IngestError;
use crate::state::SharedState;

use super::{mapper, parser};

pub struct IngestOutcome {
    pub row: Vec<String>,
    pub sheet_name: String,
    pub last_row: u64,
}

/// Parse, normalize, resolve the destination sheet, append.
pub async fn run(
    state: &SharedState,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<IngestOutcome, IngestError> {
    let data = parser::parse_body(content_type, body)?;

    let row = mapper::map_record(&data, state.config.field_set, Utc::now());

    let sheet = match state.config.sheet_policy {
        SheetPolicy::Named => {
            let header = mapper::header_row(state.config.field_set);
            state
                .store
                .get_or_create_sheet(&state.config.target_sheet, &header)
                .await?
        }
        // Resolved to an explicit handle once per request; the destination
        // is whatever sheet the container currently fronts.
        SheetPolicy::Active => state.store.default_sheet().await?,
    };

    let last_row = state.store.append_row(&sheet, &row).await?;

    tracing::info!(sheet = %sheet.name, last_row, "lead appended");

    Ok(IngestOutcome {
        row,
        sheet_name: sheet.name,
        last_row,
    })
}

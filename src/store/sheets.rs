use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde_json::{json, Value};

use super::{SheetInfo, SheetRef, SheetStore, StoreError};

/// REST-backed store for a Google-Sheets-style values API. The container is
/// opened lazily: an invalid or inaccessible spreadsheet id surfaces as
/// `StoreError::Unavailable` on the first call that touches it.
pub struct SheetsApiStore {
    client: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

impl SheetsApiStore {
    pub fn new(base_url: String, spreadsheet_id: String, token: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
            token,
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url,
            self.spreadsheet_id,
            utf8_percent_encode(range, NON_ALPHANUMERIC),
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value, StoreError> {
        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("request failed: {e}")))?;
        Self::into_json(resp).await
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, StoreError> {
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(format!("request failed: {e}")))?;
        Self::into_json(resp).await
    }

    async fn into_json(resp: reqwest::Response) -> Result<Value, StoreError> {
        let status = resp.status();
        if !status.is_success() {
            let body: String = resp
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(512)
                .collect();
            return Err(StoreError::Unavailable(format!(
                "API returned {status}: {body}"
            )));
        }
        resp.json()
            .await
            .map_err(|e| StoreError::Unavailable(format!("invalid API response: {e}")))
    }

    async fn sheet_titles(&self) -> Result<Vec<String>, StoreError> {
        let url = format!(
            "{}/v4/spreadsheets/{}?fields=sheets.properties",
            self.base_url, self.spreadsheet_id,
        );
        let meta = self.get_json(&url).await?;
        Ok(meta["sheets"]
            .as_array()
            .map(|sheets| {
                sheets
                    .iter()
                    .filter_map(|s| s["properties"]["title"].as_str().map(|t| t.to_string()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn values(&self, range: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let body = self.get_json(&self.values_url(range)).await?;
        Ok(body["values"]
            .as_array()
            .map(|rows| {
                rows.iter()
                    .map(|row| {
                        row.as_array()
                            .map(|cells| cells.iter().map(cell_text).collect())
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .unwrap_or_default())
    }
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// "'Leads'!A5:M5" -> 5
fn row_of_range(range: &str) -> Option<u64> {
    let cell = range.rsplit_once('!').map(|(_, r)| r).unwrap_or(range);
    let first = cell.split(':').next()?;
    let digits: String = first.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[async_trait]
impl SheetStore for SheetsApiStore {
    async fn get_or_create_sheet(
        &self,
        name: &str,
        header: &[String],
    ) -> Result<SheetRef, StoreError> {
        let titles = self.sheet_titles().await?;
        if titles.iter().any(|t| t == name) {
            return Ok(SheetRef {
                name: name.to_string(),
            });
        }

        let url = format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id,
        );
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": name } } }]
        });
        self.post_json(&url, &body).await?;

        let sheet = SheetRef {
            name: name.to_string(),
        };
        self.append_row(&sheet, header).await?;
        Ok(sheet)
    }

    async fn default_sheet(&self) -> Result<SheetRef, StoreError> {
        let titles = self.sheet_titles().await?;
        titles
            .into_iter()
            .next()
            .map(|name| SheetRef { name })
            .ok_or_else(|| StoreError::Unavailable("container has no sheets".to_string()))
    }

    async fn append_row(&self, sheet: &SheetRef, row: &[String]) -> Result<u64, StoreError> {
        let url = format!(
            "{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.values_url(&format!("'{}'!A1", sheet.name)),
        );
        let body = json!({ "values": [row] });
        let resp = self.post_json(&url, &body).await?;

        resp["updates"]["updatedRange"]
            .as_str()
            .and_then(row_of_range)
            .ok_or_else(|| {
                StoreError::Unavailable("append reported no updated range".to_string())
            })
    }

    async fn header_row(&self, sheet: &SheetRef) -> Result<Vec<String>, StoreError> {
        let rows = self.values(&format!("'{}'!1:1", sheet.name)).await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    async fn read_row(
        &self,
        sheet: &SheetRef,
        index: u64,
    ) -> Result<Option<Vec<String>>, StoreError> {
        if index == 0 {
            return Ok(None);
        }
        let rows = self
            .values(&format!("'{}'!{index}:{index}", sheet.name))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_sheets(&self) -> Result<Vec<SheetInfo>, StoreError> {
        let titles = self.sheet_titles().await?;
        let mut sheets = Vec::with_capacity(titles.len());
        for name in titles {
            let rows = self.values(&format!("'{name}'")).await?;
            sheets.push(SheetInfo {
                name,
                rows: rows.len() as u64,
            });
        }
        Ok(sheets)
    }
}

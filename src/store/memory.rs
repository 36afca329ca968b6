use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{SheetInfo, SheetRef, SheetStore, StoreError};

struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
}

/// In-process store for tests and local development. Sheets keep container
/// (insertion) order, so the first sheet plays the role of the
/// environment-chosen default.
pub struct MemorySheetStore {
    sheets: RwLock<Vec<Sheet>>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self {
            sheets: RwLock::new(Vec::new()),
        }
    }

    /// Pre-populate a sheet, rows included. Setup helper for tests.
    pub async fn seed(&self, name: &str, rows: Vec<Vec<String>>) {
        let mut sheets = self.sheets.write().await;
        sheets.push(Sheet {
            name: name.to_string(),
            rows,
        });
    }
}

impl Default for MemorySheetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn get_or_create_sheet(
        &self,
        name: &str,
        header: &[String],
    ) -> Result<SheetRef, StoreError> {
        let mut sheets = self.sheets.write().await;
        if !sheets.iter().any(|s| s.name == name) {
            sheets.push(Sheet {
                name: name.to_string(),
                rows: vec![header.to_vec()],
            });
        }
        Ok(SheetRef {
            name: name.to_string(),
        })
    }

    async fn default_sheet(&self) -> Result<SheetRef, StoreError> {
        let sheets = self.sheets.read().await;
        sheets
            .first()
            .map(|s| SheetRef {
                name: s.name.clone(),
            })
            .ok_or_else(|| StoreError::Unavailable("container has no sheets".to_string()))
    }

    async fn append_row(&self, sheet: &SheetRef, row: &[String]) -> Result<u64, StoreError> {
        let mut sheets = self.sheets.write().await;
        let target = sheets
            .iter_mut()
            .find(|s| s.name == sheet.name)
            .ok_or_else(|| StoreError::Unavailable(format!("no such sheet: {}", sheet.name)))?;
        target.rows.push(row.to_vec());
        Ok(target.rows.len() as u64)
    }

    async fn header_row(&self, sheet: &SheetRef) -> Result<Vec<String>, StoreError> {
        let sheets = self.sheets.read().await;
        let target = sheets
            .iter()
            .find(|s| s.name == sheet.name)
            .ok_or_else(|| StoreError::Unavailable(format!("no such sheet: {}", sheet.name)))?;
        Ok(target.rows.first().cloned().unwrap_or_default())
    }

    async fn read_row(
        &self,
        sheet: &SheetRef,
        index: u64,
    ) -> Result<Option<Vec<String>>, StoreError> {
        if index == 0 {
            return Ok(None);
        }
        let sheets = self.sheets.read().await;
        let target = sheets
            .iter()
            .find(|s| s.name == sheet.name)
            .ok_or_else(|| StoreError::Unavailable(format!("no such sheet: {}", sheet.name)))?;
        Ok(target.rows.get((index - 1) as usize).cloned())
    }

    async fn list_sheets(&self) -> Result<Vec<SheetInfo>, StoreError> {
        let sheets = self.sheets.read().await;
        Ok(sheets
            .iter()
            .map(|s| SheetInfo {
                name: s.name.clone(),
                rows: s.rows.len() as u64,
            })
            .collect())
    }
}

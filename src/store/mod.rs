pub mod memory;
pub mod sheets;

pub use memory::MemorySheetStore;
pub use sheets::SheetsApiStore;

use async_trait::async_trait;

/// Explicit handle to one sheet inside the container. Every storage call
/// takes one of these; there is no ambient "current sheet" selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRef {
    pub name: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct SheetInfo {
    pub name: String,
    pub rows: u64,
}

#[derive(Debug)]
pub enum StoreError {
    Unavailable(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(detail) => write!(f, "{detail}"),
        }
    }
}

/// Append-only view of a tabular storage container.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Returns the existing sheet, or creates it with `header` as row 1.
    /// Repeated calls with the same name return the existing sheet unchanged.
    async fn get_or_create_sheet(
        &self,
        name: &str,
        header: &[String],
    ) -> Result<SheetRef, StoreError>;

    /// The container's environment-chosen sheet, resolved to an explicit
    /// handle. Which sheet this is can change between invocations if the
    /// container is reconfigured; callers wanting a stable destination use
    /// `get_or_create_sheet`.
    async fn default_sheet(&self) -> Result<SheetRef, StoreError>;

    /// Appends `row` after the current last row. Returns the sheet's new
    /// last-row number, 1-based and counting the header.
    async fn append_row(&self, sheet: &SheetRef, row: &[String]) -> Result<u64, StoreError>;

    /// Row 1 of the sheet; empty when the sheet has no rows.
    async fn header_row(&self, sheet: &SheetRef) -> Result<Vec<String>, StoreError>;

    /// 1-based row read-back, `None` past the last row.
    async fn read_row(
        &self,
        sheet: &SheetRef,
        index: u64,
    ) -> Result<Option<Vec<String>>, StoreError>;

    /// Every sheet in the container, in container order.
    async fn list_sheets(&self) -> Result<Vec<SheetInfo>, StoreError>;
}

use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub spreadsheet_id: String,
    pub sheet_policy: SheetPolicy,
    pub target_sheet: String,
    pub field_set: FieldSet,
    pub store: StoreBackend,
    pub log_level: String,
}

/// How the destination sheet is chosen for each submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetPolicy {
    /// Append to the configured named sheet, creating it with a header row
    /// when absent. Deterministic and idempotent.
    Named,
    /// Append to the container's environment-chosen sheet. The destination
    /// can be changed by anyone editing the container between requests;
    /// kept only for deployments that never adopted a named target.
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldSet {
    /// 13 columns, Notes included.
    WithNotes,
    /// The older 12-column layout without Notes.
    WithoutNotes,
}

#[derive(Debug, Clone)]
pub enum StoreBackend {
    Sheets { base_url: String, token: String },
    Memory,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let host: IpAddr = env_or("LEADSHEET_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid LEADSHEET_HOST: {e}"))?;

        let port: u16 = env_or("LEADSHEET_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid LEADSHEET_PORT: {e}"))?;

        let spreadsheet_id = env_required("LEADSHEET_SPREADSHEET_ID")?;

        let sheet_policy = match env_or("LEADSHEET_SHEET_POLICY", "named").as_str() {
            "active" => SheetPolicy::Active,
            _ => SheetPolicy::Named,
        };

        let target_sheet = env_or("LEADSHEET_TARGET_SHEET", "Leads");

        let field_set = match env_or("LEADSHEET_FIELD_SET", "with-notes").as_str() {
            "without-notes" => FieldSet::WithoutNotes,
            _ => FieldSet::WithNotes,
        };

        let store = match env_or("LEADSHEET_STORE", "sheets").as_str() {
            "memory" => StoreBackend::Memory,
            _ => StoreBackend::Sheets {
                base_url: env_or("LEADSHEET_SHEETS_BASE_URL", "https://sheets.googleapis.com"),
                token: env_required("LEADSHEET_SHEETS_TOKEN")?,
            },
        };

        let log_level = env_or("LEADSHEET_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            spreadsheet_id,
            sheet_policy,
            target_sheet,
            field_set,
            store,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

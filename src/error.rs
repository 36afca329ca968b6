use crate::store::StoreError;

/// Everything that can go wrong between receiving a body and appending a
/// row. Each variant is converted into the failure envelope at the handler;
/// none escape as transport-level errors.
#[derive(Debug)]
pub enum IngestError {
    InvalidPayload(String),
    UnsupportedContentType { content_type: String, source: String },
    EmptyOrInvalidData,
    StorageUnavailable(String),
}

impl std::fmt::Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::InvalidPayload(detail) => write!(f, "Invalid payload: {detail}"),
            IngestError::UnsupportedContentType { content_type, source } => write!(
                f,
                "Unsupported content type: {content_type}. Could not parse as JSON either: {source}"
            ),
            IngestError::EmptyOrInvalidData => write!(f, "No valid data received"),
            IngestError::StorageUnavailable(detail) => {
                write!(f, "Storage unavailable: {detail}")
            }
        }
    }
}

impl From<StoreError> for IngestError {
    fn from(err: StoreError) -> Self {
        IngestError::StorageUnavailable(err.to_string())
    }
}

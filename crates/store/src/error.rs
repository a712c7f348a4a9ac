use thiserror::Error;

use costbook_core::{DomainError, TenantId};

/// Failure to produce a complete tenant snapshot.
///
/// Store failures and document validation failures are kept apart so callers
/// can tell "could not read" from "read something malformed".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("tenant not found: {0}")]
    TenantNotFound(TenantId),

    #[error("document store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to decode documents: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid document: {0}")]
    InvalidDocument(#[from] DomainError),
}

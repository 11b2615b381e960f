//! Dashboard error types.

use thiserror::Error;

use crate::store::StoreError;

/// Dashboard computation errors.
#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    /// A collection scan failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A section, or the orchestration around it, panicked.
    #[error("dashboard orchestration aborted: {0}")]
    Aborted(String),
}

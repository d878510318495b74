use jet_engine::{HostError, StoreError};
use thiserror::Error;

use crate::snapshot::SnapshotError;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("scene host rejected {action}: {source}")]
    Host {
        action: &'static str,
        #[source]
        source: HostError,
    },
}

impl EditorError {
    pub(crate) fn host(action: &'static str) -> impl FnOnce(HostError) -> Self {
        move |source| Self::Host { action, source }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("encode level json: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("write level '{key}': {source}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no level stored under '{key}'")]
    NotFound { key: String },
    #[error("read level '{key}': {source}")]
    Store {
        key: String,
        #[source]
        source: StoreError,
    },
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("rebuild level: {0}")]
    Rebuild(#[source] EditorError),
}

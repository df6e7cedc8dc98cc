use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save document is not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("save version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u64, supported: u32 },
    #[error("save document is corrupted: {0}")]
    Corrupted(String),
}

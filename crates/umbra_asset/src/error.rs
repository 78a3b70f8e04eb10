use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{}' could not be resolved", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read asset '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader '{}' has no source", path.display())]
    EmptyShader { path: PathBuf },
    #[error("resource handle {0} is not loaded")]
    UnknownHandle(u64),
}

use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Copy `source` over `target` as an atomic whole-file operation.
///
/// An existing file at `target` is removed first; a transfer always replaces
/// the destination, it never merges into it.
pub async fn copy_file(source: &Path, target: &Path) -> Result<(), TransferError> {
    if tokio::fs::try_exists(target).await? {
        tokio::fs::remove_file(target).await?;
    }
    tokio::fs::copy(source, target).await?;
    Ok(())
}

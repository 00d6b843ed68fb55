use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::store::CloudStore;

/// Name of the fixed subdirectory inside the container that holds all synced
/// documents.
pub const DOCUMENTS_DIR: &str = "Documents";
/// Well-known index document callers resolve inside the documents directory.
pub const INDEX_FILE: &str = "index.org";

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("failed to create documents directory at {path:?}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a resolution attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A previous attempt already published the path; nothing was done.
    AlreadyResolved,
    Resolved(PathBuf),
    /// The backing store could not produce a container root.
    Unavailable,
}

/// Resolves the cloud container's documents directory, once per process.
///
/// The path is published through a `OnceLock`: written by whichever task
/// completes resolution first, read thereafter from the queue's control task.
/// A failed attempt leaves the resolver unresolved; resolution is not retried
/// automatically, so every non-dummy dispatch keeps receiving a
/// service-unavailable outcome until some caller resolves again.
pub struct ContainerResolver {
    store: Arc<dyn CloudStore>,
    documents: OnceLock<PathBuf>,
}

impl ContainerResolver {
    pub fn new(store: Arc<dyn CloudStore>) -> Self {
        Self {
            store,
            documents: OnceLock::new(),
        }
    }

    /// Whether the backing store reports an active account.
    pub fn is_available(&self) -> bool {
        self.store.account_identity().is_some()
    }

    /// The published documents directory, if resolution has succeeded.
    pub fn documents(&self) -> Option<&Path> {
        self.documents.get().map(PathBuf::as_path)
    }

    /// Path of the well-known index document inside the container.
    pub fn index_document(&self) -> Option<PathBuf> {
        self.documents().map(|documents| documents.join(INDEX_FILE))
    }

    /// Resolve and create (if absent) the documents directory.
    pub async fn resolve(&self) -> Result<Resolution, ContainerError> {
        if self.documents.get().is_some() {
            return Ok(Resolution::AlreadyResolved);
        }

        let Some(root) = self.store.container_root(None) else {
            tracing::debug!("container root is unobtainable from the backing store");
            return Ok(Resolution::Unavailable);
        };

        let documents = root.join(DOCUMENTS_DIR);
        if let Err(source) = tokio::fs::create_dir_all(&documents).await {
            tracing::error!(path = %documents.display(), error = %source, "container setup failed");
            return Err(ContainerError::Create {
                path: documents,
                source,
            });
        }

        match self.documents.set(documents.clone()) {
            Ok(()) => {
                tracing::debug!(path = %documents.display(), "container resolved");
                Ok(Resolution::Resolved(documents))
            }
            // Another task won the publish race while we were creating the
            // directory; their path is the canonical one.
            Err(_) => Ok(Resolution::AlreadyResolved),
        }
    }
}

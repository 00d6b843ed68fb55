use std::path::{Path, PathBuf};

/// Boundary to the backing cloud provider.
///
/// The host application implements this; the queue and resolver never talk to
/// the provider directly. All methods are cheap lookups or fire-and-forget
/// triggers; the actual cloud synchronization happens out of band behind the
/// provider's directory.
pub trait CloudStore: Send + Sync {
    /// Root directory of the cloud-backed container, or `None` if the store
    /// cannot produce one right now. `identifier` selects a specific
    /// container; `None` means the default one.
    fn container_root(&self, identifier: Option<&str>) -> Option<PathBuf>;

    /// Token identifying the active account, if any. Presence of a token is
    /// what "the store is available" means.
    fn account_identity(&self) -> Option<String>;

    /// Ask the store to start pulling down the file at `path`. Best-effort:
    /// failures are surfaced by the store implementation through its own
    /// user-facing channel, never back through the queue.
    fn begin_synchronizing(&self, path: &Path);
}

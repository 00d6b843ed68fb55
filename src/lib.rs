//! Background file synchronization for a cloud-backed Org document directory.
//!
//! Two parts compose the crate: a [`container::ContainerResolver`] that lazily
//! resolves (and creates, if absent) the `Documents` directory inside the
//! cloud container, and a [`queue::SyncQueue`] that serializes uploads and
//! downloads through a single-flight FIFO with pause/resume and abort
//! controls. Callers get the result of each transfer through a one-shot
//! [`request::TransferTicket`].
//!
//! The host application supplies the two boundary traits:
//! [`store::CloudStore`] for the backing provider and
//! [`status::StatusObserver`] for progress reporting.

pub mod container;
pub mod paths;
pub mod queue;
pub mod request;
pub mod status;
pub mod store;
pub mod transfer;

pub use container::{ContainerError, ContainerResolver, DOCUMENTS_DIR, INDEX_FILE, Resolution};
pub use queue::SyncQueue;
pub use request::{
    Direction, STATUS_SERVICE_UNAVAILABLE, STATUS_TRANSFER_FAILED, TransferOutcome,
    TransferRequest, TransferTicket,
};
pub use status::{NullStatus, StatusObserver};
pub use store::CloudStore;
pub use transfer::TransferError;

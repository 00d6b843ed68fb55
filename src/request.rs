use std::path::PathBuf;

use tokio::sync::oneshot;

/// HTTP-style status carried by a failed outcome when the container has not
/// been resolved yet.
pub const STATUS_SERVICE_UNAVAILABLE: u16 = 503;
/// Status carried by a failed outcome when the copy itself failed.
pub const STATUS_TRANSFER_FAILED: u16 = 404;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Upload,
    Download,
}

/// Final outcome of a transfer, delivered exactly once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Complete,
    Failed { status: u16, message: String },
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Complete)
    }
}

/// One queued transfer. Owned by the queue from enqueue until its outcome is
/// sent; the one-shot sender makes the exactly-once callback contract a
/// property of the type rather than of caller discipline.
#[derive(Debug)]
pub struct TransferRequest {
    /// Percent-encoded name of the file inside the container's `Documents`
    /// directory. The queue stays inert while this is empty.
    pub remote_name: String,
    /// Local counterpart, possibly in percent-encoded string form.
    pub local_path: PathBuf,
    pub direction: Direction,
    /// No I/O required; report success immediately.
    pub dummy: bool,
    /// A failure of this request purges everything queued after it.
    pub abort_on_failure: bool,
    pub(crate) done: oneshot::Sender<TransferOutcome>,
}

/// Caller-side half of a request: resolves to the outcome, or to `None` if
/// the request was purged (explicit abort or an abort-on-failure cascade)
/// before it ever dispatched.
#[derive(Debug)]
pub struct TransferTicket {
    rx: oneshot::Receiver<TransferOutcome>,
}

impl TransferTicket {
    pub async fn outcome(self) -> Option<TransferOutcome> {
        self.rx.await.ok()
    }
}

impl TransferRequest {
    pub fn new(
        remote_name: impl Into<String>,
        local_path: impl Into<PathBuf>,
        direction: Direction,
    ) -> (Self, TransferTicket) {
        let (done, rx) = oneshot::channel();
        (
            Self {
                remote_name: remote_name.into(),
                local_path: local_path.into(),
                direction,
                dummy: false,
                abort_on_failure: false,
                done,
            },
            TransferTicket { rx },
        )
    }

    pub fn download(
        remote_name: impl Into<String>,
        local_path: impl Into<PathBuf>,
    ) -> (Self, TransferTicket) {
        Self::new(remote_name, local_path, Direction::Download)
    }

    pub fn upload(
        remote_name: impl Into<String>,
        local_path: impl Into<PathBuf>,
    ) -> (Self, TransferTicket) {
        Self::new(remote_name, local_path, Direction::Upload)
    }

    /// A request that moves no data and completes immediately with success.
    /// Callers use these to flush completion ordering through the queue.
    pub fn dummy(remote_name: impl Into<String>) -> (Self, TransferTicket) {
        let (mut request, ticket) = Self::new(remote_name, PathBuf::new(), Direction::Download);
        request.dummy = true;
        (request, ticket)
    }

    pub fn abort_queue_on_failure(mut self) -> Self {
        self.abort_on_failure = true;
        self
    }

    pub(crate) fn complete(self, outcome: TransferOutcome) {
        // The caller may have dropped its ticket; that is their loss.
        let _ = self.done.send(outcome);
    }
}

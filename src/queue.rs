use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::container::ContainerResolver;
use crate::paths;
use crate::request::{
    Direction, STATUS_SERVICE_UNAVAILABLE, STATUS_TRANSFER_FAILED, TransferOutcome,
    TransferRequest,
};
use crate::status::StatusObserver;
use crate::store::CloudStore;
use crate::transfer::{self, TransferError};

enum Command {
    Enqueue(TransferRequest),
    Pause,
    Resume,
    Abort,
    Busy(oneshot::Sender<bool>),
    QueueSize(oneshot::Sender<usize>),
    /// Worker-task completion of the active transfer's copy.
    Finished(Result<(), TransferError>),
}

/// Handle to the single-flight transfer queue.
///
/// All queue state lives on one actor task; the handle only sends commands
/// into its channel, so it is cheap to clone and safe to use from any task.
/// Copy completions re-enter the same channel, which is what serializes every
/// state transition onto the actor.
#[derive(Clone)]
pub struct SyncQueue {
    tx: mpsc::UnboundedSender<Command>,
}

impl SyncQueue {
    /// Start the queue actor. Container resolution is kicked off in the
    /// background immediately; until it succeeds, non-dummy transfers are
    /// answered with a service-unavailable outcome.
    pub fn spawn(
        resolver: Arc<ContainerResolver>,
        store: Arc<dyn CloudStore>,
        status: Arc<dyn StatusObserver>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let background_resolver = Arc::clone(&resolver);
        tokio::spawn(async move {
            if let Err(err) = background_resolver.resolve().await {
                tracing::error!(error = %err, "background container resolution failed");
            }
        });

        let worker = Worker {
            pending: VecDeque::new(),
            active: None,
            paused: false,
            resolver,
            store,
            status,
            tx: tx.clone(),
        };
        tokio::spawn(worker.run(rx));

        Self { tx }
    }

    /// Append a request to the queue. Its outcome arrives on the ticket the
    /// request was created with; there is nothing to return here.
    pub fn enqueue(&self, request: TransferRequest) {
        let _ = self.tx.send(Command::Enqueue(request));
    }

    /// Stop dispatching new transfers. The active transfer, if any, still
    /// runs to completion.
    pub fn pause(&self) {
        let _ = self.tx.send(Command::Pause);
    }

    pub fn resume(&self) {
        let _ = self.tx.send(Command::Resume);
    }

    /// Drop every pending request without notifying it. The active transfer
    /// is untouched and still completes normally.
    pub fn abort(&self) {
        let _ = self.tx.send(Command::Abort);
    }

    /// Whether anything is pending or in flight.
    pub async fn busy(&self) -> bool {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Busy(reply)).is_err() {
            return false;
        }
        rx.await.unwrap_or(false)
    }

    /// Number of pending requests, excluding the active one.
    pub async fn queue_size(&self) -> usize {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::QueueSize(reply)).is_err() {
            return 0;
        }
        rx.await.unwrap_or(0)
    }
}

struct Worker {
    pending: VecDeque<TransferRequest>,
    active: Option<TransferRequest>,
    paused: bool,
    resolver: Arc<ContainerResolver>,
    store: Arc<dyn CloudStore>,
    status: Arc<dyn StatusObserver>,
    tx: mpsc::UnboundedSender<Command>,
}

impl Worker {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = rx.recv().await {
            match command {
                Command::Enqueue(request) => {
                    self.pending.push_back(request);
                    self.status.update_status();
                    self.dispatch_next();
                }
                Command::Pause => self.paused = true,
                Command::Resume => {
                    self.paused = false;
                    self.dispatch_next();
                }
                Command::Abort => {
                    if !self.pending.is_empty() {
                        tracing::warn!(dropped = self.pending.len(), "aborting pending transfers");
                        self.pending.clear();
                    }
                    self.status.update_status();
                }
                Command::Busy(reply) => {
                    let _ = reply.send(!self.pending.is_empty() || self.active.is_some());
                }
                Command::QueueSize(reply) => {
                    let _ = reply.send(self.pending.len());
                }
                Command::Finished(result) => {
                    let outcome = match result {
                        Ok(()) => {
                            // Progress reaches 100/100 before the caller
                            // hears about completion.
                            self.status.set_progress(100, 100);
                            self.status.update_status();
                            TransferOutcome::Complete
                        }
                        Err(err) => {
                            tracing::error!(error = %err, "transfer failed");
                            TransferOutcome::Failed {
                                status: STATUS_TRANSFER_FAILED,
                                message: err.to_string(),
                            }
                        }
                    };
                    self.finish(outcome);
                }
            }
        }
    }

    /// Promote the head of the queue to active and start processing it.
    ///
    /// Sole gate for the single-flight invariant; called from enqueue,
    /// resume, and finish. No-op while paused, while a transfer is active,
    /// while the queue is empty, or while the head has no remote locator.
    fn dispatch_next(&mut self) {
        if self.paused || self.active.is_some() {
            return;
        }
        match self.pending.front() {
            Some(head) if !head.remote_name.is_empty() => {}
            _ => return,
        }
        let Some(request) = self.pending.pop_front() else {
            return;
        };
        self.active = Some(request);
        self.process();
    }

    fn process(&mut self) {
        let Some(request) = self.active.as_ref() else {
            return;
        };

        if request.dummy {
            self.finish(TransferOutcome::Complete);
            return;
        }
        let Some(documents) = self.resolver.documents() else {
            tracing::debug!(
                name = %request.remote_name,
                "container not resolved, refusing transfer"
            );
            self.finish(TransferOutcome::Failed {
                status: STATUS_SERVICE_UNAVAILABLE,
                message: "cloud container is not available".into(),
            });
            return;
        };

        // Contract violations (undecodable, empty, or non-UTF-8 paths) panic
        // here on the actor task; continuing would corrupt the queue's view
        // of the transfer.
        let remote_name = paths::decode_path(&request.remote_name);
        let local_str = request
            .local_path
            .to_str()
            .unwrap_or_else(|| panic!("local path {:?} is not valid UTF-8", request.local_path));
        let local = PathBuf::from(paths::decode_path(local_str));
        let remote = paths::remote_target(documents, &remote_name);

        let direction = request.direction;
        if direction == Direction::Upload {
            // Upload precondition: the source file must exist. Checked before
            // the worker spawns, for the same fail-fast treatment as the path
            // contract above.
            assert!(local.exists(), "upload source {local:?} does not exist");
        }

        self.status.set_transfer_filename(&remote_name);
        self.status.set_progress(0, 100);
        self.status.update_status();

        if direction == Direction::Download {
            self.store.begin_synchronizing(&remote);
        }
        tracing::debug!(name = %remote_name, ?direction, "transfer started");

        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = match direction {
                Direction::Upload => transfer::copy_file(&local, &remote).await,
                Direction::Download => transfer::copy_file(&remote, &local).await,
            };
            let _ = tx.send(Command::Finished(result));
        });
    }

    /// Route the outcome to the caller and immediately try the next request.
    fn finish(&mut self, outcome: TransferOutcome) {
        let Some(request) = self.active.take() else {
            return;
        };

        if !outcome.is_success() && request.abort_on_failure && !self.pending.is_empty() {
            // Purged requests are dropped silently; their tickets close
            // without an outcome.
            tracing::warn!(
                dropped = self.pending.len(),
                name = %request.remote_name,
                "purging queue after failed transfer"
            );
            self.pending.clear();
        }

        request.complete(outcome);
        self.status.update_status();
        self.dispatch_next();
    }
}

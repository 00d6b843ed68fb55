/// Sink for transfer progress shown by the surrounding application.
///
/// The queue calls this at dispatch start (filename + 0/100 reset) and at
/// copy completion (100/100) for every transfer that performs real I/O, plus
/// an `update_status` ping whenever the queue's busy state may have changed.
pub trait StatusObserver: Send + Sync {
    fn set_transfer_filename(&self, name: &str);
    fn set_progress(&self, current: u8, total: u8);
    fn update_status(&self);
}

/// Observer that discards everything. Useful for headless callers and tests
/// that do not care about progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStatus;

impl StatusObserver for NullStatus {
    fn set_transfer_filename(&self, _name: &str) {}
    fn set_progress(&self, _current: u8, _total: u8) {}
    fn update_status(&self) {}
}

//! Progress observation for export drivers.
//!
//! Export drivers announce the total record count and tick once per record
//! through an injected sink. The codecs never consult the sink, so it cannot
//! cancel an export.

/// Receives step-count notifications from an export driver.
pub trait ProgressSink {
    /// Announce how many steps the export will take.
    fn set_steps(&mut self, steps: usize);

    /// One record has been written.
    fn step(&mut self);
}

/// Sink that ignores all notifications.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn set_steps(&mut self, _steps: usize) {}
    fn step(&mut self) {}
}

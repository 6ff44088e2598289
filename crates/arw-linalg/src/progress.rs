//! Progress event sink
//!
//! The elimination emits one `forward` event per forward column, one
//! `backward` event per back-substitution column, and a terminal `done`.
//! Events carry no control flow; implementations may buffer or drop them.

/// Receiver for solver progress events.
///
/// `on_done` receives -1 on normal completion, or the row index at which
/// singularity ended the elimination early.
pub trait ProgressSink {
    fn on_forward(&mut self, col: usize, pivot_degree: Option<usize>) {
        let _ = (col, pivot_degree);
    }

    fn on_backward(&mut self, col: usize) {
        let _ = col;
    }

    fn on_done(&mut self, col: i64) {
        let _ = col;
    }
}

/// Discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl ProgressSink for SilentProgress {}

/// Forwards events to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn on_forward(&mut self, col: usize, pivot_degree: Option<usize>) {
        match pivot_degree {
            Some(d) => log::debug!("forward: column {col} (pivot degree {d})"),
            None => log::debug!("forward: column {col}"),
        }
    }

    fn on_backward(&mut self, col: usize) {
        log::debug!("backward: column {col}");
    }

    fn on_done(&mut self, col: i64) {
        log::debug!("done: {col}");
    }
}

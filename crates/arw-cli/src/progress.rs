//! Single-line terminal progress display
//!
//! Rewrites one stderr line per solver event with carriage returns,
//! padding out the previous message so long lines do not leave residue.

use arw_linalg::ProgressSink;
use std::io::{self, Write};

#[derive(Debug, Default)]
pub struct ProgressLine {
    started: bool,
    last_len: usize,
}

impl ProgressLine {
    fn display(&mut self, message: &str) {
        let pad = self.last_len.saturating_sub(message.len());
        let mut err = io::stderr();
        if self.started {
            let _ = write!(err, "\r{message}{}", " ".repeat(pad));
        } else {
            let _ = write!(err, "{message}");
        }
        let _ = err.flush();
        self.started = true;
        self.last_len = message.len();
    }

    fn finish(&mut self) {
        let mut err = io::stderr();
        let _ = writeln!(err);
        self.started = false;
        self.last_len = 0;
    }
}

impl ProgressSink for ProgressLine {
    fn on_forward(&mut self, col: usize, pivot_degree: Option<usize>) {
        match pivot_degree {
            Some(d) => self.display(&format!("forward: column {col} (degree {d})")),
            None => self.display(&format!("forward: column {col}")),
        }
    }

    fn on_backward(&mut self, col: usize) {
        self.display(&format!("backward: column {col}"));
    }

    fn on_done(&mut self, _col: i64) {
        self.display("done");
        self.finish();
    }
}

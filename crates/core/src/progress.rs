//! Passive progress reporting. The parser calls the sink; nothing the sink
//! does changes how parsing proceeds.

pub trait ProgressSink {
    /// Called once with the number of physical lines about to be read.
    fn begin(&mut self, _total_lines: usize) {}

    /// Called at each top-level line with the line just reached.
    fn advance(&mut self, _line: usize) {}

    fn finish(&mut self) {}
}

/// Sink that ignores every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}

/// Closure sink receiving `(line, total_lines)`.
pub struct ProgressFn<F> {
    callback: F,
    total: usize,
}

impl<F: FnMut(usize, usize)> ProgressFn<F> {
    pub fn new(callback: F) -> Self {
        ProgressFn { callback, total: 0 }
    }
}

impl<F: FnMut(usize, usize)> ProgressSink for ProgressFn<F> {
    fn begin(&mut self, total_lines: usize) {
        self.total = total_lines;
    }

    fn advance(&mut self, line: usize) {
        (self.callback)(line, self.total)
    }

    fn finish(&mut self) {
        (self.callback)(self.total, self.total)
    }
}

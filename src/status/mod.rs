//! Verbose status lines for long-running operations
//!
//! A [`StatusReporter`] prints one line when an operation starts and one when
//! it finishes or fails, the latter carrying the elapsed time. Lines go to
//! stdout unless another sink is supplied, and are mirrored as `tracing`
//! events.

use colored::*;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;

/// Handle returned by [`StatusReporter::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionId(usize);

pub struct StatusReporter {
    sink: Box<dyn Write>,
    next_id: usize,
    started: HashMap<ActionId, Instant>,
}

impl StatusReporter {
    /// Reporter writing to stdout
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Reporter writing to an arbitrary sink
    pub fn with_writer(sink: impl Write + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            next_id: 0,
            started: HashMap::new(),
        }
    }

    /// Announce the start of `action`
    pub fn start(&mut self, action: &str) -> ActionId {
        let id = ActionId(self.next_id);
        self.next_id += 1;
        self.started.insert(id, Instant::now());

        info!(action, "started");
        self.emit(format_args!("{} {}", "[START]".cyan().bold(), action));
        id
    }

    /// Report that `action` finished successfully
    pub fn done(&mut self, action: &str, id: ActionId) {
        let elapsed = self.elapsed(id);
        info!(action, elapsed_secs = elapsed, "done");
        self.emit(format_args!(
            "{} {} ({:.3}s)",
            "[DONE]".green().bold(),
            action,
            elapsed
        ));
    }

    /// Report that `action` failed
    pub fn fail(&mut self, action: &str, id: ActionId) {
        let elapsed = self.elapsed(id);
        info!(action, elapsed_secs = elapsed, "failed");
        self.emit(format_args!(
            "{} {} ({:.3}s)",
            "[FAIL]".red().bold(),
            action,
            elapsed
        ));
    }

    fn elapsed(&mut self, id: ActionId) -> f64 {
        self.started
            .remove(&id)
            .map_or(0.0, |start| start.elapsed().as_secs_f64())
    }

    // Status output is best effort; a broken sink must not fail the operation
    fn emit(&mut self, line: fmt::Arguments<'_>) {
        let _ = writeln!(self.sink, "{}", line);
        let _ = self.sink.flush();
    }
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for StatusReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusReporter")
            .field("next_id", &self.next_id)
            .field("pending", &self.started.len())
            .finish()
    }
}

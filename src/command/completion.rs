use crate::command::output::TerminationReason;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamState {
    #[default]
    Open,
    Closed,
}

/// Tracks when a process channel may finish
///
/// A channel is complete once both output streams delivered their end
/// sentinel and the exit status is known, in any order.
///
/// # Examples
///
/// ```rust
/// use secretcmd::command::{completion::CompletionTracker, output::TerminationReason};
///
/// let mut tracker = CompletionTracker::new();
/// tracker.record_exit(0, TerminationReason::Exit);
/// tracker.close_stdout();
/// assert!(!tracker.is_complete());
/// tracker.close_stderr();
/// assert_eq!(tracker.finished(), Some((0, TerminationReason::Exit)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionTracker {
    stdout: StreamState,
    stderr: StreamState,
    exit: Option<(i32, TerminationReason)>,
}

impl CompletionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_stdout(&mut self) {
        self.stdout = StreamState::Closed;
    }

    pub fn close_stderr(&mut self) {
        self.stderr = StreamState::Closed;
    }

    /// Records the exit status. Only the first report is kept.
    pub fn record_exit(&mut self, code: i32, reason: TerminationReason) {
        if self.exit.is_none() {
            self.exit = Some((code, reason));
        }
    }

    pub fn stdout(&self) -> StreamState {
        self.stdout
    }

    pub fn stderr(&self) -> StreamState {
        self.stderr
    }

    pub fn exit(&self) -> Option<(i32, TerminationReason)> {
        self.exit
    }

    pub fn has_exited(&self) -> bool {
        self.exit.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.stdout == StreamState::Closed
            && self.stderr == StreamState::Closed
            && self.exit.is_some()
    }

    /// The exit status, but only once the channel is complete.
    pub fn finished(&self) -> Option<(i32, TerminationReason)> {
        if self.is_complete() { self.exit } else { None }
    }
}

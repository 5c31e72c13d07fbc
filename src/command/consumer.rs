use crate::command::{
    completion::CompletionTracker,
    error::CommandError,
    event::{ChannelEvent, StreamChunk},
    output::{Output, TerminationReason},
    queue::EventQueue,
    stdin::StdinHandle,
};

pub type OutputHook = Box<dyn FnMut(&[u8]) -> Result<Option<Vec<u8>>, CommandError> + Send>;
pub type TerminationHook =
    Box<dyn FnMut(i32, TerminationReason) -> Result<(), CommandError> + Send>;

/// Callbacks run by the consumer loop of a process channel
pub(crate) struct ChannelHooks {
    pub(crate) stdout: OutputHook,
    pub(crate) stderr: OutputHook,
    pub(crate) termination: TerminationHook,
}

impl Default for ChannelHooks {
    fn default() -> Self {
        Self {
            stdout: Box::new(|_| Ok(None)),
            stderr: Box::new(|_| Ok(None)),
            termination: Box::new(|_, _| Ok(())),
        }
    }
}

impl std::fmt::Debug for ChannelHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelHooks").finish_non_exhaustive()
    }
}

/// Single consumer of a process channel's events
///
/// Accumulates both streams, forwards hook replies to stdin and records the
/// exit. The termination hook only runs from [`EventConsumer::finish`], after
/// the tracker reports completion.
#[derive(Debug)]
pub(crate) struct EventConsumer {
    hooks: ChannelHooks,
    stdin: StdinHandle,
    tracker: CompletionTracker,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl EventConsumer {
    pub(crate) fn new(hooks: ChannelHooks, stdin: StdinHandle) -> Self {
        Self {
            hooks,
            stdin,
            tracker: CompletionTracker::new(),
            stdout: Vec::new(),
            stderr: Vec::new(),
        }
    }

    pub(crate) fn tracker(&self) -> &CompletionTracker {
        &self.tracker
    }

    /// Dequeues and applies events until the tracker is complete.
    ///
    /// Stops at the first hook error.
    pub(crate) async fn drain(
        &mut self,
        queue: &mut EventQueue<ChannelEvent>,
    ) -> Result<(), CommandError> {
        while !self.tracker.is_complete() {
            #[cfg(feature = "tracing")]
            tracing::trace!("dequeue");
            let Some(event) = queue.dequeue().await else {
                let msg = "Event queue closed before the process finished";
                #[cfg(feature = "tracing")]
                tracing::error!(msg);
                return Err(CommandError::Channel(msg.to_string()));
            };
            self.apply(event)?;
        }
        Ok(())
    }

    pub(crate) fn apply(&mut self, event: ChannelEvent) -> Result<(), CommandError> {
        match event {
            ChannelEvent::Stdout(StreamChunk::Data(data)) => {
                self.stdout.extend_from_slice(&data);
                if let Some(reply) = (self.hooks.stdout)(&data)? {
                    self.stdin.write(reply);
                }
            }
            ChannelEvent::Stdout(StreamChunk::End) => self.tracker.close_stdout(),
            ChannelEvent::Stderr(StreamChunk::Data(data)) => {
                self.stderr.extend_from_slice(&data);
                if let Some(reply) = (self.hooks.stderr)(&data)? {
                    self.stdin.write(reply);
                }
            }
            ChannelEvent::Stderr(StreamChunk::End) => self.tracker.close_stderr(),
            ChannelEvent::Terminated { code, reason } => {
                // The termination hook waits until both streams are drained.
                self.tracker.record_exit(code, reason);
                self.stdin.close();
            }
            ChannelEvent::WaitFailed(msg) => return Err(CommandError::IO(msg)),
        }
        Ok(())
    }

    /// Runs the termination hook once and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Channel`] if called before completion, or the
    /// termination hook's own error.
    pub(crate) fn finish(mut self) -> Result<Output, CommandError> {
        let Some((code, reason)) = self.tracker.finished() else {
            return Err(CommandError::Channel(
                "Process channel finished before completion".to_string(),
            ));
        };
        (self.hooks.termination)(code, reason)?;
        Ok(Output::new(self.stdout, self.stderr, code))
    }
}

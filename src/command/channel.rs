use crate::{
    command::{
        config::CommandConfig,
        consumer::{ChannelHooks, EventConsumer},
        error::CommandError,
        event::ChannelEvent,
        output::{Output, TerminationReason},
        process::ExitWatcher,
        queue::event_queue,
        reader::StreamReader,
        stdin::{StdinFeed, StdinHandle, stdin_channel},
    },
    helper::tracing::MaybeInstrument,
};

type LaunchHook = Box<dyn FnOnce() + Send>;

/// Runs one process and merges its output streams and exit into a single loop
///
/// Each output stream is read on its own task and the exit is awaited on a
/// third; all three feed one event queue consumed by [`ProcessChannel::exec`].
/// Hooks see every chunk as it arrives and may reply by returning bytes to
/// write to the process's stdin. The termination hook runs exactly once, after
/// both streams have ended and the exit status is known.
///
/// A channel is single-use: `exec` consumes it.
///
/// # Examples
///
/// ## Answering a prompt
/// ```rust,no_run
/// use secretcmd::command::{channel::ProcessChannel, config::CommandConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = CommandConfig::new("/bin/sh")
///         .args(["-c", "printf 'Password: '; read pw; echo \"got $pw\""]);
///
///     let output = ProcessChannel::new(config)
///         .handle_stdout(|chunk| {
///             if chunk.ends_with(b"Password: ") {
///                 return Ok(Some(b"hunter2\n".to_vec()));
///             }
///             Ok(None)
///         })
///         .exec()
///         .await?;
///
///     assert_eq!(output.lines()[0], "Password: got hunter2");
///     Ok(())
/// }
/// ```
pub struct ProcessChannel {
    config: CommandConfig,
    hooks: ChannelHooks,
    on_launch: Option<LaunchHook>,
    stdin: StdinHandle,
    stdin_feed: StdinFeed,
}

impl std::fmt::Debug for ProcessChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessChannel")
            .field("command", &self.config.command)
            .field("stdin_closed", &self.stdin.is_closed())
            .finish_non_exhaustive()
    }
}

impl ProcessChannel {
    pub fn new(config: CommandConfig) -> Self {
        let (stdin, stdin_feed) = stdin_channel();
        Self {
            config,
            hooks: ChannelHooks::default(),
            on_launch: None,
            stdin,
            stdin_feed,
        }
    }

    /// Called with each stdout chunk. Returned bytes are written to stdin.
    pub fn handle_stdout<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&[u8]) -> Result<Option<Vec<u8>>, CommandError> + Send + 'static,
    {
        self.hooks.stdout = Box::new(hook);
        self
    }

    /// Called with each stderr chunk. Returned bytes are written to stdin.
    pub fn handle_stderr<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&[u8]) -> Result<Option<Vec<u8>>, CommandError> + Send + 'static,
    {
        self.hooks.stderr = Box::new(hook);
        self
    }

    /// Called once with the exit code and reason after all output was handled.
    pub fn handle_termination<F>(mut self, hook: F) -> Self
    where
        F: FnMut(i32, TerminationReason) -> Result<(), CommandError> + Send + 'static,
    {
        self.hooks.termination = Box::new(hook);
        self
    }

    /// Called once right after the process was spawned.
    pub fn on_launch<F>(mut self, hook: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_launch = Some(Box::new(hook));
        self
    }

    /// Queues bytes for the process's stdin.
    ///
    /// Bytes written before `exec` are delivered once the process starts.
    /// After stdin is closed this does nothing.
    pub fn write(&self, data: impl Into<Vec<u8>>) {
        self.stdin.write(data);
    }

    /// Closes stdin once pending writes are flushed. Idempotent.
    pub fn close_stdin(&self) {
        self.stdin.close();
    }

    /// A handle for writing to stdin from other tasks while `exec` runs.
    pub fn stdin_handle(&self) -> StdinHandle {
        self.stdin.clone()
    }

    /// Spawns the process and runs the consumer loop to completion.
    ///
    /// # Errors
    ///
    /// - [`CommandError::InvalidConfiguration`] if the configuration is invalid
    /// - [`CommandError::IO`] if spawning or waiting on the process fails
    /// - Any error returned by a hook; the process is terminated if it is
    ///   still running
    pub async fn exec(self) -> Result<Output, CommandError> {
        self.run().maybe_instrument("process_channel").await
    }

    async fn run(self) -> Result<Output, CommandError> {
        let Self {
            config,
            hooks,
            on_launch,
            stdin,
            stdin_feed,
        } = self;

        config.validate()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(command = %config.command, args = config.args.len(), "Spawning command");

        // Arguments are never logged, they may carry secrets.
        let mut child = config.to_command().spawn().map_err(|e| {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %e, command = %config.command, "Failed to spawn child process");
            CommandError::IO(format!(
                "Failed to spawn child process '{}': {}",
                config.command, e
            ))
        })?;

        let (Some(child_stdout), Some(child_stderr), Some(child_stdin)) =
            (child.stdout.take(), child.stderr.take(), child.stdin.take())
        else {
            let msg = "Failed to take standard streams of child process";
            #[cfg(feature = "tracing")]
            tracing::error!(msg);
            return Err(CommandError::IO(msg.to_string()));
        };

        let (producer, mut queue) = event_queue::<ChannelEvent>();

        let stdout_producer = producer.clone();
        let stdout_reader = StreamReader::new(child_stdout)
            .chunk_size(config.read_chunk_size)
            .spawn(move |chunk| stdout_producer.enqueue(ChannelEvent::Stdout(chunk)));

        let stderr_producer = producer.clone();
        let stderr_reader = StreamReader::new(child_stderr)
            .chunk_size(config.read_chunk_size)
            .spawn(move |chunk| stderr_producer.enqueue(ChannelEvent::Stderr(chunk)));

        stdin_feed.spawn(child_stdin);
        let watcher = ExitWatcher::spawn(child, producer, config.termination_grace());

        if let Some(hook) = on_launch {
            hook();
        }

        let mut consumer = EventConsumer::new(hooks, stdin.clone());
        if let Err(e) = consumer.drain(&mut queue).await {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %e, command = %config.command, "Command aborted");

            stdin.close();
            stdout_reader.abort();
            stderr_reader.abort();
            if !consumer.tracker().has_exited() {
                watcher.terminate().await;
            }
            return Err(e);
        }

        let output = consumer.finish()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(command = %config.command, exit_code = output.exit_code, "Command completed");

        Ok(output)
    }
}

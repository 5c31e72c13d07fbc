use futures::{FutureExt, future::BoxFuture};

use crate::command::{
    channel::ProcessChannel, config::CommandConfig, error::CommandError,
    executable::ExecutableCommand, output::Output,
};

/// Non-interactive command that runs to completion and captures its output
///
/// Each call to `exec` spawns a fresh [`ProcessChannel`] with no-op hooks.
/// An optional stdin payload is written once before streaming starts; by
/// default stdin is then closed so tools reading until end-of-input finish.
///
/// # Examples
///
/// ```rust,no_run
/// use secretcmd::command::{
///     config::CommandConfig, executable::ExecutableCommand, plain::PlainCommand,
/// };
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let command = PlainCommand::new(CommandConfig::new("/bin/cat")).stdin("secret\n");
///     let output = command.exec().await?;
///     assert_eq!(output.lines()[0], "secret");
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlainCommand {
    pub config: CommandConfig,
    pub stdin: Option<Vec<u8>>,
    pub close_stdin_after_payload: bool,
}

impl PlainCommand {
    pub fn new(config: CommandConfig) -> Self {
        Self {
            config,
            stdin: None,
            close_stdin_after_payload: true,
        }
    }

    /// Sets the bytes written to stdin before output is read.
    pub fn stdin(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(data.into());
        self
    }

    /// Keeps stdin open after the payload until the process exits.
    pub fn keep_stdin_open(mut self) -> Self {
        self.close_stdin_after_payload = false;
        self
    }

    pub async fn run(&self) -> Result<Output, CommandError> {
        let channel = ProcessChannel::new(self.config.clone());
        if let Some(data) = &self.stdin {
            channel.write(data.clone());
        }
        if self.close_stdin_after_payload {
            channel.close_stdin();
        }
        channel.exec().await
    }
}

impl ExecutableCommand for PlainCommand {
    fn exec(&self) -> BoxFuture<'_, Result<Output, CommandError>> {
        self.run().boxed()
    }
}

use thiserror::Error;

/// Errors raised while running a command or transforming a recipe
///
/// Every failure in the crate surfaces as a `CommandError`: process spawning and
/// waiting, hook failures during streaming, recipe parsing and recovery, and
/// unsupported operations. Payloads are plain strings so the error stays
/// `Clone` and comparable.
///
/// # Examples
///
/// ```rust
/// use secretcmd::command::error::CommandError;
///
/// let error = CommandError::Failed {
///     exit_code: 1,
///     stderr: "bad cred".to_string(),
/// };
/// assert_eq!(error.to_string(), "Command exited with code 1: bad cred");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Spawning, piping or waiting on the process failed
    #[error("IO error: {0}")]
    IO(String),

    /// The command configuration was rejected before spawning
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A stdout, stderr or termination hook refused to continue
    #[error("Hook error: {0}")]
    Hook(String),

    /// The internal event queue closed before the process finished
    #[error("Channel error: {0}")]
    Channel(String),

    /// The backing tool cannot perform this operation
    #[error("Unsupported operation: {reason}")]
    Unsupported { reason: String },

    /// The process exited with a nonzero code
    #[error("Command exited with code {exit_code}: {stderr}")]
    Failed { exit_code: i32, stderr: String },

    /// The process output did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// A bounded retry policy ran out of attempts
    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: usize,
        last: Box<CommandError>,
    },

    #[error("Custom error: {0}")]
    Custom(String),
}

impl CommandError {
    /// Builds an `Unsupported` error from a human-readable reason.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        CommandError::Unsupported {
            reason: reason.into(),
        }
    }

    /// Builds a `Failed` error, decoding stderr lossily.
    pub fn failed(exit_code: i32, stderr: &[u8]) -> Self {
        CommandError::Failed {
            exit_code,
            stderr: String::from_utf8_lossy(stderr).trim_end().to_string(),
        }
    }
}

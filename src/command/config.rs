use std::{collections::HashMap, process::Stdio, time::Duration};

use tokio::process::Command;

use crate::command::{error::CommandError, reader::DEFAULT_CHUNK_SIZE, validator::ConfigValidator};

/// Default time a child gets to exit after `SIGTERM` before it is killed
pub const DEFAULT_TERMINATION_GRACE_MS: u64 = 500;

/// Configuration for a single command invocation
///
/// `CommandConfig` names the executable, its arguments and environment, and
/// the tuning knobs of the process channel that runs it. All three standard
/// streams are always piped.
///
/// # Examples
///
/// ```rust
/// use secretcmd::command::config::CommandConfig;
///
/// let config = CommandConfig::new("/usr/bin/security")
///     .args(["find-generic-password", "-s", "example"])
///     .env([("LANG", "C")])
///     .inherit_env(false);
///
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct CommandConfig {
    /// Path of the executable to run
    pub command: String,

    /// Arguments passed to the executable
    pub args: Vec<String>,

    /// Working directory for the process
    pub working_dir: Option<String>,

    /// Environment variables set for the process
    pub env: HashMap<String, String>,

    /// Keep the parent's environment and layer `env` over it.
    /// When `false`, `env` replaces the environment entirely.
    pub inherit_env: bool,

    /// Maximum bytes requested per stream read
    pub read_chunk_size: usize,

    /// Milliseconds to wait after `SIGTERM` before killing an aborted process
    pub termination_grace_ms: u64,
}

impl Default for CommandConfig {
    fn default() -> Self {
        CommandConfig {
            command: String::new(),
            args: Vec::new(),
            working_dir: None,
            env: HashMap::new(),
            inherit_env: true,
            read_chunk_size: DEFAULT_CHUNK_SIZE,
            termination_grace_ms: DEFAULT_TERMINATION_GRACE_MS,
        }
    }
}

impl CommandConfig {
    pub fn new(command: impl Into<String>) -> Self {
        CommandConfig {
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env<K, V, I>(mut self, env: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.env = env.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn inherit_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }

    pub fn read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size;
        self
    }

    pub fn termination_grace_ms(mut self, ms: u64) -> Self {
        self.termination_grace_ms = ms;
        self
    }

    pub(crate) fn termination_grace(&self) -> Duration {
        Duration::from_millis(self.termination_grace_ms)
    }

    /// Validates the configuration before it is used to spawn a process.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidConfiguration`] if:
    /// - The command is empty, padded with whitespace or too long
    /// - An argument contains NUL bytes or is too long
    /// - The working directory does not exist or is not a directory
    /// - An environment key or value is invalid
    /// - The read chunk size is zero
    ///
    /// # Examples
    ///
    /// ```rust
    /// use secretcmd::command::config::CommandConfig;
    ///
    /// assert!(CommandConfig::new("/bin/sh").validate().is_ok());
    /// assert!(CommandConfig::new("").validate().is_err());
    /// assert!(CommandConfig::new("/bin/sh").read_chunk_size(0).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CommandError> {
        ConfigValidator::validate_command(&self.command)?;
        ConfigValidator::validate_args(&self.args)?;
        if let Some(dir) = &self.working_dir {
            ConfigValidator::validate_working_dir(dir)?;
        }
        ConfigValidator::validate_env_vars(&self.env)?;
        ConfigValidator::validate_chunk_size(self.read_chunk_size)?;
        Ok(())
    }

    /// Builds a tokio command with every standard stream piped.
    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.command);

        cmd.kill_on_drop(true);
        cmd.args(&self.args);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        if !self.inherit_env {
            cmd.env_clear();
        }
        cmd.envs(&self.env);

        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::piped());
        cmd
    }
}

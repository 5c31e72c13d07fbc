use std::collections::HashMap;
use std::path::Path;

use crate::command::error::CommandError;

const MAX_COMMAND_LEN: usize = 4096;
const MAX_ARG_LEN: usize = 128 * 1024;
const MAX_WORKING_DIR_LEN: usize = 4096;
const MAX_ENV_KEY_LEN: usize = 1024;
const MAX_ENV_VALUE_LEN: usize = 32 * 1024;

/// Validation rules applied to a [`CommandConfig`](crate::command::config::CommandConfig) before spawning
///
/// Arguments and environment values frequently carry user data (account names,
/// secrets), so they are only checked for NUL bytes and size. The command and
/// environment keys get stricter checks.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the executable path.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidConfiguration`] if the command is empty,
    /// has surrounding whitespace, contains NUL bytes or is too long.
    ///
    /// # Examples
    /// ```rust
    /// use secretcmd::command::validator::ConfigValidator;
    ///
    /// assert!(ConfigValidator::validate_command("/usr/bin/security").is_ok());
    /// assert!(ConfigValidator::validate_command(" op").is_err());
    /// ```
    pub fn validate_command(command: &str) -> Result<(), CommandError> {
        if command.trim().is_empty() {
            return Err(CommandError::InvalidConfiguration(
                "Command cannot be empty".to_string(),
            ));
        }
        if command.trim() != command {
            return Err(CommandError::InvalidConfiguration(
                "Command cannot have leading or trailing whitespace".to_string(),
            ));
        }
        if command.contains('\0') {
            return Err(CommandError::InvalidConfiguration(
                "Command contains null characters".to_string(),
            ));
        }
        if command.len() > MAX_COMMAND_LEN {
            return Err(CommandError::InvalidConfiguration(
                "Command length exceeds maximum allowed length".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates arguments. Empty arguments and whitespace are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidConfiguration`] if an argument contains
    /// NUL bytes or exceeds the maximum length. The argument itself is never
    /// echoed in the message since it may be a secret.
    pub fn validate_args(args: &[String]) -> Result<(), CommandError> {
        for (index, arg) in args.iter().enumerate() {
            if arg.contains('\0') {
                return Err(CommandError::InvalidConfiguration(format!(
                    "Argument {index} contains null characters"
                )));
            }
            if arg.len() > MAX_ARG_LEN {
                return Err(CommandError::InvalidConfiguration(format!(
                    "Argument {index} exceeds maximum length"
                )));
            }
        }
        Ok(())
    }

    /// Validates the working directory path.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidConfiguration`] if the directory does not
    /// exist, is not a directory, has surrounding whitespace or is too long.
    pub fn validate_working_dir(dir: &str) -> Result<(), CommandError> {
        if dir.trim() != dir {
            return Err(CommandError::InvalidConfiguration(
                "Working directory cannot have leading/trailing whitespace".to_string(),
            ));
        }
        if dir.len() > MAX_WORKING_DIR_LEN {
            return Err(CommandError::InvalidConfiguration(
                "Working directory path exceeds maximum length".to_string(),
            ));
        }
        let path = Path::new(dir);
        if !path.exists() {
            return Err(CommandError::InvalidConfiguration(format!(
                "Working directory does not exist: {dir}"
            )));
        }
        if !path.is_dir() {
            return Err(CommandError::InvalidConfiguration(format!(
                "Working directory is not a directory: {dir}"
            )));
        }
        Ok(())
    }

    /// Validates environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidConfiguration`] if a key is empty,
    /// contains `=`, whitespace or NUL bytes, or if a key or value is too long
    /// or a value contains NUL bytes.
    ///
    /// # Examples
    /// ```rust
    /// use secretcmd::command::validator::ConfigValidator;
    /// use std::collections::HashMap;
    ///
    /// let mut env = HashMap::new();
    /// env.insert("VAULT".to_string(), "personal vault".to_string());
    /// assert!(ConfigValidator::validate_env_vars(&env).is_ok());
    ///
    /// env.insert("BAD=KEY".to_string(), "x".to_string());
    /// assert!(ConfigValidator::validate_env_vars(&env).is_err());
    /// ```
    pub fn validate_env_vars(env: &HashMap<String, String>) -> Result<(), CommandError> {
        for (key, value) in env {
            if key.is_empty() {
                return Err(CommandError::InvalidConfiguration(
                    "Environment variable key cannot be empty".to_string(),
                ));
            }
            if key.contains('=') || key.contains('\0') || key.chars().any(char::is_whitespace) {
                return Err(CommandError::InvalidConfiguration(format!(
                    "Environment variable key '{}' contains invalid characters",
                    key.escape_debug()
                )));
            }
            if key.len() > MAX_ENV_KEY_LEN {
                return Err(CommandError::InvalidConfiguration(format!(
                    "Environment variable key '{key}' exceeds maximum length"
                )));
            }
            if value.contains('\0') {
                return Err(CommandError::InvalidConfiguration(format!(
                    "Environment variable '{key}' value contains null characters"
                )));
            }
            if value.len() > MAX_ENV_VALUE_LEN {
                return Err(CommandError::InvalidConfiguration(format!(
                    "Environment variable '{key}' value exceeds maximum length"
                )));
            }
        }
        Ok(())
    }

    pub fn validate_chunk_size(size: usize) -> Result<(), CommandError> {
        if size == 0 {
            return Err(CommandError::InvalidConfiguration(
                "Read chunk size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

//! # secretcmd
//!
//! Run command-line credential tools from Rust. Output is streamed while the
//! process runs, so hooks can answer prompts, and typed requests are turned
//! into invocations and parsed results through composable recipes.
//!
//! ## Features
//!
//! - **Streamed I/O**: stdout and stderr are read concurrently in chunks and
//!   merged with the exit notification into one ordered consumer loop
//! - **Interactive Hooks**: reply to prompts by returning bytes for stdin
//! - **Ordered Termination**: the termination hook only runs after both
//!   streams are fully drained
//! - **Recipes**: build-execute-parse pipelines with recovery-driven retry
//! - **Type Erasure**: store heterogeneous recipes behind [`recipe::any::AnyRecipe`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use secretcmd::command::{config::CommandConfig, channel::ProcessChannel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CommandConfig::new("/bin/echo").args(["hello"]);
//!     config.validate()?;
//!
//!     let output = ProcessChannel::new(config)
//!         .handle_termination(|code, reason| {
//!             println!("exited with {} ({:?})", code, reason);
//!             Ok(())
//!         })
//!         .exec()
//!         .await?;
//!
//!     assert_eq!(output.lines()[0], "hello");
//!     Ok(())
//! }
//! ```
//!
//! ## Recipes
//!
//! ```rust,no_run
//! use secretcmd::{
//!     command::{config::CommandConfig, error::CommandError, plain::PlainCommand},
//!     recipe::{Recipe, RecipeExt, command::CommandRecipe, retry::RetryPolicy},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), CommandError> {
//!     let lookup = CommandRecipe::new(
//!         |id: &String| {
//!             Ok(PlainCommand::new(
//!                 CommandConfig::new("/usr/bin/pass").args(["show", id.as_str()]),
//!             ))
//!         },
//!         |output| {
//!             if !output.success() {
//!                 return Err(CommandError::failed(output.exit_code, &output.stderr));
//!             }
//!             Ok(output.lines()[0].clone())
//!         },
//!     )
//!     .recover(|_| Ok(()))
//!     .retry_policy(RetryPolicy::limited(3))
//!     .into_any();
//!
//!     let password = lookup.transform("email/work".to_string()).await?;
//!     # let _ = password;
//!     Ok(())
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `serde`: Enable serialization support for configuration types
//! - `tracing`: Enable structured logging integration

pub mod command;
pub mod datasource;
pub mod helper;
pub mod recipe;

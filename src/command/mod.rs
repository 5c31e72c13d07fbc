//! Process execution engine.
//!
//! A [`channel::ProcessChannel`] spawns one process with all three standard
//! streams piped, reads stdout and stderr on their own tasks, waits for the
//! exit on a third, and merges everything through an
//! [`queue::EventQueue`] into a single consumer loop.
//! [`plain::PlainCommand`] wraps it for run-to-completion use.

pub mod channel;
pub mod completion;
pub mod config;
pub mod consumer;
pub mod error;
pub mod event;
pub mod executable;
pub mod output;
pub mod plain;
pub mod process;
pub mod queue;
pub mod reader;
pub mod stdin;
pub mod validator;

//! Credential data source built from recipes.
//!
//! A [`configuration::Configuration`] binds the five operations a credential
//! tool offers. [`source::CommandLineDataSource`] turns it into
//! [`source::ProvidedAccount`] handles and degrades gracefully when listing
//! fails.

pub mod account;
pub mod configuration;
pub mod source;

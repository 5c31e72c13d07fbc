//! Composable recipes that turn typed requests into typed results.
//!
//! A [`Recipe`] is one asynchronous, fallible transformation. Recipes compose
//! with [`pipeline::PipelineRecipe`], run processes through
//! [`command::CommandRecipe`], stub missing operations with
//! [`unsupported::UnsupportedRecipe`] and hide their concrete type behind
//! [`any::AnyRecipe`].

use std::future::Future;

use crate::command::error::CommandError;

pub mod any;
pub mod command;
pub mod pipeline;
pub mod retry;
pub mod unsupported;


/// A fallible transformation from `Input` to `Output`
///
/// # Examples
///
/// ```rust
/// use secretcmd::{command::error::CommandError, recipe::Recipe};
///
/// struct Trim;
///
/// impl Recipe for Trim {
///     type Input = String;
///     type Output = String;
///
///     async fn transform(&self, input: String) -> Result<String, CommandError> {
///         Ok(input.trim().to_string())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     assert_eq!(Trim.transform("  pw \n".to_string()).await.unwrap(), "pw");
/// }
/// ```
pub trait Recipe: Send + Sync {
    type Input: Send;
    type Output: Send;

    fn transform(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = Result<Self::Output, CommandError>> + Send;
}

/// Combinators available on every [`Recipe`]
pub trait RecipeExt: Recipe + Sized {
    /// Feeds this recipe's output into `next`.
    fn then<R>(self, next: R) -> pipeline::PipelineRecipe<Self, R>
    where
        R: Recipe<Input = Self::Output>,
    {
        pipeline::PipelineRecipe::new(self, next)
    }

    /// Erases the concrete recipe type.
    fn into_any(self) -> any::AnyRecipe<Self::Input, Self::Output>
    where
        Self: 'static,
        Self::Input: 'static,
        Self::Output: 'static,
    {
        any::AnyRecipe::new(self)
    }
}

impl<R: Recipe> RecipeExt for R {}

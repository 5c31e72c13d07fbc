use std::marker::PhantomData;

use crate::{command::error::CommandError, recipe::Recipe};

/// A recipe for an operation the backing tool cannot perform
///
/// Always fails with [`CommandError::Unsupported`] carrying its reason and
/// never runs a process.
///
/// # Examples
///
/// ```rust
/// use secretcmd::{
///     command::error::CommandError,
///     recipe::{Recipe, unsupported::UnsupportedRecipe},
/// };
///
/// #[tokio::main]
/// async fn main() {
///     let recipe = UnsupportedRecipe::<String, ()>::new("This tool cannot delete entries");
///     let result = recipe.transform("id".to_string()).await;
///     assert_eq!(result, Err(CommandError::unsupported("This tool cannot delete entries")));
/// }
/// ```
pub struct UnsupportedRecipe<I, O> {
    reason: String,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O> UnsupportedRecipe<I, O> {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            _marker: PhantomData,
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl<I, O> Clone for UnsupportedRecipe<I, O> {
    fn clone(&self) -> Self {
        Self::new(self.reason.clone())
    }
}

impl<I, O> std::fmt::Debug for UnsupportedRecipe<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsupportedRecipe")
            .field("reason", &self.reason)
            .finish()
    }
}

impl<I: Send, O: Send> Recipe for UnsupportedRecipe<I, O> {
    type Input = I;
    type Output = O;

    async fn transform(&self, _input: I) -> Result<O, CommandError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(reason = %self.reason, "Unsupported recipe invoked");
        Err(CommandError::unsupported(self.reason.clone()))
    }
}

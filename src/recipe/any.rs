use std::{future::Future, sync::Arc};

use futures::{FutureExt, future::BoxFuture};

use crate::{command::error::CommandError, recipe::Recipe};

type ErasedFn<I, O> = dyn Fn(I) -> BoxFuture<'static, Result<O, CommandError>> + Send + Sync;

/// A recipe with its concrete type erased
///
/// Lets differently built recipes with the same input and output types be
/// stored side by side, as in
/// [`Configuration`](crate::datasource::configuration::Configuration).
/// Cloning is cheap and shares the underlying recipe.
///
/// # Examples
///
/// ```rust
/// use secretcmd::recipe::{Recipe, any::AnyRecipe, unsupported::UnsupportedRecipe};
///
/// #[tokio::main]
/// async fn main() {
///     let recipes: Vec<AnyRecipe<u32, u32>> = vec![
///         AnyRecipe::from_fn(|n| async move { Ok(n + 1) }),
///         AnyRecipe::new(UnsupportedRecipe::new("no")),
///     ];
///
///     assert_eq!(recipes[0].transform(1).await, Ok(2));
///     assert!(recipes[1].transform(1).await.is_err());
/// }
/// ```
pub struct AnyRecipe<I, O> {
    inner: Arc<ErasedFn<I, O>>,
}

impl<I, O> Clone for AnyRecipe<I, O> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, O> std::fmt::Debug for AnyRecipe<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyRecipe").finish_non_exhaustive()
    }
}

impl<I, O> AnyRecipe<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new<R>(recipe: R) -> Self
    where
        R: Recipe<Input = I, Output = O> + 'static,
    {
        let recipe = Arc::new(recipe);
        Self {
            inner: Arc::new(move |input| {
                let recipe = Arc::clone(&recipe);
                async move { recipe.transform(input).await }.boxed()
            }),
        }
    }

    /// Wraps an async closure as a recipe.
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, CommandError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |input| f(input).boxed()),
        }
    }
}

impl<I, O> Recipe for AnyRecipe<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    type Input = I;
    type Output = O;

    fn transform(&self, input: I) -> impl Future<Output = Result<O, CommandError>> + Send {
        (self.inner)(input)
    }
}

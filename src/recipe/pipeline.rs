use crate::{command::error::CommandError, recipe::Recipe};

/// Runs `first`, then feeds its output into `second`
///
/// If `first` fails, `second` never runs.
#[derive(Debug, Clone)]
pub struct PipelineRecipe<A, B> {
    first: A,
    second: B,
}

impl<A, B> PipelineRecipe<A, B>
where
    A: Recipe,
    B: Recipe<Input = A::Output>,
{
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Recipe for PipelineRecipe<A, B>
where
    A: Recipe,
    B: Recipe<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    async fn transform(&self, input: A::Input) -> Result<B::Output, CommandError> {
        let intermediate = self.first.transform(input).await?;
        self.second.transform(intermediate).await
    }
}

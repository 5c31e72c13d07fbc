use std::marker::PhantomData;

use crate::{
    command::{error::CommandError, executable::ExecutableCommand, output::Output},
    recipe::{Recipe, retry::RetryPolicy},
};

type BuildFn<I> =
    Box<dyn Fn(&I) -> Result<Box<dyn ExecutableCommand>, CommandError> + Send + Sync>;
type ParseFn<O> = Box<dyn Fn(Output) -> Result<O, CommandError> + Send + Sync>;
type RecoverFn = Box<dyn Fn(CommandError) -> Result<(), CommandError> + Send + Sync>;

/// A recipe that runs a command and parses its output, retrying on parse failure
///
/// `transform` builds a command from the input, runs it and parses the
/// [`Output`]. When parsing fails the error goes to the recovery hook: if the
/// hook returns `Ok`, the command is built and run again from scratch; if it
/// returns an error, that error is the result. Errors from building or
/// running the command are returned directly without recovery.
///
/// With [`RetryPolicy::Unbounded`] (the default) the recovery hook is the only
/// thing that stops retries. The default hook, [`CommandRecipe::propagate`],
/// never retries.
///
/// # Examples
///
/// ```rust,no_run
/// use secretcmd::{
///     command::{config::CommandConfig, error::CommandError, plain::PlainCommand},
///     recipe::{Recipe, command::CommandRecipe},
/// };
///
/// #[tokio::main]
/// async fn main() -> Result<(), CommandError> {
///     let recipe = CommandRecipe::new(
///         |name: &String| {
///             Ok(PlainCommand::new(
///                 CommandConfig::new("/bin/echo").args([name.as_str()]),
///             ))
///         },
///         |output| {
///             if !output.success() {
///                 return Err(CommandError::failed(output.exit_code, &output.stderr));
///             }
///             Ok(output.lines()[0].clone())
///         },
///     );
///
///     assert_eq!(recipe.transform("hello".to_string()).await?, "hello");
///     Ok(())
/// }
/// ```
pub struct CommandRecipe<I, O> {
    build_command: BuildFn<I>,
    parse_output: ParseFn<O>,
    recover: RecoverFn,
    retry_policy: RetryPolicy,
    _marker: PhantomData<fn(I) -> O>,
}

impl<I, O> std::fmt::Debug for CommandRecipe<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRecipe")
            .field("retry_policy", &self.retry_policy)
            .finish_non_exhaustive()
    }
}

impl<I: 'static, O: 'static> CommandRecipe<I, O> {
    pub fn new<B, C, P>(build_command: B, parse_output: P) -> Self
    where
        B: Fn(&I) -> Result<C, CommandError> + Send + Sync + 'static,
        C: ExecutableCommand + 'static,
        P: Fn(Output) -> Result<O, CommandError> + Send + Sync + 'static,
    {
        Self {
            build_command: Box::new(move |input| {
                build_command(input).map(|cmd| Box::new(cmd) as Box<dyn ExecutableCommand>)
            }),
            parse_output: Box::new(parse_output),
            recover: Box::new(Self::propagate),
            retry_policy: RetryPolicy::default(),
            _marker: PhantomData,
        }
    }

    /// Sets the hook deciding whether a parse failure is retried.
    ///
    /// Return `Ok(())` to run the command again, or an error to stop.
    pub fn recover<F>(mut self, recover: F) -> Self
    where
        F: Fn(CommandError) -> Result<(), CommandError> + Send + Sync + 'static,
    {
        self.recover = Box::new(recover);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Recovery hook that never retries and returns the parse error as is.
    pub fn propagate(error: CommandError) -> Result<(), CommandError> {
        Err(error)
    }
}

impl<I: Send, O: Send> Recipe for CommandRecipe<I, O> {
    type Input = I;
    type Output = O;

    async fn transform(&self, input: I) -> Result<O, CommandError> {
        let mut attempts = 0usize;
        loop {
            let command = (self.build_command)(&input)?;
            attempts += 1;
            let output = command.exec().await?;

            let error = match (self.parse_output)(output) {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            #[cfg(feature = "tracing")]
            tracing::debug!(error = %error, attempts, "Command output rejected, consulting recovery");

            if !self.retry_policy.allows_retry(attempts) {
                #[cfg(feature = "tracing")]
                tracing::warn!(attempts, "Retry limit reached");
                return Err(CommandError::RetriesExhausted {
                    attempts,
                    last: Box::new(error),
                });
            }

            (self.recover)(error)?;
        }
    }
}

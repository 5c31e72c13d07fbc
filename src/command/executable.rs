use futures::future::BoxFuture;

use crate::command::{error::CommandError, output::Output};

/// Something that can be run to produce an [`Output`]
///
/// Implemented by [`PlainCommand`](crate::command::plain::PlainCommand) and by
/// any custom interactive command a recipe wants to run. The future is boxed
/// so recipes can hold commands as `Box<dyn ExecutableCommand>`.
pub trait ExecutableCommand: Send + Sync {
    fn exec(&self) -> BoxFuture<'_, Result<Output, CommandError>>;
}

impl<T: ExecutableCommand + ?Sized> ExecutableCommand for Box<T> {
    fn exec(&self) -> BoxFuture<'_, Result<Output, CommandError>> {
        (**self).exec()
    }
}

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::mpsc,
    task::JoinHandle,
};

use crate::helper::tracing::MaybeInstrument;

type SharedSender = Arc<Mutex<Option<mpsc::UnboundedSender<Vec<u8>>>>>;

/// Creates a linked stdin handle and the feed that drains it into a pipe.
pub(crate) fn stdin_channel() -> (StdinHandle, StdinFeed) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        StdinHandle {
            tx: Arc::new(Mutex::new(Some(tx))),
        },
        StdinFeed { rx },
    )
}

/// Best-effort writer for a child process's standard input
///
/// Writes are queued and delivered in order by a background task, so they
/// never wait on the child. Once the handle is closed, or the child stops
/// reading, further writes are silently dropped.
#[derive(Debug, Clone)]
pub struct StdinHandle {
    tx: SharedSender,
}

impl StdinHandle {
    fn sender(&self) -> MutexGuard<'_, Option<mpsc::UnboundedSender<Vec<u8>>>> {
        self.tx.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues bytes for the child's input. A no-op once closed.
    pub fn write(&self, data: impl Into<Vec<u8>>) {
        let guard = self.sender();
        let Some(tx) = guard.as_ref() else {
            #[cfg(feature = "tracing")]
            tracing::trace!("Stdin already closed, dropping write");
            return;
        };
        if tx.send(data.into()).is_err() {
            #[cfg(feature = "tracing")]
            tracing::trace!("Stdin pipe gone, dropping write");
        }
    }

    /// Half-closes the child's input after pending writes are flushed.
    ///
    /// Calling this more than once has no further effect.
    pub fn close(&self) {
        self.sender().take();
    }

    pub fn is_closed(&self) -> bool {
        self.sender().as_ref().is_none_or(|tx| tx.is_closed())
    }
}

/// Receiving side of a [`StdinHandle`]
#[derive(Debug)]
pub(crate) struct StdinFeed {
    rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl StdinFeed {
    /// Forwards queued writes into `pipe` until the handle is closed.
    pub(crate) fn spawn<W>(self, pipe: W) -> JoinHandle<()>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        tokio::spawn(self.run(pipe).maybe_instrument("stdin_feed"))
    }

    async fn run<W>(mut self, mut pipe: W)
    where
        W: AsyncWrite + Unpin,
    {
        while let Some(data) = self.rx.recv().await {
            #[cfg(feature = "tracing")]
            tracing::trace!(bytes = data.len(), "Writing to stdin");
            if let Err(_e) = pipe.write_all(&data).await {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "Failed to write to stdin, closing");
                return;
            }
            if let Err(_e) = pipe.flush().await {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_e, "Failed to flush stdin, closing");
                return;
            }
        }
        if let Err(_e) = pipe.shutdown().await {
            #[cfg(feature = "tracing")]
            tracing::trace!(error = %_e, "Stdin shutdown failed");
        }
    }
}

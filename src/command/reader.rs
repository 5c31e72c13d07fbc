use tokio::{
    io::{AsyncRead, AsyncReadExt},
    task::JoinHandle,
};

use crate::{command::event::StreamChunk, helper::tracing::MaybeInstrument};

/// Default size of a single read, in bytes
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Chunked reader that forwards one stream to a handler on its own task
///
/// Each successful read is copied into an owned buffer and passed to the
/// handler as [`StreamChunk::Data`]. End-of-stream is delivered once as
/// [`StreamChunk::End`], after which the reader stops. Read errors are
/// treated as end-of-stream.
///
/// # Examples
///
/// ```rust
/// use secretcmd::command::{event::StreamChunk, reader::StreamReader};
/// use tokio::sync::mpsc;
///
/// #[tokio::main]
/// async fn main() {
///     let (tx, mut rx) = mpsc::unbounded_channel();
///     let handle = StreamReader::new(&b"hello"[..]).spawn(move |chunk| {
///         let _ = tx.send(chunk);
///     });
///     handle.await.unwrap();
///
///     assert_eq!(rx.recv().await, Some(StreamChunk::Data(b"hello".to_vec())));
///     assert_eq!(rx.recv().await, Some(StreamChunk::End));
/// }
/// ```
#[derive(Debug)]
pub struct StreamReader<R> {
    stream: R,
    chunk_size: usize,
}

impl<R> StreamReader<R>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Sets the maximum number of bytes requested per read.
    ///
    /// A size of zero is raised to one.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size.max(1);
        self
    }

    /// Starts reading on a new tokio task.
    pub fn spawn<F>(self, handler: F) -> JoinHandle<()>
    where
        F: FnMut(StreamChunk) + Send + 'static,
    {
        tokio::spawn(self.run(handler).maybe_instrument("stream_reader"))
    }

    /// Reads until end-of-stream on the current task.
    pub async fn run<F>(mut self, mut handler: F)
    where
        F: FnMut(StreamChunk),
    {
        let mut buffer = vec![0u8; self.chunk_size];
        loop {
            match self.stream.read(&mut buffer).await {
                Ok(0) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!("Stream reached end");
                    break;
                }
                Ok(n) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(bytes = n, "Stream chunk read");
                    handler(StreamChunk::Data(buffer[..n].to_vec()));
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %_e, "Error reading stream, treating as end");
                    break;
                }
            }
        }
        handler(StreamChunk::End);
    }
}

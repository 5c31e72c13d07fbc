use crate::command::output::TerminationReason;

/// One delivery from a [`StreamReader`](crate::command::reader::StreamReader)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamChunk {
    /// Bytes read from the stream, owned by the receiver
    Data(Vec<u8>),
    /// End-of-stream sentinel, delivered exactly once
    End,
}

/// Notifications merged into a process channel's event queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChannelEvent {
    Stdout(StreamChunk),
    Stderr(StreamChunk),
    Terminated {
        code: i32,
        reason: TerminationReason,
    },
    /// Waiting on the child failed at the OS level
    WaitFailed(String),
}

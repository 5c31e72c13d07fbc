use tokio::sync::mpsc;

/// Creates an ordered multi-producer, single-consumer event queue.
///
/// The queue is unbounded: [`EventProducer::enqueue`] never waits, and
/// [`EventQueue::dequeue`] suspends until an element is available. Elements
/// come out in the order they were enqueued, across all producers.
///
/// # Examples
///
/// ```rust
/// use secretcmd::command::queue::event_queue;
///
/// #[tokio::main]
/// async fn main() {
///     let (producer, mut queue) = event_queue();
///     let other = producer.clone();
///     producer.enqueue(1);
///     other.enqueue(2);
///     assert_eq!(queue.dequeue().await, Some(1));
///     assert_eq!(queue.dequeue().await, Some(2));
/// }
/// ```
pub fn event_queue<T>() -> (EventProducer<T>, EventQueue<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventProducer { tx }, EventQueue { rx })
}

/// Sending half of an [`EventQueue`]
#[derive(Debug)]
pub struct EventProducer<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for EventProducer<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> EventProducer<T> {
    /// Appends an element to the queue without waiting.
    ///
    /// If the consumer is already gone the element is dropped.
    pub fn enqueue(&self, event: T) {
        if self.tx.send(event).is_err() {
            #[cfg(feature = "tracing")]
            tracing::trace!("Event queue consumer dropped, discarding event");
        }
    }
}

/// Receiving half of an event queue
#[derive(Debug)]
pub struct EventQueue<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> EventQueue<T> {
    /// Removes and returns the oldest element, waiting for one if necessary.
    ///
    /// Returns `None` only after every producer has been dropped and the queue
    /// is drained.
    pub async fn dequeue(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Number of elements currently waiting.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

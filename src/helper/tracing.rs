use std::future::Future;

#[cfg(feature = "tracing")]
use tracing::{Instrument, Level};

/// Attaches a debug span to a future when the `tracing` feature is enabled.
///
/// Without the feature the future is returned untouched, so call sites do not
/// need their own `cfg` gates.
pub trait MaybeInstrument: Future + Sized {
    #[cfg(feature = "tracing")]
    fn maybe_instrument(self, name: &'static str) -> impl Future<Output = Self::Output> {
        let span = tracing::span!(Level::DEBUG, "secretcmd", op = name);
        self.instrument(span)
    }

    #[cfg(not(feature = "tracing"))]
    fn maybe_instrument(self, _name: &'static str) -> Self {
        self
    }
}

impl<F: Future> MaybeInstrument for F {}

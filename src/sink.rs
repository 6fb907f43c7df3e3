//! Adapter from `std::io::Write` to the `std::fmt::Write` an [`Emitter`](crate::emitter::Emitter)
//! writes through.
//!
//! The emitter only ever produces UTF-8 text and never seeks or closes its
//! sink (§6), so `std::fmt::Write` is the natural trait to require — it's
//! what `String` already implements. Hosts holding a file or `Stdout` instead
//! hold `std::io::Write`; `IoWriteSink` bridges the two.

use std::fmt;
use std::io;

/// Wraps a `std::io::Write` so it can be passed to an `Emitter`.
///
/// `std::fmt::Write::write_str` can't return an `io::Error` directly, so a
/// failure is recorded here and surfaced as a generic `fmt::Error` to the
/// caller in progress; call [`IoWriteSink::into_result`] afterwards to
/// recover the real `io::Error`.
pub struct IoWriteSink<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: io::Write> IoWriteSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    /// Unwraps the sink, returning the first `io::Error` encountered, if any.
    pub fn into_result(self) -> Result<W, io::Error> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.inner),
        }
    }
}

impl<W: io::Write> fmt::Write for IoWriteSink<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.inner.write_all(s.as_bytes()) {
            Ok(()) => Ok(()),
            Err(err) => {
                self.error = Some(err);
                Err(fmt::Error)
            }
        }
    }
}

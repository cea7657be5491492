//! Test helpers: an instrumented widget, a failing surface factory, and
//! tracing setup and capture.

/// Instrumented leaf widget.
mod probe;

pub use probe::{Probe, ProbeLog};

use std::{
    io,
    sync::{Arc, Mutex},
};

use tracing::Level;

use crate::{
    error::{Error, Result},
    geom::Expanse,
    surface::{Surface, SurfaceFactory},
};

/// A surface factory that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSurfaceFactory;

impl SurfaceFactory for FailingSurfaceFactory {
    fn create(&self, size: Expanse) -> Result<Box<dyn Surface>> {
        Err(Error::Surface(format!(
            "no drawing context for {}x{}",
            size.w, size.h
        )))
    }
}

/// Install a test-writer tracing subscriber. Safe to call repeatedly.
pub fn init_tracing() {
    if let Err(e) = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(Level::DEBUG)
        .try_init()
    {
        tracing::trace!("subscriber already installed: {e}");
    }
}

/// Shared buffer that a capturing subscriber writes into.
#[derive(Debug, Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("log buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records everything at debug level and
/// above, returning the result and the formatted log output.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buf = LogBuffer::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    let logs = buf
        .0
        .lock()
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default();
    (out, logs)
}

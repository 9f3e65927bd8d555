//! In-memory log capture
//!
//! [`CaptureWriter`] is a `MakeWriter` that appends every formatted line to a
//! shared buffer, so tests can assert on exactly what a logger wrote.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

/// Shared, cloneable in-memory log sink
#[derive(Debug, Clone, Default)]
pub struct CaptureWriter
{
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter
{
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    #[must_use]
    pub fn contents(&self) -> String
    {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Written lines, without their trailing newlines
    #[must_use]
    pub fn lines(&self) -> Vec<String>
    {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Drop everything written so far
    pub fn clear(&self)
    {
        self.lock().clear();
    }

    // A test that panicked mid-write must not hide the output from the next assertion
    fn lock(&self) -> MutexGuard<'_, Vec<u8>>
    {
        self.buffer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Write for CaptureWriter
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>
    {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()>
    {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CaptureWriter
{
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer
    {
        self.clone()
    }
}

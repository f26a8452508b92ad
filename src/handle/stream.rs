//! Read streams that keep the repository open while they live.

use std::io::{self, Cursor, Read, Seek, SeekFrom};

use super::lease::HandleLease;

/// The bytes of one blob, bound to the lease that produced them.
///
/// Dropping the stream, or calling [`close`](ContentStream::close), gives the
/// lease back exactly once. Reads after `close` fail.
#[derive(Debug)]
pub struct ContentStream {
    path: String,
    length: u64,
    content: Cursor<Vec<u8>>,
    lease: HandleLease,
}

impl ContentStream {
    /// Wrap blob bytes read through `lease`.
    pub fn new(path: impl Into<String>, content: Vec<u8>, lease: HandleLease) -> Self {
        Self {
            path: path.into(),
            length: content.len() as u64,
            content: Cursor::new(content),
            lease,
        }
    }

    /// The virtual path this stream was opened for.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Total length of the content in bytes.
    pub fn len(&self) -> u64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Whether the stream has been closed.
    pub fn is_closed(&self) -> bool {
        self.lease.is_released()
    }

    /// Release the repository lease and drop the buffered content. Idempotent.
    pub fn close(&mut self) {
        if !self.lease.is_released() {
            tracing::debug!(path = %self.path, "closing content stream");
            self.content = Cursor::new(Vec::new());
            self.lease.release();
        }
    }

    fn ensure_open(&self) -> io::Result<()> {
        if self.is_closed() {
            return Err(io::Error::other(format!("content stream for '{}' is closed", self.path)));
        }
        Ok(())
    }
}

impl Read for ContentStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.ensure_open()?;
        self.content.read(buf)
    }
}

impl Seek for ContentStream {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.ensure_open()?;
        self.content.seek(pos)
    }
}

//! Bounded line reader.

use rankbot_error::{TransportError, TransportErrorKind};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Longest accepted frame. Twitch caps a tagged line at 8 KiB of tags plus
/// 512 bytes of message.
pub const DEFAULT_MAX_FRAME_LEN: usize = 16 * 1024;

/// Reads `\n`-terminated frames without unbounded buffering.
///
/// A line longer than the limit is discarded up to its terminator and the
/// reader moves on to the next line. Invalid UTF-8 is replaced, not
/// rejected. End of stream is a [`TransportErrorKind::Closed`] error, even
/// in the middle of a line.
#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    buf: Vec<u8>,
    max_len: usize,
}

impl<R: AsyncBufRead + Unpin> FrameReader<R> {
    /// Wrap a buffered reader with the default frame limit.
    pub fn new(inner: R) -> Self {
        Self::with_max_len(inner, DEFAULT_MAX_FRAME_LEN)
    }

    /// Wrap a buffered reader with a custom frame limit.
    pub fn with_max_len(inner: R, max_len: usize) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            max_len,
        }
    }

    /// Read the next frame with `\r\n` or `\n` stripped.
    pub async fn next_frame(&mut self) -> Result<String, TransportError> {
        self.buf.clear();
        let mut oversized = false;

        loop {
            let available = self.inner.fill_buf().await.map_err(|e| {
                TransportError::new(TransportErrorKind::Read(e.to_string()))
            })?;
            if available.is_empty() {
                return Err(TransportError::new(TransportErrorKind::Closed));
            }

            let (chunk, consumed, complete) = match available.iter().position(|b| *b == b'\n') {
                Some(end) => (&available[..end], end + 1, true),
                None => (available, available.len(), false),
            };

            if !oversized {
                if self.buf.len() + chunk.len() > self.max_len {
                    oversized = true;
                    self.buf.clear();
                } else {
                    self.buf.extend_from_slice(chunk);
                }
            }
            self.inner.consume(consumed);

            if complete {
                if oversized {
                    warn!(max_len = self.max_len, "Discarded oversized frame");
                    oversized = false;
                    continue;
                }
                if self.buf.last() == Some(&b'\r') {
                    self.buf.pop();
                }
                return Ok(String::from_utf8_lossy(&self.buf).into_owned());
            }
        }
    }
}

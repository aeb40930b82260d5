use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::messages::{BackendMessage, FrontendMessage, StartupFrame};
use super::{Result, WireError};

pub const DEFAULT_MAX_FRAME_LEN: usize = 1024 * 1024;

#[derive(Debug)]
pub struct FrameReader<R> {
    inner: R,
    buf: BytesMut,
    max_frame_len: usize,
}

impl<R> FrameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(8 * 1024),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
        }
    }

    pub fn max_frame_len(mut self, max: usize) -> Self {
        self.max_frame_len = max.max(8);
        self
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Give back the stream. Fails if the peer already sent bytes past the last frame,
    /// since they would be lost.
    pub fn into_inner(self) -> Result<R> {
        if !self.buf.is_empty() {
            return Err(WireError::protocol(format!(
                "{} unexpected bytes after frame",
                self.buf.len()
            )));
        }
        Ok(self.inner)
    }

    fn check_len(&self, len: i32, min: usize) -> Result<usize> {
        if len < min as i32 {
            return Err(WireError::protocol(format!("invalid frame length {}", len)));
        }
        let len = len as usize;
        if len > self.max_frame_len {
            return Err(WireError::FrameTooLarge {
                len,
                max: self.max_frame_len,
            });
        }
        Ok(len)
    }
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Buffer at least `want` bytes.
    ///
    /// Returns `Ok(false)` on clean EOF with nothing buffered.
    async fn fill(&mut self, want: usize) -> Result<bool> {
        while self.buf.len() < want {
            let n = self.inner.read_buf(&mut self.buf).await?;
            if n == 0 {
                if self.buf.is_empty() {
                    return Ok(false);
                }
                return Err(WireError::UnexpectedEof);
            }
        }
        Ok(true)
    }

    /// Read one untagged startup-phase frame.
    pub async fn read_startup(&mut self) -> Result<Option<StartupFrame>> {
        if !self.fill(4).await? {
            return Ok(None);
        }
        let len = i32::from_be_bytes([self.buf[0], self.buf[1], self.buf[2], self.buf[3]]);
        let len = self.check_len(len, 8)?;
        self.fill(len).await?;
        self.buf.advance(4);
        let body = self.buf.split_to(len - 4).freeze();
        StartupFrame::decode(body).map(Some)
    }

    /// Read one tagged frame.
    ///
    /// Returns `Ok(None)` when the peer closed the stream between frames.
    pub async fn read_message(&mut self) -> Result<Option<FrontendMessage>> {
        if !self.fill(5).await? {
            return Ok(None);
        }
        let tag = self.buf[0];
        let len = i32::from_be_bytes([self.buf[1], self.buf[2], self.buf[3], self.buf[4]]);
        let len = self.check_len(len, 4)?;
        self.fill(1 + len).await?;
        self.buf.advance(5);
        let body = self.buf.split_to(len - 4).freeze();
        FrontendMessage::decode(tag, body).map(Some)
    }
}

/// Batches backend frames and writes them on [`flush`](FrameWriter::flush).
#[derive(Debug)]
pub struct FrameWriter<W> {
    inner: W,
    buf: BytesMut,
}

impl<W> FrameWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(4 * 1024),
        }
    }

    pub fn queue(&mut self, msg: &BackendMessage) {
        msg.encode(&mut self.buf);
    }

    pub fn queue_all<'a>(&mut self, msgs: impl IntoIterator<Item = &'a BackendMessage>) {
        for msg in msgs {
            msg.encode(&mut self.buf);
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    pub async fn flush(&mut self) -> Result<()> {
        if !self.buf.is_empty() {
            self.inner.write_all(&self.buf).await?;
            self.buf.clear();
        }
        self.inner.flush().await?;
        Ok(())
    }

    pub async fn send(&mut self, msg: &BackendMessage) -> Result<()> {
        self.queue(msg);
        self.flush().await
    }
}

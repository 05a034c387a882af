//! Inbound byte stream.
//!
//! Bytes from host `stdin` messages are appended in arrival order and
//! consumed by reads that suspend while the buffer is empty. Byte order
//! is preserved exactly as enqueued, independent of consumer chunk size.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use futures::io::AsyncRead;

#[derive(Default)]
struct Inner {
    buf: VecDeque<u8>,
    // One pending consumer at a time: the hosted process's stdin reader
    waker: Option<Waker>,
}

/// FIFO byte buffer feeding the hosted process's standard input.
///
/// Clones are handles onto the same buffer; the transport keeps one to
/// feed and hands one to the consumer. Single-threaded by construction.
#[derive(Clone, Default)]
pub struct ByteStream {
    inner: Rc<RefCell<Inner>>,
}

impl ByteStream {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes in arrival order and wake a suspended reader.
    pub fn push(&self, bytes: &[u8]) {
        let mut inner = self.inner.borrow_mut();
        inner.buf.extend(bytes);
        if let Some(waker) = inner.waker.take() {
            waker.wake();
        }
    }

    /// Number of buffered bytes not yet consumed.
    pub fn len(&self) -> usize {
        self.inner.borrow().buf.len()
    }

    /// Whether the buffer is currently empty.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().buf.is_empty()
    }

    /// Read into `buf`, suspending until at least one byte is buffered.
    ///
    /// Returns the number of bytes read (at most `buf.len()`); a
    /// zero-length `buf` completes immediately with 0.
    pub async fn read(&self, buf: &mut [u8]) -> usize {
        futures::future::poll_fn(|cx| self.poll_read_bytes(cx, buf)).await
    }

    fn poll_read_bytes(&self, cx: &mut Context<'_>, buf: &mut [u8]) -> Poll<usize> {
        if buf.is_empty() {
            return Poll::Ready(0);
        }

        let mut inner = self.inner.borrow_mut();
        if inner.buf.is_empty() {
            inner.waker = Some(cx.waker().clone());
            return Poll::Pending;
        }

        let count = buf.len().min(inner.buf.len());
        for (slot, byte) in buf.iter_mut().zip(inner.buf.drain(..count)) {
            *slot = byte;
        }
        Poll::Ready(count)
    }
}

impl AsyncRead for ByteStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        self.poll_read_bytes(cx, buf).map(Ok)
    }
}

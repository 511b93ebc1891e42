//! Relay of an upstream completion stream to the HTTP response body.
//!
//! Chunks pass through unmodified and in order. The relay ends early when
//! the server-wide shutdown token fires; dropping it (client went away)
//! drops the upstream stream and with it the upstream connection.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_util::Stream;
use privai_core::CompletionStream;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};
use tracing::{Span, debug, info, warn};

pub struct RelayStream {
    upstream: CompletionStream,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
    span: Span,
    chunks: usize,
    bytes: usize,
    finished: bool,
}

impl RelayStream {
    pub fn new(upstream: CompletionStream, cancel: CancellationToken, span: Span) -> Self {
        Self {
            upstream,
            cancelled: Box::pin(cancel.cancelled_owned()),
            span,
            chunks: 0,
            bytes: 0,
            finished: false,
        }
    }
}

impl Stream for RelayStream {
    type Item = Result<Bytes, io::Error>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }
        let _enter = this.span.enter();

        if this.cancelled.as_mut().poll(cx).is_ready() {
            this.finished = true;
            info!(chunks = this.chunks, "Shutting down; aborting upstream completion");
            return Poll::Ready(None);
        }

        match this.upstream.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.chunks += 1;
                this.bytes += chunk.len();
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(Some(Err(e))) => {
                this.finished = true;
                warn!(
                    error = %e,
                    chunks = this.chunks,
                    "Upstream failed mid-stream; truncating response"
                );
                Poll::Ready(Some(Err(io::Error::other(e))))
            }
            Poll::Ready(None) => {
                this.finished = true;
                debug!(chunks = this.chunks, bytes = this.bytes, "Completion relayed");
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for RelayStream {
    fn drop(&mut self) {
        if !self.finished {
            let _enter = self.span.enter();
            info!(chunks = self.chunks, "Client disconnected; aborting upstream completion");
        }
    }
}

//! Newline-delimited JSON decoding over byte streams

use crate::error::{Error, Result};
use bytes::{Bytes, BytesMut};
use futures::{ready, Stream};
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

pin_project! {
    /// Stream of records decoded from an NDJSON byte stream
    ///
    /// Chunks may split lines anywhere. Blank lines are skipped and a final
    /// line without a trailing newline is still decoded. The first error,
    /// upstream or decoding, is yielded and ends the stream.
    #[must_use = "streams do nothing unless polled"]
    pub struct NdjsonStream<S, T> {
        #[pin]
        inner: S,
        buffer: BytesMut,
        line: usize,
        upstream_done: bool,
        failed: bool,
        _record: PhantomData<fn() -> T>,
    }
}

impl<S, T> NdjsonStream<S, T>
where
    S: Stream<Item = Result<Bytes>>,
    T: DeserializeOwned,
{
    /// Decode records of type `T` from `inner`
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            buffer: BytesMut::new(),
            line: 0,
            upstream_done: false,
            failed: false,
            _record: PhantomData,
        }
    }
}

impl<S, T> Stream for NdjsonStream<S, T>
where
    S: Stream<Item = Result<Bytes>>,
    T: DeserializeOwned,
{
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.failed {
                return Poll::Ready(None);
            }

            if let Some(pos) = this.buffer.iter().position(|b| *b == b'\n') {
                let line = this.buffer.split_to(pos + 1);
                *this.line += 1;
                if let Some(record) = decode_line(&line[..pos], *this.line) {
                    *this.failed = record.is_err();
                    return Poll::Ready(Some(record));
                }
                continue;
            }

            if *this.upstream_done {
                if this.buffer.is_empty() {
                    return Poll::Ready(None);
                }
                let rest = this.buffer.split();
                *this.line += 1;
                let record = decode_line(&rest, *this.line);
                if let Some(Err(_)) = &record {
                    *this.failed = true;
                }
                return Poll::Ready(record);
            }

            match ready!(this.inner.as_mut().poll_next(cx)) {
                Some(Ok(chunk)) => this.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    *this.failed = true;
                    return Poll::Ready(Some(Err(e)));
                }
                None => *this.upstream_done = true,
            }
        }
    }
}

/// Decode one line; `None` for blank lines
fn decode_line<T: DeserializeOwned>(line: &[u8], number: usize) -> Option<Result<T>> {
    let text = match std::str::from_utf8(line) {
        Ok(text) => text.trim(),
        Err(e) => {
            return Some(Err(Error::decode(format!(
                "Invalid UTF-8 in NDJSON at line {number}: {e}"
            ))))
        }
    };

    if text.is_empty() {
        return None;
    }

    Some(
        serde_json::from_str(text)
            .map_err(|e| Error::decode(format!("Failed to parse NDJSON at line {number}: {e}"))),
    )
}

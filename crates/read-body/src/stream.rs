//! Async front-end over the same accumulation core.
//!
//! Callback-driven event loops use [`crate::stage::ReadBodyStage`]; hosts
//! that already expose the body as a [`futures::Stream`] of decoded chunks
//! can instead await [`collect`], which applies the identical initial
//! capacity estimate and growth policy.

use std::io;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::debug;

use crate::buffer::{initial_capacity, BodyBuffer};
use crate::protocol::{AccumulateError, PayloadItem, PayloadSize};

/// Accumulates a streaming body into one contiguous buffer.
///
/// The stream is polled to its EOF marker; a stream that ends without one
/// is reported as a transport error, after the fashion of a connection
/// closed mid-body.
///
/// # Errors
/// `ResourceExhausted` if buffer allocation fails, `Transport` if the
/// stream yields an error or ends prematurely.
pub async fn collect<S>(
    mut stream: S,
    payload_size: PayloadSize,
    max_body_size: usize,
) -> Result<Bytes, AccumulateError>
where
    S: Stream<Item = Result<PayloadItem, io::Error>> + Unpin,
{
    let mut buffer = BodyBuffer::with_capacity(initial_capacity(payload_size, max_body_size))?;

    loop {
        match stream.next().await {
            Some(Ok(PayloadItem::Chunk(bytes))) => buffer.append(&bytes)?,
            Some(Ok(PayloadItem::Eof)) => {
                debug!(total = buffer.len(), "request body fully accumulated");
                return Ok(buffer.into_bytes());
            }
            Some(Err(e)) => return Err(AccumulateError::transport(e)),
            None => {
                return Err(AccumulateError::transport(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "body stream ended before eof",
                )))
            }
        }
    }
}

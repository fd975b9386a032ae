//! The read/drain loop that moves a request body into one buffer.
//!
//! [`BodyTransfer`] is a resumable state machine. It is entered once
//! synchronously by the pipeline stage, and again from the transport's
//! readiness callback every time the socket becomes readable. Both entry
//! points converge on [`BodyTransfer::drive`], and a finished transfer
//! stays finished no matter how many notifications arrive afterwards.

use http::StatusCode;
use tracing::{debug, error, trace};

use crate::buffer::{BodyBuffer, ChunkQueue};
use crate::protocol::AccumulateError;

use super::{BodyReader, ReadSignal, RequestHost};

/// States of one request's body transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferState {
    /// Waiting for the transport to produce more bytes.
    Reading,
    /// Copying already-read chunks into the destination buffer.
    Draining,
    /// The transfer finished one way or another.
    Done(Completion),
}

/// How a finished transfer ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Body fully accumulated; the pipeline was re-entered.
    Success,
    /// Allocation or transport failure; the request was finalized with an
    /// internal server error.
    Failed,
    /// The framing layer answered early; the request was finalized with
    /// the carried status.
    EarlyResponse(StatusCode),
}

/// Per-request body accumulation state.
///
/// Owned by the host request for its whole lifetime and dropped with it.
#[derive(Debug)]
pub struct BodyTransfer {
    buffer: BodyBuffer,
    chunks: ChunkQueue,
    state: TransferState,
    done: bool,
}

impl BodyTransfer {
    /// Creates the per-request state with `capacity` bytes of destination
    /// buffer preallocated.
    ///
    /// # Errors
    /// `ResourceExhausted` if the initial allocation cannot be satisfied.
    pub fn with_capacity(capacity: usize) -> Result<Self, AccumulateError> {
        Ok(Self {
            buffer: BodyBuffer::with_capacity(capacity)?,
            chunks: ChunkQueue::new(),
            state: TransferState::Reading,
            done: false,
        })
    }

    /// True once the transfer reached a terminal state.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done
    }

    #[inline]
    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Bytes accumulated so far. Empty again after the terminal state
    /// attached the body to the request.
    pub fn accumulated(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Runs the read/drain loop until the body is complete, a terminal
    /// condition fires, or no forward progress can be made without another
    /// readiness notification.
    ///
    /// Whatever the read attempt signals, the chunks it produced are
    /// drained first: bytes already read are never discarded. The loop
    /// keeps reading only while the drain moved at least one byte, so it
    /// never spins on an idle transport.
    pub fn drive<R, H>(&mut self, reader: &mut R, host: &mut H)
    where
        R: BodyReader,
        H: RequestHost,
    {
        if self.done {
            // duplicate readiness notification
            return;
        }

        loop {
            self.state = TransferState::Reading;
            let outcome = reader.read_more();

            self.state = TransferState::Draining;
            self.chunks.extend(outcome.chunks);
            let moved = match self.chunks.drain_into(&mut self.buffer) {
                Ok(moved) => moved,
                Err(e) => {
                    error!(cause = %e, "draining request body chunks failed");
                    self.complete(Completion::Failed, host);
                    return;
                }
            };

            trace!(bytes = moved, "drained request body chunks");

            match outcome.signal {
                ReadSignal::Complete => {
                    debug!(total = self.buffer.len(), "request body fully accumulated");
                    self.complete(Completion::Success, host);
                    return;
                }
                ReadSignal::Failed(e) => {
                    error!(cause = %e, "reading request body failed");
                    self.complete(Completion::Failed, host);
                    return;
                }
                ReadSignal::EarlyResponse(status) => {
                    debug!(status = %status, "early response while reading request body");
                    self.complete(Completion::EarlyResponse(status), host);
                    return;
                }
                ReadSignal::More => {
                    if moved == 0 {
                        // no progress; wait for the next readiness notification
                        self.state = TransferState::Reading;
                        return;
                    }
                }
            }
        }
    }

    fn complete<H>(&mut self, completion: Completion, host: &mut H)
    where
        H: RequestHost,
    {
        self.done = true;
        self.state = TransferState::Done(completion);

        host.block_reading();
        host.attach_body(self.buffer.take_bytes());
        host.clear_pending();

        match completion {
            Completion::Success => host.resume_pipeline(),
            Completion::Failed => host.finalize(StatusCode::INTERNAL_SERVER_ERROR),
            Completion::EarlyResponse(status) => host.finalize(status),
        }
    }

    #[cfg(test)]
    pub(crate) fn buffer_mut(&mut self) -> &mut BodyBuffer {
        &mut self.buffer
    }
}

//! Collaborator seams of the body transfer.
//!
//! The crate is sans-io: the transport that owns the socket and the request
//! machinery that owns the pipeline are both expressed as traits. The
//! transfer state machine in [`super::BodyTransfer`] only ever talks to
//! these two interfaces.

use std::io;

use bytes::Bytes;
use http::StatusCode;

use crate::protocol::PayloadSize;

/// Outcome of switching the transport to incremental body delivery.
#[derive(Debug)]
pub enum BeginOutcome {
    /// The transport started (or had already started) reading the body;
    /// chunks will surface through [`BodyReader::read_more`].
    Started,
    /// The transport failed before reading could start.
    Failed(io::Error),
    /// The framing layer already decided the response status, for example a
    /// payload-too-large rejection.
    EarlyResponse(StatusCode),
}

/// What one non-blocking read attempt signalled.
#[derive(Debug)]
pub enum ReadSignal {
    /// More data is expected; wait for the next readiness notification if
    /// nothing new arrived.
    More,
    /// The body has been fully delivered.
    Complete,
    /// The transport failed.
    Failed(io::Error),
    /// The framing layer decided the response status before the body was
    /// fully read.
    EarlyResponse(StatusCode),
}

/// Result of one non-blocking read attempt.
#[derive(Debug)]
pub struct ReadOutcome {
    /// Chunks read by this attempt, in arrival order. Also populated on
    /// terminal signals: bytes already read are never dropped.
    pub chunks: Vec<Bytes>,
    pub signal: ReadSignal,
}

impl ReadOutcome {
    pub fn more(chunks: Vec<Bytes>) -> Self {
        Self { chunks, signal: ReadSignal::More }
    }

    pub fn complete(chunks: Vec<Bytes>) -> Self {
        Self { chunks, signal: ReadSignal::Complete }
    }

    pub fn failed<E: Into<io::Error>>(e: E) -> Self {
        Self { chunks: Vec::new(), signal: ReadSignal::Failed(e.into()) }
    }

    pub fn early_response(status: StatusCode) -> Self {
        Self { chunks: Vec::new(), signal: ReadSignal::EarlyResponse(status) }
    }

    /// Attaches chunks that were read before the signal was raised.
    pub fn with_chunks(mut self, chunks: Vec<Bytes>) -> Self {
        self.chunks = chunks;
        self
    }
}

/// Non-blocking body reader owned by the transport.
#[cfg_attr(test, mockall::automock)]
pub trait BodyReader {
    /// Switches the transport to incremental delivery and starts reading
    /// the body. Calling this on a transport that already delivers
    /// incrementally reports `Started` again.
    fn begin(&mut self) -> BeginOutcome;

    /// Attempts to read more body bytes without blocking.
    fn read_more(&mut self) -> ReadOutcome;
}

/// Request-side collaborator: configuration lookups, pipeline suspension
/// and the terminal actions of a body transfer.
///
/// The pending-completion marker (`register_pending` / `clear_pending`)
/// tracks that the pipeline has been suspended on behalf of this request
/// and that something else will complete it. Every registration is cleared
/// exactly once, on whichever terminal path runs.
#[cfg_attr(test, mockall::automock)]
pub trait RequestHost {
    /// Declared size information of the inbound body.
    fn payload_size(&self) -> PayloadSize;

    /// Per-route maximum body size in bytes; 0 means unset.
    fn max_body_size(&self) -> usize;

    /// Marks the body transfer mode as unbuffered, so bytes arrive
    /// incrementally instead of being fully pre-buffered by the transport.
    fn set_unbuffered(&mut self);

    /// Registers the pending-completion marker.
    fn register_pending(&mut self);

    /// Clears the pending-completion marker.
    fn clear_pending(&mut self);

    /// Ignores further readiness notifications for this request.
    fn block_reading(&mut self);

    /// Attaches the accumulated body to the request, also when empty.
    fn attach_body(&mut self, body: Bytes);

    /// Resumes pipeline-stage evaluation from the beginning.
    fn resume_pipeline(&mut self);

    /// Terminates the request with `status`.
    fn finalize(&mut self, status: StatusCode);
}

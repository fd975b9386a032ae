//! A request-body accumulation stage for event-driven HTTP servers
//!
//! This crate consumes an inbound request body that arrives in arbitrarily
//! small non-blocking chunks (with an unknown total size when the transfer
//! is chunked) and assembles it into one contiguous in-memory buffer before
//! the request continues through the processing pipeline.
//!
//! # Features
//!
//! - Doubling buffer growth with a minimum-sufficient floor, bounding
//!   reallocations to O(log n) and copy work to O(n)
//! - Fallible allocation: out-of-memory is a per-request failure, not a
//!   process abort
//! - A resumable read/drain state machine entered both synchronously and
//!   from transport readiness callbacks, finishing each request exactly once
//! - Per-route enablement with scope inheritance
//! - Sans-io core: transport and pipeline are traits, nothing blocks
//! - An async front-end for hosts that consume bodies as streams
//!
//! # Example
//!
//! ```no_run
//! use bytes::Bytes;
//! use futures::stream;
//! use read_body::protocol::{PayloadItem, PayloadSize};
//! use read_body::stream::collect;
//! use tracing::{info, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     let chunks: Vec<Result<PayloadItem, std::io::Error>> = vec![
//!         Ok(PayloadItem::Chunk(Bytes::from_static(b"hello "))),
//!         Ok(PayloadItem::Chunk(Bytes::from_static(b"world"))),
//!         Ok(PayloadItem::Eof),
//!     ];
//!
//!     let body = collect(stream::iter(chunks), PayloadSize::Length(11), 0)
//!         .await
//!         .expect("body should accumulate");
//!
//!     info!(len = body.len(), "accumulated request body");
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`buffer`]: the growable destination buffer and the queue of
//!   already-read chunks drained into it
//! - [`transfer`]: the collaborator traits and the resumable read/drain
//!   state machine
//! - [`stage`]: the pipeline stage gating and starting the transfer
//! - [`config`]: the per-route enable flag with scope inheritance
//! - [`protocol`]: shared vocabulary types and the error taxonomy
//! - [`stream`]: the async front-end over the same core
//!
//! # Core Components
//!
//! ## Pipeline integration
//!
//! [`stage::ReadBodyStage`] is an ordinary function pair, registered with
//! whatever stage mechanism the host pipeline offers:
//! [`stage::ReadBodyStage::on_request`] for the pipeline and
//! [`stage::ReadBodyStage::on_readable`] for the transport's readiness
//! callback. The host owns the per-request [`transfer::BodyTransfer`] slot
//! and implements the two collaborator traits:
//!
//! - [`transfer::BodyReader`]: non-blocking reads against the transport
//! - [`transfer::RequestHost`]: pipeline suspension, body attachment,
//!   resumption and finalization
//!
//! ## Accumulation
//!
//! [`buffer::BodyBuffer`] keeps one contiguous region sized by
//! [`buffer::initial_capacity`] from the declared body length or the
//! per-route ceiling. Chunks queue up in [`buffer::ChunkQueue`] and are
//! drained exactly once, in arrival order; when a chunk does not fit, a
//! region of `max(2 × capacity, written + incoming)` bytes replaces the
//! old one.
//!
//! ## Error Handling
//!
//! All terminal failures are [`protocol::AccumulateError`] values. They
//! finalize the request with an internal server error; early responses
//! decided by the framing layer are not errors and carry their own status.
//!
//! # Concurrency model
//!
//! Everything runs on the event-loop thread that owns the request. The
//! only suspension point is the read/drain loop returning while waiting
//! for transport readiness; nothing blocks and nothing is shared across
//! requests. Request teardown is observed as a transport error.

pub mod buffer;
pub mod config;
pub mod protocol;
pub mod stage;
pub mod stream;
pub mod transfer;

#[cfg(test)]
pub(crate) mod testing;

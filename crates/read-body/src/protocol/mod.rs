//! Protocol-facing types shared across the crate.
//!
//! This module holds the vocabulary the accumulation stage exchanges with
//! its collaborators:
//!
//! - [`PayloadSize`]: declared size information of an inbound body, the
//!   input of the initial capacity estimate
//! - [`PayloadItem`]: one item of a streaming body (chunk or EOF), used by
//!   the async front-end in [`crate::stream`]
//! - [`AccumulatedBody`]: the finished body exposed through
//!   `http_body::Body` for downstream handlers
//! - [`AccumulateError`]: the terminal error taxonomy

mod message;
pub use message::PayloadItem;
pub use message::PayloadSize;

mod error;
pub use error::AccumulateError;

mod body;
pub use body::AccumulatedBody;

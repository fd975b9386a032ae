//! Buffer management for request body accumulation.
//!
//! Two pieces cooperate here: [`ChunkQueue`] holds the transient chunks the
//! transport has already read, and [`BodyBuffer`] is the single contiguous
//! destination they are drained into. [`initial_capacity`] sizes the
//! destination before the first chunk arrives.

mod body_buffer;
pub use body_buffer::initial_capacity;
pub use body_buffer::BodyBuffer;
pub use body_buffer::DEFAULT_CAPACITY;

mod chunk;
pub use chunk::ChunkQueue;

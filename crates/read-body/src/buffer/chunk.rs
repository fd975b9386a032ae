use std::collections::VecDeque;

use bytes::{Buf, Bytes};

use crate::protocol::AccumulateError;

use super::BodyBuffer;

/// Ordered queue of chunks already read from the transport but not yet
/// copied into the destination buffer.
///
/// Chunks are consumed front to back: a drained chunk has its read cursor
/// advanced to its end before it is removed, so no byte is ever copied
/// twice and none is dropped. Draining an already-drained queue moves zero
/// bytes and is not an error.
#[derive(Debug, Default)]
pub struct ChunkQueue {
    chunks: VecDeque<Bytes>,
}

impl ChunkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one chunk to the back of the queue.
    pub fn push(&mut self, chunk: Bytes) {
        self.chunks.push_back(chunk);
    }

    /// Appends chunks to the back of the queue, preserving order.
    pub fn extend<I>(&mut self, chunks: I)
    where
        I: IntoIterator<Item = Bytes>,
    {
        self.chunks.extend(chunks);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Copies every queued chunk's unread bytes into `buffer` in order and
    /// returns the total number of bytes moved.
    ///
    /// # Errors
    /// Propagates append failure from the buffer; the failing chunk stays
    /// queued with its cursor untouched, chunks drained before it are gone.
    pub fn drain_into(&mut self, buffer: &mut BodyBuffer) -> Result<usize, AccumulateError> {
        let mut moved = 0;

        while let Some(chunk) = self.chunks.front_mut() {
            let unread = chunk.remaining();
            if unread > 0 {
                buffer.append(chunk.chunk())?;
                chunk.advance(unread);
                moved += unread;
            }
            self.chunks.pop_front();
        }

        Ok(moved)
    }
}

//! The growable destination buffer for request body accumulation.
//!
//! A body arrives as a sequence of small chunks whose total size may be
//! unknown in advance. [`BodyBuffer`] keeps one contiguous region and grows
//! it with a doubling-with-minimum-sufficient policy, so the number of
//! reallocations is logarithmic in the final size and total copy work stays
//! linear. Allocation is fallible: running out of memory is reported as
//! [`AccumulateError::ResourceExhausted`] instead of aborting the process.

use std::cmp;
use std::mem;

use bytes::Bytes;

use crate::protocol::{AccumulateError, PayloadSize};

/// Initial capacity when the total body size is unknown and no per-route
/// ceiling is configured: 1 MiB.
pub const DEFAULT_CAPACITY: usize = 1024 * 1024;

/// Computes the initial buffer capacity for a request body.
///
/// - A declared length is used exactly, including zero.
/// - For chunked transfers the configured maximum body size is used when
///   set; `max_body_size == 0` means unset and falls back to
///   [`DEFAULT_CAPACITY`].
pub fn initial_capacity(payload_size: PayloadSize, max_body_size: usize) -> usize {
    match payload_size {
        PayloadSize::Length(length) => match length {
            n if n > usize::MAX as u64 => usize::MAX,
            n => n as usize,
        },
        PayloadSize::Empty => 0,
        PayloadSize::Chunked => {
            if max_body_size != 0 {
                max_body_size
            } else {
                DEFAULT_CAPACITY
            }
        }
    }
}

/// One contiguous destination region with append-with-growth semantics.
///
/// The region tracks written bytes (`len`) and allocated bytes
/// (`capacity`), with `len <= capacity` always. Growth allocates a fresh
/// region sized `max(2 × capacity, len + incoming)`, copies the written
/// prefix over and abandons the old region.
#[derive(Debug, Default)]
pub struct BodyBuffer {
    region: Vec<u8>,
    /// Test-only failure injection for the growth path.
    #[cfg(test)]
    grow_limit: Option<usize>,
}

impl BodyBuffer {
    /// Creates a buffer with `capacity` bytes preallocated.
    ///
    /// # Errors
    /// `ResourceExhausted` if the allocation cannot be satisfied.
    pub fn with_capacity(capacity: usize) -> Result<Self, AccumulateError> {
        let mut buffer = Self::default();
        buffer
            .region
            .try_reserve_exact(capacity)
            .map_err(|_e| AccumulateError::resource_exhausted(capacity))?;
        Ok(buffer)
    }

    /// Copies `src` to the end of the written bytes, growing the region
    /// when the remaining capacity does not suffice.
    ///
    /// # Errors
    /// `ResourceExhausted` if growth is needed and the new region cannot be
    /// allocated; the buffer contents are unchanged in that case.
    pub fn append(&mut self, src: &[u8]) -> Result<(), AccumulateError> {
        let available = self.region.capacity() - self.region.len();
        if src.len() > available {
            self.grow(src.len())?;
        }
        self.region.extend_from_slice(src);
        Ok(())
    }

    fn grow(&mut self, incoming: usize) -> Result<(), AccumulateError> {
        let required = self
            .region
            .len()
            .checked_add(incoming)
            .ok_or_else(|| AccumulateError::resource_exhausted(usize::MAX))?;
        let size = cmp::max(self.region.capacity().saturating_mul(2), required);

        #[cfg(test)]
        if self.grow_limit.is_some_and(|limit| size > limit) {
            return Err(AccumulateError::resource_exhausted(size));
        }

        let mut next: Vec<u8> = Vec::new();
        next.try_reserve_exact(size).map_err(|_e| AccumulateError::resource_exhausted(size))?;
        next.extend_from_slice(&self.region);
        self.region = next;
        Ok(())
    }

    /// Number of written bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.region.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
    }

    /// Number of allocated bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// The written bytes.
    pub fn as_slice(&self) -> &[u8] {
        self.region.as_slice()
    }

    /// Takes the written bytes out, leaving the buffer empty.
    pub fn take_bytes(&mut self) -> Bytes {
        Bytes::from(mem::take(&mut self.region))
    }

    /// Consumes the buffer and returns the written bytes.
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.region)
    }

    /// Refuse any growth beyond `limit` bytes, as if the allocator had run
    /// dry at that point.
    #[cfg(test)]
    pub(crate) fn limit_growth(&mut self, limit: usize) {
        self.grow_limit = Some(limit);
    }
}

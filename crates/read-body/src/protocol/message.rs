use bytes::Bytes;

/// Represents the size information of an inbound request body.
///
/// This enum is used to decide how much destination capacity to set aside
/// before the first chunk arrives:
/// - Known length: the exact number of bytes the peer declared
/// - Chunked: the total is unknown until the final chunk is seen
/// - Empty: no body at all
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PayloadSize {
    /// Body with known length in bytes
    Length(u64),
    /// Body using chunked transfer encoding
    Chunked,
    /// Empty body
    Empty,
}

impl PayloadSize {
    /// Returns true if the body uses chunked transfer encoding
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, PayloadSize::Chunked)
    }

    /// Returns true if the body is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, PayloadSize::Empty)
    }
}

/// Represents an item in a streaming body.
///
/// Produced by transports that deliver a body as a stream of decoded
/// chunks followed by an end-of-stream marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    /// A chunk of body data
    Chunk(Bytes),
    /// Marks the end of the body stream
    Eof,
}

impl PayloadItem {
    /// Returns true if this item represents the end of the body stream
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    /// Returns true if this item contains chunk data
    #[inline]
    pub fn is_chunk(&self) -> bool {
        matches!(self, PayloadItem::Chunk(_))
    }

    /// Returns a reference to the contained bytes if this is a Chunk
    ///
    /// Returns None if this is an EOF marker
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }

    /// Consumes the PayloadItem and returns the contained bytes if this is a Chunk
    ///
    /// Returns None if this is an EOF marker
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}

impl From<Bytes> for PayloadItem {
    fn from(bytes: Bytes) -> Self {
        Self::Chunk(bytes)
    }
}

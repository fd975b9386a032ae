use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};

/// A fully accumulated request body.
///
/// Once the transfer finishes, the host attaches the accumulated bytes to
/// the request and re-enters the pipeline. Wrapping them in this type lets
/// downstream handlers consume the result through the ordinary
/// [`http_body::Body`] interface: one data frame, then end of stream.
#[derive(Debug, Clone)]
pub struct AccumulatedBody {
    data: Option<Bytes>,
}

impl AccumulatedBody {
    pub fn new(data: Bytes) -> Self {
        Self { data: Some(data).filter(|data| !data.is_empty()) }
    }

    pub fn empty() -> Self {
        Self { data: None }
    }

    /// Remaining (not yet polled) bytes.
    pub fn remaining(&self) -> usize {
        self.data.as_ref().map_or(0, Bytes::len)
    }
}

impl From<Bytes> for AccumulatedBody {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl Body for AccumulatedBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Poll::Ready(self.get_mut().data.take().map(|data| Ok(Frame::data(data))))
    }

    fn is_end_stream(&self) -> bool {
        self.data.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.remaining() as u64)
    }
}

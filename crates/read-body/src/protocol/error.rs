use std::io;
use thiserror::Error;

/// Errors raised while accumulating a request body.
///
/// Every variant is terminal for its request: nothing here is retried.
/// Early responses (for example a payload-too-large rejection decided by the
/// framing layer) are not errors and travel as status codes instead.
#[derive(Debug, Error)]
pub enum AccumulateError {
    #[error("cannot allocate body buffer of {bytes} bytes")]
    ResourceExhausted { bytes: usize },

    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: io::Error,
    },

    #[error("request accumulation state is missing")]
    MissingContext,
}

impl AccumulateError {
    pub fn resource_exhausted(bytes: usize) -> Self {
        Self::ResourceExhausted { bytes }
    }

    pub fn transport<E: Into<io::Error>>(e: E) -> Self {
        Self::Transport { source: e.into() }
    }
}

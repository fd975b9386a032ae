//! Hand-rolled collaborator fakes shared by the unit tests.

use std::collections::VecDeque;

use bytes::Bytes;
use http::StatusCode;

use crate::protocol::PayloadSize;
use crate::transfer::{BeginOutcome, BodyReader, ReadOutcome, RequestHost};

/// A [`BodyReader`] that replays a scripted sequence of read outcomes.
///
/// Once the script runs dry, further reads report "more expected" with no
/// chunks, which makes the transfer suspend.
#[derive(Debug)]
pub(crate) struct ScriptedReader {
    begin: Option<BeginOutcome>,
    outcomes: VecDeque<ReadOutcome>,
    pub begins: usize,
    pub reads: usize,
}

impl ScriptedReader {
    pub fn new<I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = ReadOutcome>,
    {
        Self { begin: None, outcomes: outcomes.into_iter().collect(), begins: 0, reads: 0 }
    }

    /// Replaces the outcome of the next `begin` call.
    pub fn begin_with(mut self, begin: BeginOutcome) -> Self {
        self.begin = Some(begin);
        self
    }

    /// Appends one more outcome to the script.
    pub fn script(&mut self, outcome: ReadOutcome) {
        self.outcomes.push_back(outcome);
    }
}

impl BodyReader for ScriptedReader {
    fn begin(&mut self) -> BeginOutcome {
        self.begins += 1;
        self.begin.take().unwrap_or(BeginOutcome::Started)
    }

    fn read_more(&mut self) -> ReadOutcome {
        self.reads += 1;
        self.outcomes.pop_front().unwrap_or_else(|| ReadOutcome::more(Vec::new()))
    }
}

/// A [`RequestHost`] that records every interaction for later assertions.
#[derive(Debug)]
pub(crate) struct RecordingHost {
    payload_size: PayloadSize,
    max_body_size: usize,
    pub unbuffered: bool,
    /// Registrations minus clears; 0 means balanced.
    pub pending: i32,
    pub reads_blocked: bool,
    pub attached: Option<Bytes>,
    pub resumed: usize,
    pub finalized: Option<StatusCode>,
}

impl RecordingHost {
    pub fn new(payload_size: PayloadSize, max_body_size: usize) -> Self {
        Self {
            payload_size,
            max_body_size,
            unbuffered: false,
            pending: 0,
            reads_blocked: false,
            attached: None,
            resumed: 0,
            finalized: None,
        }
    }
}

impl RequestHost for RecordingHost {
    fn payload_size(&self) -> PayloadSize {
        self.payload_size
    }

    fn max_body_size(&self) -> usize {
        self.max_body_size
    }

    fn set_unbuffered(&mut self) {
        self.unbuffered = true;
    }

    fn register_pending(&mut self) {
        self.pending += 1;
    }

    fn clear_pending(&mut self) {
        self.pending -= 1;
    }

    fn block_reading(&mut self) {
        self.reads_blocked = true;
    }

    fn attach_body(&mut self, body: Bytes) {
        assert!(self.attached.is_none(), "body attached twice");
        self.attached = Some(body);
    }

    fn resume_pipeline(&mut self) {
        assert!(self.finalized.is_none(), "resumed a finalized request");
        self.resumed += 1;
    }

    fn finalize(&mut self, status: StatusCode) {
        assert!(self.finalized.is_none(), "request finalized twice");
        self.finalized = Some(status);
    }
}

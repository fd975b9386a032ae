//! The pipeline stage that gates and starts body accumulation.
//!
//! The stage runs once per request at a fixed point of the processing
//! pipeline, early enough that no handler has consumed the body yet. When
//! the per-route flag is off it declines and the pipeline proceeds
//! untouched. When on, it creates the per-request [`BodyTransfer`], asks
//! the transport to start delivering the body incrementally and suspends
//! the pipeline until the transfer re-enters it.

use http::StatusCode;
use tracing::{debug, error};

use crate::buffer::initial_capacity;
use crate::config::ReadBodyConfig;
use crate::protocol::AccumulateError;
use crate::transfer::{BeginOutcome, BodyReader, BodyTransfer, RequestHost};

/// What the pipeline caller should do after invoking the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// The stage does not participate; proceed with the pipeline.
    Declined,
    /// A body transfer is in flight; do not proceed, the transfer will
    /// re-enter the pipeline or finalize the request itself.
    Suspended,
    /// Terminate the request with this status.
    Respond(StatusCode),
}

/// The registered pipeline stage, carrying the route's resolved
/// configuration.
#[derive(Debug, Clone, Copy)]
pub struct ReadBodyStage {
    config: ReadBodyConfig,
}

impl ReadBodyStage {
    pub fn new(config: ReadBodyConfig) -> Self {
        Self { config }
    }

    /// The pipeline-stage entry point.
    ///
    /// `slot` is the host-owned home of the per-request state, `None`
    /// until this stage creates it. Invoking the stage again after the
    /// transfer completed declines, so the re-entered pipeline proceeds
    /// past this stage exactly once per request.
    pub fn on_request<R, H>(
        &self,
        slot: &mut Option<BodyTransfer>,
        reader: &mut R,
        host: &mut H,
    ) -> StageOutcome
    where
        R: BodyReader,
        H: RequestHost,
    {
        if !self.config.is_enabled() {
            debug!("request body accumulation not enabled for this route");
            return StageOutcome::Declined;
        }

        match slot.as_mut() {
            Some(transfer) if transfer.is_done() => {
                // body already attached; let the pipeline proceed
                return StageOutcome::Declined;
            }
            Some(_) => {}
            None => {
                let capacity = initial_capacity(host.payload_size(), host.max_body_size());
                match BodyTransfer::with_capacity(capacity) {
                    Ok(transfer) => *slot = Some(transfer),
                    Err(e) => {
                        error!(cause = %e, bytes = capacity, "allocating request body buffer failed");
                        return StageOutcome::Respond(StatusCode::INTERNAL_SERVER_ERROR);
                    }
                }
            }
        }

        host.set_unbuffered();
        host.register_pending();

        match reader.begin() {
            BeginOutcome::Started => {}
            BeginOutcome::Failed(e) => {
                host.clear_pending();
                error!(cause = %e, "starting request body read failed");
                return StageOutcome::Respond(StatusCode::INTERNAL_SERVER_ERROR);
            }
            BeginOutcome::EarlyResponse(status) => {
                host.clear_pending();
                debug!(status = %status, "early response while starting request body read");
                return StageOutcome::Respond(status);
            }
        }

        if let Some(transfer) = slot.as_mut() {
            // bytes may already be available; run the loop once before
            // waiting for readiness notifications
            transfer.drive(reader, host);
        }

        StageOutcome::Suspended
    }

    /// The transport readiness callback: resumes the read/drain loop.
    ///
    /// A missing per-request state here means the wiring dropped it while
    /// reads were still expected; the request is failed rather than left
    /// hanging.
    pub fn on_readable<R, H>(slot: &mut Option<BodyTransfer>, reader: &mut R, host: &mut H)
    where
        R: BodyReader,
        H: RequestHost,
    {
        match slot.as_mut() {
            Some(transfer) => transfer.drive(reader, host),
            None => {
                let cause = AccumulateError::MissingContext;
                error!(cause = %cause, "read callback fired without accumulation state");
                host.finalize(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use crate::protocol::PayloadSize;
    use crate::testing::{RecordingHost, ScriptedReader};
    use crate::transfer::{
        Completion, MockBodyReader, MockRequestHost, ReadOutcome, TransferState,
    };

    use super::*;

    fn enabled_stage() -> ReadBodyStage {
        ReadBodyStage::new(ReadBodyConfig::enabled(true))
    }

    #[test]
    fn test_disabled_route_declines_without_state() {
        let stage = ReadBodyStage::new(ReadBodyConfig::unset());
        let mut slot = None;
        // mocks with no expectations: any interaction would panic
        let mut reader = MockBodyReader::new();
        let mut host = MockRequestHost::new();

        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);

        assert_eq!(outcome, StageOutcome::Declined);
        assert!(slot.is_none());

        // still declined on a second pass
        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);
        assert_eq!(outcome, StageOutcome::Declined);
        assert!(slot.is_none());
    }

    #[test]
    fn test_body_available_synchronously() {
        let stage = enabled_stage();
        let mut slot = None;
        let mut reader =
            ScriptedReader::new([ReadOutcome::complete(vec![Bytes::from_static(b"all here")])]);
        let mut host = RecordingHost::new(PayloadSize::Length(8), 0);

        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);

        assert_eq!(outcome, StageOutcome::Suspended);
        assert!(host.unbuffered);
        assert_eq!(reader.begins, 1);
        assert_eq!(host.attached.as_deref(), Some(&b"all here"[..]));
        assert_eq!(host.resumed, 1);
        assert_eq!(host.pending, 0);

        // the re-entered pipeline reaches the stage again and must pass
        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);
        assert_eq!(outcome, StageOutcome::Declined);
    }

    #[test]
    fn test_body_arriving_across_readiness_events() {
        let stage = enabled_stage();
        let mut slot = None;
        let mut reader = ScriptedReader::new([ReadOutcome::more(Vec::new())]);
        let mut host = RecordingHost::new(PayloadSize::Length(9), 0);

        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);
        assert_eq!(outcome, StageOutcome::Suspended);
        assert_eq!(host.pending, 1);
        assert!(!slot.as_ref().unwrap().is_done());

        reader.script(ReadOutcome::more(vec![Bytes::from_static(b"body ")]));
        ReadBodyStage::on_readable(&mut slot, &mut reader, &mut host);
        assert!(!slot.as_ref().unwrap().is_done());
        assert_eq!(slot.as_ref().unwrap().accumulated(), b"body ");

        reader.script(ReadOutcome::complete(vec![Bytes::from_static(b"tail")]));
        ReadBodyStage::on_readable(&mut slot, &mut reader, &mut host);

        let transfer = slot.as_ref().unwrap();
        assert_eq!(transfer.state(), TransferState::Done(Completion::Success));
        assert_eq!(host.attached.as_deref(), Some(&b"body tail"[..]));
        assert_eq!(host.resumed, 1);
        assert_eq!(host.pending, 0);
    }

    #[test]
    fn test_early_response_on_first_read() {
        // the framing layer rejects the body outright; no bytes were read
        let stage = enabled_stage();
        let mut slot = None;
        let mut reader =
            ScriptedReader::new([ReadOutcome::early_response(StatusCode::PAYLOAD_TOO_LARGE)]);
        let mut host = RecordingHost::new(PayloadSize::Chunked, 0);

        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);

        assert_eq!(outcome, StageOutcome::Suspended);
        assert_eq!(host.finalized, Some(StatusCode::PAYLOAD_TOO_LARGE));
        assert_eq!(host.attached.as_deref(), Some(&b""[..]));
        assert!(host.reads_blocked);
        assert_eq!(host.pending, 0);
    }

    #[test]
    fn test_begin_failure_responds_with_500() {
        let stage = enabled_stage();
        let mut slot = None;
        let mut reader = ScriptedReader::new([])
            .begin_with(BeginOutcome::Failed(std::io::Error::other("broken pipe")));
        let mut host = RecordingHost::new(PayloadSize::Length(16), 0);

        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);

        assert_eq!(outcome, StageOutcome::Respond(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(reader.reads, 0);
        assert_eq!(host.pending, 0);
    }

    #[test]
    fn test_begin_early_response_propagates_status() {
        let stage = enabled_stage();
        let mut slot = None;
        let mut reader = ScriptedReader::new([])
            .begin_with(BeginOutcome::EarlyResponse(StatusCode::PAYLOAD_TOO_LARGE));
        let mut host = RecordingHost::new(PayloadSize::Chunked, 1024);

        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);

        assert_eq!(outcome, StageOutcome::Respond(StatusCode::PAYLOAD_TOO_LARGE));
        assert_eq!(host.pending, 0);
    }

    #[test]
    fn test_initial_allocation_failure_responds_with_500() {
        // chunked body with an absurd route ceiling: the initial
        // allocation itself is refused
        let stage = enabled_stage();
        let mut slot = None;
        let mut reader = MockBodyReader::new();
        let mut host = RecordingHost::new(PayloadSize::Chunked, usize::MAX);

        let outcome = stage.on_request(&mut slot, &mut reader, &mut host);

        assert_eq!(outcome, StageOutcome::Respond(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(slot.is_none());
    }

    #[test]
    fn test_missing_state_in_read_callback_finalizes() {
        let mut slot = None;
        let mut reader = MockBodyReader::new();
        let mut host = MockRequestHost::new();
        host.expect_finalize()
            .withf(|status| *status == StatusCode::INTERNAL_SERVER_ERROR)
            .times(1)
            .return_const(());

        ReadBodyStage::on_readable(&mut slot, &mut reader, &mut host);
    }
}

//! The resumable body transfer: collaborator seams and the read/drain
//! state machine.

mod transport;
pub use transport::BeginOutcome;
pub use transport::BodyReader;
pub use transport::ReadOutcome;
pub use transport::ReadSignal;
pub use transport::RequestHost;

#[cfg(test)]
pub(crate) use transport::{MockBodyReader, MockRequestHost};

mod drive;
pub use drive::BodyTransfer;
pub use drive::Completion;
pub use drive::TransferState;

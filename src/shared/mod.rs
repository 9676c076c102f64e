//! Shared state and messaging between the dashboard and the inference worker
//!
//! The dashboard owns the UI thread; OCR requests run on a worker thread and
//! report back over channels.

pub mod messages;
pub mod state;

pub use messages::{InferenceRequest, WorkerCommand, WorkerEvent};
pub use state::{RuntimeState, SamplesStatus};

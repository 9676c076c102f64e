//! Message types for communication between the dashboard and the worker

use image::RgbaImage;
use std::path::PathBuf;

use crate::assets::ProvisionReport;
use crate::languages::LanguageSet;
use crate::recognition::InferenceResult;

/// A recognition request from the UI
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    /// Monotonic id so stale results can be ignored
    pub id: u64,
    pub image: PathBuf,
    pub languages: LanguageSet,
}

/// Messages sent from the dashboard to the worker
#[derive(Debug, Clone)]
pub enum WorkerCommand {
    /// Download any missing sample images
    PrepareSamples,
    /// Run one recognition request
    Run(InferenceRequest),
    /// Stop the worker thread
    Shutdown,
}

/// Messages sent from the worker to the dashboard
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// Sample provisioning finished
    SamplesPrepared(Result<ProvisionReport, String>),
    /// A request finished successfully
    Completed {
        id: u64,
        result: InferenceResult,
        /// Annotated image, decoded for display
        preview: Option<RgbaImage>,
        elapsed_ms: u64,
    },
    /// A request failed; `message` is user-facing
    Failed { id: u64, message: String, elapsed_ms: u64 },
}

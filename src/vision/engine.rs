//! OCR engine boundary
//!
//! The demo never runs OCR itself. Any backend that can turn an image path
//! into ordered [`BoundingRegion`]s plugs in through these traits.

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::region::BoundingRegion;
use super::render::RenderError;
use crate::config::Accelerator;
use crate::languages::LanguageSet;

/// Engine failures
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start OCR engine: {0}")]
    Launch(String),
    #[error("OCR engine failed: {0}")]
    Failed(String),
    #[error("could not parse OCR engine output: {0}")]
    Protocol(String),
    #[error(transparent)]
    Region(#[from] RenderError),
}

/// How an engine instance should be configured
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineOptions {
    pub languages: LanguageSet,
    pub accelerator: Accelerator,
}

/// A configured OCR engine
pub trait OcrEngine: Send + Sync {
    /// Detect and recognize text, returning regions in detection order
    fn detect_and_recognize(&self, image_path: &Path) -> Result<Vec<BoundingRegion>, EngineError>;
}

/// Builds engines for a given language set.
///
/// Construction may be expensive (model load); callers that want reuse wrap
/// a factory in [`super::cache::CachingEngineFactory`].
pub trait EngineFactory: Send + Sync {
    fn create(&self, options: &EngineOptions) -> Result<Arc<dyn OcrEngine>, EngineError>;
}

//! Recognition Adapter
//!
//! Ties one request together: validate the languages, open the image, make
//! sure the samples exist, run the engine, draw the boxes, save the result to
//! the single output slot and flatten the detections into a table.

pub mod table;

pub use table::{ResultTable, COLUMNS};

use image::{DynamicImage, ImageFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

use crate::assets::{AssetError, AssetProvisioner};
use crate::config::{Accelerator, AppConfig};
use crate::languages::{LanguageError, LanguageSet};
use crate::vision::{draw_boxes, BoxStyle, EngineError, EngineFactory, EngineOptions, RenderError};

/// Everything that can go wrong with a recognition request.
///
/// The `Display` text is what the user sees.
#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("Cannot read image {path:?}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },
    #[error("Unsupported language code {0:?}")]
    UnsupportedLanguage(String),
    #[error("Select at least one language")]
    EmptyLanguageSet,
    #[error("Sample images are unavailable: {0}")]
    AssetUnavailable(#[from] AssetError),
    #[error("OCR engine failed: {0}")]
    EngineFailure(String),
    #[error("Cannot draw detected regions: {0}")]
    RenderFailure(#[from] RenderError),
    #[error("Cannot write result image {path:?}: {reason}")]
    OutputFailure { path: PathBuf, reason: String },
}

impl From<LanguageError> for RecognitionError {
    fn from(err: LanguageError) -> Self {
        match err {
            LanguageError::Unsupported(code) => RecognitionError::UnsupportedLanguage(code),
            LanguageError::Empty => RecognitionError::EmptyLanguageSet,
        }
    }
}

impl From<EngineError> for RecognitionError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Region(render) => RecognitionError::RenderFailure(render),
            other => RecognitionError::EngineFailure(other.to_string()),
        }
    }
}

/// Outcome of a successful request
#[derive(Debug, Clone, Serialize)]
pub struct InferenceResult {
    /// Annotated image (the shared output slot)
    pub image_path: PathBuf,
    /// Recognized text in detection order
    #[serde(flatten)]
    pub table: ResultTable,
}

/// Runs recognition requests against an engine factory
pub struct RecognitionAdapter {
    provisioner: Arc<AssetProvisioner>,
    factory: Arc<dyn EngineFactory>,
    style: BoxStyle,
    accelerator: Accelerator,
    output_path: PathBuf,
}

impl RecognitionAdapter {
    pub fn new(
        provisioner: Arc<AssetProvisioner>,
        factory: Arc<dyn EngineFactory>,
        style: BoxStyle,
        accelerator: Accelerator,
        output_path: PathBuf,
    ) -> Self {
        Self {
            provisioner,
            factory,
            style,
            accelerator,
            output_path,
        }
    }

    /// Build an adapter from the app config
    pub fn from_config(
        config: &AppConfig,
        provisioner: Arc<AssetProvisioner>,
        factory: Arc<dyn EngineFactory>,
    ) -> Result<Self, RenderError> {
        Ok(Self::new(
            provisioner,
            factory,
            BoxStyle::from_config(&config.render)?,
            config.engine.accelerator,
            config.output.path.clone(),
        ))
    }

    /// Path every request writes its annotated image to
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn provisioner(&self) -> &Arc<AssetProvisioner> {
        &self.provisioner
    }

    /// Run OCR on `image_path` with the given language codes.
    ///
    /// Languages are validated before any file, network, or engine access.
    pub fn inference<S: AsRef<str>>(
        &self,
        image_path: &Path,
        languages: &[S],
    ) -> Result<InferenceResult, RecognitionError> {
        let languages = LanguageSet::parse(languages)?;
        self.inference_with(image_path, &languages)
    }

    /// [`Self::inference`] with an already validated language set
    pub fn inference_with(
        &self,
        image_path: &Path,
        languages: &LanguageSet,
    ) -> Result<InferenceResult, RecognitionError> {
        let start = Instant::now();
        info!("Recognizing {:?} with [{}]", image_path, languages);

        let image = image::open(image_path)
            .map_err(|e| RecognitionError::InvalidInput {
                path: image_path.to_path_buf(),
                reason: e.to_string(),
            })?
            .to_rgba8();

        self.provisioner.ensure_samples()?;

        // A new engine per request unless the factory caches; model load dominates
        let engine = self.factory.create(&EngineOptions {
            languages: languages.clone(),
            accelerator: self.accelerator,
        })?;
        let regions = engine.detect_and_recognize(image_path)?;
        debug!("Engine returned {} regions", regions.len());

        let annotated = draw_boxes(image, regions.iter().map(|r| &r.quad), &self.style);
        self.save_output(DynamicImage::ImageRgba8(annotated))?;

        let table = ResultTable::from_regions(&regions);
        info!(
            "Recognized {} regions in {:?}, result at {:?}",
            table.len(),
            start.elapsed(),
            self.output_path
        );

        Ok(InferenceResult {
            image_path: self.output_path.clone(),
            table,
        })
    }

    /// Write to a unique sibling then rename over the slot, so concurrent
    /// requests never expose a half-written file. Last writer wins.
    fn save_output(&self, image: DynamicImage) -> Result<(), RecognitionError> {
        let output_error = |reason: String| RecognitionError::OutputFailure {
            path: self.output_path.clone(),
            reason,
        };

        let format = ImageFormat::from_path(&self.output_path).map_err(|e| output_error(e.to_string()))?;
        let image = match format {
            ImageFormat::Jpeg | ImageFormat::Bmp => DynamicImage::ImageRgb8(image.to_rgb8()),
            _ => image,
        };

        if let Some(parent) = self.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| output_error(e.to_string()))?;
        }

        let file_name = self
            .output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp_path = self
            .output_path
            .with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()));

        if let Err(e) = image.save_with_format(&temp_path, format) {
            std::fs::remove_file(&temp_path).ok();
            return Err(output_error(e.to_string()));
        }
        std::fs::rename(&temp_path, &self.output_path).map_err(|e| {
            std::fs::remove_file(&temp_path).ok();
            output_error(e.to_string())
        })
    }
}

//! Vision Layer
//!
//! Everything between an image on disk and the boxes drawn on it:
//! - the OCR engine boundary and its EasyOCR backend
//! - typed text regions
//! - bounding box rendering

pub mod cache;
pub mod easyocr;
pub mod engine;
pub mod region;
pub mod render;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub use cache::CachingEngineFactory;
pub use easyocr::EasyOcrFactory;
pub use engine::{EngineError, EngineFactory, EngineOptions, OcrEngine};
pub use region::{BoundingRegion, Quad};
pub use render::{draw_boxes, BoxStyle, RenderError};

use crate::config::EngineConfig;

/// Build the engine factory described by the config.
///
/// The bundled bridge script is installed into `data_dir` unless the config
/// points at a custom one.
pub fn engine_factory_from_config(
    config: &EngineConfig,
    data_dir: PathBuf,
) -> std::io::Result<Arc<dyn EngineFactory>> {
    let script = match &config.bridge_script {
        Some(script) => script.clone(),
        None => easyocr::install_bridge_script(&data_dir)?,
    };

    let factory = EasyOcrFactory::new(config.python.clone(), script);
    if config.cache_engines {
        info!("Engine caching enabled");
        Ok(Arc::new(CachingEngineFactory::new(factory)))
    } else {
        Ok(Arc::new(factory))
    }
}

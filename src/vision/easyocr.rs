//! EasyOCR backend
//!
//! Runs the bundled Python bridge script in a subprocess. The script loads
//! `easyocr.Reader` for the requested languages and prints its detections as
//! a JSON array on stdout.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::engine::{EngineError, EngineFactory, EngineOptions, OcrEngine};
use super::region::{BoundingRegion, Quad};

/// Source of the bridge script shipped with the binary
pub const BRIDGE_SCRIPT: &str = include_str!("../../scripts/easyocr_bridge.py");

const BRIDGE_FILENAME: &str = "easyocr_bridge.py";

/// Write the bundled bridge script into `dir`, refreshing a stale copy
pub fn install_bridge_script(dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(BRIDGE_FILENAME);

    let up_to_date = std::fs::read_to_string(&path)
        .map(|existing| existing == BRIDGE_SCRIPT)
        .unwrap_or(false);
    if !up_to_date {
        info!("Installing EasyOCR bridge script at {:?}", path);
        std::fs::write(&path, BRIDGE_SCRIPT)?;
    }

    Ok(path)
}

/// One detection as printed by the bridge
#[derive(Debug, Deserialize)]
struct RawDetection {
    #[serde(rename = "box")]
    polygon: Vec<[f32; 2]>,
    text: String,
    confidence: f32,
}

/// Parse the bridge's stdout into regions, keeping detection order
pub fn parse_detections(stdout: &str) -> Result<Vec<BoundingRegion>, EngineError> {
    let raw: Vec<RawDetection> =
        serde_json::from_str(stdout.trim()).map_err(|e| EngineError::Protocol(e.to_string()))?;

    raw.into_iter()
        .map(|d| -> Result<BoundingRegion, EngineError> {
            let quad = Quad::from_polygon(&d.polygon)?;
            Ok(BoundingRegion::new(quad, d.text, d.confidence))
        })
        .collect()
}

/// Creates [`EasyOcrEngine`]s that share one interpreter and script
#[derive(Debug, Clone)]
pub struct EasyOcrFactory {
    python: PathBuf,
    script: PathBuf,
}

impl EasyOcrFactory {
    pub fn new(python: PathBuf, script: PathBuf) -> Self {
        Self { python, script }
    }
}

impl EngineFactory for EasyOcrFactory {
    fn create(&self, options: &EngineOptions) -> Result<Arc<dyn OcrEngine>, EngineError> {
        if !self.script.exists() {
            return Err(EngineError::Launch(format!(
                "bridge script not found at {:?}",
                self.script
            )));
        }

        debug!(
            "Creating EasyOCR engine for [{}] (gpu: {})",
            options.languages,
            options.accelerator.as_flag()
        );

        Ok(Arc::new(EasyOcrEngine {
            python: self.python.clone(),
            script: self.script.clone(),
            options: options.clone(),
        }))
    }
}

/// EasyOCR configured for one language set.
///
/// Every call starts a fresh interpreter, so models are loaded per request.
pub struct EasyOcrEngine {
    python: PathBuf,
    script: PathBuf,
    options: EngineOptions,
}

impl OcrEngine for EasyOcrEngine {
    fn detect_and_recognize(&self, image_path: &Path) -> Result<Vec<BoundingRegion>, EngineError> {
        let start = Instant::now();

        let output = Command::new(&self.python)
            .arg(&self.script)
            .arg("--image")
            .arg(image_path)
            .arg("--lang")
            .arg(self.options.languages.joined())
            .arg("--gpu")
            .arg(self.options.accelerator.as_flag())
            .output()
            .map_err(|e| EngineError::Launch(format!("{:?}: {}", self.python, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            // Python tracebacks end with the useful line
            let message = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("no error output");
            return Err(EngineError::Failed(format!("{} ({})", message.trim(), output.status)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let regions = parse_detections(&stdout)?;

        info!(
            "EasyOCR found {} regions in {:?} ({:?})",
            regions.len(),
            image_path,
            start.elapsed()
        );
        Ok(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Accelerator;
    use crate::languages::LanguageSet;
    use crate::vision::region::Point;
    use crate::vision::render::RenderError;
    use tempfile::TempDir;

    fn options() -> EngineOptions {
        EngineOptions {
            languages: LanguageSet::parse(["en", "fr"]).unwrap(),
            accelerator: Accelerator::Off,
        }
    }

    #[test]
    fn test_parse_detections() {
        let stdout = r#"[
            {"box": [[1, 2], [30, 2], [30, 12], [1, 12]], "text": "Reduce", "confidence": 0.98},
            {"box": [[5.5, 20], [40, 20], [40, 31], [5.5, 31]], "text": "Reuse", "confidence": 0.5}
        ]"#;
        let regions = parse_detections(stdout).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].text, "Reduce");
        assert_eq!(regions[1].text, "Reuse");
        assert!((regions[0].confidence - 0.98).abs() < 1e-6);
        let points = regions[1].quad.points();
        assert_eq!(points[0], Point::new(5.5, 20.0));
        assert_eq!(points[2], Point::new(40.0, 31.0));
    }

    #[test]
    fn test_parse_empty_detections() {
        assert!(parse_detections("[]\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_region() {
        let stdout = r#"[{"box": [[1, 2], [3, 4], [5, 6]], "text": "x", "confidence": 0.9}]"#;
        let err = parse_detections(stdout).unwrap_err();
        assert!(matches!(err, EngineError::Region(RenderError::InvalidRegion(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_detections("Downloading detection model...").unwrap_err();
        assert!(matches!(err, EngineError::Protocol(_)));
    }

    #[test]
    fn test_install_bridge_script_refreshes_stale_copy() {
        let dir = TempDir::new().unwrap();
        let path = install_bridge_script(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), BRIDGE_SCRIPT);

        std::fs::write(&path, "print('old')").unwrap();
        install_bridge_script(dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), BRIDGE_SCRIPT);
    }

    #[test]
    fn test_factory_requires_script() {
        let factory = EasyOcrFactory::new(PathBuf::from("python3"), PathBuf::from("/nonexistent/bridge.py"));
        assert!(matches!(factory.create(&options()), Err(EngineError::Launch(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_engine_runs_bridge_process() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("bridge.sh");
        std::fs::write(
            &script,
            r#"
            [ "$4" = "en,fr" ] || { echo "bad languages: $4" >&2; exit 2; }
            [ "$6" = "off" ] || { echo "bad gpu flag: $6" >&2; exit 2; }
            echo '[{"box": [[0,0],[4,0],[4,4],[0,4]], "text": "ok", "confidence": 0.7}]'
            "#,
        )
        .unwrap();

        let factory = EasyOcrFactory::new(PathBuf::from("sh"), script);
        let engine = factory.create(&options()).unwrap();
        let regions = engine.detect_and_recognize(Path::new("image.png")).unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].text, "ok");
    }

    #[cfg(unix)]
    #[test]
    fn test_engine_reports_process_failure() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("bridge.sh");
        std::fs::write(&script, "echo 'Traceback' >&2\necho 'ValueError: th is only compatible with en' >&2\nexit 1\n").unwrap();

        let factory = EasyOcrFactory::new(PathBuf::from("sh"), script);
        let engine = factory.create(&options()).unwrap();
        let err = engine.detect_and_recognize(Path::new("image.png")).unwrap_err();

        match err {
            EngineError::Failed(message) => assert!(message.contains("ValueError")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

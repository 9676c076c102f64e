//! Application Configuration
//!
//! Demo settings stored in TOML format. Every section has defaults matching
//! the stock EasyOCR demo, so a missing or partial file is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::languages::{LanguageError, LanguageSet, DEFAULT_LANGUAGE};

/// Application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sample images and where to fetch them
    pub samples: SamplesConfig,
    /// OCR engine settings
    pub engine: EngineConfig,
    /// Bounding box appearance
    pub render: RenderConfig,
    /// Where the annotated image is written
    pub output: OutputConfig,
    /// Interface defaults
    pub interface: InterfaceConfig,
}

/// A sample image shown in the example gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSource {
    /// Local filename inside the samples directory
    pub filename: String,
    /// Remote URL fetched when the file is missing
    pub url: String,
    /// Languages preselected when the example is clicked
    pub languages: Vec<String>,
}

impl SampleSource {
    fn new(filename: &str, url: &str, languages: &[&str]) -> Self {
        Self {
            filename: filename.to_string(),
            url: url.to_string(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Sample asset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplesConfig {
    /// Directory the samples are downloaded into
    pub dir: PathBuf,
    /// Download timeout per file, in seconds
    pub download_timeout_secs: u64,
    /// Declared samples, in gallery order
    pub sources: Vec<SampleSource>,
}

impl Default for SamplesConfig {
    fn default() -> Self {
        const EXAMPLES: &str = "https://github.com/JaidedAI/EasyOCR/raw/master/examples";
        Self {
            dir: PathBuf::from("demo_samples"),
            download_timeout_secs: 60,
            sources: vec![
                SampleSource::new("english.png", &format!("{EXAMPLES}/english.png"), &["en"]),
                SampleSource::new("thai.jpg", &format!("{EXAMPLES}/thai.jpg"), &["th"]),
                SampleSource::new("french.jpg", &format!("{EXAMPLES}/french.jpg"), &["fr", "en"]),
                SampleSource::new(
                    "chinese.jpg",
                    &format!("{EXAMPLES}/chinese.jpg"),
                    &["ch_sim", "en"],
                ),
                SampleSource::new("japanese.jpg", &format!("{EXAMPLES}/japanese.jpg"), &["ja", "en"]),
                SampleSource::new("korean.png", &format!("{EXAMPLES}/korean.png"), &["ko", "en"]),
                SampleSource::new("Hindi.jpeg", "https://i.imgur.com/mwQFd7G.jpeg", &["hi", "en"]),
            ],
        }
    }
}

/// Hardware acceleration preference passed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accelerator {
    /// Use a GPU when the engine finds one
    #[default]
    Auto,
    /// Require GPU inference
    On,
    /// CPU only
    Off,
}

impl Accelerator {
    /// Value of the bridge's `--gpu` flag
    pub fn as_flag(&self) -> &'static str {
        match self {
            Accelerator::Auto => "auto",
            Accelerator::On => "on",
            Accelerator::Off => "off",
        }
    }
}

/// OCR engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Python interpreter with `easyocr` installed
    pub python: PathBuf,
    /// Custom bridge script; the bundled one is used when unset
    pub bridge_script: Option<PathBuf>,
    /// GPU preference
    pub accelerator: Accelerator,
    /// Reuse engines across requests with the same language set
    pub cache_engines: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python3"),
            bridge_script: None,
            accelerator: Accelerator::Auto,
            cache_engines: false,
        }
    }
}

/// Bounding box appearance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Named color or `#RRGGBB[AA]`
    pub color: String,
    /// Stroke width in pixels
    pub width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: "yellow".to_string(),
            width: 2,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Single-slot annotated image path, overwritten by every request
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("result.jpg"),
        }
    }
}

/// Interface defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    /// Languages checked when the dashboard opens
    pub default_languages: Vec<String>,
    /// Maximum height of the input/output image previews, in points
    pub preview_height: f32,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            default_languages: vec![DEFAULT_LANGUAGE.to_string()],
            preview_height: 640.0,
        }
    }
}

impl AppConfig {
    /// Check that every language mentioned in the config is supported
    pub fn validate(&self) -> Result<(), LanguageError> {
        LanguageSet::parse(&self.interface.default_languages)?;
        for source in &self.samples.sources {
            LanguageSet::parse(&source.languages)?;
        }
        Ok(())
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid language in config file {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

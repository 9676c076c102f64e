//! Interface description
//!
//! What the demo page shows, independent of how it is drawn: page text,
//! input and output fields, and the example gallery.

use std::path::PathBuf;

use crate::assets::AssetProvisioner;
use crate::config::AppConfig;
use crate::languages::{LanguageCode, LanguageError, LanguageSet};
use crate::recognition::COLUMNS;

pub const TITLE: &str = "EasyOCR";

pub const DESCRIPTION: &str = "Demo for EasyOCR. Upload your image and choose a language from the \
list, or click one of the examples to load them.";

pub const ARTICLE: &str = "Ready-to-use OCR with 80+ supported languages and all popular writing \
scripts including Latin, Chinese, Arabic, Devanagari, Cyrillic, etc.";

/// Footer links as (label, url)
pub const ARTICLE_LINKS: &[(&str, &str)] = &[
    ("EasyOCR", "https://www.jaided.ai/easyocr/"),
    ("Github Repo", "https://github.com/JaidedAI/EasyOCR"),
];

/// An input widget; `name` scopes its widget ids
#[derive(Debug, Clone, PartialEq)]
pub enum InputField {
    /// Image chosen by file path
    Image { name: &'static str, label: &'static str },
    /// Multi-select over a fixed list of choices
    Languages {
        name: &'static str,
        label: &'static str,
        choices: Vec<LanguageCode>,
        default: LanguageSet,
    },
}

/// An output widget
#[derive(Debug, Clone, PartialEq)]
pub enum OutputField {
    /// Annotated image loaded from a file path
    Image { name: &'static str, label: &'static str },
    /// Table with fixed headers
    Table {
        name: &'static str,
        headers: [&'static str; 2],
    },
}

/// A clickable example: image plus the languages to preselect
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub name: String,
    pub image: PathBuf,
    pub languages: LanguageSet,
}

/// Full description of the demo page
#[derive(Debug, Clone)]
pub struct InterfaceSpec {
    pub title: &'static str,
    pub description: &'static str,
    pub article: &'static str,
    pub article_links: &'static [(&'static str, &'static str)],
    pub inputs: Vec<InputField>,
    pub outputs: Vec<OutputField>,
    pub examples: Vec<Example>,
    /// Max preview height for input and output images
    pub preview_height: f32,
}

impl InterfaceSpec {
    /// Declare the page from config, pointing examples at the provisioned samples
    pub fn from_config(config: &AppConfig, provisioner: &AssetProvisioner) -> Result<Self, LanguageError> {
        let default = LanguageSet::parse(&config.interface.default_languages)?;

        let examples = config
            .samples
            .sources
            .iter()
            .map(|source| {
                Ok(Example {
                    name: source.filename.clone(),
                    image: provisioner.sample_path(&source.filename),
                    languages: LanguageSet::parse(&source.languages)?,
                })
            })
            .collect::<Result<Vec<_>, LanguageError>>()?;

        Ok(Self {
            title: TITLE,
            description: DESCRIPTION,
            article: ARTICLE,
            article_links: ARTICLE_LINKS,
            inputs: vec![
                InputField::Image {
                    name: "image",
                    label: "Input",
                },
                InputField::Languages {
                    name: "languages",
                    label: "language",
                    choices: LanguageCode::all().collect(),
                    default,
                },
            ],
            outputs: vec![
                OutputField::Image {
                    name: "annotated_image",
                    label: "Output",
                },
                OutputField::Table {
                    name: "results",
                    headers: COLUMNS,
                },
            ],
            examples,
            preview_height: config.interface.preview_height,
        })
    }

    /// Default language selection from the languages input
    pub fn default_languages(&self) -> LanguageSet {
        self.inputs
            .iter()
            .find_map(|input| match input {
                InputField::Languages { default, .. } => Some(default.clone()),
                _ => None,
            })
            .unwrap_or_else(LanguageSet::default_selection)
    }

    /// Choices offered by the languages input
    pub fn language_choices(&self) -> &[LanguageCode] {
        self.inputs
            .iter()
            .find_map(|input| match input {
                InputField::Languages { choices, .. } => Some(choices.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }
}

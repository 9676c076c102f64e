//! Dashboard form and result state

use std::path::{Path, PathBuf};

use crate::interface::Example;
use crate::languages::{LanguageCode, LanguageError, LanguageSet};
use crate::recognition::ResultTable;
use crate::shared::InferenceRequest;

const NO_LANGUAGE: &str = "Select at least one language";

/// Everything the demo page remembers between frames
pub struct DemoState {
    /// Image path as typed, dropped, or picked from the gallery
    pub image_path: String,
    /// Checked languages, in the order they were checked
    pub selected: Vec<LanguageCode>,
    /// Filter for the language grid
    pub language_filter: String,
    /// Preview of the current input image
    pub input_texture: Option<egui::TextureHandle>,
    /// Path the input preview was loaded from
    pub input_texture_path: Option<PathBuf>,
    /// Preview of the last annotated image
    pub output_texture: Option<egui::TextureHandle>,
    /// Table from the last successful request
    pub results: Option<ResultTable>,
    /// Request waiting for the worker
    pub pending_request: Option<u64>,
    /// User-visible error from the last request or validation
    pub last_error: Option<String>,
    /// Duration of the last request
    pub last_processing_time_ms: u64,
    /// Submit on the next frame (set by example clicks)
    pub submit_requested: bool,
    next_request_id: u64,
    default_selection: LanguageSet,
}

impl DemoState {
    pub fn new(default_selection: LanguageSet) -> Self {
        Self {
            image_path: String::new(),
            selected: default_selection.codes().to_vec(),
            language_filter: String::new(),
            input_texture: None,
            input_texture_path: None,
            output_texture: None,
            results: None,
            pending_request: None,
            last_error: None,
            last_processing_time_ms: 0,
            submit_requested: false,
            next_request_id: 1,
            default_selection,
        }
    }

    pub fn is_selected(&self, code: LanguageCode) -> bool {
        self.selected.contains(&code)
    }

    /// Check or uncheck a language
    pub fn toggle_language(&mut self, code: LanguageCode) {
        if let Some(pos) = self.selected.iter().position(|&c| c == code) {
            self.selected.remove(pos);
        } else {
            self.selected.push(code);
        }
    }

    /// Go back to the configured default languages
    pub fn reset_languages(&mut self) {
        self.selected = self.default_selection.codes().to_vec();
    }

    /// Languages matching the filter text
    pub fn filtered_languages<'a>(&'a self, choices: &'a [LanguageCode]) -> impl Iterator<Item = LanguageCode> + 'a {
        let filter = self.language_filter.trim().to_ascii_lowercase();
        choices
            .iter()
            .copied()
            .filter(move |code| filter.is_empty() || code.as_str().contains(filter.as_str()))
    }

    /// Load an example into the form and ask for a submit
    pub fn apply_example(&mut self, example: &Example) {
        self.image_path = example.image.to_string_lossy().into_owned();
        self.selected = example.languages.codes().to_vec();
        self.submit_requested = true;
    }

    /// Set the image from a dropped file
    pub fn set_image(&mut self, path: &Path) {
        self.image_path = path.to_string_lossy().into_owned();
    }

    /// Reset inputs and outputs
    pub fn clear(&mut self) {
        self.image_path.clear();
        self.reset_languages();
        self.language_filter.clear();
        self.input_texture = None;
        self.input_texture_path = None;
        self.output_texture = None;
        self.results = None;
        self.last_error = None;
    }

    pub fn is_processing(&self) -> bool {
        self.pending_request.is_some()
    }

    /// Validate the form and build the next request
    pub fn build_request(&mut self) -> Result<InferenceRequest, String> {
        let image = self.image_path.trim();
        if image.is_empty() {
            return Err("Choose an image first".to_string());
        }

        let languages = LanguageSet::parse(self.selected.iter().map(LanguageCode::as_str))
            .map_err(|e| match e {
                LanguageError::Empty => NO_LANGUAGE.to_string(),
                other => other.to_string(),
            })?;

        let id = self.next_request_id;
        self.next_request_id += 1;
        self.pending_request = Some(id);

        Ok(InferenceRequest {
            id,
            image: PathBuf::from(image),
            languages,
        })
    }

    /// Drop the empty-selection message once a language is picked
    pub fn selection_changed(&mut self) {
        if !self.selected.is_empty() && self.last_error.as_deref() == Some(NO_LANGUAGE) {
            self.last_error = None;
        }
    }

    /// Whether an event belongs to the request we are waiting for
    pub fn is_current(&self, id: u64) -> bool {
        self.pending_request == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> LanguageCode {
        LanguageCode::parse(s).unwrap()
    }

    #[test]
    fn test_defaults_are_checked() {
        let state = DemoState::new(LanguageSet::default_selection());
        assert_eq!(state.selected, vec![code("en")]);
        assert!(state.is_selected(code("en")));
        assert!(!state.is_processing());
    }

    #[test]
    fn test_toggle_keeps_click_order() {
        let mut state = DemoState::new(LanguageSet::default_selection());
        state.toggle_language(code("fr"));
        state.toggle_language(code("en"));
        state.toggle_language(code("en"));
        assert_eq!(state.selected, vec![code("fr"), code("en")]);
    }

    #[test]
    fn test_build_request_validates_form() {
        let mut state = DemoState::new(LanguageSet::default_selection());
        assert_eq!(state.build_request().unwrap_err(), "Choose an image first");

        state.image_path = " demo_samples/english.png ".to_string();
        state.selected.clear();
        assert_eq!(state.build_request().unwrap_err(), "Select at least one language");
        assert!(!state.is_processing());

        state.toggle_language(code("th"));
        let first = state.build_request().unwrap();
        assert_eq!(first.image, PathBuf::from("demo_samples/english.png"));
        assert_eq!(first.languages.joined(), "th");
        assert!(state.is_current(first.id));

        let second = state.build_request().unwrap();
        assert!(second.id > first.id);
        assert!(!state.is_current(first.id));
    }

    #[test]
    fn test_picking_a_language_clears_its_error() {
        let mut state = DemoState::new(LanguageSet::default_selection());
        state.image_path = "x.png".to_string();
        state.selected.clear();
        state.last_error = state.build_request().err();

        state.selection_changed();
        assert_eq!(state.last_error.as_deref(), Some("Select at least one language"));

        state.toggle_language(code("ja"));
        state.selection_changed();
        assert!(state.last_error.is_none());

        // Recognition failures stay until the next result
        state.last_error = Some("Cannot read image".to_string());
        state.selection_changed();
        assert!(state.last_error.is_some());
    }

    #[test]
    fn test_apply_example() {
        let mut state = DemoState::new(LanguageSet::default_selection());
        let example = Example {
            name: "french.jpg".to_string(),
            image: PathBuf::from("demo_samples/french.jpg"),
            languages: LanguageSet::parse(["fr", "en"]).unwrap(),
        };
        state.apply_example(&example);

        assert_eq!(state.image_path, "demo_samples/french.jpg");
        assert_eq!(state.selected, vec![code("fr"), code("en")]);
        assert!(state.submit_requested);
    }

    #[test]
    fn test_filter_and_clear() {
        let mut state = DemoState::new(LanguageSet::default_selection());
        let choices: Vec<LanguageCode> = LanguageCode::all().collect();

        state.language_filter = "ch_".to_string();
        let filtered: Vec<&str> = state.filtered_languages(&choices).map(|c| c.as_str()).collect();
        assert_eq!(filtered, vec!["ch_sim", "ch_tra"]);

        state.toggle_language(code("ko"));
        state.image_path = "x.png".to_string();
        state.last_error = Some("boom".to_string());
        state.clear();
        assert!(state.image_path.is_empty());
        assert!(state.language_filter.is_empty());
        assert!(state.last_error.is_none());
        assert_eq!(state.selected, vec![code("en")]);
    }
}

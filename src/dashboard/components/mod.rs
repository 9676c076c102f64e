//! Reusable UI components for the demo page

pub mod language_picker;
pub mod status_card;

pub use language_picker::LanguagePicker;
pub use status_card::{CardStatus, StatusCard};

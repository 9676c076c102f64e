//! Desktop demo page
//!
//! Single-page egui front-end: image and language inputs on the left,
//! annotated image and result table on the right, examples below.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::run_dashboard;

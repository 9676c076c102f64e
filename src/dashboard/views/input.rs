//! Input column: image path, preview, language picker, actions

use egui::RichText;
use std::path::PathBuf;
use tracing::debug;

use crate::dashboard::components::LanguagePicker;
use crate::dashboard::state::DemoState;
use crate::dashboard::theme::ThemeColors;
use crate::dashboard::views::{load_texture, show_preview};
use crate::interface::{InputField, InterfaceSpec};

/// What the user asked for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Submit,
    Clear,
}

/// Render the input column
pub fn render_input_panel(ui: &mut egui::Ui, state: &mut DemoState, spec: &InterfaceSpec) -> InputAction {
    let mut action = InputAction::None;

    for field in &spec.inputs {
        match field {
            InputField::Image { name, label } => {
                ui.push_id(*name, |ui| {
                    ui.label(RichText::new(*label).strong());
                    ui.add_space(4.0);

                    ui.horizontal(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut state.image_path)
                                .hint_text("Path to an image, or drop a file onto the window")
                                .desired_width(ui.available_width())
                        );
                    });
                    ui.add_space(6.0);

                    refresh_input_preview(ui.ctx(), state);
                    show_preview(
                        ui,
                        state.input_texture.as_ref(),
                        spec.preview_height,
                        "Drop an image here",
                    );
                });
            }
            InputField::Languages { name, label, choices, .. } => {
                ui.add_space(12.0);
                let changed = ui
                    .push_id(*name, |ui| LanguagePicker::new(label, choices).show(ui, state))
                    .inner;
                if changed {
                    state.selection_changed();
                }
            }
        }
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let busy = state.is_processing();

        if ui
            .add_enabled(
                !busy,
                egui::Button::new("Clear").min_size(egui::vec2(100.0, 34.0)),
            )
            .clicked()
        {
            action = InputAction::Clear;
        }

        let submit_text = if busy { "Running..." } else { "Submit" };
        if ui
            .add_enabled(
                !busy,
                egui::Button::new(RichText::new(submit_text).color(ThemeColors::BG_DARK).strong())
                    .fill(ThemeColors::ACCENT_PRIMARY)
                    .min_size(egui::vec2(120.0, 34.0)),
            )
            .clicked()
        {
            action = InputAction::Submit;
        }

        if busy {
            ui.spinner();
        }
    });

    action
}

/// Reload the preview when the path changes
fn refresh_input_preview(ctx: &egui::Context, state: &mut DemoState) {
    let trimmed = state.image_path.trim();
    if trimmed.is_empty() {
        state.input_texture = None;
        state.input_texture_path = None;
        return;
    }

    let path = PathBuf::from(trimmed);
    if state.input_texture_path.as_ref() == Some(&path) {
        return;
    }

    // Remember the path even on failure so a bad file is not retried every frame
    state.input_texture = match image::open(&path) {
        Ok(img) => Some(load_texture(ctx, "input_preview", &img.to_rgba8())),
        Err(e) => {
            debug!("No preview for {:?}: {}", path, e);
            None
        }
    };
    state.input_texture_path = Some(path);
}

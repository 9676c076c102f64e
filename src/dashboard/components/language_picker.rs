//! Filterable multi-select over the supported languages

use egui::{RichText, Rounding};

use crate::dashboard::state::DemoState;
use crate::dashboard::theme::ThemeColors;
use crate::languages::LanguageCode;

const COLUMNS: usize = 6;

/// Checkbox grid with a filter box and a row of selected chips
pub struct LanguagePicker<'a> {
    label: &'a str,
    choices: &'a [LanguageCode],
}

impl<'a> LanguagePicker<'a> {
    pub fn new(label: &'a str, choices: &'a [LanguageCode]) -> Self {
        Self { label, choices }
    }

    /// Draw the picker; returns true when the selection changed
    pub fn show(&self, ui: &mut egui::Ui, state: &mut DemoState) -> bool {
        let mut changed = false;

        ui.label(RichText::new(self.label).color(ThemeColors::TEXT_SECONDARY));
        ui.add_space(4.0);

        // Selected chips, in click order; clicking one removes it
        ui.horizontal_wrapped(|ui| {
            if state.selected.is_empty() {
                ui.label(
                    RichText::new("No language selected")
                        .size(12.0)
                        .color(ThemeColors::ACCENT_WARNING)
                );
            }
            for code in state.selected.clone() {
                let chip = egui::Button::new(
                    RichText::new(format!("{code} ×")).color(ThemeColors::BG_DARK)
                )
                .fill(ThemeColors::ACCENT_PRIMARY)
                .rounding(Rounding::same(10.0));

                if ui.add(chip).on_hover_text("Remove").clicked() {
                    state.toggle_language(code);
                    changed = true;
                }
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Filter:");
            ui.add(
                egui::TextEdit::singleline(&mut state.language_filter)
                    .hint_text("e.g. ch_, ja")
                    .desired_width(140.0)
            );
            if ui.small_button("Clear").clicked() {
                state.selected.clear();
                changed = true;
            }
            if ui.small_button("Reset").clicked() {
                state.reset_languages();
                changed = true;
            }
        });
        ui.add_space(4.0);

        let visible: Vec<LanguageCode> = state.filtered_languages(self.choices).collect();
        egui::ScrollArea::vertical()
            .id_salt("language_grid")
            .max_height(160.0)
            .show(ui, |ui| {
                egui::Grid::new("language_grid_inner")
                    .num_columns(COLUMNS)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for (i, code) in visible.iter().enumerate() {
                            let mut checked = state.is_selected(*code);
                            if ui.checkbox(&mut checked, code.as_str()).changed() {
                                state.toggle_language(*code);
                                changed = true;
                            }
                            if (i + 1) % COLUMNS == 0 {
                                ui.end_row();
                            }
                        }
                    });

                if visible.is_empty() {
                    ui.label(
                        RichText::new("No language matches the filter")
                            .size(12.0)
                            .color(ThemeColors::TEXT_MUTED)
                    );
                }
            });

        changed
    }
}

//! Examples gallery

use egui::{RichText, Rounding};

use crate::dashboard::theme::ThemeColors;
use crate::interface::Example;

const PER_ROW: usize = 4;

/// Render the gallery; returns the index of the clicked example
pub fn render_examples(ui: &mut egui::Ui, examples: &[Example], enabled: bool) -> Option<usize> {
    let mut clicked = None;

    ui.heading(RichText::new("Examples").size(18.0));
    ui.add_space(8.0);

    if examples.is_empty() {
        ui.label(RichText::new("No examples configured").color(ThemeColors::TEXT_MUTED));
        return None;
    }

    egui::Grid::new("examples_grid")
        .num_columns(PER_ROW)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (i, example) in examples.iter().enumerate() {
                let present = example.image.exists();
                let text = RichText::new(format!("{}\n{}", example.name, example.languages))
                    .color(if present { ThemeColors::TEXT_PRIMARY } else { ThemeColors::TEXT_MUTED });

                let button = egui::Button::new(text)
                    .fill(ThemeColors::BG_MEDIUM)
                    .rounding(Rounding::same(6.0))
                    .min_size(egui::vec2(160.0, 48.0));

                let response = ui
                    .add_enabled(enabled && present, button)
                    .on_disabled_hover_text("Not available yet");
                if response.clicked() {
                    clicked = Some(i);
                }

                if (i + 1) % PER_ROW == 0 {
                    ui.end_row();
                }
            }
        });

    clicked
}

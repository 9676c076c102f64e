//! Output column: annotated image and result table

use egui::RichText;
use egui_extras::{Column, TableBuilder};

use crate::dashboard::components::{CardStatus, StatusCard};
use crate::dashboard::state::DemoState;
use crate::dashboard::theme::ThemeColors;
use crate::dashboard::views::show_preview;
use crate::interface::{InterfaceSpec, OutputField};
use crate::recognition::ResultTable;
use crate::shared::{RuntimeState, SamplesStatus};

/// Render the output column
pub fn render_output_panel(ui: &mut egui::Ui, state: &DemoState, runtime: &RuntimeState, spec: &InterfaceSpec) {
    ui.horizontal(|ui| {
        let (status, value) = if state.is_processing() {
            (CardStatus::Busy, "...".to_string())
        } else if state.last_error.is_some() {
            (CardStatus::Error, "-".to_string())
        } else if let Some(results) = &state.results {
            (CardStatus::Ready, results.len().to_string())
        } else {
            (CardStatus::Idle, "-".to_string())
        };
        StatusCard::new("Regions", value, status).show(ui);

        let elapsed = if runtime.requests_completed > 0 {
            format!("{:.2} s", state.last_processing_time_ms as f64 / 1000.0)
        } else {
            "-".to_string()
        };
        StatusCard::new("Elapsed", elapsed, CardStatus::Idle).show(ui);

        let (samples_status, samples_value) = samples_card(&runtime.samples);
        StatusCard::new("Samples", samples_value, samples_status).show(ui);
    });

    if let Some(error) = &state.last_error {
        ui.add_space(8.0);
        ui.label(RichText::new(error).color(ThemeColors::ACCENT_ERROR));
    }
    if let SamplesStatus::Unavailable(message) = &runtime.samples {
        ui.add_space(8.0);
        ui.label(RichText::new(message).color(ThemeColors::ACCENT_ERROR));
    }

    ui.add_space(12.0);

    for field in &spec.outputs {
        match field {
            OutputField::Image { name, label } => {
                ui.push_id(*name, |ui| {
                    ui.label(RichText::new(*label).strong());
                    ui.add_space(4.0);
                    show_preview(
                        ui,
                        state.output_texture.as_ref(),
                        spec.preview_height,
                        "Annotated image appears here",
                    );
                });
                ui.add_space(12.0);
            }
            OutputField::Table { name, headers } => {
                let empty = ResultTable::default();
                let table = state.results.as_ref().unwrap_or(&empty);
                // Scopes the table's column widths per field
                ui.push_id(*name, |ui| render_result_table(ui, headers, table));
            }
        }
    }
}

/// Samples card state
fn samples_card(status: &SamplesStatus) -> (CardStatus, &'static str) {
    match status {
        SamplesStatus::Pending => (CardStatus::Busy, "Fetching"),
        SamplesStatus::Ready => (CardStatus::Ready, "Ready"),
        SamplesStatus::Unavailable(_) => (CardStatus::Error, "Unavailable"),
    }
}

/// Two-column table; headers are drawn even with no rows
fn render_result_table(ui: &mut egui::Ui, headers: &[&str; 2], table: &ResultTable) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::remainder().at_least(160.0))
        .column(Column::exact(100.0))
        .header(24.0, |mut header| {
            for title in headers {
                header.col(|ui| {
                    ui.label(RichText::new(*title).strong().color(ThemeColors::TEXT_SECONDARY));
                });
            }
        })
        .body(|mut body| {
            for row in table.rows() {
                body.row(22.0, |mut cells| {
                    cells.col(|ui| {
                        ui.label(&row.text);
                    });
                    cells.col(|ui| {
                        ui.monospace(format!("{:.4}", row.confidence));
                    });
                });
            }
        });

    if table.is_empty() {
        ui.label(
            RichText::new("No text detected yet")
                .size(12.0)
                .color(ThemeColors::TEXT_MUTED)
        );
    }
}

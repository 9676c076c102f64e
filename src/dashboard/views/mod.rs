//! Dashboard views

pub mod examples;
pub mod input;
pub mod output;

pub use examples::render_examples;
pub use input::{render_input_panel, InputAction};
pub use output::render_output_panel;

use egui::{RichText, Rounding};
use image::RgbaImage;

use crate::dashboard::theme::ThemeColors;

/// Upload an RGBA image as a texture
pub fn load_texture(ctx: &egui::Context, name: &str, image: &RgbaImage) -> egui::TextureHandle {
    let color_image = egui::ColorImage::from_rgba_unmultiplied(
        [image.width() as usize, image.height() as usize],
        image.as_raw(),
    );
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

/// Draw a texture scaled to fit the width and `max_height`, or a placeholder
pub fn show_preview(
    ui: &mut egui::Ui,
    texture: Option<&egui::TextureHandle>,
    max_height: f32,
    placeholder: &str,
) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(Rounding::same(6.0))
        .inner_margin(8.0)
        .show(ui, |ui| {
            let available = ui.available_width();
            match texture {
                Some(texture) => {
                    let tex_size = texture.size_vec2();
                    // Scale down only, keeping aspect ratio
                    let scale = (available / tex_size.x).min(max_height / tex_size.y).min(1.0);
                    ui.vertical_centered(|ui| {
                        ui.image((texture.id(), tex_size * scale));
                    });
                }
                None => {
                    ui.set_min_size(egui::vec2(available, max_height.min(240.0)));
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(placeholder)
                                .size(13.0)
                                .color(ThemeColors::TEXT_MUTED)
                        );
                    });
                }
            }
        });
}

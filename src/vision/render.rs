//! Bounding box rendering
//!
//! Paints region outlines onto an image as closed 4-sided polylines.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_line_segment_mut;
use thiserror::Error;

use super::region::{Point, Quad};
use crate::config::RenderConfig;

/// Rendering failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("invalid region: {0}")]
    InvalidRegion(String),
    #[error("unsupported color: {0}")]
    InvalidColor(String),
}

/// Outline color and stroke width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    pub color: Rgba<u8>,
    pub width: u32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            color: Rgba([255, 255, 0, 255]),
            width: 2,
        }
    }
}

impl BoxStyle {
    pub fn from_config(config: &RenderConfig) -> Result<Self, RenderError> {
        Ok(Self {
            color: parse_color(&config.color)?,
            width: config.width.max(1),
        })
    }
}

/// Parse a named color or `#RRGGBB` / `#RRGGBBAA`
pub fn parse_color(color: &str) -> Result<Rgba<u8>, RenderError> {
    let named = match color.to_ascii_lowercase().as_str() {
        "yellow" => Some([255, 255, 0]),
        "red" => Some([255, 0, 0]),
        "green" => Some([0, 128, 0]),
        "lime" => Some([0, 255, 0]),
        "blue" => Some([0, 0, 255]),
        "cyan" => Some([0, 255, 255]),
        "magenta" => Some([255, 0, 255]),
        "orange" => Some([255, 165, 0]),
        "white" => Some([255, 255, 255]),
        "black" => Some([0, 0, 0]),
        _ => None,
    };
    if let Some([r, g, b]) = named {
        return Ok(Rgba([r, g, b, 255]));
    }

    let hex = color
        .strip_prefix('#')
        .ok_or_else(|| RenderError::InvalidColor(color.to_string()))?;

    let parse_byte = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| RenderError::InvalidColor(color.to_string()))
    };

    // Byte slicing below needs single-byte chars
    if !hex.is_ascii() {
        return Err(RenderError::InvalidColor(color.to_string()));
    }

    match hex.len() {
        6 => Ok(Rgba([
            parse_byte(&hex[0..2])?,
            parse_byte(&hex[2..4])?,
            parse_byte(&hex[4..6])?,
            255,
        ])),
        8 => Ok(Rgba([
            parse_byte(&hex[0..2])?,
            parse_byte(&hex[2..4])?,
            parse_byte(&hex[4..6])?,
            parse_byte(&hex[6..8])?,
        ])),
        _ => Err(RenderError::InvalidColor(color.to_string())),
    }
}

/// Draw the outline of every quad onto `image` in place.
///
/// An empty iterator leaves the image untouched. Segments running off the
/// canvas are clipped.
pub fn draw_boxes_mut<'a, I>(image: &mut RgbaImage, quads: I, style: &BoxStyle)
where
    I: IntoIterator<Item = &'a Quad>,
{
    for quad in quads {
        for (start, end) in quad.edges() {
            draw_thick_segment(image, start, end, style);
        }
    }
}

/// Owned variant of [`draw_boxes_mut`], returning the annotated image
pub fn draw_boxes<'a, I>(mut image: RgbaImage, quads: I, style: &BoxStyle) -> RgbaImage
where
    I: IntoIterator<Item = &'a Quad>,
{
    draw_boxes_mut(&mut image, quads, style);
    image
}

/// Stroke a segment by drawing parallel one-pixel lines across its width.
/// Half-pixel spacing keeps diagonal strokes free of gaps.
fn draw_thick_segment(image: &mut RgbaImage, start: Point, end: Point, style: &BoxStyle) {
    let (dx, dy) = (end.x - start.x, end.y - start.y);
    let len = (dx * dx + dy * dy).sqrt();

    if style.width <= 1 || len < f32::EPSILON {
        draw_line_segment_mut(image, snap(start.x, start.y), snap(end.x, end.y), style.color);
        return;
    }

    let (nx, ny) = (-dy / len, dx / len);
    let half = (style.width as f32 - 1.0) / 2.0;
    let steps = (half * 4.0).round() as i32;

    for i in 0..=steps {
        let offset = -half + i as f32 * 0.5;
        let (ox, oy) = (nx * offset, ny * offset);
        draw_line_segment_mut(
            image,
            snap(start.x + ox, start.y + oy),
            snap(end.x + ox, end.y + oy),
            style.color,
        );
    }
}

/// Round to the nearest pixel; the line iterator truncates otherwise
fn snap(x: f32, y: f32) -> (f32, f32) {
    (x.round(), y.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKGROUND: Rgba<u8> = Rgba([10, 20, 30, 255]);

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(64, 48, BACKGROUND)
    }

    fn distance_to_segment(px: f32, py: f32, a: Point, b: Point) -> f32 {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq == 0.0 {
            0.0
        } else {
            (((px - a.x) * dx + (py - a.y) * dy) / len_sq).clamp(0.0, 1.0)
        };
        let (cx, cy) = (a.x + t * dx, a.y + t * dy);
        ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
    }

    #[test]
    fn test_empty_bounds_leave_image_unchanged() {
        let original = canvas();
        let drawn = draw_boxes(original.clone(), std::iter::empty::<&Quad>(), &BoxStyle::default());
        assert_eq!(drawn.dimensions(), original.dimensions());
        assert_eq!(drawn.as_raw(), original.as_raw());
    }

    #[test]
    fn test_outline_is_closed() {
        let quad = Quad::from_rect(10.0, 10.0, 30.0, 20.0);
        let style = BoxStyle {
            color: Rgba([255, 255, 0, 255]),
            width: 1,
        };
        let drawn = draw_boxes(canvas(), [&quad], &style);

        for p in quad.points() {
            assert_eq!(*drawn.get_pixel(p.x as u32, p.y as u32), style.color);
        }
        // Midpoints of all four edges
        for (x, y) in [(25, 10), (40, 20), (25, 30), (10, 20)] {
            assert_eq!(*drawn.get_pixel(x, y), style.color, "edge pixel ({x}, {y})");
        }
        // Interior stays untouched
        assert_eq!(*drawn.get_pixel(25, 20), BACKGROUND);
    }

    #[test]
    fn test_only_pixels_near_segments_change() {
        let quads = [
            Quad::from_rect(5.0, 5.0, 20.0, 10.0),
            Quad([
                Point::new(40.0, 5.0),
                Point::new(58.0, 12.0),
                Point::new(52.0, 40.0),
                Point::new(34.0, 30.0),
            ]),
        ];
        let style = BoxStyle {
            color: Rgba([255, 0, 0, 255]),
            width: 3,
        };
        let drawn = draw_boxes(canvas(), quads.iter(), &style);
        let tolerance = style.width as f32 / 2.0 + 1.5;

        let mut changed = 0;
        for (x, y, pixel) in drawn.enumerate_pixels() {
            if *pixel == BACKGROUND {
                continue;
            }
            changed += 1;
            assert_eq!(*pixel, style.color);
            let near = quads.iter().flat_map(|q| q.edges()).any(|(a, b)| {
                distance_to_segment(x as f32, y as f32, a, b) <= tolerance
            });
            assert!(near, "pixel ({x}, {y}) is not on any box edge");
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_wide_stroke_covers_width() {
        let quad = Quad::from_rect(10.0, 10.0, 30.0, 20.0);
        let style = BoxStyle {
            color: Rgba([0, 255, 0, 255]),
            width: 3,
        };
        let drawn = draw_boxes(canvas(), [&quad], &style);

        // Top edge at y=10 is three pixels thick
        for y in 9..=11 {
            assert_eq!(*drawn.get_pixel(25, y), style.color);
        }
        assert_eq!(*drawn.get_pixel(25, 13), BACKGROUND);
    }

    #[test]
    fn test_out_of_bounds_quad_is_clipped() {
        let quad = Quad::from_rect(-20.0, -20.0, 200.0, 200.0);
        let drawn = draw_boxes(canvas(), [&quad], &BoxStyle::default());
        assert_eq!(drawn.dimensions(), (64, 48));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("yellow").unwrap(), Rgba([255, 255, 0, 255]));
        assert_eq!(parse_color("Red").unwrap(), Rgba([255, 0, 0, 255]));
        assert_eq!(parse_color("#102030").unwrap(), Rgba([16, 32, 48, 255]));
        assert_eq!(parse_color("#10203080").unwrap(), Rgba([16, 32, 48, 128]));
        assert!(parse_color("#12").is_err());
        assert!(parse_color("#zzzzzz").is_err());
        assert!(parse_color("chartreuse-ish").is_err());
    }

    #[test]
    fn test_non_ascii_hex_is_rejected() {
        assert_eq!(
            parse_color("#aé123"),
            Err(RenderError::InvalidColor("#aé123".to_string()))
        );
        assert!(parse_color("#ééé").is_err());

        let config = RenderConfig {
            color: "#aé123".to_string(),
            width: 2,
        };
        assert!(matches!(BoxStyle::from_config(&config), Err(RenderError::InvalidColor(_))));
    }

    #[test]
    fn test_style_from_config() {
        let style = BoxStyle::from_config(&RenderConfig::default()).unwrap();
        assert_eq!(style, BoxStyle::default());

        let zero_width = RenderConfig {
            color: "blue".to_string(),
            width: 0,
        };
        assert_eq!(BoxStyle::from_config(&zero_width).unwrap().width, 1);
    }
}

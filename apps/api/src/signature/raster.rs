//! Fixed-size RGBA drawing surface and its data-URL encoding.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::signature::SignatureError;

pub const SURFACE_WIDTH: u32 = 400;
pub const SURFACE_HEIGHT: u32 = 150;
/// Stroke width in surface units.
pub const STROKE_WIDTH: f32 = 2.0;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// A position relative to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
}

impl StrokePoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A `data:image/png;base64,...` URL holding the whole surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

pub struct Surface {
    pixels: RgbaImage,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    /// A blank, fully transparent surface.
    pub fn new() -> Self {
        Self {
            pixels: RgbaImage::new(SURFACE_WIDTH, SURFACE_HEIGHT),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p[3] == 0)
    }

    pub fn clear(&mut self) {
        self.pixels
            .pixels_mut()
            .for_each(|p| *p = Rgba([0, 0, 0, 0]));
    }

    /// Strokes a solid black, round-capped line from `from` to `to`.
    ///
    /// A pixel is covered when its centre lies within half the stroke width of the
    /// segment, with a one-unit falloff at the edge. Coverage never lowers existing ink.
    pub fn stroke_segment(&mut self, from: StrokePoint, to: StrokePoint) {
        let half = STROKE_WIDTH / 2.0;
        let reach = half + 1.0;

        let min_x = (from.x.min(to.x) - reach).floor().max(0.0);
        let min_y = (from.y.min(to.y) - reach).floor().max(0.0);
        let max_x = (from.x.max(to.x) + reach).ceil().min(SURFACE_WIDTH as f32);
        let max_y = (from.y.max(to.y) + reach).ceil().min(SURFACE_HEIGHT as f32);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        for py in min_y as u32..max_y as u32 {
            for px in min_x as u32..max_x as u32 {
                let centre = StrokePoint::new(px as f32 + 0.5, py as f32 + 0.5);
                let coverage = (half + 0.5 - distance_to_segment(centre, from, to)).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let alpha = (coverage * 255.0).round() as u8;
                let pixel = self.pixels.get_pixel_mut(px, py);
                *pixel = Rgba([0, 0, 0, pixel[3].max(alpha)]);
            }
        }
    }

    /// PNG-encodes the full surface as a data URL.
    pub fn encode(&self) -> Result<EncodedImage, SignatureError> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(
                self.pixels.as_raw(),
                self.pixels.width(),
                self.pixels.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(SignatureError::Encode)?;
        Ok(EncodedImage(format!("{DATA_URL_PREFIX}{}", B64.encode(png))))
    }
}

/// Parses a PNG data URL back into pixels.
pub fn decode_data_url(url: &str) -> Result<RgbaImage, SignatureError> {
    let payload = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or(SignatureError::NotDataUrl)?;
    let bytes = B64.decode(payload)?;
    let image = image::load(Cursor::new(bytes), ImageFormat::Png).map_err(SignatureError::Decode)?;
    Ok(image.to_rgba8())
}

fn distance_to_segment(p: StrokePoint, a: StrokePoint, b: StrokePoint) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(surface: &Surface, x: u32, y: u32) -> u8 {
        surface.pixels().get_pixel(x, y)[3]
    }

    #[test]
    fn test_new_surface_is_blank_and_sized() {
        let surface = Surface::new();
        assert!(surface.is_blank());
        assert_eq!(surface.pixels().dimensions(), (400, 150));
    }

    #[test]
    fn test_horizontal_segment_inks_its_path() {
        let mut surface = Surface::new();
        surface.stroke_segment(StrokePoint::new(10.0, 20.0), StrokePoint::new(50.0, 20.0));
        assert_eq!(alpha(&surface, 30, 19), 255);
        assert_eq!(alpha(&surface, 30, 20), 255);
        assert_eq!(alpha(&surface, 30, 24), 0);
        assert_eq!(surface.pixels().get_pixel(30, 20)[0], 0);
    }

    #[test]
    fn test_round_cap_extends_past_endpoint() {
        let mut surface = Surface::new();
        surface.stroke_segment(StrokePoint::new(10.0, 20.0), StrokePoint::new(50.0, 20.0));
        // Pixel centre (50.5, 19.5) is ~0.7 from the end point: inside the cap.
        assert!(alpha(&surface, 50, 19) > 0);
        assert_eq!(alpha(&surface, 55, 20), 0);
    }

    #[test]
    fn test_segment_outside_surface_is_clipped() {
        let mut surface = Surface::new();
        surface.stroke_segment(StrokePoint::new(-50.0, -50.0), StrokePoint::new(-10.0, -10.0));
        assert!(surface.is_blank());
        surface.stroke_segment(StrokePoint::new(390.0, 140.0), StrokePoint::new(900.0, 900.0));
        assert!(!surface.is_blank());
    }

    #[test]
    fn test_clear_wipes_ink() {
        let mut surface = Surface::new();
        surface.stroke_segment(StrokePoint::new(0.0, 0.0), StrokePoint::new(100.0, 100.0));
        surface.clear();
        assert!(surface.is_blank());
    }

    #[test]
    fn test_encode_produces_decodable_png_data_url() {
        let mut surface = Surface::new();
        surface.stroke_segment(StrokePoint::new(5.0, 5.0), StrokePoint::new(60.0, 40.0));
        let encoded = surface.encode().unwrap();
        assert!(encoded.as_str().starts_with("data:image/png;base64,"));

        let decoded = decode_data_url(encoded.as_str()).unwrap();
        assert_eq!(&decoded, surface.pixels());
    }

    #[test]
    fn test_decode_rejects_other_payloads() {
        assert!(matches!(
            decode_data_url("data:image/jpeg;base64,AAAA"),
            Err(SignatureError::NotDataUrl)
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(SignatureError::Base64(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,AAAA"),
            Err(SignatureError::Decode(_))
        ));
    }

    #[test]
    fn test_distance_to_degenerate_segment_is_point_distance() {
        let p = StrokePoint::new(3.0, 4.0);
        let a = StrokePoint::new(0.0, 0.0);
        assert!((distance_to_segment(p, a, a) - 5.0).abs() < 1e-6);
    }
}

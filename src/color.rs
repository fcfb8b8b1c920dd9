use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use tv_dashboard::data::model::HighlightColor;

/// Fill for highlighted TVs, histogram bars and the upper box half.
pub const ACCENT: Color32 = Color32::from_rgb(0xff, 0xe4, 0x00);
/// Fill for outlier markers.
pub const OUTLIER: Color32 = Color32::from_rgb(0xff, 0xbf, 0x00);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Highlight → Color32
// ---------------------------------------------------------------------------

/// Marker colour for a scatter point, with its opacity applied.
pub fn highlight_color(color: HighlightColor, opacity: f64) -> Color32 {
    let base = match color {
        HighlightColor::Selected => ACCENT,
        HighlightColor::Unselected => Color32::GRAY,
    };
    base.gamma_multiply(opacity.clamp(0.0, 1.0) as f32)
}

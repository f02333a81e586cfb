use ratatui::style::Color;

use crate::color::Shade;

/// Lightness every swatch is drawn at.
pub const SWATCH_LIGHTNESS: f64 = 0.5;

/// `hsl(hue, brightness * 100%, 50%)` as 8-bit RGB.
pub fn shade_to_rgb(shade: Shade) -> (u8, u8, u8) {
    let s = shade.brightness.clamp(0.0, 1.0);
    let l = SWATCH_LIGHTNESS;
    let h = (shade.hue.rem_euclid(360.0)) / 60.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}

pub fn swatch_color(shade: Shade) -> Color {
    let (r, g, b) = shade_to_rgb(shade);
    Color::Rgb(r, g, b)
}

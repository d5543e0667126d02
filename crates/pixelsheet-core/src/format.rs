use serde::{Deserialize, Serialize};

/// Opaque 8-bit RGB color of one sampled cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(px: image::Rgb<u8>) -> Self {
        let [r, g, b] = px.0;
        Rgb::new(r, g, b)
    }
}

/// Color with channels in `[0.0, 1.0]`, the form spreadsheet APIs expect
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FractionalColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

/// Map a 0-255 channel onto `[0.0, 1.0]`
pub fn normalize_channel(value: u8) -> f32 {
    f32::from(value) / 255.0
}

impl From<Rgb> for FractionalColor {
    fn from(c: Rgb) -> Self {
        FractionalColor {
            red: normalize_channel(c.r),
            green: normalize_channel(c.g),
            blue: normalize_channel(c.b),
        }
    }
}

use nalgebra::Vector3;

/// Linear RGB in `0.0..=1.0`.
pub type Color = Vector3<f32>;

/// Builds a colour from 8-bit channels.
pub fn from_rgb8(r: u8, g: u8, b: u8) -> Color {
    Vector3::new(r as f32, g as f32, b as f32) / 255.0
}

/// Packs a colour into the `0RGB` layout used by the canvas and the window.
pub fn to_u32(color: &Color) -> u32 {
    let r = (color.x.clamp(0.0, 1.0) * 255.0).round() as u32;
    let g = (color.y.clamp(0.0, 1.0) * 255.0).round() as u32;
    let b = (color.z.clamp(0.0, 1.0) * 255.0).round() as u32;
    (r << 16) | (g << 8) | b
}

/// Unpacks a `0RGB` pixel into 8-bit channels.
pub fn to_rgb8(pixel: u32) -> [u8; 3] {
    [
        ((pixel >> 16) & 0xFF) as u8,
        ((pixel >> 8) & 0xFF) as u8,
        (pixel & 0xFF) as u8,
    ]
}

/// Darkens a colour by NDC depth in `[-1, 1]`: the near plane keeps full
/// brightness, the far plane drops to `min_brightness`.
pub fn shade(color: &Color, ndc_depth: f32, min_brightness: f32) -> Color {
    let t = ((ndc_depth + 1.0) * 0.5).clamp(0.0, 1.0);
    let brightness = 1.0 - t * (1.0 - min_brightness);
    color * brightness
}

// Palette of the viewer chrome.
pub fn dark_slate_gray() -> Color {
    from_rgb8(47, 79, 79)
}

pub fn gray25() -> Color {
    from_rgb8(64, 64, 64)
}

pub fn white() -> Color {
    from_rgb8(255, 255, 255)
}

pub fn light_blue() -> Color {
    from_rgb8(173, 216, 230)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack() {
        let pixel = to_u32(&from_rgb8(255, 165, 0));
        assert_eq!(pixel, 0x00FF_A500);
        assert_eq!(to_rgb8(pixel), [255, 165, 0]);
    }

    #[test]
    fn out_of_range_channels_are_clamped() {
        assert_eq!(to_u32(&Vector3::new(2.0, -1.0, 0.5)), 0x00FF_0080);
    }

    #[test]
    fn shade_darkens_with_depth() {
        let c = Vector3::new(1.0, 1.0, 1.0);
        assert_eq!(shade(&c, -1.0, 0.3), c);
        let far = shade(&c, 1.0, 0.3);
        assert!((far.x - 0.3).abs() < 1e-6);
        let mid = shade(&c, 0.0, 0.3);
        assert!(mid.x < 1.0 && mid.x > 0.3);
    }
}

use crate::core::canvas::Canvas;
use crate::core::color;
use image::{ImageBuffer, ImageResult};
use log::info;
use std::path::Path;

/// Saves a canvas (0RGB pixels) to an image file; the format follows the extension.
pub fn save_canvas(canvas: &Canvas, path: &Path) -> ImageResult<()> {
    let pixels = canvas.pixels();
    let img_buf = ImageBuffer::from_fn(canvas.width as u32, canvas.height as u32, |x, y| {
        let idx = (y as usize) * canvas.width + (x as usize);
        image::Rgb(color::to_rgb8(pixels[idx]))
    });

    img_buf.save(path)?;
    info!("Saved {}x{} image to '{}'", canvas.width, canvas.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_keeps_pixel_colours() {
        let mut canvas = Canvas::new(4, 3);
        canvas.clear(0x00_2F_4F_4F);
        canvas.set_pixel(1, 2, 0x00_FF_A5_00);

        let path = std::env::temp_dir().join(format!("orbit_viewer_save_{}.png", std::process::id()));
        save_canvas(&canvas, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(1, 2).0, [255, 165, 0]);
        assert_eq!(img.get_pixel(0, 0).0, [47, 79, 79]);
        std::fs::remove_file(&path).unwrap();
    }
}

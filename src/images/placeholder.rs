use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::Error;

pub const PLACEHOLDER_WIDTH: u32 = 800;
pub const PLACEHOLDER_HEIGHT: u32 = 600;
/// #4A90E2
pub const PLACEHOLDER_COLOR: [u8; 3] = [0x4A, 0x90, 0xE2];

/// Write the solid-colour placeholder image to `path` as PNG.
pub fn write_placeholder(path: &Path) -> Result<(), Error> {
    let img = RgbImage::from_pixel(
        PLACEHOLDER_WIDTH,
        PLACEHOLDER_HEIGHT,
        Rgb(PLACEHOLDER_COLOR),
    );
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("placeholder.png");
        write_placeholder(&path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT));
        assert_eq!(img.get_pixel(0, 0).0, PLACEHOLDER_COLOR);
        assert_eq!(img.get_pixel(799, 599).0, PLACEHOLDER_COLOR);
    }
}

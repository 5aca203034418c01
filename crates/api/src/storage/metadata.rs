//! Image header inspection.

use std::io::Cursor;

use image::ImageReader;

/// Read `(width, height)` from an encoded image's header.
///
/// Returns `None` when the bytes are not a decodable image or the size
/// does not fit the database's `INTEGER` columns. Uploads without known
/// dimensions are still accepted; they just cannot take pixel-based markers.
pub fn read_dimensions(bytes: &[u8]) -> Option<(i32, i32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let (width, height) = reader.into_dimensions().ok()?;
    Some((i32::try_from(width).ok()?, i32::try_from(height).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(width, height)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn png_dimensions_are_read() {
        assert_eq!(read_dimensions(&png_bytes(64, 48)), Some((64, 48)));
    }

    #[test]
    fn garbage_yields_none() {
        assert_eq!(read_dimensions(b"definitely not an image"), None);
    }
}

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader};

use crate::Error;

/// Image formats stored in the deck without conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Png,
    Jpeg,
    Gif,
}

impl PictureFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PictureFormat::Png => "png",
            PictureFormat::Jpeg => "jpeg",
            PictureFormat::Gif => "gif",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            PictureFormat::Png => "image/png",
            PictureFormat::Jpeg => "image/jpeg",
            PictureFormat::Gif => "image/gif",
        }
    }

    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(PictureFormat::Png),
            ImageFormat::Jpeg => Some(PictureFormat::Jpeg),
            ImageFormat::Gif => Some(PictureFormat::Gif),
            _ => None,
        }
    }
}

/// Image bytes ready to embed, with their pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub data: Vec<u8>,
    pub format: PictureFormat,
    pub width: u32,
    pub height: u32,
}

impl Picture {
    /// Decode-check `data`; formats a deck cannot embed directly are re-encoded as PNG.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, Error> {
        let reader = ImageReader::new(Cursor::new(&data)).with_guessed_format()?;
        let detected = reader
            .format()
            .ok_or_else(|| Error::Image(unsupported("unrecognised image data")))?;

        if let Some(format) = PictureFormat::from_image_format(detected) {
            let (width, height) = reader.into_dimensions()?;
            return Ok(Self {
                data,
                format,
                width,
                height,
            });
        }

        let decoded = reader.decode()?;
        let mut png = Vec::new();
        decoded.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(Self {
            data: png,
            format: PictureFormat::Png,
            width: decoded.width(),
            height: decoded.height(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        Self::from_bytes(std::fs::read(path)?)
    }
}

fn unsupported(message: &str) -> image::ImageError {
    image::ImageError::IoError(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        message.to_string(),
    ))
}

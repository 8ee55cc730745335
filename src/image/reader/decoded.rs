use std::path::{Path, PathBuf};

use ::image::{DynamicImage, ImageError};

use super::super::Image;
use super::{path_to_string, ImageReader};
use crate::error::Error;

/// Reads compressed formats (PNG, JPEG) through the `image` crate.
///
/// Images without color information become grayscale images, everything else
/// is converted to 8 bit RGB. Alpha channels are dropped.
pub struct DecodedImageReader {
    file_path: PathBuf,
}

impl DecodedImageReader {
    pub fn new(file_path: &Path) -> Self {
        Self {
            file_path: file_path.to_owned(),
        }
    }

    fn map_decoder_error(&self, error: ImageError) -> Error {
        let path = path_to_string(&self.file_path);
        match error {
            ImageError::IoError(io_error) => Error::UnableToOpenInputFileForReading(path, io_error),
            ImageError::Unsupported(_) => Error::UnsupportedImageFormat(path),
            other => Error::UnableToDecodeImage(path, other),
        }
    }
}

impl ImageReader for DecodedImageReader {
    fn read_image(&mut self) -> crate::Result<Image> {
        let decoded = ::image::open(&self.file_path).map_err(|e| self.map_decoder_error(e))?;
        from_dynamic_image(&decoded)
    }
}

pub(crate) fn from_dynamic_image(decoded: &DynamicImage) -> crate::Result<Image> {
    let width = decoded.width() as usize;
    let height = decoded.height() as usize;
    if decoded.color().has_color() {
        Image::rgb(width, height, decoded.to_rgb8().into_raw())
    } else {
        Image::gray(width, height, decoded.to_luma8().into_raw())
    }
}

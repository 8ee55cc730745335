use crate::color::{LumaColorFormat, RGBColorFormat};
use crate::error::Error;
use crate::Result;

pub mod reader;

const RGB_CHANNEL_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelLayout {
    /// height x width intensities
    Gray,
    /// height x width x 3, channel last, in RGB order
    Rgb,
}

impl ChannelLayout {
    pub fn channel_count(&self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => RGB_CHANNEL_COUNT,
        }
    }
}

/// A decoded image. Samples are stored row by row with interleaved channels
/// and never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    layout: ChannelLayout,
    samples: Vec<u8>,
}

impl Image {
    pub fn gray(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        Self::new(width, height, ChannelLayout::Gray, samples)
    }

    pub fn rgb(width: usize, height: usize, samples: Vec<u8>) -> Result<Self> {
        Self::new(width, height, ChannelLayout::Rgb, samples)
    }

    pub fn new(
        width: usize,
        height: usize,
        layout: ChannelLayout,
        samples: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_image(format!(
                "image has zero size ({}x{})",
                width, height
            )));
        }
        let expected_length = width
            .checked_mul(height)
            .and_then(|dots| dots.checked_mul(layout.channel_count()))
            .ok_or_else(|| Error::invalid_image("image dimensions overflow"))?;
        if samples.len() != expected_length {
            return Err(Error::invalid_image(format!(
                "expected {} samples for a {}x{} {:?} image, but got {}",
                expected_length,
                width,
                height,
                layout,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            height,
            layout,
            samples,
        })
    }

    /// Creates an image from an array shape: `[height, width]` for grayscale
    /// or `[height, width, 3]` for color.
    pub fn from_shape(shape: &[usize], samples: Vec<u8>) -> Result<Self> {
        match *shape {
            [height, width] => Self::gray(width, height, samples),
            [height, width, RGB_CHANNEL_COUNT] => Self::rgb(width, height, samples),
            [_, _, channels] => Err(Error::invalid_image(format!(
                "expected {} color channels, but got {}",
                RGB_CHANNEL_COUNT, channels
            ))),
            _ => Err(Error::invalid_image(format!(
                "unsupported dimensionality {}, expected 2 or 3",
                shape.len()
            ))),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn shape(&self) -> Vec<usize> {
        match self.layout {
            ChannelLayout::Gray => vec![self.height, self.width],
            ChannelLayout::Rgb => vec![self.height, self.width, RGB_CHANNEL_COUNT],
        }
    }
}

impl From<GrayscaleImage> for Image {
    fn from(value: GrayscaleImage) -> Self {
        Self {
            width: value.width,
            height: value.height,
            layout: ChannelLayout::Gray,
            samples: value.intensities,
        }
    }
}

/// Single channel intensities derived from an [`Image`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayscaleImage {
    width: usize,
    height: usize,
    intensities: Vec<u8>,
}

impl GrayscaleImage {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn intensities(&self) -> &[u8] {
        &self.intensities
    }
}

/// Never fails for an existing [`Image`], whose constructors already reject
/// malformed shapes with [`Error::InvalidImage`].
pub fn to_grayscale(image: &Image) -> Result<GrayscaleImage> {
    let intensities = match image.layout {
        ChannelLayout::Gray => image.samples.clone(),
        ChannelLayout::Rgb => image
            .samples
            .chunks_exact(RGB_CHANNEL_COUNT)
            .map(|dot| RGBColorFormat::new(dot[0], dot[1], dot[2]))
            .map(|rgb| LumaColorFormat::from(&rgb).luma)
            .collect(),
    };
    Ok(GrayscaleImage {
        width: image.width,
        height: image.height,
        intensities,
    })
}

use std::fmt::Display;
use std::path::{Path, PathBuf};

pub use crate::cli::CLIParser;
pub use crate::error::Error;
pub use crate::histogram::Histogram;
pub use crate::image::reader::read_image;
pub use crate::image::{to_grayscale, ChannelLayout, GrayscaleImage, Image};
pub use crate::statistics::{compare_histograms, extract_features, ComparisonResult, FeatureResult};

mod cli;
mod color;
mod error;
pub mod histogram;
pub mod image;
mod logger;
pub mod statistics;

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Clone, Debug, PartialEq)]
pub enum Arguments {
    Features {
        image_file: PathBuf,
    },
    Compare {
        first_image_file: PathBuf,
        second_image_file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Report {
    Features(FeatureResult),
    Comparison(ComparisonResult),
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Features(features) => write!(f, "{}", features),
            Self::Comparison(comparison) => write!(f, "{}", comparison),
        }
    }
}

pub fn analyze_features(image_file: &Path) -> Result<FeatureResult> {
    let image = read_image(image_file)?;
    extract_features(&image)
}

pub fn compare_images(first_image_file: &Path, second_image_file: &Path) -> Result<ComparisonResult> {
    let first_image = read_image(first_image_file)?;
    let second_image = read_image(second_image_file)?;
    compare_histograms(&first_image, &second_image)
}

pub fn run(arguments: &Arguments) -> Result<Report> {
    match arguments {
        Arguments::Features { image_file } => analyze_features(image_file).map(Report::Features),
        Arguments::Compare {
            first_image_file,
            second_image_file,
        } => compare_images(first_image_file, second_image_file).map(Report::Comparison),
    }
}

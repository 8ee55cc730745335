use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidImage(String),
    PPMFileDoesNotContainRequiredToken(&'static str),
    ParsingOfTokenFailed(&'static str),
    IncompletePixelParsed(usize),
    MismatchOfSizeBetweenHeaderAndValues,
    UnableToOpenInputFileForReading(String, std::io::Error),
    FailedToReadInput(std::io::Error),
    UnableToDecodeImage(String, ::image::ImageError),
    UnsupportedImageFormat(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidImage(reason) => {
                write!(f, "Invalid image: {}", reason)
            }
            Self::PPMFileDoesNotContainRequiredToken(token_name) => {
                write!(f, "Expected token '{}' not found in PPM file", token_name)
            }
            Self::ParsingOfTokenFailed(token_name) => {
                write!(f, "Parsing of token '{}' failed", token_name)
            }
            Self::IncompletePixelParsed(number_of_tokens_parsed) => {
                write!(
                    f,
                    "Incomplete pixel parsed. Expected 3 components, but got {}.",
                    number_of_tokens_parsed
                )
            }
            Self::MismatchOfSizeBetweenHeaderAndValues => {
                write!(
                    f,
                    "Number of pixels does not match the size provided in header"
                )
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::FailedToReadInput(error) => {
                write!(f, "Failed to read image data: {}", error)
            }
            Self::UnableToDecodeImage(path, error) => {
                write!(f, "Unable to decode image '{}': {}", path, error)
            }
            Self::UnsupportedImageFormat(path) => {
                write!(f, "Image format of '{}' is not supported", path)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error) => Some(error),
            Self::FailedToReadInput(error) => Some(error),
            Self::UnableToDecodeImage(_, error) => Some(error),
            _ => None,
        }
    }
}

impl Error {
    pub(crate) fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage(reason.into())
    }
}

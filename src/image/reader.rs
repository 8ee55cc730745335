use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::Image;
use crate::error::Error;
use crate::Result;

pub mod decoded;
pub mod ppm;

pub use decoded::DecodedImageReader;
pub use ppm::PPMImageReader;

pub trait ImageReader {
    fn read_image(&mut self) -> Result<Image>;
}

const PPM_FILE_EXTENSIONS: &[&str] = &["ppm", "pgm", "pnm"];

fn path_to_string(file_path: &Path) -> String {
    file_path.to_string_lossy().into_owned()
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_to_string(file_path), e))
}

fn is_ppm_file(file_path: &Path) -> bool {
    file_path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| {
            PPM_FILE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(extension))
        })
        .unwrap_or(false)
}

/// Reads the image at `file_path`, choosing the reader by file extension.
pub fn read_image(file_path: &Path) -> Result<Image> {
    let image = if is_ppm_file(file_path) {
        let input_file = open_input_file(file_path)?;
        PPMImageReader::new(BufReader::new(input_file)).read_image()?
    } else {
        DecodedImageReader::new(file_path).read_image()?
    };
    log::info!(
        "Loaded {:?} image of {}x{} from '{}'",
        image.layout(),
        image.width(),
        image.height(),
        file_path.display()
    );
    Ok(image)
}

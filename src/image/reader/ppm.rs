use std::io::{self, ErrorKind, Read};

use super::super::{ChannelLayout, Image};
use super::ImageReader;
use crate::color::{RGBColorFormat, RangeColorFormat};
use crate::error::Error;

/// Reads plain (ASCII) portable any maps: `P3` color and `P2` gray.
pub struct PPMImageReader<T: Read> {
    reader: T,
}

impl<T: Read> PPMImageReader<T> {
    pub fn new(reader: T) -> Self {
        Self { reader }
    }
}

impl<T: Read> ImageReader for PPMImageReader<T> {
    fn read_image(&mut self) -> crate::Result<Image> {
        let mut tokenizer = PPMTokenizer::new(&mut self.reader);
        let result = PPMParser::new(&mut tokenizer).parse_tokens();
        match tokenizer.take_read_error() {
            Some(error) => Err(Error::FailedToReadInput(error)),
            None => result,
        }
    }
}

struct PPMTokenizer<'a, R: Read> {
    reader: &'a mut R,
    buffer: Vec<u8>,
    in_comment: bool,
    read_error: Option<io::Error>,
}

impl<'a, R: Read> PPMTokenizer<'a, R> {
    pub fn new(reader: &'a mut R) -> Self {
        PPMTokenizer {
            reader,
            buffer: Vec::new(),
            in_comment: false,
            read_error: None,
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.read_error = Some(e);
                    return None;
                }
            }
        }
    }

    fn take_read_error(&mut self) -> Option<io::Error> {
        self.read_error.take()
    }
}

impl<R: Read> Iterator for PPMTokenizer<'_, R> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        if self.read_error.is_some() {
            return None;
        }

        while let Some(byte) = self.read_byte() {
            if self.in_comment {
                if byte == b'\n' {
                    self.in_comment = false;
                }
                continue;
            }
            if byte == b'#' {
                self.in_comment = true;
                if !self.buffer.is_empty() {
                    break;
                }
                continue;
            }
            if byte.is_ascii_whitespace() {
                if !self.buffer.is_empty() {
                    break;
                }
            } else {
                self.buffer.push(byte);
            }
        }

        if self.read_error.is_some() || self.buffer.is_empty() {
            return None;
        }

        // non UTF-8 bytes end up as replacement characters and fail to parse later
        Some(String::from_utf8_lossy(&self.buffer).into_owned())
    }
}

const MAGIC_NUMBER_TOKEN_NAME: &str = "P2/P3 Header";
const WIDTH_HEADER_TOKEN_NAME: &str = "Width Header";
const HEIGHT_HEADER_TOKEN_NAME: &str = "Height Header";
const MAX_VALUE_HEADER_TOKEN_NAME: &str = "Max Value Header";
const COLOR_COMPONENT_VALUE_TOKEN_NAME: &str = "Color Component Value";

#[derive(Clone, Copy)]
struct Dot {
    buffer: [u16; 3],
    index: usize,
    components: usize,
}

impl Dot {
    fn new(components: usize) -> Self {
        Self {
            buffer: [u16::default(); 3],
            index: 0,
            components,
        }
    }

    fn push_color_component(&mut self, component: u16) {
        if self.is_complete() {
            return;
        }
        self.buffer[self.index] = component;
        self.index += 1;
    }

    fn is_complete(&self) -> bool {
        self.index == self.components
    }

    fn reset(&mut self) {
        self.index = 0;
    }

    fn is_empty(&self) -> bool {
        self.index == 0
    }

    fn to_range_color(self, max_value: u16) -> crate::Result<RangeColorFormat<u16>> {
        match self.components {
            1 => RangeColorFormat::gray(max_value, self.buffer[0]),
            _ => RangeColorFormat::new(max_value, self.buffer[0], self.buffer[1], self.buffer[2]),
        }
    }
}

struct PPMParser<'a, T> {
    tokenizer: &'a mut T,
}

impl<'a, T> PPMParser<'a, T>
where
    T: Iterator<Item = String>,
{
    fn new(tokenizer: &'a mut T) -> Self {
        Self { tokenizer }
    }

    fn parse_tokens(&mut self) -> crate::Result<Image> {
        let header = self.parse_header()?;
        let layout = Self::check_header_version(&header)?;
        let width = self.parse_width()?;
        let height = self.parse_height()?;
        let max_value = self.parse_max_value()?;
        let dots = self.parse_all_dots(layout.channel_count())?;
        Self::check_parsed_dots_length_match_header_information(&dots, width, height)?;
        let mut samples = Vec::with_capacity(dots.len() * layout.channel_count());
        for dot in dots {
            let rgb = RGBColorFormat::from(dot.to_range_color(max_value)?);
            match layout {
                ChannelLayout::Gray => samples.push(rgb.red),
                ChannelLayout::Rgb => samples.extend([rgb.red, rgb.green, rgb.blue]),
            }
        }
        Image::new(width, height, layout, samples)
    }

    fn check_parsed_dots_length_match_header_information(
        dots: &[Dot],
        width: usize,
        height: usize,
    ) -> crate::Result<()> {
        let expected_number_of_dots = width
            .checked_mul(height)
            .ok_or(Error::MismatchOfSizeBetweenHeaderAndValues)?;
        if dots.len() != expected_number_of_dots {
            return Err(Error::MismatchOfSizeBetweenHeaderAndValues);
        }
        Ok(())
    }

    fn check_header_version(header: &str) -> crate::Result<ChannelLayout> {
        match header {
            "P2" => Ok(ChannelLayout::Gray),
            "P3" => Ok(ChannelLayout::Rgb),
            _ => Err(Error::PPMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            )),
        }
    }

    fn parse_header(&mut self) -> crate::Result<String> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAGIC_NUMBER_TOKEN_NAME,
            ))
    }

    fn parse_width(&mut self) -> crate::Result<usize> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                WIDTH_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(WIDTH_HEADER_TOKEN_NAME))
    }

    fn parse_height(&mut self) -> crate::Result<usize> {
        self.tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                HEIGHT_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(HEIGHT_HEADER_TOKEN_NAME))
    }

    fn parse_max_value(&mut self) -> crate::Result<u16> {
        let max_value: u16 = self
            .tokenizer
            .next()
            .ok_or(Error::PPMFileDoesNotContainRequiredToken(
                MAX_VALUE_HEADER_TOKEN_NAME,
            ))?
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME))?;
        if max_value == 0 {
            return Err(Error::ParsingOfTokenFailed(MAX_VALUE_HEADER_TOKEN_NAME));
        }
        Ok(max_value)
    }

    fn parse_all_dots(&mut self, components: usize) -> crate::Result<Vec<Dot>> {
        let mut current_dot = Dot::new(components);
        let mut dots = Vec::new();
        for token in self.tokenizer.by_ref() {
            let component = Self::parse_color_value(&token)?;
            current_dot.push_color_component(component);
            if current_dot.is_complete() {
                dots.push(current_dot);
                current_dot.reset();
            }
        }
        Self::check_pixel_was_complete(&current_dot)?;
        Ok(dots)
    }

    fn check_pixel_was_complete(dot: &Dot) -> crate::Result<()> {
        if !dot.is_empty() {
            return Err(Error::IncompletePixelParsed(dot.index));
        }
        Ok(())
    }

    fn parse_color_value(token: &str) -> crate::Result<u16> {
        token
            .parse()
            .map_err(|_| Error::ParsingOfTokenFailed(COLOR_COMPONENT_VALUE_TOKEN_NAME))
    }
}

#[cfg(test)]
mod test {
    use crate::{
        error::Error,
        image::{reader::ImageReader, ChannelLayout, Image},
        Result,
    };

    use std::io::{self, Read};

    use super::PPMImageReader;

    fn parse_ppm_string(string: &str) -> Result<Image> {
        PPMImageReader::new(string.as_bytes()).read_image()
    }

    #[test]
    fn read_string() {
        let string = "P3\n# Example PPM image string\n3 2\n255\n255 0 0   0 255 0   0 0 255\n255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_string(string).unwrap();
        assert_eq!(image.height(), 2);
        assert_eq!(image.width(), 3);
        assert_eq!(image.layout(), ChannelLayout::Rgb);
        assert_eq!(&image.samples()[..6], &[255, 0, 0, 0, 255, 0]);
    }

    #[test]
    fn read_continuous_string() {
        let string = "P3 3 2 255 255 0 0   0 255 0   0 0 255 255 255 0  255 0 255  0 255 255";
        let image = parse_ppm_string(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn read_newline_string() {
        let string = "P3\n# Example PPM image newlines\n3\n2\n255\n255\n0\n0\n0\n255\n0\n0\n0\n255\n255\n255\n0\n255\n0\n255\n0\n255\n255";
        let image = parse_ppm_string(string).unwrap();
        assert_eq!(image.height(), 2);
    }

    #[test]
    fn read_trailing_comment() {
        let string = "P2 2 1 255# trailing comment\n10 20";
        let image = parse_ppm_string(string).unwrap();
        assert_eq!(image.samples(), &[10, 20]);
    }

    #[test]
    fn read_gray_string() {
        let string = "P2\n# Example PGM image\n2 2\n255\n0 64\n128 255";
        let image = parse_ppm_string(string).unwrap();
        assert_eq!(image.layout(), ChannelLayout::Gray);
        assert_eq!(image.samples(), &[0, 64, 128, 255]);
    }

    #[test]
    fn read_gray_string_with_small_max_value() {
        let string = "P2 3 1 15 0 5 15";
        let image = parse_ppm_string(string).unwrap();
        assert_eq!(image.samples(), &[0, 85, 255]);
    }

    #[test]
    fn unknown_magic_number() {
        let string = "P6\n1 1 255 0 0 0";
        if let Err(Error::PPMFileDoesNotContainRequiredToken(_)) = parse_ppm_string(string) {
            return;
        }
        panic!("Unsupported magic number not detected");
    }

    #[test]
    fn component_above_max_value() {
        let string = "P2 1 1 15 16";
        if let Err(Error::InvalidImage(_)) = parse_ppm_string(string) {
            return;
        }
        panic!("Component above max value not detected");
    }

    #[test]
    fn zero_max_value() {
        let string = "P2 1 1 0 0";
        if let Err(Error::ParsingOfTokenFailed(_)) = parse_ppm_string(string) {
            return;
        }
        panic!("Zero max value not detected");
    }

    #[test]
    fn zero_sized_image() {
        let string = "P2 0 0 255";
        if let Err(Error::InvalidImage(_)) = parse_ppm_string(string) {
            return;
        }
        panic!("Zero sized image not detected");
    }

    #[test]
    fn incomplete_pixel() {
        let string = "P3\n3 2 255 0 0 255 0 0";
        if let Err(Error::IncompletePixelParsed(n)) = parse_ppm_string(string) {
            if n != 2 {
                panic!("Number of parsed components should be 2, but was {}", n);
            }
            return;
        };
        panic!("Incomplete pixel not detected");
    }

    #[test]
    fn wrong_size() {
        let string = "P3\n3 2 255 0 0 255";
        if let Err(Error::MismatchOfSizeBetweenHeaderAndValues) = parse_ppm_string(string) {
            return;
        };
        panic!("Mismatch of size in header and actual pixels was not detected!");
    }

    #[test]
    fn header_size_overflow() {
        let string = "P2 4294967296 4294967296 255 0";
        if let Err(Error::MismatchOfSizeBetweenHeaderAndValues) = parse_ppm_string(string) {
            return;
        };
        panic!("Overflowing header size was not detected!");
    }

    struct FailingReader<'a> {
        content: &'a [u8],
    }

    impl Read for FailingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.content.is_empty() {
                return Err(io::Error::new(io::ErrorKind::Other, "device unplugged"));
            }
            self.content.read(buf)
        }
    }

    #[test]
    fn read_failure_in_pixel_data() {
        let reader = FailingReader {
            content: b"P2 2 2 255 0 64 128",
        };
        match PPMImageReader::new(reader).read_image() {
            Err(Error::FailedToReadInput(error)) => {
                assert_eq!(error.to_string(), "device unplugged")
            }
            other => panic!("Read failure was not reported, got {:?}", other),
        }
    }
}

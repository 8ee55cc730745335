use std::fmt::Display;

use crate::error::Error;

/// Fixed point weights of the ITU-R BT.601 luma transform, scaled by 2^14.
const LUMA_RED_WEIGHT: u32 = 4899;
const LUMA_GREEN_WEIGHT: u32 = 9617;
const LUMA_BLUE_WEIGHT: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUNDING: u32 = 1 << (LUMA_SHIFT - 1);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RGBColorFormat<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
}

/// A color whose components are bounded by an arbitrary maximum, as found in
/// plain PPM and PGM files.
pub struct RangeColorFormat<T> {
    max: T,
    red: T,
    green: T,
    blue: T,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LumaColorFormat {
    pub luma: u8,
}

impl RGBColorFormat<u8> {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        RGBColorFormat { red, green, blue }
    }
}

impl<T: PartialOrd<T> + Display + Copy> RangeColorFormat<T> {
    pub fn new(max: T, red: T, green: T, blue: T) -> crate::Result<Self> {
        if red > max || green > max || blue > max {
            return Err(Error::invalid_image(format!(
                "color value must not be greater than max value of {}",
                max
            )));
        }
        Ok(RangeColorFormat {
            max,
            red,
            green,
            blue,
        })
    }

    pub fn gray(max: T, value: T) -> crate::Result<Self> {
        Self::new(max, value, value, value)
    }
}

fn scale_to_u8(value: u16, max: u16) -> u8 {
    if max == u8::MAX as u16 {
        return value as u8;
    }
    let scaled = (value as u32 * u8::MAX as u32 + max as u32 / 2) / max as u32;
    scaled.min(u8::MAX as u32) as u8
}

impl From<&RangeColorFormat<u16>> for RGBColorFormat<u8> {
    fn from(value: &RangeColorFormat<u16>) -> Self {
        RGBColorFormat {
            red: scale_to_u8(value.red, value.max),
            green: scale_to_u8(value.green, value.max),
            blue: scale_to_u8(value.blue, value.max),
        }
    }
}

impl From<RangeColorFormat<u16>> for RGBColorFormat<u8> {
    fn from(value: RangeColorFormat<u16>) -> Self {
        RGBColorFormat::from(&value)
    }
}

impl From<&RGBColorFormat<u8>> for LumaColorFormat {
    fn from(value: &RGBColorFormat<u8>) -> Self {
        let weighted_red = value.red as u32 * LUMA_RED_WEIGHT;
        let weighted_green = value.green as u32 * LUMA_GREEN_WEIGHT;
        let weighted_blue = value.blue as u32 * LUMA_BLUE_WEIGHT;
        let luma = (weighted_red + weighted_green + weighted_blue + LUMA_ROUNDING) >> LUMA_SHIFT;
        // the weights sum up to 2^14, so luma never exceeds 255
        LumaColorFormat { luma: luma as u8 }
    }
}

impl From<RGBColorFormat<u8>> for LumaColorFormat {
    fn from(value: RGBColorFormat<u8>) -> Self {
        LumaColorFormat::from(&value)
    }
}

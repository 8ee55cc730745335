use std::fmt::Display;

use super::distribution::chi_square_survival;
use crate::histogram::{Histogram, NUMBER_OF_BINS};
use crate::image::{to_grayscale, Image};
use crate::Result;

pub const GOODNESS_OF_FIT_DEGREES_OF_FREEDOM: u32 = NUMBER_OF_BINS as u32 - 1;

/// Statistical descriptors of the intensity distribution of one image.
///
/// Skewness and kurtosis are NaN for images with a single intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeatureResult {
    pub skewness: f64,
    /// excess kurtosis (Fisher), 0 for a normal distribution
    pub kurtosis: f64,
    /// Shannon entropy in bits
    pub entropy: f64,
    /// chi-square goodness of fit against a uniform histogram
    pub chi_square: f64,
    pub degrees_of_freedom: u32,
    pub p_value: f64,
}

struct CentralMoments {
    second: f64,
    third: f64,
    fourth: f64,
}

impl CentralMoments {
    fn of(histogram: &Histogram) -> Self {
        let total = histogram.total() as f64;
        let mean = histogram
            .occupied_bins()
            .map(|(intensity, count)| intensity as f64 * count as f64)
            .sum::<f64>()
            / total;
        let mut moments = Self {
            second: 0.0,
            third: 0.0,
            fourth: 0.0,
        };
        for (intensity, count) in histogram.occupied_bins() {
            let deviation = intensity as f64 - mean;
            let squared = deviation * deviation;
            let count = count as f64;
            moments.second += count * squared;
            moments.third += count * squared * deviation;
            moments.fourth += count * squared * squared;
        }
        moments.second /= total;
        moments.third /= total;
        moments.fourth /= total;
        moments
    }

    fn skewness(&self) -> f64 {
        if self.second == 0.0 {
            return f64::NAN;
        }
        self.third / self.second.powf(1.5)
    }

    fn excess_kurtosis(&self) -> f64 {
        if self.second == 0.0 {
            return f64::NAN;
        }
        self.fourth / (self.second * self.second) - 3.0
    }
}

fn shannon_entropy(histogram: &Histogram) -> f64 {
    histogram
        .probabilities()
        .iter()
        .filter(|&&probability| probability > 0.0)
        .fold(0.0, |entropy, &probability| {
            entropy - probability * probability.log2()
        })
}

fn uniform_goodness_of_fit(histogram: &Histogram) -> f64 {
    let expected = histogram.total() as f64 / NUMBER_OF_BINS as f64;
    histogram
        .counts()
        .iter()
        .map(|&observed| {
            let difference = observed as f64 - expected;
            difference * difference / expected
        })
        .sum()
}

impl From<&Histogram> for FeatureResult {
    fn from(histogram: &Histogram) -> Self {
        let moments = CentralMoments::of(histogram);
        let chi_square = uniform_goodness_of_fit(histogram);
        Self {
            skewness: moments.skewness(),
            kurtosis: moments.excess_kurtosis(),
            entropy: shannon_entropy(histogram),
            chi_square,
            degrees_of_freedom: GOODNESS_OF_FIT_DEGREES_OF_FREEDOM,
            p_value: chi_square_survival(chi_square, GOODNESS_OF_FIT_DEGREES_OF_FREEDOM),
        }
    }
}

pub fn extract_features(image: &Image) -> Result<FeatureResult> {
    let gray_image = to_grayscale(image)?;
    let histogram = Histogram::from(&gray_image);
    let features = FeatureResult::from(&histogram);
    log::debug!(
        "Extracted features of {} intensities: {:?}",
        histogram.total(),
        features
    );
    Ok(features)
}

impl Display for FeatureResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Skewness: {:.4}", self.skewness)?;
        writeln!(f, "  Asymmetry of the histogram, 0 means symmetric.")?;
        writeln!(f, "Kurtosis: {:.4}", self.kurtosis)?;
        writeln!(f, "  Peakedness of the histogram, 0 means normal.")?;
        writeln!(f, "Entropy (Shannon): {:.4}", self.entropy)?;
        writeln!(f, "  Randomness or amount of information in the image.")?;
        writeln!(f, "Chi-Square (Goodness of Fit): {:.4}", self.chi_square)?;
        writeln!(
            f,
            "  Distance of the intensity distribution from a uniform one, larger means less uniform."
        )?;
        write!(
            f,
            "  p-value with {} degrees of freedom: {:.4}",
            self.degrees_of_freedom, self.p_value
        )
    }
}

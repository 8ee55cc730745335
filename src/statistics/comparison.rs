use std::fmt::Display;

use crate::histogram::{Histogram, NUMBER_OF_BINS};
use crate::image::{to_grayscale, Image};
use crate::Result;

/// Similarity of the intensity histograms of two images.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComparisonResult {
    /// NaN if one of the normalized histograms is flat
    pub pearson_correlation: f64,
    /// weighted by the first histogram, so argument order matters
    pub chi_square_distance: f64,
}

type NormalizedHistogram = [f64; NUMBER_OF_BINS];

fn mean(values: &NormalizedHistogram) -> f64 {
    values.iter().sum::<f64>() / NUMBER_OF_BINS as f64
}

fn pearson_correlation(first: &NormalizedHistogram, second: &NormalizedHistogram) -> f64 {
    let first_mean = mean(first);
    let second_mean = mean(second);
    let mut covariance = 0.0;
    let mut first_variance = 0.0;
    let mut second_variance = 0.0;
    for (&a, &b) in first.iter().zip(second.iter()) {
        let first_deviation = a - first_mean;
        let second_deviation = b - second_mean;
        covariance += first_deviation * second_deviation;
        first_variance += first_deviation * first_deviation;
        second_variance += second_deviation * second_deviation;
    }
    if first_variance == 0.0 || second_variance == 0.0 {
        return f64::NAN;
    }
    covariance / (first_variance.sqrt() * second_variance.sqrt())
}

fn chi_square_distance(first: &NormalizedHistogram, second: &NormalizedHistogram) -> f64 {
    first
        .iter()
        .zip(second.iter())
        .filter(|&(&a, _)| a > 0.0)
        .map(|(&a, &b)| (a - b) * (a - b) / a)
        .fold(0.0, |distance, term| distance + term)
}

impl ComparisonResult {
    pub fn of_histograms(first: &Histogram, second: &Histogram) -> Self {
        let first = first.min_max_normalized();
        let second = second.min_max_normalized();
        Self {
            pearson_correlation: pearson_correlation(&first, &second),
            chi_square_distance: chi_square_distance(&first, &second),
        }
    }
}

/// Compares the intensity distributions of two images. The images may have
/// different sizes.
pub fn compare_histograms(first: &Image, second: &Image) -> Result<ComparisonResult> {
    let first_histogram = Histogram::from(&to_grayscale(first)?);
    let second_histogram = Histogram::from(&to_grayscale(second)?);
    let comparison = ComparisonResult::of_histograms(&first_histogram, &second_histogram);
    log::debug!("Compared histograms: {:?}", comparison);
    Ok(comparison)
}

impl Display for ComparisonResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Pearson Correlation (Similarity): {:.4}",
            self.pearson_correlation
        )?;
        writeln!(
            f,
            "  The closer the value is to 1, the more similar the histograms are."
        )?;
        writeln!(
            f,
            "Chi-Square (Difference): {:.4}",
            self.chi_square_distance
        )?;
        write!(
            f,
            "  The closer the value is to 0, the more similar the histograms are."
        )
    }
}

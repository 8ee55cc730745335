use crate::image::GrayscaleImage;

pub const NUMBER_OF_BINS: usize = 256;

/// Intensity histogram with one bin per 8 bit value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; NUMBER_OF_BINS],
    total: u64,
}

impl Histogram {
    pub fn from_intensities(intensities: &[u8]) -> Self {
        let mut counts = [0_u64; NUMBER_OF_BINS];
        for &intensity in intensities {
            counts[intensity as usize] += 1;
        }
        Self {
            counts,
            total: intensities.len() as u64,
        }
    }

    pub fn counts(&self) -> &[u64; NUMBER_OF_BINS] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Bins with at least one sample, as `(intensity, count)`.
    pub fn occupied_bins(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(intensity, &count)| (intensity as u8, count))
    }

    /// Probability mass function, `count / total` per bin.
    pub fn probabilities(&self) -> [f64; NUMBER_OF_BINS] {
        let total = self.total as f64;
        self.counts.map(|count| count as f64 / total)
    }

    /// Scales the counts linearly so that the smallest bin becomes 0 and the
    /// largest becomes 1. A histogram with identical bins maps to all zeros.
    pub fn min_max_normalized(&self) -> [f64; NUMBER_OF_BINS] {
        let min = self.counts.iter().copied().min().unwrap_or(0) as f64;
        let max = self.counts.iter().copied().max().unwrap_or(0) as f64;
        let range = max - min;
        if range == 0.0 {
            return [0.0; NUMBER_OF_BINS];
        }
        self.counts.map(|count| (count as f64 - min) / range)
    }
}

impl From<&GrayscaleImage> for Histogram {
    fn from(value: &GrayscaleImage) -> Self {
        Histogram::from_intensities(value.intensities())
    }
}

#[cfg(test)]
mod test {
    use super::{Histogram, NUMBER_OF_BINS};

    #[test]
    fn count_intensities() {
        let histogram = Histogram::from_intensities(&[0, 0, 3, 255, 3, 3]);
        assert_eq!(histogram.counts()[0], 2);
        assert_eq!(histogram.counts()[3], 3);
        assert_eq!(histogram.counts()[255], 1);
        assert_eq!(histogram.counts()[1], 0);
        assert_eq!(histogram.total(), 6);
        assert_eq!(histogram.counts().iter().sum::<u64>(), 6);
    }

    #[test]
    fn list_occupied_bins() {
        let histogram = Histogram::from_intensities(&[9, 2, 9]);
        let occupied: Vec<(u8, u64)> = histogram.occupied_bins().collect();
        assert_eq!(occupied, vec![(2, 1), (9, 2)]);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let intensities: Vec<u8> = (0..1000).map(|i| (i * 7 % 256) as u8).collect();
        let histogram = Histogram::from_intensities(&intensities);
        let sum: f64 = histogram.probabilities().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12, "sum was {}", sum);
    }

    #[test]
    fn min_max_normalization() {
        let histogram = Histogram::from_intensities(&[0, 0, 0, 0, 1, 1]);
        let normalized = histogram.min_max_normalized();
        assert_eq!(normalized[0], 1.0);
        assert_eq!(normalized[1], 0.5);
        assert!(normalized[2..].iter().all(|&value| value == 0.0));
    }

    #[test]
    fn min_max_normalization_of_flat_histogram() {
        let intensities: Vec<u8> = (0..NUMBER_OF_BINS).map(|i| i as u8).collect();
        let histogram = Histogram::from_intensities(&intensities);
        let normalized = histogram.min_max_normalized();
        assert!(normalized.iter().all(|&value| value == 0.0));
    }
}

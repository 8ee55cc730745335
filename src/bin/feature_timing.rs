use std::time::{Duration, Instant};

use image_stats::{compare_histograms, extract_features, Image};

const IMAGE_WIDTH: usize = 3840;
const IMAGE_HEIGHT: usize = 2160;
const IMAGE_SIZE: usize = IMAGE_WIDTH * IMAGE_HEIGHT;

fn create_test_samples(offset: usize) -> Vec<u8> {
    (0..IMAGE_SIZE * 3)
        .map(|index| {
            let dot = index / 3;
            let x = dot % IMAGE_WIDTH;
            let y = dot / IMAGE_WIDTH;
            ((x + y * 8 + (index % 3) * 85 + offset) % 256) as u8
        })
        .collect()
}

fn create_test_image(offset: usize) -> Image {
    Image::rgb(IMAGE_WIDTH, IMAGE_HEIGHT, create_test_samples(offset))
        .expect("Test image dimensions must match its samples")
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

fn print_summary(name: &str, durations: &[Duration]) {
    let min_duration = durations.iter().min().unwrap();
    let max_duration = durations.iter().max().unwrap();
    let avg_duration = durations.iter().sum::<Duration>() / durations.len() as u32;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, durations);

    println!(
        "{}: Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        name,
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
}

const NUMBER_OF_ROUNDS: u32 = 10;

fn main() {
    println!("Creating test images");
    let first_image = create_test_image(0);
    let second_image = create_test_image(17);
    let mut feature_durations: Vec<Duration> = Vec::new();
    let mut comparison_durations: Vec<Duration> = Vec::new();

    for round in 1..=NUMBER_OF_ROUNDS {
        println!("Starting round {}", round);

        let start = Instant::now();
        let features = extract_features(&first_image).expect("Feature extraction failed");
        feature_durations.push(start.elapsed());

        let start = Instant::now();
        let comparison =
            compare_histograms(&first_image, &second_image).expect("Comparison failed");
        comparison_durations.push(start.elapsed());

        println!(
            "Finished round {}: entropy {:.4}, correlation {:.4}",
            round, features.entropy, comparison.pearson_correlation,
        );
    }

    print_summary("Feature extraction", &feature_durations);
    print_summary("Histogram comparison", &comparison_durations);
}

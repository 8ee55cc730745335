pub mod comparison;
pub mod distribution;
pub mod features;

pub use comparison::{compare_histograms, ComparisonResult};
pub use features::{extract_features, FeatureResult};

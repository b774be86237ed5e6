// Analyzer module: moving averages, crossover detection and their composition.

pub mod crossover;
pub mod moving_average;
pub mod price_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, CrossoverAnalyzer};

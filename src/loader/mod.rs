pub mod fetcher;
pub mod traits;

pub use fetcher::YahooLoader;
pub use traits::SeriesLoader;

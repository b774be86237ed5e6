use crate::model::{LoaderError, PriceSeries, SeriesRequest};

#[async_trait::async_trait]
pub trait SeriesLoader: Send + Sync {
    /// Fetches a validated series holding at least `req.min_bars` bars.
    async fn load(&self, req: &SeriesRequest) -> Result<PriceSeries, LoaderError>;
}

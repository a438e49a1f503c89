/// Remote market-data API module
///
/// Defines the `MarketDataApi` seam consumed by the jobs and the reqwest
/// implementation speaking the broker's REST surface.

pub mod client;
pub mod models;

pub use client::{DatasourceError, MarketDataApi, RestClient};
pub use models::{CandlePayload, MarketInstrument};

// Library Crate Root
// lib.rs

pub mod config;
pub mod database;
pub mod datasource;
pub mod jobs;

pub use config::Config;
pub use database::{establish_connection_pool, DatabasePool};
pub use datasource::{MarketDataApi, RestClient};
pub use jobs::{DailyCandleSyncJob, HourlyCandleSyncJob, StockSyncJob, SyncReport};

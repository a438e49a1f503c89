use crate::database::enums::Resolution;
use crate::database::repositories::{CandleRepository, InstrumentRepository};
use crate::datasource::{DatasourceError, MarketDataApi};
use crate::jobs::windows::daily_window;
use crate::jobs::{candle_row, FailedUnit, JobError, SyncReport};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Pause applied after a rate-limit signal at daily resolution
pub const DAILY_RATE_LIMIT_PAUSE: Duration = Duration::from_secs(60);

/// Daily candle synchronization job
///
/// For each cataloged instrument without any stored daily candles, fetches
/// the fixed one-year window in a single request and appends the normalized
/// rows in one bulk insert. The loop index only advances once an instrument
/// is resolved: a rate-limit signal pauses and retries the same instrument,
/// an unexpected error records it and moves on.
pub struct DailyCandleSyncJob {
    instrument_repository: Arc<dyn InstrumentRepository>,
    candle_repository: Arc<dyn CandleRepository>,
    api: Arc<dyn MarketDataApi>,
    rate_limit_pause: Duration,
}

impl DailyCandleSyncJob {
    /// Create a new daily candle sync job
    pub fn new(
        instrument_repository: Arc<dyn InstrumentRepository>,
        candle_repository: Arc<dyn CandleRepository>,
        api: Arc<dyn MarketDataApi>,
    ) -> Self {
        Self {
            instrument_repository,
            candle_repository,
            api,
            rate_limit_pause: DAILY_RATE_LIMIT_PAUSE,
        }
    }

    /// Override the rate-limit pause (tests use a zero pause)
    pub fn with_rate_limit_pause(mut self, pause: Duration) -> Self {
        self.rate_limit_pause = pause;
        self
    }

    /// Perform the daily candle sync
    pub async fn run(&self) -> Result<SyncReport, JobError> {
        tracing::info!("Starting daily candle sync");

        let figi_list = self.instrument_repository.figis()?;
        let done: HashSet<String> = self
            .candle_repository
            .distinct_figis(Resolution::Day)?
            .into_iter()
            .collect();
        let window = daily_window();

        let mut report = SyncReport::default();
        let mut i = 0;

        while i < figi_list.len() {
            let figi = &figi_list[i];

            if done.contains(figi) {
                report.skipped_instruments += 1;
                i += 1;
                continue;
            }

            tracing::info!(index = i, figi = %figi, "Fetching daily candles");

            match self
                .api
                .get_candles(figi, window.from, window.to, Resolution::Day)
                .await
            {
                Ok(candles) => {
                    if candles.is_empty() {
                        // No data available is not an error; the instrument
                        // simply stays without daily history.
                        tracing::debug!(figi = %figi, "No daily candles available");
                        i += 1;
                        continue;
                    }

                    let now = Utc::now().naive_utc();
                    let rows: Vec<_> = candles
                        .iter()
                        .map(|candle| candle_row(candle, figi, Resolution::Day, now))
                        .collect();

                    let inserted = self.candle_repository.insert_batch(Resolution::Day, &rows)?;
                    report.inserted_rows += inserted;
                    report.synced_instruments += 1;
                    i += 1;
                }
                Err(DatasourceError::RateLimited) => {
                    tracing::warn!(
                        figi = %figi,
                        pause_secs = self.rate_limit_pause.as_secs(),
                        "Rate limit hit, pausing before retrying the same instrument"
                    );
                    tokio::time::sleep(self.rate_limit_pause).await;
                }
                Err(DatasourceError::Unexpected(message)) => {
                    tracing::warn!(
                        figi = %figi,
                        error = %message,
                        "Unexpected API error, abandoning instrument for this run"
                    );
                    report.failed.push(FailedUnit {
                        figi: figi.clone(),
                        window: None,
                        error: message,
                    });
                    i += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        tracing::info!(
            synced = report.synced_instruments,
            skipped = report.skipped_instruments,
            failed = report.failed.len(),
            "Daily candle sync completed"
        );

        Ok(report)
    }
}

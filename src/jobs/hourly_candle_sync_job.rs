use crate::database::enums::Resolution;
use crate::database::repositories::{CandleRepository, InstrumentRepository};
use crate::datasource::{DatasourceError, MarketDataApi};
use crate::jobs::windows::hourly_windows;
use crate::jobs::{candle_row, FailedUnit, JobError, SyncReport};
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Pause applied after a rate-limit signal at hourly resolution
pub const HOURLY_RATE_LIMIT_PAUSE: Duration = Duration::from_secs(30);

/// Hourly candle synchronization job
///
/// Same skip/advance structure as the daily job, but history is fetched in
/// 52 consecutive 7-day windows because the broker caps the retrievable
/// span at hourly resolution. The outer loop only advances to the next
/// instrument after all 52 windows have been attempted; no per-window
/// progress is persisted, so an interrupted instrument restarts from window
/// 0 on the next run.
pub struct HourlyCandleSyncJob {
    instrument_repository: Arc<dyn InstrumentRepository>,
    candle_repository: Arc<dyn CandleRepository>,
    api: Arc<dyn MarketDataApi>,
    rate_limit_pause: Duration,
}

impl HourlyCandleSyncJob {
    /// Create a new hourly candle sync job
    pub fn new(
        instrument_repository: Arc<dyn InstrumentRepository>,
        candle_repository: Arc<dyn CandleRepository>,
        api: Arc<dyn MarketDataApi>,
    ) -> Self {
        Self {
            instrument_repository,
            candle_repository,
            api,
            rate_limit_pause: HOURLY_RATE_LIMIT_PAUSE,
        }
    }

    /// Override the rate-limit pause (tests use a zero pause)
    pub fn with_rate_limit_pause(mut self, pause: Duration) -> Self {
        self.rate_limit_pause = pause;
        self
    }

    /// Perform the hourly candle sync
    pub async fn run(&self) -> Result<SyncReport, JobError> {
        tracing::info!("Starting hourly candle sync");

        let figi_list = self.instrument_repository.figis()?;
        let done: HashSet<String> = self
            .candle_repository
            .distinct_figis(Resolution::Hour)?
            .into_iter()
            .collect();
        let windows = hourly_windows();

        let mut report = SyncReport::default();
        let mut i = 0;

        while i < figi_list.len() {
            let figi = &figi_list[i];

            if done.contains(figi) {
                report.skipped_instruments += 1;
                i += 1;
                continue;
            }

            tracing::info!(index = i, figi = %figi, "Fetching hourly candles");

            let mut j = 0;
            while j < windows.len() {
                let window = &windows[j];

                match self
                    .api
                    .get_candles(figi, window.from, window.to, Resolution::Hour)
                    .await
                {
                    Ok(candles) => {
                        if candles.is_empty() {
                            j += 1;
                            continue;
                        }

                        let now = Utc::now().naive_utc();
                        let rows: Vec<_> = candles
                            .iter()
                            .map(|candle| candle_row(candle, figi, Resolution::Hour, now))
                            .collect();

                        let inserted =
                            self.candle_repository.insert_batch(Resolution::Hour, &rows)?;
                        report.inserted_rows += inserted;
                        j += 1;
                    }
                    Err(DatasourceError::RateLimited) => {
                        tracing::warn!(
                            figi = %figi,
                            window = %window,
                            pause_secs = self.rate_limit_pause.as_secs(),
                            "Rate limit hit, pausing before retrying the same window"
                        );
                        tokio::time::sleep(self.rate_limit_pause).await;
                    }
                    Err(DatasourceError::Unexpected(message)) => {
                        // The window's candles are lost for this run: the
                        // instrument will be marked done by any other window
                        // that inserts rows.
                        tracing::warn!(
                            figi = %figi,
                            window = %window,
                            error = %message,
                            "Unexpected API error, abandoning window"
                        );
                        report.failed.push(FailedUnit {
                            figi: figi.clone(),
                            window: Some(window.clone()),
                            error: message,
                        });
                        j += 1;
                    }
                    Err(err) => return Err(err.into()),
                }
            }

            report.synced_instruments += 1;
            i += 1;
        }

        tracing::info!(
            synced = report.synced_instruments,
            skipped = report.skipped_instruments,
            failed = report.failed.len(),
            "Hourly candle sync completed"
        );

        Ok(report)
    }
}

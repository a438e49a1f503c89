use crate::jobs::windows::CandleWindow;

/// One unit (instrument, or instrument + window) abandoned during a run
///
/// The unit wrote no rows and will be retried from scratch on the next full
/// run; hourly windows are the exception, where the surrounding instrument
/// may still end up marked done by its other windows.
#[derive(Debug, Clone)]
pub struct FailedUnit {
    pub figi: String,
    /// Present for the hourly job, where failures are per-window
    pub window: Option<CandleWindow>,
    pub error: String,
}

/// Structured result of one sync run
///
/// Replaces the original in-memory error list: binaries log the summary and
/// every failed unit at the end of the run.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Rows written across all tables touched by the job
    pub inserted_rows: usize,

    /// Instruments fetched and ingested during this run
    pub synced_instruments: usize,

    /// Instruments skipped because local rows already existed
    pub skipped_instruments: usize,

    /// Units abandoned after an unexpected remote error
    pub failed: Vec<FailedUnit>,
}

impl SyncReport {
    /// Log the run summary and each failed unit
    pub fn log_summary(&self, job_name: &str) {
        tracing::info!(
            job = job_name,
            inserted_rows = self.inserted_rows,
            synced = self.synced_instruments,
            skipped = self.skipped_instruments,
            failed = self.failed.len(),
            "Sync run completed"
        );

        for unit in &self.failed {
            match &unit.window {
                Some(window) => tracing::warn!(
                    figi = %unit.figi,
                    window = %window,
                    error = %unit.error,
                    "Window abandoned during run"
                ),
                None => tracing::warn!(
                    figi = %unit.figi,
                    error = %unit.error,
                    "Instrument abandoned during run"
                ),
            }
        }
    }
}

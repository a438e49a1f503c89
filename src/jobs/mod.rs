/// Batch ingestion jobs
///
/// Three one-shot jobs share the incremental-sync pattern: enumerate the
/// instrument universe, skip what is already stored, fetch the rest in
/// bounded windows and append. Catalog sync must run before either candle
/// sync; the candle jobs are independent of each other.

pub mod daily_candle_sync_job;
pub mod hourly_candle_sync_job;
pub mod report;
pub mod stock_sync_job;
pub mod windows;

pub use daily_candle_sync_job::DailyCandleSyncJob;
pub use hourly_candle_sync_job::HourlyCandleSyncJob;
pub use report::{FailedUnit, SyncReport};
pub use stock_sync_job::StockSyncJob;
pub use windows::{daily_window, hourly_windows, CandleWindow};

use crate::database::enums::Resolution;
use crate::database::models::NewCandle;
use crate::database::DatabaseError;
use crate::datasource::{CandlePayload, DatasourceError};
use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Errors that abort a sync run
///
/// Rate-limit and unexpected-error signals are handled inside the job loops
/// and never reach this type.
#[derive(Debug, Error)]
pub enum JobError {
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("datasource error: {0}")]
    Datasource(#[from] DatasourceError),
}

/// Normalize one wire candle into a storable row
///
/// Maps the broker's short field names onto the table columns, casts the
/// decimal prices to f64 and tags the row with resolution and ingestion
/// time. The requested FIGI is used rather than the echoed one.
pub(crate) fn candle_row(
    payload: &CandlePayload,
    figi: &str,
    resolution: Resolution,
    update_date: NaiveDateTime,
) -> NewCandle {
    NewCandle {
        update_date,
        price_date: payload.time.naive_utc(),
        figi: figi.to_string(),
        close_price: payload.close.to_f64().unwrap_or_default(),
        open_price: payload.open.to_f64().unwrap_or_default(),
        high_price: payload.high.to_f64().unwrap_or_default(),
        low_price: payload.low.to_f64().unwrap_or_default(),
        resolution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    #[test]
    fn test_candle_row_normalization() {
        let payload = CandlePayload {
            figi: "BBG000B9XRY4".to_string(),
            interval: "day".to_string(),
            open: dec!(100.5),
            close: dec!(101.25),
            high: dec!(102.0),
            low: dec!(99.75),
            volume: 5000,
            time: Utc.with_ymd_and_hms(2021, 1, 4, 7, 0, 0).unwrap(),
        };
        let now = Utc::now().naive_utc();

        let row = candle_row(&payload, "FIGI001", Resolution::Day, now);

        assert_eq!(row.figi, "FIGI001");
        assert_eq!(row.open_price, 100.5);
        assert_eq!(row.close_price, 101.25);
        assert_eq!(row.high_price, 102.0);
        assert_eq!(row.low_price, 99.75);
        assert_eq!(row.resolution, Resolution::Day);
        assert_eq!(
            row.price_date,
            Utc.with_ymd_and_hms(2021, 1, 4, 7, 0, 0).unwrap().naive_utc()
        );
        assert_eq!(row.update_date, now);
    }
}

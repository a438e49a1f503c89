use crate::database::models::NewInstrument;
use crate::database::repositories::InstrumentRepository;
use crate::datasource::MarketDataApi;
use crate::jobs::{JobError, SyncReport};
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use std::collections::HashSet;
use std::sync::Arc;

/// Instrument catalog synchronization job
///
/// Fetches the complete tradable-instrument list and inserts the entries
/// whose FIGI is not yet stored. Existing rows are never updated. Any remote
/// or storage failure propagates and aborts the run; there is no retry.
pub struct StockSyncJob {
    instrument_repository: Arc<dyn InstrumentRepository>,
    api: Arc<dyn MarketDataApi>,
}

impl StockSyncJob {
    /// Create a new catalog sync job
    pub fn new(
        instrument_repository: Arc<dyn InstrumentRepository>,
        api: Arc<dyn MarketDataApi>,
    ) -> Self {
        Self {
            instrument_repository,
            api,
        }
    }

    /// Perform the catalog sync
    pub async fn run(&self) -> Result<SyncReport, JobError> {
        tracing::info!("Starting instrument catalog sync");

        let instruments = self.api.list_stocks().await?;
        let known: HashSet<String> = self.instrument_repository.figis()?.into_iter().collect();

        let mut report = SyncReport::default();

        for instrument in instruments {
            if known.contains(&instrument.figi) {
                report.skipped_instruments += 1;
                continue;
            }

            let row = NewInstrument {
                figi: instrument.figi.clone(),
                update_date: Utc::now().naive_utc(),
                currency: instrument.currency,
                isin: instrument.isin,
                lot: instrument.lot,
                min_price_increment: instrument
                    .min_price_increment
                    .and_then(|increment| increment.to_f64()),
                name: instrument.name,
                ticker: instrument.ticker,
                instrument_type: instrument.instrument_type,
                min_quantity: instrument.min_quantity,
            };

            self.instrument_repository.insert(row)?;
            report.inserted_rows += 1;
            report.synced_instruments += 1;

            tracing::debug!(figi = %instrument.figi, "Inserted instrument");
        }

        tracing::info!(
            inserted = report.synced_instruments,
            skipped = report.skipped_instruments,
            "Instrument catalog sync completed"
        );

        Ok(report)
    }
}

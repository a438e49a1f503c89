use crate::database::connection::{DatabaseError, SqlitePooledConnection};
use crate::database::enums::Resolution;
use crate::database::models::{Candle, NewCandle};
use crate::database::schema::{stocks_daily, stocks_hourly};
use diesel::prelude::*;
use std::sync::Arc;

/// Candle repository trait - defines interface for candle persistence
///
/// The resolution argument selects between `stocks_daily` and
/// `stocks_hourly`; the two tables have identical shape.
pub trait CandleRepository: Send + Sync {
    /// FIGIs with at least one stored candle at the given resolution
    ///
    /// This is the per-instrument "done" marker: any row at all counts,
    /// so a partially-ingested instrument is treated as complete.
    fn distinct_figis(&self, resolution: Resolution) -> Result<Vec<String>, DatabaseError>;

    /// Append a batch of candles in one bulk insert
    fn insert_batch(
        &self,
        resolution: Resolution,
        rows: &[NewCandle],
    ) -> Result<usize, DatabaseError>;

    /// Load all candles for one instrument, ordered by price date
    fn load_for_figi(
        &self,
        resolution: Resolution,
        figi: &str,
    ) -> Result<Vec<Candle>, DatabaseError>;
}

/// Concrete implementation of CandleRepository
pub struct CandleRepositoryImpl {
    get_conn: Arc<dyn Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync>,
}

impl CandleRepositoryImpl {
    /// Create new candle repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<SqlitePooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }
}

// The daily and hourly tables are distinct types to diesel, so every
// operation dispatches on resolution and binds the matching DSL.
impl CandleRepository for CandleRepositoryImpl {
    fn distinct_figis(&self, resolution: Resolution) -> Result<Vec<String>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        match resolution {
            Resolution::Day => stocks_daily::table
                .select(stocks_daily::figi)
                .distinct()
                .load::<String>(&mut conn),
            Resolution::Hour => stocks_hourly::table
                .select(stocks_hourly::figi)
                .distinct()
                .load::<String>(&mut conn),
        }
        .map_err(DatabaseError::from)
    }

    fn insert_batch(
        &self,
        resolution: Resolution,
        rows: &[NewCandle],
    ) -> Result<usize, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        match resolution {
            Resolution::Day => {
                let values: Vec<_> = rows
                    .iter()
                    .map(|row| {
                        (
                            stocks_daily::update_date.eq(row.update_date),
                            stocks_daily::price_date.eq(row.price_date),
                            stocks_daily::figi.eq(row.figi.as_str()),
                            stocks_daily::close_price.eq(row.close_price),
                            stocks_daily::open_price.eq(row.open_price),
                            stocks_daily::high_price.eq(row.high_price),
                            stocks_daily::low_price.eq(row.low_price),
                            stocks_daily::resolution.eq(row.resolution),
                        )
                    })
                    .collect();

                diesel::insert_into(stocks_daily::table)
                    .values(&values)
                    .execute(&mut conn)
            }
            Resolution::Hour => {
                let values: Vec<_> = rows
                    .iter()
                    .map(|row| {
                        (
                            stocks_hourly::update_date.eq(row.update_date),
                            stocks_hourly::price_date.eq(row.price_date),
                            stocks_hourly::figi.eq(row.figi.as_str()),
                            stocks_hourly::close_price.eq(row.close_price),
                            stocks_hourly::open_price.eq(row.open_price),
                            stocks_hourly::high_price.eq(row.high_price),
                            stocks_hourly::low_price.eq(row.low_price),
                            stocks_hourly::resolution.eq(row.resolution),
                        )
                    })
                    .collect();

                diesel::insert_into(stocks_hourly::table)
                    .values(&values)
                    .execute(&mut conn)
            }
        }
        .map_err(DatabaseError::from)
    }

    fn load_for_figi(
        &self,
        resolution: Resolution,
        figi: &str,
    ) -> Result<Vec<Candle>, DatabaseError> {
        let mut conn = (self.get_conn)()?;

        match resolution {
            Resolution::Day => stocks_daily::table
                .filter(stocks_daily::figi.eq(figi))
                .order(stocks_daily::price_date.asc())
                .load::<Candle>(&mut conn),
            Resolution::Hour => stocks_hourly::table
                .filter(stocks_hourly::figi.eq(figi))
                .order(stocks_hourly::price_date.asc())
                .load::<Candle>(&mut conn),
        }
        .map_err(DatabaseError::from)
    }
}

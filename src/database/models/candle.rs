use crate::database::enums::Resolution;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// OHLC candle entity
///
/// `stocks_daily` and `stocks_hourly` share this shape; the `Queryable`
/// derive is deliberately not tied to one table so rows from either can be
/// loaded. Primary key is (price_date, figi); rows are append-only.
#[derive(Debug, Clone, Queryable, Serialize, Deserialize)]
pub struct Candle {
    /// Wall-clock time the row was ingested
    pub update_date: NaiveDateTime,

    /// Candle open time (part of the primary key)
    pub price_date: NaiveDateTime,

    /// Instrument identifier (part of the primary key)
    pub figi: String,

    /// Closing price
    pub close_price: f64,

    /// Opening price
    pub open_price: f64,

    /// Highest price in the bucket
    pub high_price: f64,

    /// Lowest price in the bucket
    pub low_price: f64,

    /// Resolution tag (stored in the `type` column)
    pub resolution: Resolution,
}

/// New candle row for insertion
///
/// Field values are already normalized: wire decimals cast to f64 and the
/// candle time reduced to a naive UTC timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCandle {
    pub update_date: NaiveDateTime,
    pub price_date: NaiveDateTime,
    pub figi: String,
    pub close_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub resolution: Resolution,
}

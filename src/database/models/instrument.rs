use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Instrument entity - one row per tradable security in the `stocks` table
///
/// Rows are created once by the catalog sync and never updated or deleted by
/// the ingestion jobs; metadata drift since the first sync is not captured.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::stocks)]
#[diesel(primary_key(figi))]
pub struct Instrument {
    /// Financial Instrument Global Identifier (primary key)
    pub figi: String,

    /// Wall-clock time the row was ingested
    pub update_date: NaiveDateTime,

    /// Trading currency code
    pub currency: String,

    /// International Securities Identification Number
    pub isin: String,

    /// Lot size
    pub lot: i32,

    /// Minimum price increment; the broker omits it for some instruments
    pub min_price_increment: Option<f64>,

    /// Human-readable display name
    pub name: String,

    /// Exchange ticker
    pub ticker: String,

    /// Instrument type tag (stored in the `type` column)
    pub instrument_type: String,

    /// Minimum order quantity, when the broker reports one
    pub min_quantity: Option<i32>,
}

/// New instrument for insertion
#[derive(Debug, Clone, Insertable, Serialize, Deserialize)]
#[diesel(table_name = crate::database::schema::stocks)]
pub struct NewInstrument {
    pub figi: String,
    pub update_date: NaiveDateTime,
    pub currency: String,
    pub isin: String,
    pub lot: i32,
    pub min_price_increment: Option<f64>,
    pub name: String,
    pub ticker: String,
    pub instrument_type: String,
    pub min_quantity: Option<i32>,
}

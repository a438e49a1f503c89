use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Generic REST envelope: `{"trackingId", "status", "payload"}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub tracking_id: Option<String>,
    pub status: String,
    pub payload: T,
}

/// Error payload carried by non-success envelopes
#[derive(Debug, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    pub code: Option<String>,
}

/// Payload of `GET /market/stocks`
#[derive(Debug, Deserialize)]
pub struct MarketInstrumentList {
    pub total: Option<i64>,
    pub instruments: Vec<MarketInstrument>,
}

/// One tradable instrument as reported by the broker
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInstrument {
    pub figi: String,
    pub ticker: String,
    pub isin: String,
    /// Decimal on the wire; cast to f64 before storage
    pub min_price_increment: Option<Decimal>,
    pub lot: i32,
    pub min_quantity: Option<i32>,
    pub currency: String,
    pub name: String,
    #[serde(rename = "type")]
    pub instrument_type: String,
}

/// Payload of `GET /market/candles`
#[derive(Debug, Deserialize)]
pub struct CandleList {
    pub figi: String,
    pub interval: String,
    pub candles: Vec<CandlePayload>,
}

/// One OHLC candle as reported by the broker
///
/// Prices arrive under single-letter keys (`o`/`c`/`h`/`l`) as decimals.
#[derive(Debug, Clone, Deserialize)]
pub struct CandlePayload {
    pub figi: String,
    pub interval: String,
    #[serde(rename = "o")]
    pub open: Decimal,
    #[serde(rename = "c")]
    pub close: Decimal,
    #[serde(rename = "h")]
    pub high: Decimal,
    #[serde(rename = "l")]
    pub low: Decimal,
    #[serde(rename = "v")]
    pub volume: i64,
    pub time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_candle_payload() {
        let json = r#"{
            "figi": "BBG000B9XRY4",
            "interval": "day",
            "o": 132.5,
            "c": 134.25,
            "h": 135.0,
            "l": 131.75,
            "v": 120000,
            "time": "2021-01-04T07:00:00Z"
        }"#;

        let candle: CandlePayload = serde_json::from_str(json).unwrap();
        assert_eq!(candle.figi, "BBG000B9XRY4");
        assert_eq!(candle.open, dec!(132.5));
        assert_eq!(candle.close, dec!(134.25));
        assert_eq!(candle.high, dec!(135.0));
        assert_eq!(candle.low, dec!(131.75));
        assert_eq!(candle.volume, 120000);
    }

    #[test]
    fn test_deserialize_instrument_with_missing_optionals() {
        let json = r#"{
            "figi": "BBG000B9XRY4",
            "ticker": "AAPL",
            "isin": "US0378331005",
            "lot": 1,
            "currency": "USD",
            "name": "Apple",
            "type": "Stock"
        }"#;

        let instrument: MarketInstrument = serde_json::from_str(json).unwrap();
        assert_eq!(instrument.ticker, "AAPL");
        assert!(instrument.min_price_increment.is_none());
        assert!(instrument.min_quantity.is_none());
    }

    #[test]
    fn test_deserialize_stocks_envelope() {
        let json = r#"{
            "trackingId": "abc123",
            "status": "Ok",
            "payload": {
                "total": 1,
                "instruments": [{
                    "figi": "BBG000B9XRY4",
                    "ticker": "AAPL",
                    "isin": "US0378331005",
                    "minPriceIncrement": 0.01,
                    "lot": 1,
                    "minQuantity": 1,
                    "currency": "USD",
                    "name": "Apple",
                    "type": "Stock"
                }]
            }
        }"#;

        let response: ApiResponse<MarketInstrumentList> = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "Ok");
        assert_eq!(response.payload.instruments.len(), 1);
        assert_eq!(
            response.payload.instruments[0].min_price_increment,
            Some(dec!(0.01))
        );
    }
}

// Table definitions matching the embedded migrations under migrations/.
// The `type` column carries the instrument kind on `stocks` and the candle
// resolution tag on the candle tables; both are mapped to non-reserved Rust
// names via #[sql_name].

diesel::table! {
    stocks (figi) {
        figi -> Text,
        update_date -> Timestamp,
        currency -> Text,
        isin -> Text,
        lot -> Integer,
        min_price_increment -> Nullable<Double>,
        name -> Text,
        ticker -> Text,
        #[sql_name = "type"]
        instrument_type -> Text,
        min_quantity -> Nullable<Integer>,
    }
}

diesel::table! {
    stocks_daily (price_date, figi) {
        update_date -> Timestamp,
        price_date -> Timestamp,
        figi -> Text,
        close_price -> Double,
        open_price -> Double,
        high_price -> Double,
        low_price -> Double,
        #[sql_name = "type"]
        resolution -> Text,
    }
}

diesel::table! {
    stocks_hourly (price_date, figi) {
        update_date -> Timestamp,
        price_date -> Timestamp,
        figi -> Text,
        close_price -> Double,
        open_price -> Double,
        high_price -> Double,
        low_price -> Double,
        #[sql_name = "type"]
        resolution -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(stocks, stocks_daily, stocks_hourly,);

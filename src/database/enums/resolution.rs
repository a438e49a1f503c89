use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::Sqlite;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candle resolution enumeration
///
/// The time-bucket granularity of a candle series. Stored in the `type`
/// column of the candle tables and sent verbatim as the `interval` query
/// parameter of the broker API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = Text)]
pub enum Resolution {
    #[serde(rename = "day")]
    Day,

    #[serde(rename = "hour")]
    Hour,
}

impl Resolution {
    /// Convert enum to database/API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Day => "day",
            Resolution::Hour => "hour",
        }
    }

    /// Parse string to Resolution enum
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "day" => Some(Resolution::Day),
            "hour" => Some(Resolution::Hour),
            _ => None,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Diesel ToSql implementation - convert Rust enum to SQL TEXT
impl ToSql<Text, Sqlite> for Resolution {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str());
        Ok(IsNull::No)
    }
}

// Diesel FromSql implementation - convert SQL TEXT to Rust enum
impl FromSql<Text, Sqlite> for Resolution {
    fn from_sql(
        bytes: <Sqlite as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        Resolution::from_str(&text)
            .ok_or_else(|| format!("Invalid resolution value: {}", text).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_as_str() {
        assert_eq!(Resolution::Day.as_str(), "day");
        assert_eq!(Resolution::Hour.as_str(), "hour");
    }

    #[test]
    fn test_resolution_from_str() {
        assert_eq!(Resolution::from_str("day"), Some(Resolution::Day));
        assert_eq!(Resolution::from_str("hour"), Some(Resolution::Hour));
        assert_eq!(Resolution::from_str("minute"), None);
        assert_eq!(Resolution::from_str("DAY"), None);
    }

    #[test]
    fn test_resolution_serde_rename() {
        assert_eq!(serde_json::to_string(&Resolution::Day).unwrap(), "\"day\"");
        assert_eq!(
            serde_json::from_str::<Resolution>("\"hour\"").unwrap(),
            Resolution::Hour
        );
    }
}

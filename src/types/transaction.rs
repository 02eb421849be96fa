//! Transaction records consumed by the evaluation engine.

use crate::error::EvalError;
use chrono::{DateTime, Datelike, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Calendar year-month key within which investigative capacity is constrained.
///
/// Periods order chronologically and render as `YYYY-MM`, which is also the
/// serialized form (so period-keyed maps stay valid JSON objects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period key, validating the month.
    pub fn new(year: i32, month: u32) -> Result<Self, EvalError> {
        if !(1..=12).contains(&month) {
            return Err(EvalError::InvalidPeriod(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Period of the calendar month containing `timestamp`.
    pub fn from_datetime(timestamp: &DateTime<Utc>) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    /// Period of the calendar month containing the naive `timestamp`.
    pub fn from_naive_datetime(timestamp: &NaiveDateTime) -> Self {
        Self {
            year: timestamp.year(),
            month: timestamp.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EvalError::InvalidPeriod(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Period::new(year, month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: EvalError| D::Error::custom(e.to_string()))
    }
}

/// A labeled, optionally scored transaction.
///
/// Produced by upstream ingestion and model inference; never mutated by the
/// evaluation core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction identifier (the dataset's `eventId`).
    pub id: String,

    /// Calendar month the transaction occurred in.
    pub period: Period,

    /// Transaction amount; finite and non-negative.
    pub amount: f64,

    /// Whether the transaction was confirmed fraudulent.
    pub is_fraud: bool,

    /// Model-assigned risk score, joined by id. Required only for ranked
    /// evaluation; the random baseline ignores it.
    pub score: Option<f64>,
}

impl Transaction {
    /// Create a transaction, validating the amount.
    pub fn new(
        id: impl Into<String>,
        period: Period,
        amount: f64,
        is_fraud: bool,
        score: Option<f64>,
    ) -> Result<Self, EvalError> {
        let id = id.into();
        if !amount.is_finite() || amount < 0.0 {
            return Err(EvalError::InvalidAmount { id, amount });
        }
        Ok(Self {
            id,
            period,
            amount,
            is_fraud,
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(year: i32, month: u32) -> Period {
        Period::new(year, month).unwrap()
    }

    #[test]
    fn test_period_display_and_parse() {
        let p = period(2017, 3);
        assert_eq!(p.to_string(), "2017-03");
        assert_eq!("2017-03".parse::<Period>().unwrap(), p);
    }

    #[test]
    fn test_period_rejects_bad_month() {
        assert!(Period::new(2017, 0).is_err());
        assert!(Period::new(2017, 13).is_err());
        assert!("2017-13".parse::<Period>().is_err());
        assert!("not-a-period".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_orders_chronologically() {
        assert!(period(2016, 12) < period(2017, 1));
        assert!(period(2017, 1) < period(2017, 2));
    }

    #[test]
    fn test_period_from_datetime() {
        let ts = "2017-05-14T09:30:00"
            .parse::<NaiveDateTime>()
            .unwrap()
            .and_utc();
        assert_eq!(Period::from_datetime(&ts), period(2017, 5));
    }

    #[test]
    fn test_transaction_validates_amount() {
        let p = period(2017, 1);
        assert!(Transaction::new("tx-1", p, 10.0, false, None).is_ok());
        assert!(Transaction::new("tx-2", p, 0.0, true, Some(0.5)).is_ok());

        let err = Transaction::new("tx-3", p, -1.0, false, None).unwrap_err();
        assert!(matches!(err, EvalError::InvalidAmount { .. }));
        assert!(Transaction::new("tx-4", p, f64::NAN, false, None).is_err());
        assert!(Transaction::new("tx-5", p, f64::INFINITY, false, None).is_err());
    }

    #[test]
    fn test_transaction_serialization() {
        let tx =
            Transaction::new("tx-1", period(2017, 1), 25.0, true, Some(0.9)).unwrap();

        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"2017-01\""));

        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, deserialized);
    }
}

use crate::BingoError;
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar day in `YYYY-MM-DD` form.
///
/// The key seeds the daily card and invalidates persisted sessions from other
/// days. The seed derivation is part of the card's stability contract:
/// changing it reshuffles every historical card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Parse a strict, zero padded `YYYY-MM-DD` key.
    pub fn parse(s: &str) -> Result<Self, BingoError> {
        let invalid = || BingoError::InvalidDateKey(s.to_string());

        let bytes = s.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(invalid());
        }
        if !bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
        if date.year() < 1 {
            return Err(invalid());
        }
        Ok(Self(date))
    }

    /// Wrap an existing date. Years outside `1..=9999` have no key form.
    pub fn from_date(date: NaiveDate) -> Result<Self, BingoError> {
        if (1..=9999).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(BingoError::InvalidDateKey(date.to_string()))
        }
    }

    /// Today's key on the UTC calendar.
    pub fn today() -> Self {
        Self(Utc::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The key's digits read as one number: `2025-01-02` seeds with `20250102`.
    pub fn seed(&self) -> u32 {
        self.0.year() as u32 * 10_000 + self.0.month() * 100 + self.0.day()
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = BingoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DateKey {
    type Error = BingoError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<DateKey> for String {
    fn from(key: DateKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_and_display() {
        let key = DateKey::parse("2025-01-02").unwrap();
        assert_eq!(key.to_string(), "2025-01-02");
        assert_eq!(key.date(), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
    }

    #[rstest]
    #[case("2025-01-01", 20250101)]
    #[case("2025-01-02", 20250102)]
    #[case("1999-12-31", 19991231)]
    #[case("9999-12-31", 99991231)]
    fn test_seed_concatenates_digits(#[case] key: &str, #[case] seed: u32) {
        assert_eq!(DateKey::parse(key).unwrap().seed(), seed);
    }

    #[rstest]
    #[case("")]
    #[case("2025-1-2")]
    #[case("2025/01/02")]
    #[case("2025-02-30")]
    #[case("2025-13-01")]
    #[case("0000-01-01")]
    #[case("20250102")]
    #[case("+025-01-02")]
    #[case("2025-01-02T00:00:00Z")]
    fn test_rejects_malformed_keys(#[case] key: &str) {
        assert!(matches!(
            DateKey::parse(key),
            Err(BingoError::InvalidDateKey(ref s)) if s == key
        ));
    }

    #[test]
    fn test_distinct_dates_have_distinct_seeds() {
        let a = DateKey::parse("2025-01-01").unwrap();
        let b = DateKey::parse("2025-01-02").unwrap();
        let c = DateKey::parse("2026-01-01").unwrap();
        assert_ne!(a.seed(), b.seed());
        assert_ne!(a.seed(), c.seed());
    }

    #[test]
    fn test_serde_as_string() {
        let key = DateKey::parse("2025-07-14").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2025-07-14\"");
        let back: DateKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DateKey>("\"yesterday\"").is_err());
    }

    #[test]
    fn test_from_date_rejects_out_of_range_years() {
        let date = NaiveDate::from_ymd_opt(10_000, 1, 1).unwrap();
        assert!(DateKey::from_date(date).is_err());
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(DateKey::from_date(date).unwrap().to_string(), "2024-02-29");
    }
}

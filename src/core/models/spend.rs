use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpendParseError {
    #[error("invalid spend amount: '{0}'")]
    Invalid(String),
}

/// A daily spend amount held as exact integer cents.
///
/// The reporting API returns spend as a decimal string; comparing two
/// observations must be exact at two fractional digits, so amounts are
/// rounded to cents on parse and never touched as floats afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Spend {
    cents: i64,
}

impl Spend {
    pub const ZERO: Spend = Spend { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Spend { cents }
    }

    /// Parse a decimal amount string, rounding to two fractional digits.
    pub fn parse(raw: &str) -> Result<Self, SpendParseError> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| SpendParseError::Invalid(raw.to_string()))?;
        if !value.is_finite() {
            return Err(SpendParseError::Invalid(raw.to_string()));
        }
        Ok(Spend {
            cents: (value * 100.0).round() as i64,
        })
    }

    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }
}

impl fmt::Display for Spend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl From<Spend> for String {
    fn from(spend: Spend) -> String {
        spend.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_two_decimal_string() {
        let spend = Spend::parse("12.50").unwrap();
        assert_eq!(spend, Spend::from_cents(1250));
    }

    #[test]
    fn parse_rounds_to_cents() {
        assert_eq!(Spend::parse("12.505").unwrap(), Spend::from_cents(1251));
        assert_eq!(Spend::parse("12.504").unwrap(), Spend::from_cents(1250));
    }

    #[test]
    fn parse_integer_string() {
        assert_eq!(Spend::parse("7").unwrap(), Spend::from_cents(700));
    }

    #[test]
    fn parse_zero() {
        assert_eq!(Spend::parse("0").unwrap(), Spend::ZERO);
        assert_eq!(Spend::parse("0.00").unwrap(), Spend::ZERO);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Spend::parse("twelve").is_err());
        assert!(Spend::parse("").is_err());
        assert!(Spend::parse("NaN").is_err());
    }

    #[test]
    fn display_pads_cents() {
        assert_eq!(Spend::from_cents(1250).to_string(), "12.50");
        assert_eq!(Spend::from_cents(5).to_string(), "0.05");
        assert_eq!(Spend::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn display_negative() {
        assert_eq!(Spend::from_cents(-1250).to_string(), "-12.50");
    }

    #[test]
    fn zero_is_not_positive() {
        assert!(!Spend::ZERO.is_positive());
        assert!(!Spend::from_cents(-100).is_positive());
        assert!(Spend::from_cents(1).is_positive());
    }

    #[test]
    fn equal_amounts_compare_equal() {
        assert_eq!(Spend::parse("19.75").unwrap(), Spend::parse("19.75").unwrap());
        assert_ne!(Spend::parse("19.75").unwrap(), Spend::parse("12.50").unwrap());
    }
}

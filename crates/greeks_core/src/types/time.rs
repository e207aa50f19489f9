//! Time conventions for converting tenors and dates into year fractions.
//!
//! This module provides:
//! - [`DayCountBasis`]: days-per-year divisor for tenor annualisation
//! - [`Expiry`]: a year fraction that is either live or explicitly expired
//! - [`days_to_expiry`] / [`time_to_expiry`]: date-based expiry
//!
//! A non-positive time to expiry is never passed to the closed-form model;
//! it is surfaced as [`Expiry::Expired`] so callers decide between clamping
//! to zero exposure and rejecting the instrument.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::error::GreeksError;

/// Days-per-year basis used to annualise a tenor quoted in days.
///
/// # Examples
///
/// ```
/// use greeks_core::types::DayCountBasis;
///
/// assert_eq!(DayCountBasis::Act365.year_fraction(73.0), 0.2);
/// assert_eq!(DayCountBasis::Act360.name(), "ACT/360");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountBasis {
    /// Actual/365 Fixed
    #[default]
    Act365,
    /// Actual/360
    Act360,
    /// Business/252
    Bus252,
}

impl DayCountBasis {
    /// Days in one year under this basis.
    #[inline]
    pub fn days_per_year(&self) -> f64 {
        match self {
            DayCountBasis::Act365 => 365.0,
            DayCountBasis::Act360 => 360.0,
            DayCountBasis::Bus252 => 252.0,
        }
    }

    /// Standard convention name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCountBasis::Act365 => "ACT/365",
            DayCountBasis::Act360 => "ACT/360",
            DayCountBasis::Bus252 => "BUS/252",
        }
    }

    /// Converts a tenor in days to years. Negative tenors stay negative.
    #[inline]
    pub fn year_fraction(&self, days: f64) -> f64 {
        days / self.days_per_year()
    }
}

impl fmt::Display for DayCountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountBasis {
    type Err = GreeksError;

    /// Parses "ACT/365", "act365", "365", "ACT/360", "bus252", "trading252" and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '_', '-', '/'], "").as_str() {
            "act365" | "actual365" | "365" => Ok(DayCountBasis::Act365),
            "act360" | "actual360" | "360" => Ok(DayCountBasis::Act360),
            "bus252" | "business252" | "trading252" | "252" => Ok(DayCountBasis::Bus252),
            _ => Err(GreeksError::InvalidConvention(format!(
                "unknown day count basis '{}'",
                s
            ))),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountBasis;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountBasis {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountBasis {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountBasis::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Time remaining on an instrument.
///
/// # Examples
///
/// ```
/// use greeks_core::types::{DayCountBasis, Expiry};
///
/// let live = Expiry::from_tenor_days(182.5, DayCountBasis::Act365);
/// assert_eq!(live.year_fraction(), Some(0.5));
///
/// let expired = Expiry::from_tenor_days(0.0, DayCountBasis::Act365);
/// assert!(expired.is_expired());
/// assert_eq!(expired.year_fraction(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expiry {
    /// Strictly positive year fraction.
    Live(f64),
    /// Zero or negative days remaining.
    Expired {
        /// Remaining days (≤ 0)
        days: f64,
    },
}

impl Expiry {
    /// Classifies a tenor quoted in days.
    pub fn from_tenor_days(days: f64, basis: DayCountBasis) -> Self {
        if days > 0.0 {
            Expiry::Live(basis.year_fraction(days))
        } else {
            Expiry::Expired { days }
        }
    }

    /// Year fraction when live.
    #[inline]
    pub fn year_fraction(&self) -> Option<f64> {
        match self {
            Expiry::Live(t) => Some(*t),
            Expiry::Expired { .. } => None,
        }
    }

    /// Whether the instrument has no time left.
    #[inline]
    pub fn is_expired(&self) -> bool {
        matches!(self, Expiry::Expired { .. })
    }
}

/// Calendar days from `valuation` to `expiry` (negative once expired).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use greeks_core::types::days_to_expiry;
///
/// let valuation = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let expiry = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(days_to_expiry(valuation, expiry), 30);
/// assert_eq!(days_to_expiry(expiry, valuation), -30);
/// ```
pub fn days_to_expiry(valuation: NaiveDate, expiry: NaiveDate) -> i64 {
    (expiry - valuation).num_days()
}

/// Time to expiry between two dates under `basis`.
///
/// An expiry on or before the valuation date yields [`Expiry::Expired`].
pub fn time_to_expiry(valuation: NaiveDate, expiry: NaiveDate, basis: DayCountBasis) -> Expiry {
    Expiry::from_tenor_days(days_to_expiry(valuation, expiry) as f64, basis)
}

//! Unit conventions for quoted inputs and Greeks.
//!
//! Greeks are quoted per one unit of their risk factor: one point of spot,
//! one volatility point, one rate point, one day. The rate and volatility
//! points are fixed at 1/100; the length of "one day" is a caller choice
//! expressed through [`TimeDecayBasis`]. Whether rho carries the time
//! factor of ∂V/∂r is chosen with [`RhoConvention`].

use std::fmt;
use std::str::FromStr;

use super::error::GreeksError;

/// Divisor converting a per-unit sensitivity into a per-percentage-point one.
pub const PERCENT_POINT: f64 = 100.0;

/// Converts a percentage quote (e.g. 25.0 for 25%) to a decimal (0.25).
///
/// # Examples
/// ```
/// use greeks_core::types::units::percent_to_decimal;
///
/// assert_eq!(percent_to_decimal(35.0), 0.35);
/// ```
#[inline]
pub fn percent_to_decimal(percent: f64) -> f64 {
    percent / PERCENT_POINT
}

/// Divisor applied to annualised theta to express decay per period.
///
/// | Variant | Divisor | Meaning |
/// |---------|---------|---------|
/// | `TradingDays` | 252 | per trading day (default) |
/// | `CalendarDays` | 365 | per calendar day |
/// | `Annual` | 1 | annualised, unscaled |
///
/// # Examples
/// ```
/// use greeks_core::types::TimeDecayBasis;
///
/// assert_eq!(TimeDecayBasis::default().divisor(), 252.0);
/// assert_eq!("calendar".parse::<TimeDecayBasis>().unwrap(), TimeDecayBasis::CalendarDays);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeDecayBasis {
    /// 252 trading days per year
    #[default]
    TradingDays,
    /// 365 calendar days per year
    CalendarDays,
    /// No scaling
    Annual,
}

impl TimeDecayBasis {
    /// Number of periods per year.
    #[inline]
    pub fn divisor(&self) -> f64 {
        match self {
            TimeDecayBasis::TradingDays => 252.0,
            TimeDecayBasis::CalendarDays => 365.0,
            TimeDecayBasis::Annual => 1.0,
        }
    }

    /// Short name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            TimeDecayBasis::TradingDays => "trading",
            TimeDecayBasis::CalendarDays => "calendar",
            TimeDecayBasis::Annual => "annual",
        }
    }
}

impl fmt::Display for TimeDecayBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TimeDecayBasis {
    type Err = GreeksError;

    /// Accepts the short name or the divisor itself ("252", "365", "1").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trading" | "252" => Ok(TimeDecayBasis::TradingDays),
            "calendar" | "365" => Ok(TimeDecayBasis::CalendarDays),
            "annual" | "1" => Ok(TimeDecayBasis::Annual),
            other => Err(GreeksError::InvalidConvention(format!(
                "unknown time decay basis '{}'",
                other
            ))),
        }
    }
}

/// Scaling of rho per rate point.
///
/// `Quoted` is the desk formula `±K·e^(-rT)·N(±d₂) / 100`. `Derivative`
/// multiplies it by `T`, giving the analytic ∂V/∂r per rate point.
///
/// # Examples
/// ```
/// use greeks_core::types::RhoConvention;
///
/// assert_eq!(RhoConvention::default(), RhoConvention::Quoted);
/// assert_eq!(RhoConvention::Quoted.time_factor(2.0), 1.0);
/// assert_eq!(RhoConvention::Derivative.time_factor(2.0), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RhoConvention {
    /// K·e^(-rT)·N(±d₂) / 100
    #[default]
    Quoted,
    /// K·T·e^(-rT)·N(±d₂) / 100
    Derivative,
}

impl RhoConvention {
    /// Multiplier applied to the quoted rho for an expiry of `time_to_expiry` years.
    #[inline]
    pub fn time_factor(&self, time_to_expiry: f64) -> f64 {
        match self {
            RhoConvention::Quoted => 1.0,
            RhoConvention::Derivative => time_to_expiry,
        }
    }

    /// Short name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            RhoConvention::Quoted => "quoted",
            RhoConvention::Derivative => "derivative",
        }
    }
}

impl fmt::Display for RhoConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RhoConvention {
    type Err = GreeksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quoted" => Ok(RhoConvention::Quoted),
            "derivative" => Ok(RhoConvention::Derivative),
            other => Err(GreeksError::InvalidConvention(format!(
                "unknown rho convention '{}'",
                other
            ))),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::{RhoConvention, TimeDecayBasis};
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for TimeDecayBasis {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for TimeDecayBasis {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            TimeDecayBasis::from_str(&s).map_err(de::Error::custom)
        }
    }

    impl Serialize for RhoConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for RhoConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            RhoConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

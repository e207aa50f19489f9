//! Struct-of-arrays batch of Black-Scholes-Merton inputs.
//!
//! [`OptionParameters`] is validated once at construction; every kernel
//! function can then assume `S, K, T, v > 0` and finite rates.

use greeks_core::types::GreeksError;

/// Validated batch of model inputs for N instruments.
///
/// Fields are stored column-wise for cache-efficient vectorised evaluation.
/// The batch is immutable: shocked scenarios derive a new batch through
/// [`OptionParameters::with_spots`].
///
/// # Examples
/// ```
/// use greeks_kernel::OptionParameters;
///
/// let params = OptionParameters::new(
///     vec![100.0, 105.0],
///     vec![100.0, 100.0],
///     vec![0.5, 1.0],
///     vec![0.2, 0.25],
///     vec![0.03, 0.03],
///     vec![0.01, 0.0],
/// ).unwrap();
/// assert_eq!(params.len(), 2);
///
/// // Non-positive volatility is rejected with the offending index
/// assert!(OptionParameters::without_yield(
///     vec![100.0], vec![100.0], vec![1.0], vec![0.0], vec![0.03],
/// ).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionParameters {
    spot: Vec<f64>,
    strike: Vec<f64>,
    time_to_expiry: Vec<f64>,
    volatility: Vec<f64>,
    domestic_rate: Vec<f64>,
    foreign_rate: Vec<f64>,
}

/// Inputs of a single instrument, copied out of a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionPoint {
    /// Spot price (S)
    pub spot: f64,
    /// Strike price (K)
    pub strike: f64,
    /// Time to expiry in years (T)
    pub time_to_expiry: f64,
    /// Volatility as a decimal (v)
    pub volatility: f64,
    /// Domestic risk-free rate (r)
    pub domestic_rate: f64,
    /// Foreign rate or continuous dividend yield (q)
    pub foreign_rate: f64,
}

impl OptionParameters {
    /// Creates a validated batch.
    ///
    /// # Errors
    /// - `GreeksError::ShapeMismatch` if any array length differs from `spot`
    /// - `GreeksError::InvalidParameter` if S, K, T or v is not strictly
    ///   positive, or any value is non-finite
    pub fn new(
        spot: Vec<f64>,
        strike: Vec<f64>,
        time_to_expiry: Vec<f64>,
        volatility: Vec<f64>,
        domestic_rate: Vec<f64>,
        foreign_rate: Vec<f64>,
    ) -> Result<Self, GreeksError> {
        let n = spot.len();
        for (name, len) in [
            ("strike", strike.len()),
            ("time_to_expiry", time_to_expiry.len()),
            ("volatility", volatility.len()),
            ("domestic_rate", domestic_rate.len()),
            ("foreign_rate", foreign_rate.len()),
        ] {
            if len != n {
                return Err(GreeksError::shape_mismatch(
                    format!("OptionParameters.{}", name),
                    n,
                    len,
                ));
            }
        }

        check_positive("spot", &spot)?;
        check_positive("strike", &strike)?;
        check_positive("time_to_expiry", &time_to_expiry)?;
        check_positive("volatility", &volatility)?;
        check_finite("domestic_rate", &domestic_rate)?;
        check_finite("foreign_rate", &foreign_rate)?;

        Ok(Self {
            spot,
            strike,
            time_to_expiry,
            volatility,
            domestic_rate,
            foreign_rate,
        })
    }

    /// Creates a batch with zero foreign rate / dividend yield.
    ///
    /// # Errors
    /// Same as [`OptionParameters::new`].
    pub fn without_yield(
        spot: Vec<f64>,
        strike: Vec<f64>,
        time_to_expiry: Vec<f64>,
        volatility: Vec<f64>,
        domestic_rate: Vec<f64>,
    ) -> Result<Self, GreeksError> {
        let foreign_rate = vec![0.0; spot.len()];
        Self::new(
            spot,
            strike,
            time_to_expiry,
            volatility,
            domestic_rate,
            foreign_rate,
        )
    }

    /// Builds a batch from per-instrument points.
    ///
    /// # Errors
    /// `GreeksError::InvalidParameter` for the first out-of-domain value.
    pub fn from_points(points: &[OptionPoint]) -> Result<Self, GreeksError> {
        Self::new(
            points.iter().map(|p| p.spot).collect(),
            points.iter().map(|p| p.strike).collect(),
            points.iter().map(|p| p.time_to_expiry).collect(),
            points.iter().map(|p| p.volatility).collect(),
            points.iter().map(|p| p.domestic_rate).collect(),
            points.iter().map(|p| p.foreign_rate).collect(),
        )
    }

    /// Creates an empty batch (N = 0).
    pub fn empty() -> Self {
        Self {
            spot: Vec::new(),
            strike: Vec::new(),
            time_to_expiry: Vec::new(),
            volatility: Vec::new(),
            domestic_rate: Vec::new(),
            foreign_rate: Vec::new(),
        }
    }

    /// Returns the number of instruments.
    #[inline]
    pub fn len(&self) -> usize {
        self.spot.len()
    }

    /// Returns whether the batch is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spot.is_empty()
    }

    /// Spot prices.
    #[inline]
    pub fn spot(&self) -> &[f64] {
        &self.spot
    }

    /// Strike prices.
    #[inline]
    pub fn strike(&self) -> &[f64] {
        &self.strike
    }

    /// Times to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> &[f64] {
        &self.time_to_expiry
    }

    /// Volatilities as decimals.
    #[inline]
    pub fn volatility(&self) -> &[f64] {
        &self.volatility
    }

    /// Domestic risk-free rates.
    #[inline]
    pub fn domestic_rate(&self) -> &[f64] {
        &self.domestic_rate
    }

    /// Foreign rates / continuous dividend yields.
    #[inline]
    pub fn foreign_rate(&self) -> &[f64] {
        &self.foreign_rate
    }

    /// Returns the inputs of instrument `index`, if in range.
    pub fn point(&self, index: usize) -> Option<OptionPoint> {
        if index >= self.len() {
            return None;
        }
        Some(OptionPoint {
            spot: self.spot[index],
            strike: self.strike[index],
            time_to_expiry: self.time_to_expiry[index],
            volatility: self.volatility[index],
            domestic_rate: self.domestic_rate[index],
            foreign_rate: self.foreign_rate[index],
        })
    }

    /// Iterates per-instrument copies of the inputs.
    pub fn iter(&self) -> impl Iterator<Item = OptionPoint> + '_ {
        (0..self.len()).filter_map(move |i| self.point(i))
    }

    /// Derives a new batch with replaced spots and all other fields shared.
    ///
    /// # Errors
    /// - `GreeksError::ShapeMismatch` if `spots.len() != self.len()`
    /// - `GreeksError::InvalidParameter` if any new spot is not positive
    pub fn with_spots(&self, spots: &[f64]) -> Result<Self, GreeksError> {
        if spots.len() != self.len() {
            return Err(GreeksError::shape_mismatch(
                "OptionParameters.with_spots",
                self.len(),
                spots.len(),
            ));
        }
        check_positive("spot", spots)?;

        Ok(Self {
            spot: spots.to_vec(),
            ..self.clone()
        })
    }

    /// Builds a sub-batch of the given instruments, in the given order.
    ///
    /// # Panics
    /// Panics if any index is out of range.
    pub fn select(&self, indices: &[usize]) -> Self {
        let pick = |values: &[f64]| indices.iter().map(|&i| values[i]).collect::<Vec<_>>();
        Self {
            spot: pick(&self.spot),
            strike: pick(&self.strike),
            time_to_expiry: pick(&self.time_to_expiry),
            volatility: pick(&self.volatility),
            domestic_rate: pick(&self.domestic_rate),
            foreign_rate: pick(&self.foreign_rate),
        }
    }
}

impl Default for OptionParameters {
    fn default() -> Self {
        Self::empty()
    }
}

fn check_positive(field: &'static str, values: &[f64]) -> Result<(), GreeksError> {
    match values
        .iter()
        .position(|v| !(v.is_finite() && *v > 0.0))
    {
        Some(index) => Err(GreeksError::InvalidParameter {
            field,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

fn check_finite(field: &'static str, values: &[f64]) -> Result<(), GreeksError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(GreeksError::InvalidParameter {
            field,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

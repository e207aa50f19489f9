//! Shocked-spot matrices.

/// Dense row-major matrix of shocked spots: rows are shocks, columns are
/// instruments.
#[derive(Debug, Clone, PartialEq)]
pub struct ShockMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl ShockMatrix {
    /// `(rows, cols)` = `(shocks, instruments)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Shocked spots of scenario `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Element at scenario `i`, instrument `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Iterates scenario rows in shock order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }
}

/// Broadcasts shocks against spots: row `i` is `spots + shocks[i]·spots`.
///
/// # Examples
///
/// ```
/// use greeks_scenarios::scenarios::generate_spot_interval;
///
/// let matrix = generate_spot_interval(&[100.0, 50.0], &[-0.1, 0.0, 0.1]);
/// assert_eq!(matrix.shape(), (3, 2));
/// assert_eq!(matrix.row(1), &[100.0, 50.0]);
/// assert_eq!(matrix.get(2, 1), Some(55.0));
/// ```
pub fn generate_spot_interval(spots: &[f64], shocks: &[f64]) -> ShockMatrix {
    let data = shocks
        .iter()
        .flat_map(|shock| spots.iter().map(move |s| s + shock * s))
        .collect();

    ShockMatrix {
        data,
        rows: shocks.len(),
        cols: spots.len(),
    }
}

//! Ordinary least squares with one regressor.
//!
//! Fits `y = intercept + slope * x` and reports the classical inference on
//! the slope: standard error, two-sided p-value against zero and a
//! Student's t interval with `n - 2` degrees of freedom.

use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::ModelError;

/// Minimum rows for a slope with at least one residual degree of freedom.
const MIN_ROWS: usize = 3;

/// Result of a single-regressor OLS fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OlsFit {
    /// Estimated slope
    pub slope: f64,
    /// Estimated intercept
    pub intercept: f64,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Standard error of the slope
    pub standard_error: f64,
    /// Two-sided p-value of `slope = 0`
    pub p_value: f64,
    /// Residual degrees of freedom (`n - 2`)
    pub degrees_of_freedom: f64,
}

impl OlsFit {
    /// Predicted `y` at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Two-sided Student's t interval on the slope at the given level.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless `0 < level < 1`.
    pub fn slope_interval(&self, level: f64) -> Result<(f64, f64), ModelError> {
        if !(level > 0.0 && level < 1.0) {
            return Err(ModelError::invalid_parameter(format!(
                "confidence level must be in (0, 1), got {}",
                level
            )));
        }
        let t_crit = students_t(self.degrees_of_freedom)?.inverse_cdf(0.5 + level / 2.0);
        let half_width = t_crit * self.standard_error;
        Ok((self.slope - half_width, self.slope + half_width))
    }
}

/// Single-regressor OLS estimator.
pub struct SimpleOls;

impl SimpleOls {
    /// Fit `y` on `x`.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` when the slices differ in length
    /// - `InsufficientData` below three rows
    /// - `ConstantRegressor` when every `x` is equal
    ///
    /// # Examples
    ///
    /// ```
    /// use elasticity_models::regression::SimpleOls;
    ///
    /// let x = [1.0, 2.0, 3.0, 4.0];
    /// let y = [3.0, 5.0, 7.0, 9.0];
    /// let fit = SimpleOls::fit(&x, &y).unwrap();
    /// assert!((fit.slope - 2.0).abs() < 1e-12);
    /// assert!((fit.intercept - 1.0).abs() < 1e-12);
    /// assert!((fit.r_squared - 1.0).abs() < 1e-12);
    /// ```
    pub fn fit(x: &[f64], y: &[f64]) -> Result<OlsFit, ModelError> {
        if x.len() != y.len() {
            return Err(ModelError::dimension_mismatch(x.len(), y.len()));
        }
        let n = x.len();
        if n < MIN_ROWS {
            return Err(ModelError::insufficient_data(MIN_ROWS, n));
        }

        let nf = n as f64;
        let x_mean = x.iter().sum::<f64>() / nf;
        let y_mean = y.iter().sum::<f64>() / nf;

        let mut sxx = 0.0;
        let mut sxy = 0.0;
        let mut syy = 0.0;
        for (xi, yi) in x.iter().zip(y) {
            let dx = xi - x_mean;
            let dy = yi - y_mean;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        if sxx <= f64::EPSILON * nf * x_mean.abs().max(1.0) {
            return Err(ModelError::ConstantRegressor);
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;

        let sse: f64 = x
            .iter()
            .zip(y)
            .map(|(xi, yi)| {
                let r = yi - (intercept + slope * xi);
                r * r
            })
            .sum();

        let r_squared = if syy > 0.0 { 1.0 - sse / syy } else { 1.0 };
        let degrees_of_freedom = (n - 2) as f64;
        let standard_error = (sse / degrees_of_freedom / sxx).sqrt();

        let p_value = if standard_error > 0.0 {
            let t_stat = slope / standard_error;
            2.0 * (1.0 - students_t(degrees_of_freedom)?.cdf(t_stat.abs()))
        } else if slope != 0.0 {
            0.0
        } else {
            1.0
        };

        Ok(OlsFit {
            slope,
            intercept,
            r_squared,
            standard_error,
            p_value,
            degrees_of_freedom,
        })
    }
}

fn students_t(degrees_of_freedom: f64) -> Result<StudentsT, ModelError> {
    StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|e| ModelError::Distribution(e.to_string()))
}

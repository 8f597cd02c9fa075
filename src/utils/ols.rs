//! Ordinary least squares on a fixed design matrix, used by the seasonal
//! regression model to fit trend and harmonic components.

use crate::error::{ForecastError, Result};

/// Fitted OLS coefficients: one per design column, plus an intercept.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl OlsFit {
    /// Evaluate the fitted model on new design columns.
    ///
    /// Columns must match the fit in number and be equal-length.
    pub fn predict(&self, columns: &[Vec<f64>]) -> Result<Vec<f64>> {
        if columns.len() != self.coefficients.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "expected {} design columns, got {}",
                self.coefficients.len(),
                columns.len()
            )));
        }
        let n = columns.first().map_or(0, |c| c.len());
        for column in columns {
            if column.len() != n {
                return Err(ForecastError::InvalidParameter(
                    "design columns must have equal length".to_string(),
                ));
            }
        }

        let mut predictions = vec![self.intercept; n];
        for (coefficient, column) in self.coefficients.iter().zip(columns) {
            for (prediction, x) in predictions.iter_mut().zip(column) {
                *prediction += coefficient * x;
            }
        }
        Ok(predictions)
    }
}

/// Fit `y = intercept + X @ coefficients` by solving the normal equations
/// with a Cholesky decomposition.
///
/// A small ridge term is added to the diagonal for numerical stability.
pub fn ols_fit(y: &[f64], columns: &[Vec<f64>]) -> Result<OlsFit> {
    let n = y.len();
    if n == 0 {
        return Err(ForecastError::InsufficientData { needed: 1, got: 0 });
    }
    for column in columns {
        if column.len() != n {
            return Err(ForecastError::InvalidParameter(
                "design columns must match the target length".to_string(),
            ));
        }
    }

    let k = columns.len();
    if k == 0 {
        // No regressors: the mean is the least-squares intercept.
        return Ok(OlsFit {
            intercept: y.iter().sum::<f64>() / n as f64,
            coefficients: vec![],
        });
    }

    // Build X'X and X'y with an implicit leading intercept column of ones.
    let params = k + 1;
    let mut xtx = vec![vec![0.0; params]; params];
    let mut xty = vec![0.0; params];

    for obs in 0..n {
        xtx[0][0] += 1.0;
        for i in 0..k {
            let xi = columns[i][obs];
            xtx[0][i + 1] += xi;
            xtx[i + 1][0] += xi;
            for j in 0..k {
                xtx[i + 1][j + 1] += xi * columns[j][obs];
            }
        }
        xty[0] += y[obs];
        for i in 0..k {
            xty[i + 1] += columns[i][obs] * y[obs];
        }
    }

    for i in 0..params {
        xtx[i][i] += 1e-8;
    }

    let beta = solve_symmetric(&xtx, &xty).ok_or_else(|| {
        ForecastError::Computation("normal equations are not positive definite".to_string())
    })?;

    Ok(OlsFit {
        intercept: beta[0],
        coefficients: beta[1..].to_vec(),
    })
}

/// Solve `A @ x = b` for symmetric positive definite `A` via Cholesky.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L @ L'
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i][j] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // Forward substitution: L @ y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[i][j] * y[j];
        }
        y[i] = sum / l[i][i];
    }

    // Backward substitution: L' @ x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = y[i];
        for j in (i + 1)..n {
            sum -= l[j][i] * x[j];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}

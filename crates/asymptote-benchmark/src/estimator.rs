//! Growth-rate estimation.
//!
//! Least-squares fits over `(size, average duration)` samples. Both fits are
//! descriptive: they summarise how the measured times scaled over the sizes
//! that were actually run, and say nothing about asymptotic behaviour beyond
//! them. An exponential curve sampled over a narrow range can look like a
//! modest polynomial, which is why reports print the theoretical class next
//! to every fit.

use crate::result::SizeSample;

/// Fewest samples a fit is attempted on.
pub const MIN_SAMPLES: usize = 3;

/// Fewest samples that must survive log filtering.
pub const MIN_USABLE_SAMPLES: usize = 2;

/// Power-law estimate `duration ≈ C · size^k`.
///
/// Obtained by ordinary least squares on `(ln size, ln seconds)`.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::GrowthEstimate;
///
/// // t = 1e-6 · n^2
/// let points: Vec<(f64, f64)> = [10.0, 20.0, 40.0, 80.0]
///     .iter()
///     .map(|&n: &f64| (n, 1e-6 * n * n))
///     .collect();
///
/// let estimate = GrowthEstimate::fit_points(&points);
/// assert!((estimate.exponent().unwrap() - 2.0).abs() < 1e-9);
/// assert!((estimate.leading_constant().unwrap() - 1e-6).abs() < 1e-12);
///
/// assert!(!GrowthEstimate::fit_points(&points[..2]).is_determined());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthEstimate {
    Fitted {
        /// Slope of the log-log regression.
        exponent: f64,
        /// Intercept of the log-log regression; `C = exp(intercept)`.
        intercept_log_time: f64,
        /// Samples left after filtering.
        samples_used: usize,
    },
    Undetermined,
}

impl GrowthEstimate {
    /// Fits the samples of a series.
    pub fn fit(samples: &[SizeSample]) -> Self {
        Self::fit_points(&sample_points(samples))
    }

    /// Fits raw `(size, seconds)` pairs.
    ///
    /// Undetermined with fewer than three pairs, with fewer than two pairs
    /// whose logarithms are finite, or when every usable size is the same.
    pub fn fit_points(points: &[(f64, f64)]) -> Self {
        if points.len() < MIN_SAMPLES {
            return Self::Undetermined;
        }
        let logs = log_points(points, f64::ln);
        match least_squares(&logs) {
            Some(line) => Self::Fitted {
                exponent: line.slope,
                intercept_log_time: line.intercept,
                samples_used: logs.len(),
            },
            None => Self::Undetermined,
        }
    }

    pub fn is_determined(&self) -> bool {
        matches!(self, Self::Fitted { .. })
    }

    pub fn exponent(&self) -> Option<f64> {
        match self {
            Self::Fitted { exponent, .. } => Some(*exponent),
            Self::Undetermined => None,
        }
    }

    pub fn intercept_log_time(&self) -> Option<f64> {
        match self {
            Self::Fitted {
                intercept_log_time, ..
            } => Some(*intercept_log_time),
            Self::Undetermined => None,
        }
    }

    /// `C` in `C · size^k`, in seconds.
    pub fn leading_constant(&self) -> Option<f64> {
        self.intercept_log_time().map(f64::exp)
    }

    /// Duration in seconds the fitted curve predicts at `size`.
    pub fn predict_secs(&self, size: f64) -> Option<f64> {
        match self {
            Self::Fitted {
                exponent,
                intercept_log_time,
                ..
            } => Some((intercept_log_time + exponent * size.ln()).exp()),
            Self::Undetermined => None,
        }
    }
}

/// Exponential estimate `duration ≈ C · base^size`.
///
/// Obtained by ordinary least squares on `(size, ln seconds)`; the base is
/// `exp(slope)`.
///
/// # Example
///
/// ```
/// use asymptote_benchmark::ExponentialEstimate;
///
/// let points = [(10.0, 1024.0), (20.0, 1048576.0), (30.0, 1073741824.0)];
/// let estimate = ExponentialEstimate::fit_points(&points);
/// assert!((estimate.base().unwrap() - 2.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExponentialEstimate {
    Fitted {
        base: f64,
        intercept_log_time: f64,
        samples_used: usize,
    },
    Undetermined,
}

impl ExponentialEstimate {
    /// Fits the samples of a series.
    pub fn fit(samples: &[SizeSample]) -> Self {
        Self::fit_points(&sample_points(samples))
    }

    /// Fits raw `(size, seconds)` pairs under the same rules as
    /// [`GrowthEstimate::fit_points`].
    pub fn fit_points(points: &[(f64, f64)]) -> Self {
        if points.len() < MIN_SAMPLES {
            return Self::Undetermined;
        }
        let logs = log_points(points, |n| n);
        match least_squares(&logs) {
            Some(line) => Self::Fitted {
                base: line.slope.exp(),
                intercept_log_time: line.intercept,
                samples_used: logs.len(),
            },
            None => Self::Undetermined,
        }
    }

    pub fn is_determined(&self) -> bool {
        matches!(self, Self::Fitted { .. })
    }

    pub fn base(&self) -> Option<f64> {
        match self {
            Self::Fitted { base, .. } => Some(*base),
            Self::Undetermined => None,
        }
    }

    /// Duration in seconds the fitted curve predicts at `size`.
    pub fn predict_secs(&self, size: f64) -> Option<f64> {
        match self {
            Self::Fitted {
                base,
                intercept_log_time,
                ..
            } => Some((intercept_log_time + base.ln() * size).exp()),
            Self::Undetermined => None,
        }
    }
}

fn sample_points(samples: &[SizeSample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .map(|s| (s.size.as_f64(), s.average_secs()))
        .collect()
}

// Keeps only pairs where both transformed coordinates are finite.
fn log_points(points: &[(f64, f64)], x_transform: impl Fn(f64) -> f64) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|&(size, secs)| (x_transform(size), secs.ln()))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .collect()
}

struct Line {
    slope: f64,
    intercept: f64,
}

fn least_squares(points: &[(f64, f64)]) -> Option<Line> {
    if points.len() < MIN_USABLE_SAMPLES {
        return None;
    }
    let (x0, y0) = points[0];

    // Singular: no spread in x.
    if points.iter().all(|&(x, _)| x == x0) {
        return None;
    }
    if points.iter().all(|&(_, y)| y == y0) {
        return Some(Line {
            slope: 0.0,
            intercept: y0,
        });
    }

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxx, mut sxy) = (0.0, 0.0);
    for &(x, y) in points {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }
    if sxx == 0.0 || !sxx.is_finite() {
        return None;
    }

    let slope = sxy / sxx;
    Some(Line {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

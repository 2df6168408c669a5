//! Theoretical complexity classes.

use std::fmt;

/// The theoretical complexity class a subject is expected to exhibit.
///
/// Only used for labelling: reports print it next to the empirical estimate
/// so readers can compare the two.
///
/// # Example
///
/// ```
/// use asymptote_core::ComplexityClass;
///
/// assert_eq!(ComplexityClass::Exponential.to_string(), "O(2^n)");
/// assert_eq!(ComplexityClass::Polynomial(2).to_string(), "O(n^2)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplexityClass {
    /// O(n^k).
    Polynomial(u32),

    /// O(E + V log V), binary-heap Dijkstra.
    Linearithmic,

    /// O(n * target), polynomial in the numeric value of the input.
    PseudoPolynomial,

    /// O(2^n).
    Exponential,
}

impl ComplexityClass {
    /// Returns true for classes that are polynomial in the input length.
    pub fn is_polynomial(self) -> bool {
        matches!(self, Self::Polynomial(_) | Self::Linearithmic)
    }
}

impl fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polynomial(0) => write!(f, "O(1)"),
            Self::Polynomial(1) => write!(f, "O(n)"),
            Self::Polynomial(k) => write!(f, "O(n^{k})"),
            Self::Linearithmic => write!(f, "O(E + V log V)"),
            Self::PseudoPolynomial => write!(f, "O(n*target)"),
            Self::Exponential => write!(f, "O(2^n)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(ComplexityClass::Polynomial(1).to_string(), "O(n)");
        assert_eq!(ComplexityClass::Linearithmic.to_string(), "O(E + V log V)");
        assert_eq!(ComplexityClass::PseudoPolynomial.to_string(), "O(n*target)");
    }

    #[test]
    fn test_is_polynomial() {
        assert!(ComplexityClass::Polynomial(2).is_polynomial());
        assert!(ComplexityClass::Linearithmic.is_polynomial());
        assert!(!ComplexityClass::PseudoPolynomial.is_polynomial());
        assert!(!ComplexityClass::Exponential.is_polynomial());
    }
}

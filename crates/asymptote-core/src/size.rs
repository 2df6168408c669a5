//! Problem size newtype.

use std::fmt;
use std::num::NonZeroUsize;

/// The nominal size of a generated instance (vertex count, element count).
///
/// Always positive; immutable once chosen.
///
/// # Example
///
/// ```
/// use asymptote_core::ProblemSize;
///
/// let size = ProblemSize::new(20).unwrap();
/// assert_eq!(size.get(), 20);
/// assert!(ProblemSize::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProblemSize(NonZeroUsize);

impl ProblemSize {
    /// Creates a problem size, returning `None` for zero.
    pub fn new(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(Self)
    }

    /// Returns the size as a plain integer.
    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Returns the size as a float, for regression inputs.
    pub fn as_f64(self) -> f64 {
        self.0.get() as f64
    }
}

impl From<NonZeroUsize> for ProblemSize {
    fn from(n: NonZeroUsize) -> Self {
        Self(n)
    }
}

impl TryFrom<usize> for ProblemSize {
    type Error = usize;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::new(n).ok_or(n)
    }
}

impl fmt::Display for ProblemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

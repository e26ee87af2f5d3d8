//! Dimensions: the objects of the category of tensors.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use yank_ir::{Factors, Object};

/// A sequence of vector space dimensions.
///
/// Factors of dimension 1 are dropped on construction, so `Dim::new([1])`
/// is the unit and `Dim::new([2, 1, 3]) == Dim::new([2, 3])`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dim(Arc<[usize]>);

impl Dim {
    pub fn new(dims: impl IntoIterator<Item = usize>) -> Self {
        Self(dims.into_iter().filter(|&d| d != 1).collect())
    }

    /// The unit, `Dim(1)`.
    pub fn unit() -> Self {
        Self::default()
    }

    /// `n` factors of dimension 2.
    pub fn qubits(n: usize) -> Self {
        Self::new(std::iter::repeat_n(2, n))
    }

    #[inline]
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Dimension of the whole space.
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    #[must_use]
    pub fn tensor(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Self(self.0.iter().chain(other.0.iter()).copied().collect())
    }

    /// Dims are self-dual up to reversal.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self(self.0.iter().rev().copied().collect())
    }
}

impl Object for Dim {
    fn unit() -> Self {
        Dim::unit()
    }

    fn tensor(&self, other: &Self) -> Self {
        Dim::tensor(self, other)
    }

    fn l(&self) -> Self {
        self.reversed()
    }

    fn r(&self) -> Self {
        self.reversed()
    }
}

impl Factors for Dim {
    fn len(&self) -> usize {
        Dim::len(self)
    }

    fn slice(&self, range: Range<usize>) -> Self {
        Self(self.0[range].into())
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Dim(1)");
        }
        let dims: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "Dim({})", dims.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_factors_dropped() {
        assert_eq!(Dim::new([1]), Dim::unit());
        assert_eq!(Dim::new([2, 1, 3]), Dim::new([2, 3]));
        assert_eq!(Dim::new([2, 3]).size(), 6);
        assert_eq!(Dim::unit().size(), 1);
    }

    #[test]
    fn test_duals_reverse() {
        let d = Dim::new([2, 3]);
        assert_eq!(d.l(), Dim::new([3, 2]));
        assert_eq!(d.l().r(), d);
    }

    #[test]
    fn test_display() {
        assert_eq!(Dim::unit().to_string(), "Dim(1)");
        assert_eq!(Dim::qubits(2).to_string(), "Dim(2, 2)");
    }
}

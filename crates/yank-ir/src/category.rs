//! The interface shared by every category a diagram can be evaluated in.
//!
//! [`Diagram`](crate::Diagram) is the free instance. Numeric targets live
//! downstream and implement [`Category`] the same way, which is all a
//! [`Functor`](crate::Functor) needs.

use std::fmt;
use std::ops::Range;

use crate::error::IrError;

/// Objects of a monoidal category with left and right duals.
pub trait Object: Clone + PartialEq + fmt::Debug + fmt::Display {
    /// The monoidal unit.
    fn unit() -> Self;

    /// Monoidal product.
    #[must_use]
    fn tensor(&self, other: &Self) -> Self;

    /// Left dual.
    #[must_use]
    fn l(&self) -> Self;

    /// Right dual.
    #[must_use]
    fn r(&self) -> Self;
}

/// Objects that are finite sequences of atomic factors.
pub trait Factors: Object {
    /// Number of atomic factors.
    fn len(&self) -> usize;

    /// Whether this is the unit.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The factors in `range`, as an object.
    #[must_use]
    fn slice(&self, range: Range<usize>) -> Self;
}

/// A rigid monoidal category with symmetry and a dagger.
pub trait Category: Clone + Sized {
    /// Object type.
    type Ob: Object;

    /// Error returned by partial operations.
    type Error: From<IrError>;

    fn dom(&self) -> Self::Ob;

    fn cod(&self) -> Self::Ob;

    /// Identity arrow on `ob`.
    fn id(ob: &Self::Ob) -> Self;

    /// Sequential composition, `self` first.
    fn then(&self, other: &Self) -> Result<Self, Self::Error>;

    /// Parallel composition, `self` on the left.
    fn tensor(&self, other: &Self) -> Result<Self, Self::Error>;

    #[must_use]
    fn dagger(&self) -> Self;

    /// Symmetry `left @ right -> right @ left`.
    fn swap(left: &Self::Ob, right: &Self::Ob) -> Result<Self, Self::Error>;

    /// Counit of the adjunction `left -| right`, from `left @ right` to the unit.
    fn cups(left: &Self::Ob, right: &Self::Ob) -> Result<Self, Self::Error>;

    /// Unit of the adjunction, from the unit to `left @ right`.
    fn caps(left: &Self::Ob, right: &Self::Ob) -> Result<Self, Self::Error>;
}

/// Build nested cups (or caps, with `reverse`) between two sequences of
/// factors out of elementary ones.
///
/// The innermost pair is `left[n-1]`, `right[0]`; each later pair wraps
/// around the previous ones. `factory` builds the elementary arrow for a pair
/// of single factors.
pub fn nested_cups<C, F>(
    left: &C::Ob,
    right: &C::Ob,
    mut factory: F,
    reverse: bool,
) -> Result<C, C::Error>
where
    C: Category,
    C::Ob: Factors,
    F: FnMut(&C::Ob, &C::Ob) -> Result<C, C::Error>,
{
    if left.r() != *right && right.r() != *left {
        return Err(IrError::NotAdjoint {
            left: left.to_string(),
            right: right.to_string(),
        }
        .into());
    }
    let n = left.len();
    let mut result = C::id(&left.tensor(right));
    for i in 0..n {
        let j = n - i - 1;
        let pair = factory(&left.slice(j..j + 1), &right.slice(i..i + 1))?;
        let layer = C::id(&left.slice(0..j))
            .tensor(&pair)?
            .tensor(&C::id(&right.slice(i + 1..right.len())))?;
        result = if reverse {
            layer.then(&result)?
        } else {
            result.then(&layer)?
        };
    }
    Ok(result)
}

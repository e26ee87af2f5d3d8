//! Atomic objects and the types built from them.
//!
//! An [`Ob`] is a named object together with its adjoint level `z`: the left
//! adjoint of an object lowers `z` by one, the right adjoint raises it. A [`Ty`]
//! is a finite sequence of objects; taking its adjoint reverses the sequence and
//! dualizes every factor, so that `t.l().r() == t`.

use std::fmt;
use std::ops::{Bound, Index, RangeBounds};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// Name of the classical wire object.
pub const BIT: &str = "bit";

/// Name of the quantum wire object.
pub const QUBIT: &str = "qubit";

/// An atomic object with an adjoint level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ob {
    name: Arc<str>,
    z: i32,
}

impl Ob {
    /// Create a zero-level object.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::with_z(name, 0)
    }

    /// Create an object at a given adjoint level.
    pub fn with_z(name: impl Into<Arc<str>>, z: i32) -> Self {
        Self {
            name: name.into(),
            z,
        }
    }

    /// The object's name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The adjoint level.
    #[inline]
    pub fn z(&self) -> i32 {
        self.z
    }

    /// The left adjoint.
    #[must_use]
    pub fn l(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            z: self.z - 1,
        }
    }

    /// The right adjoint.
    #[must_use]
    pub fn r(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            z: self.z + 1,
        }
    }

    /// The same object at level zero.
    #[must_use]
    pub fn base(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            z: 0,
        }
    }
}

impl fmt::Display for Ob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        let suffix = if self.z < 0 { ".l" } else { ".r" };
        for _ in 0..self.z.unsigned_abs() {
            f.write_str(suffix)?;
        }
        Ok(())
    }
}

/// A type: an ordered sequence of objects.
///
/// The backing storage is shared, so cloning a `Ty` never copies objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ty {
    objects: Arc<[Ob]>,
}

impl Ty {
    /// The monoidal unit.
    pub fn unit() -> Self {
        Self {
            objects: Arc::from(Vec::<Ob>::new()),
        }
    }

    /// A type with a single zero-level object.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self::from(Ob::new(name))
    }

    /// A type with one zero-level object per name.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        names.into_iter().map(Ob::new).collect()
    }

    /// The single classical wire.
    pub fn bit() -> Self {
        Self::new(BIT)
    }

    /// The single quantum wire.
    pub fn qubit() -> Self {
        Self::new(QUBIT)
    }

    /// `n` classical wires.
    pub fn bits(n: usize) -> Self {
        Self::bit().repeat(n)
    }

    /// `n` quantum wires.
    pub fn qubits(n: usize) -> Self {
        Self::qubit().repeat(n)
    }

    /// The objects of this type.
    #[inline]
    pub fn objects(&self) -> &[Ob] {
        &self.objects
    }

    /// Iterate over the objects.
    pub fn iter(&self) -> std::slice::Iter<'_, Ob> {
        self.objects.iter()
    }

    /// Number of objects.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether this is the unit type.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The object at position `i`, if any.
    pub fn get(&self, i: usize) -> Option<&Ob> {
        self.objects.get(i)
    }

    /// Concatenation.
    #[must_use]
    pub fn tensor(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        self.iter().chain(other.iter()).cloned().collect()
    }

    /// `n` copies of this type side by side.
    #[must_use]
    pub fn repeat(&self, n: usize) -> Self {
        (0..n).flat_map(|_| self.iter().cloned()).collect()
    }

    /// Left adjoint: reversed, each object lowered by one level.
    #[must_use]
    pub fn l(&self) -> Self {
        self.iter().rev().map(Ob::l).collect()
    }

    /// Right adjoint: reversed, each object raised by one level.
    #[must_use]
    pub fn r(&self) -> Self {
        self.iter().rev().map(Ob::r).collect()
    }

    /// Sub-type over a range of positions.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds, like slice indexing.
    #[must_use]
    pub fn slice(&self, range: impl RangeBounds<usize>) -> Self {
        let start = match range.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => e + 1,
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len(),
        };
        if start == 0 && end == self.len() {
            return self.clone();
        }
        Self::from(&self.objects[start..end])
    }

    /// Winding number of a single-object type.
    pub fn z(&self) -> IrResult<i32> {
        match self.objects() {
            [ob] => Ok(ob.z()),
            _ => Err(IrError::Arity {
                operation: "winding number",
                got: self.to_string(),
            }),
        }
    }

    /// Pregroup quotient `self.r @ other`: expects `self` on its left.
    #[must_use]
    pub fn under(&self, other: &Self) -> Self {
        self.r().tensor(other)
    }

    /// Pregroup quotient `self @ other.l`: expects `other` on its right.
    #[must_use]
    pub fn over(&self, other: &Self) -> Self {
        self.tensor(&other.l())
    }

    /// Number of objects (at any level) with the given name.
    pub fn count(&self, name: &str) -> usize {
        self.iter().filter(|ob| ob.name() == name).count()
    }
}

impl Default for Ty {
    fn default() -> Self {
        Self::unit()
    }
}

impl From<Ob> for Ty {
    fn from(ob: Ob) -> Self {
        Self {
            objects: Arc::from(vec![ob]),
        }
    }
}

impl From<&[Ob]> for Ty {
    fn from(objects: &[Ob]) -> Self {
        Self {
            objects: Arc::from(objects),
        }
    }
}

impl FromIterator<Ob> for Ty {
    fn from_iter<I: IntoIterator<Item = Ob>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Ty {
    type Item = &'a Ob;
    type IntoIter = std::slice::Iter<'a, Ob>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Index<usize> for Ty {
    type Output = Ob;

    fn index(&self, index: usize) -> &Ob {
        &self.objects[index]
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Ty()");
        }
        for (i, ob) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" @ ")?;
            }
            write!(f, "{ob}")?;
        }
        Ok(())
    }
}

//! Tensors: linear maps between products of finite-dimensional spaces.

use std::fmt;

use ndarray::{Array2, ArrayD, Dimension, IxDyn};
use num_complex::Complex64;
use yank_ir::{Category, IrError, nested_cups};

use crate::dim::Dim;
use crate::error::{QuantumError, QuantumResult};

pub(crate) const ZERO: Complex64 = Complex64::new(0.0, 0.0);
pub(crate) const ONE: Complex64 = Complex64::new(1.0, 0.0);

fn delta(holds: bool) -> Complex64 {
    if holds { ONE } else { ZERO }
}

/// A linear map from `dom` to `cod`.
///
/// The array has one axis per factor of `dom` followed by one axis per factor
/// of `cod`. Read as a matrix, rows are indexed by the domain and columns by
/// the codomain, so composition is a matrix product in diagram order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    dom: Dim,
    cod: Dim,
    array: ArrayD<Complex64>,
}

fn shape(dom: &Dim, cod: &Dim) -> Vec<usize> {
    dom.dims().iter().chain(cod.dims()).copied().collect()
}

impl Tensor {
    /// Build a tensor from entries in row-major order.
    pub fn from_vec(dom: Dim, cod: Dim, data: Vec<Complex64>) -> QuantumResult<Self> {
        let expected = shape(&dom, &cod);
        let got = data.len();
        let array = ArrayD::from_shape_vec(IxDyn(&expected), data)
            .map_err(|_| QuantumError::ShapeMismatch {
                expected: expected.clone(),
                got,
            })?;
        Ok(Self { dom, cod, array })
    }

    /// Build a tensor from real entries in row-major order.
    pub fn from_real(dom: Dim, cod: Dim, data: &[f64]) -> QuantumResult<Self> {
        Self::from_vec(dom, cod, data.iter().map(|&x| Complex64::new(x, 0.0)).collect())
    }

    /// Reshape an array of any shape with the right number of entries.
    pub fn new(dom: Dim, cod: Dim, array: &ArrayD<Complex64>) -> QuantumResult<Self> {
        Self::from_vec(dom, cod, array.iter().copied().collect())
    }

    /// Build a tensor entry by entry from its matrix coordinates.
    pub(crate) fn from_fn(dom: Dim, cod: Dim, f: impl Fn(usize, usize) -> Complex64) -> Self {
        let shape = shape(&dom, &cod);
        let n_dom = dom.len();
        let array = ArrayD::from_shape_fn(IxDyn(&shape), |idx: IxDyn| {
            let (mut row, mut col) = (0, 0);
            for (axis, &i) in idx.slice().iter().enumerate() {
                if axis < n_dom {
                    row = row * shape[axis] + i;
                } else {
                    col = col * shape[axis] + i;
                }
            }
            f(row, col)
        });
        Self { dom, cod, array }
    }

    /// A map from the unit to the unit.
    pub fn scalar(value: Complex64) -> Self {
        Self::from_fn(Dim::unit(), Dim::unit(), |_, _| value)
    }

    pub fn id(dom: &Dim) -> Self {
        Self::from_fn(dom.clone(), dom.clone(), |i, j| delta(i == j))
    }

    #[inline]
    pub fn dom(&self) -> &Dim {
        &self.dom
    }

    #[inline]
    pub fn cod(&self) -> &Dim {
        &self.cod
    }

    #[inline]
    pub fn array(&self) -> &ArrayD<Complex64> {
        &self.array
    }

    /// The tensor as a `dom.size() x cod.size()` matrix.
    pub fn matrix(&self) -> Array2<Complex64> {
        let cols = self.cod.size();
        let flat: Vec<Complex64> = self.array.iter().copied().collect();
        Array2::from_shape_fn((self.dom.size(), cols), |(i, j)| flat[i * cols + j])
    }

    /// Sequential composition, `self` first.
    pub fn then(&self, other: &Self) -> QuantumResult<Self> {
        if self.cod != other.dom {
            return Err(IrError::NotComposable {
                cod: self.cod.to_string(),
                dom: other.dom.to_string(),
            }
            .into());
        }
        let product = self.matrix().dot(&other.matrix());
        Ok(Self::from_fn(self.dom.clone(), other.cod.clone(), |i, j| {
            product[[i, j]]
        }))
    }

    /// Kronecker product, `self` on the left.
    #[must_use]
    pub fn tensor(&self, other: &Self) -> Self {
        let (a, b) = (self.matrix(), other.matrix());
        let (rows, cols) = (other.dom.size(), other.cod.size());
        Self::from_fn(
            self.dom.tensor(&other.dom),
            self.cod.tensor(&other.cod),
            |i, j| a[[i / rows, j / cols]] * b[[i % rows, j % cols]],
        )
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Self {
        let m = self.matrix();
        Self::from_fn(self.cod.clone(), self.dom.clone(), |i, j| m[[j, i]].conj())
    }

    /// Entrywise complex conjugate.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self {
            dom: self.dom.clone(),
            cod: self.cod.clone(),
            array: self.array.mapv(|z| z.conj()),
        }
    }

    /// The permutation `left @ right -> right @ left`.
    pub fn swap(left: &Dim, right: &Dim) -> Self {
        let (l, r) = (left.size(), right.size());
        Self::from_fn(left.tensor(right), right.tensor(left), |row, col| {
            delta(col == (row % r) * l + row / r)
        })
    }

    /// Nested cups: the pairing of each factor of `left` with its mirror in
    /// `right`.
    pub fn cups(left: &Dim, right: &Dim) -> QuantumResult<Self> {
        nested_cups(
            left,
            right,
            |x: &Dim, y: &Dim| {
                if x != y {
                    return Err(IrError::NotAdjoint {
                        left: x.to_string(),
                        right: y.to_string(),
                    }
                    .into());
                }
                let n = x.size();
                Ok(Self::from_fn(x.tensor(y), Dim::unit(), |row, _| {
                    delta(row / n == row % n)
                }))
            },
            false,
        )
    }

    pub fn caps(left: &Dim, right: &Dim) -> QuantumResult<Self> {
        Ok(Self::cups(left, right)?.dagger())
    }

    /// Round real and imaginary parts to `decimals` places.
    #[must_use]
    pub fn round(&self, decimals: i32) -> Self {
        let scale = 10f64.powi(decimals);
        let round = |x: f64| (x * scale).round() / scale;
        Self {
            dom: self.dom.clone(),
            cod: self.cod.clone(),
            array: self.array.mapv(|z| Complex64::new(round(z.re), round(z.im))),
        }
    }

    /// Same type and every entry within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.dom == other.dom
            && self.cod == other.cod
            && self
                .array
                .iter()
                .zip(other.array.iter())
                .all(|(a, b)| (a - b).norm() <= tolerance)
    }

    /// Entrywise sum of two maps of the same type.
    pub fn try_add(&self, other: &Self) -> QuantumResult<Self> {
        if self.dom != other.dom || self.cod != other.cod {
            return Err(QuantumError::DimensionMismatch {
                left: format!("{} -> {}", self.dom, self.cod),
                right: format!("{} -> {}", other.dom, other.cod),
            });
        }
        Ok(Self {
            dom: self.dom.clone(),
            cod: self.cod.clone(),
            array: &self.array + &other.array,
        })
    }
}

pub(crate) fn format_entries(f: &mut fmt::Formatter<'_>, array: &ArrayD<Complex64>) -> fmt::Result {
    f.write_str("[")?;
    for (i, z) in array.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if z.im == 0.0 {
            write!(f, "{}", z.re)?;
        } else {
            write!(f, "{z}")?;
        }
    }
    f.write_str("]")
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor(dom={}, cod={}, array=", self.dom, self.cod)?;
        format_entries(f, &self.array)?;
        f.write_str(")")
    }
}

impl Category for Tensor {
    type Ob = Dim;
    type Error = QuantumError;

    fn dom(&self) -> Dim {
        self.dom.clone()
    }

    fn cod(&self) -> Dim {
        self.cod.clone()
    }

    fn id(ob: &Dim) -> Self {
        Tensor::id(ob)
    }

    fn then(&self, other: &Self) -> QuantumResult<Self> {
        Tensor::then(self, other)
    }

    fn tensor(&self, other: &Self) -> QuantumResult<Self> {
        Ok(Tensor::tensor(self, other))
    }

    fn dagger(&self) -> Self {
        Tensor::dagger(self)
    }

    fn swap(left: &Dim, right: &Dim) -> QuantumResult<Self> {
        Ok(Tensor::swap(left, right))
    }

    fn cups(left: &Dim, right: &Dim) -> QuantumResult<Self> {
        Tensor::cups(left, right)
    }

    fn caps(left: &Dim, right: &Dim) -> QuantumResult<Self> {
        Tensor::caps(left, right)
    }
}

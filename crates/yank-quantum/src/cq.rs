//! Classical-quantum maps.
//!
//! A [`CQMap`] from `CQ(c, q)` to `CQ(c', q')` is stored as a [`Tensor`]
//! from `c @ q @ q` to `c' @ q' @ q'`. The quantum space appears twice: once
//! for the conjugate (bra) leg and once for the ket leg of a density matrix.
//! Classical data has no conjugate leg.

use std::fmt;

use num_complex::Complex64;
use yank_ir::{Category, IrError, Object};

use crate::dim::Dim;
use crate::error::{QuantumError, QuantumResult};
use crate::tensor::{ONE, Tensor, ZERO, format_entries};

/// Order of the axis groups of `f @ g` on doubled legs, where `f` owns
/// groups `0..3` and `6..9` and `g` owns `3..6` and `9..12`.
const INTERLEAVED: [usize; 12] = [0, 3, 1, 4, 2, 5, 6, 9, 7, 10, 8, 11];

/// Dimensions of a classical-quantum system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CQ {
    classical: Dim,
    quantum: Dim,
}

impl CQ {
    pub fn new(classical: Dim, quantum: Dim) -> Self {
        Self { classical, quantum }
    }

    /// A purely classical system.
    pub fn c(dim: Dim) -> Self {
        Self::new(dim, Dim::unit())
    }

    /// A purely quantum system.
    pub fn q(dim: Dim) -> Self {
        Self::new(Dim::unit(), dim)
    }

    #[inline]
    pub fn classical(&self) -> &Dim {
        &self.classical
    }

    #[inline]
    pub fn quantum(&self) -> &Dim {
        &self.quantum
    }

    /// Whether this is the trivial system.
    pub fn is_empty(&self) -> bool {
        self.classical.is_empty() && self.quantum.is_empty()
    }

    /// Dimensions of the underlying tensor leg: `c @ q @ q`.
    pub fn doubled(&self) -> Dim {
        self.classical.tensor(&self.quantum).tensor(&self.quantum)
    }
}

impl Object for CQ {
    fn unit() -> Self {
        Self::default()
    }

    fn tensor(&self, other: &Self) -> Self {
        Self::new(
            self.classical.tensor(&other.classical),
            self.quantum.tensor(&other.quantum),
        )
    }

    fn l(&self) -> Self {
        Self::new(self.classical.reversed(), self.quantum.reversed())
    }

    fn r(&self) -> Self {
        self.l()
    }
}

impl fmt::Display for CQ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.classical.is_empty(), self.quantum.is_empty()) {
            (true, true) => f.write_str("CQ()"),
            (true, false) => write!(f, "Q({})", self.quantum),
            (false, true) => write!(f, "C({})", self.classical),
            (false, false) => write!(f, "C({}) @ Q({})", self.classical, self.quantum),
        }
    }
}

/// A completely positive map between classical-quantum systems.
#[derive(Debug, Clone, PartialEq)]
pub struct CQMap {
    dom: CQ,
    cod: CQ,
    data: Tensor,
}

impl CQMap {
    /// Wrap a tensor on the doubled legs of `dom` and `cod`.
    pub fn new(dom: CQ, cod: CQ, data: Tensor) -> QuantumResult<Self> {
        if data.dom() != &dom.doubled() || data.cod() != &cod.doubled() {
            return Err(QuantumError::DimensionMismatch {
                left: format!("{dom} -> {cod}"),
                right: format!("{} -> {}", data.dom(), data.cod()),
            });
        }
        Ok(Self { dom, cod, data })
    }

    /// Build a map from entries in row-major order over the doubled legs.
    pub fn from_vec(dom: CQ, cod: CQ, entries: Vec<Complex64>) -> QuantumResult<Self> {
        let data = Tensor::from_vec(dom.doubled(), cod.doubled(), entries)?;
        Ok(Self { dom, cod, data })
    }

    fn wrap(dom: CQ, cod: CQ, data: Tensor) -> Self {
        debug_assert_eq!(data.dom(), &dom.doubled());
        debug_assert_eq!(data.cod(), &cod.doubled());
        Self { dom, cod, data }
    }

    #[inline]
    pub fn dom(&self) -> &CQ {
        &self.dom
    }

    #[inline]
    pub fn cod(&self) -> &CQ {
        &self.cod
    }

    /// The underlying tensor.
    #[inline]
    pub fn data(&self) -> &Tensor {
        &self.data
    }

    pub fn id(dom: &CQ) -> Self {
        Self::wrap(dom.clone(), dom.clone(), Tensor::id(&dom.doubled()))
    }

    pub fn then(&self, other: &Self) -> QuantumResult<Self> {
        if self.cod != other.dom {
            return Err(IrError::NotComposable {
                cod: self.cod.to_string(),
                dom: other.dom.to_string(),
            }
            .into());
        }
        let data = self.data.then(&other.data)?;
        Ok(Self::wrap(self.dom.clone(), other.cod.clone(), data))
    }

    #[must_use]
    pub fn dagger(&self) -> Self {
        Self::wrap(self.cod.clone(), self.dom.clone(), self.data.dagger())
    }

    /// Parallel composition.
    ///
    /// The legs `c_f q_f q_f` and `c_g q_g q_g` of the two operands are
    /// interleaved into `c_f c_g q_f q_g q_f q_g` on both sides, by permuting
    /// the axes of the Kronecker product of the underlying tensors.
    pub fn tensor(&self, other: &Self) -> QuantumResult<Self> {
        let legs = |x: &CQ| [x.classical().len(), x.quantum().len(), x.quantum().len()];
        // Axis groups of the Kronecker product: f dom, g dom, f cod, g cod.
        let sizes: Vec<usize> = [&self.dom, &other.dom, &self.cod, &other.cod]
            .into_iter()
            .flat_map(legs)
            .collect();
        let starts: Vec<usize> = sizes
            .iter()
            .scan(0, |start, &size| {
                let here = *start;
                *start += size;
                Some(here)
            })
            .collect();
        let axes: Vec<usize> = INTERLEAVED
            .iter()
            .flat_map(|&group| starts[group]..starts[group] + sizes[group])
            .collect();

        let dom = self.dom.tensor(&other.dom);
        let cod = self.cod.tensor(&other.cod);
        let array = self.data.tensor(&other.data).array().clone().permuted_axes(axes);
        let data = Tensor::new(dom.doubled(), cod.doubled(), &array)?;
        Ok(Self::wrap(dom, cod, data))
    }

    /// The symmetry `left @ right -> right @ left`.
    pub fn swap(left: &CQ, right: &CQ) -> Self {
        let quantum = Tensor::swap(left.quantum(), right.quantum());
        let data = Tensor::swap(left.classical(), right.classical())
            .tensor(&quantum)
            .tensor(&quantum);
        Self::wrap(left.tensor(right), right.tensor(left), data)
    }

    /// Measurement in the computational basis.
    ///
    /// The destructive measurement maps `Q(dim)` to `C(dim)`; otherwise the
    /// measured state is also kept, giving `C(dim) @ Q(dim)`.
    pub fn measure(dim: &Dim, destructive: bool) -> QuantumResult<Self> {
        match dim.dims() {
            [] => Ok(Self::id(&CQ::unit())),
            [d] => {
                let d = *d;
                let single = Dim::new([d]);
                // Every leg carries the same basis index.
                let same = |indices: &[usize]| indices.iter().all(|&i| i == indices[0]);
                if destructive {
                    let data = Tensor::from_fn(single.tensor(&single), single.clone(), |row, col| {
                        if same(&[row / d, row % d, col]) { ONE } else { ZERO }
                    });
                    return Ok(Self::wrap(CQ::q(single.clone()), CQ::c(single), data));
                }
                let cod = CQ::new(single.clone(), single.clone());
                let data = Tensor::from_fn(single.tensor(&single), cod.doubled(), |row, col| {
                    if same(&[row / d, row % d, col / (d * d), (col / d) % d, col % d]) {
                        ONE
                    } else {
                        ZERO
                    }
                });
                Ok(Self::wrap(CQ::q(single), cod, data))
            }
            [first, rest @ ..] => Self::measure(&Dim::new([*first]), destructive)?
                .tensor(&Self::measure(&Dim::new(rest.iter().copied()), destructive)?),
        }
    }

    /// State preparation, the dagger of [`CQMap::measure`].
    pub fn encode(dim: &Dim, constructive: bool) -> QuantumResult<Self> {
        Ok(Self::measure(dim, constructive)?.dagger())
    }

    /// Lift a linear map `f` to `f.conjugate() @ f` on quantum systems.
    pub fn pure(tensor: &Tensor) -> Self {
        Self::wrap(
            CQ::q(tensor.dom().clone()),
            CQ::q(tensor.cod().clone()),
            tensor.conjugate().tensor(tensor),
        )
    }

    /// Lift a map on classical data; no conjugate leg is added.
    pub fn classical(tensor: &Tensor) -> Self {
        Self::wrap(
            CQ::c(tensor.dom().clone()),
            CQ::c(tensor.cod().clone()),
            tensor.clone(),
        )
    }

    /// Trace out quantum systems and sum over classical ones.
    pub fn discard(dom: &CQ) -> Self {
        let q = dom.quantum().size();
        let data = Tensor::from_fn(dom.doubled(), Dim::unit(), |row, _| {
            let (bra, ket) = ((row / q) % q, row % q);
            if bra == ket { ONE } else { ZERO }
        });
        Self::wrap(dom.clone(), CQ::unit(), data)
    }

    pub fn cups(left: &CQ, right: &CQ) -> QuantumResult<Self> {
        Self::classical(&Tensor::cups(left.classical(), right.classical())?)
            .tensor(&Self::pure(&Tensor::cups(left.quantum(), right.quantum())?))
    }

    pub fn caps(left: &CQ, right: &CQ) -> QuantumResult<Self> {
        Ok(Self::cups(left, right)?.dagger())
    }

    #[must_use]
    pub fn round(&self, decimals: i32) -> Self {
        Self::wrap(self.dom.clone(), self.cod.clone(), self.data.round(decimals))
    }

    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.dom == other.dom && self.cod == other.cod && self.data.approx_eq(&other.data, tolerance)
    }

    pub fn try_add(&self, other: &Self) -> QuantumResult<Self> {
        if self.dom != other.dom || self.cod != other.cod {
            return Err(QuantumError::DimensionMismatch {
                left: format!("{} -> {}", self.dom, self.cod),
                right: format!("{} -> {}", other.dom, other.cod),
            });
        }
        Ok(Self::wrap(
            self.dom.clone(),
            self.cod.clone(),
            self.data.try_add(&other.data)?,
        ))
    }
}

impl fmt::Display for CQMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CQMap(dom={}, cod={}, array=", self.dom, self.cod)?;
        format_entries(f, self.data.array())?;
        f.write_str(")")
    }
}

impl Category for CQMap {
    type Ob = CQ;
    type Error = QuantumError;

    fn dom(&self) -> CQ {
        self.dom.clone()
    }

    fn cod(&self) -> CQ {
        self.cod.clone()
    }

    fn id(ob: &CQ) -> Self {
        CQMap::id(ob)
    }

    fn then(&self, other: &Self) -> QuantumResult<Self> {
        CQMap::then(self, other)
    }

    fn tensor(&self, other: &Self) -> QuantumResult<Self> {
        CQMap::tensor(self, other)
    }

    fn dagger(&self) -> Self {
        CQMap::dagger(self)
    }

    fn swap(left: &CQ, right: &CQ) -> QuantumResult<Self> {
        Ok(CQMap::swap(left, right))
    }

    fn cups(left: &CQ, right: &CQ) -> QuantumResult<Self> {
        CQMap::cups(left, right)
    }

    fn caps(left: &CQ, right: &CQ) -> QuantumResult<Self> {
        CQMap::caps(left, right)
    }
}

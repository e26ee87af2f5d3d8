//! Generators: the elementary arrows a diagram is built from.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::ty::{BIT, Ob, QUBIT, Ty};

/// How a box relates to its dagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Adjoint {
    /// The box as declared.
    #[default]
    Plain,
    /// The dagger of a declared box.
    Daggered,
    /// A box equal to its own dagger.
    SelfAdjoint,
}

impl Adjoint {
    /// The flag of the dagger.
    #[must_use]
    pub fn dagger(self) -> Self {
        match self {
            Self::Plain => Self::Daggered,
            Self::Daggered => Self::Plain,
            Self::SelfAdjoint => Self::SelfAdjoint,
        }
    }
}

/// A named box with a domain, a codomain and an optional numeric payload.
///
/// The payload is a flattened complex array whose row index runs over the
/// input wires and whose column index runs over the output wires. It is
/// compared bitwise, so boxes can be used as hash keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxGen {
    name: Arc<str>,
    dom: Ty,
    cod: Ty,
    #[serde(default)]
    adjoint: Adjoint,
    #[serde(default)]
    data: Option<Arc<[Complex64]>>,
}

impl BoxGen {
    /// Create a box without payload.
    pub fn new(name: impl Into<Arc<str>>, dom: Ty, cod: Ty) -> Self {
        Self {
            name: name.into(),
            dom,
            cod,
            adjoint: Adjoint::Plain,
            data: None,
        }
    }

    /// Attach a numeric payload.
    #[must_use]
    pub fn with_data(mut self, data: impl Into<Arc<[Complex64]>>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Mark the box as equal to its own dagger.
    #[must_use]
    pub fn self_adjoint(mut self) -> Self {
        self.adjoint = Adjoint::SelfAdjoint;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn dom(&self) -> &Ty {
        &self.dom
    }

    #[inline]
    pub fn cod(&self) -> &Ty {
        &self.cod
    }

    #[inline]
    pub fn adjoint(&self) -> Adjoint {
        self.adjoint
    }

    /// The numeric payload, if any.
    pub fn data(&self) -> Option<&[Complex64]> {
        self.data.as_deref()
    }

    /// Whether this is the dagger of a declared box.
    #[inline]
    pub fn is_dagger(&self) -> bool {
        self.adjoint == Adjoint::Daggered
    }

    /// The dagger: domain and codomain exchanged, flag flipped.
    #[must_use]
    pub fn dagger(&self) -> Self {
        if self.adjoint == Adjoint::SelfAdjoint {
            return self.clone();
        }
        Self {
            name: Arc::clone(&self.name),
            dom: self.cod.clone(),
            cod: self.dom.clone(),
            adjoint: self.adjoint.dagger(),
            data: self.data.clone(),
        }
    }

    /// The declared box this one derives from.
    #[must_use]
    pub fn undaggered(&self) -> Self {
        if self.is_dagger() {
            self.dagger()
        } else {
            self.clone()
        }
    }

    fn data_bits(&self) -> Option<impl Iterator<Item = (u64, u64)> + '_> {
        self.data
            .as_deref()
            .map(|d| d.iter().map(|c| (c.re.to_bits(), c.im.to_bits())))
    }
}

impl PartialEq for BoxGen {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.dom == other.dom
            && self.cod == other.cod
            && self.adjoint == other.adjoint
            && match (self.data_bits(), other.data_bits()) {
                (None, None) => true,
                (Some(a), Some(b)) => a.eq(b),
                _ => false,
            }
    }
}

impl Eq for BoxGen {}

impl Hash for BoxGen {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.dom.hash(state);
        self.cod.hash(state);
        self.adjoint.hash(state);
        if let Some(bits) = self.data_bits() {
            for pair in bits {
                pair.hash(state);
            }
        }
    }
}

impl fmt::Display for BoxGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.is_dagger() {
            f.write_str(".dagger()")?;
        }
        Ok(())
    }
}

/// An elementary arrow.
///
/// `Cup`, `Cap` and `Swap` carry single objects. Use [`Generator::cup`] and
/// [`Generator::cap`] to build them from types with the adjunction checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Generator {
    /// A user box.
    Box(Arc<BoxGen>),
    /// `left @ right -> I`.
    Cup { left: Ob, right: Ob },
    /// `I -> left @ right`.
    Cap { left: Ob, right: Ob },
    /// `left @ right -> right @ left`.
    Swap { left: Ob, right: Ob },
    /// Measurement of `n_qubits` qubits into bits.
    Measure {
        n_qubits: usize,
        /// Destroy the measured qubits instead of keeping them.
        destructive: bool,
        /// Take as many bits as input and overwrite them.
        override_bits: bool,
    },
    /// Preparation of qubits from bits, the dagger of [`Generator::Measure`].
    Encode {
        n_bits: usize,
        /// Build the qubits from scratch rather than from input qubits.
        constructive: bool,
        /// Also output the encoded bits.
        reset_bits: bool,
    },
    /// Trace out the given wires.
    Discard { dom: Ty },
    /// Maximally mixed state on the given wires.
    MixedState { cod: Ty },
}

fn single(operation: &'static str, left: &Ty, right: &Ty) -> IrResult<(Ob, Ob)> {
    match (left.objects(), right.objects()) {
        ([l], [r]) => Ok((l.clone(), r.clone())),
        _ => Err(IrError::Arity {
            operation,
            got: left.tensor(right).to_string(),
        }),
    }
}

impl Generator {
    /// A cup `left @ right -> I`, with `left.r == right`.
    pub fn cup(left: &Ty, right: &Ty) -> IrResult<Self> {
        let (l, r) = single("Cup", left, right)?;
        if l.r() != r && l != r.r() {
            return Err(IrError::NotAdjoint {
                left: left.to_string(),
                right: right.to_string(),
            });
        }
        if l == r.r() {
            return Err(IrError::WrongAdjunction {
                left: left.to_string(),
                right: right.to_string(),
                shape: "cup",
            });
        }
        Ok(Self::Cup { left: l, right: r })
    }

    /// A cap `I -> left @ right`, with `left == right.r`.
    pub fn cap(left: &Ty, right: &Ty) -> IrResult<Self> {
        let (l, r) = single("Cap", left, right)?;
        if l != r.r() && l.r() != r {
            return Err(IrError::NotAdjoint {
                left: left.to_string(),
                right: right.to_string(),
            });
        }
        if l.r() == r {
            return Err(IrError::WrongAdjunction {
                left: left.to_string(),
                right: right.to_string(),
                shape: "cap",
            });
        }
        Ok(Self::Cap { left: l, right: r })
    }

    /// A swap of two single objects.
    pub fn swap(left: &Ty, right: &Ty) -> IrResult<Self> {
        let (l, r) = single("Swap", left, right)?;
        Ok(Self::Swap { left: l, right: r })
    }

    pub fn dom(&self) -> Ty {
        match self {
            Self::Box(b) => b.dom().clone(),
            Self::Cup { left, right } | Self::Swap { left, right } => {
                [left.clone(), right.clone()].into_iter().collect()
            }
            Self::Cap { .. } | Self::MixedState { .. } => Ty::unit(),
            Self::Measure {
                n_qubits,
                override_bits,
                ..
            } => {
                let bits = if *override_bits { *n_qubits } else { 0 };
                Ty::qubits(*n_qubits).tensor(&Ty::bits(bits))
            }
            Self::Encode {
                n_bits,
                constructive,
                ..
            } => {
                if *constructive {
                    Ty::bits(*n_bits)
                } else {
                    Ty::qubits(*n_bits).tensor(&Ty::bits(*n_bits))
                }
            }
            Self::Discard { dom } => dom.clone(),
        }
    }

    pub fn cod(&self) -> Ty {
        match self {
            Self::Box(b) => b.cod().clone(),
            Self::Cap { left, right } => [left.clone(), right.clone()].into_iter().collect(),
            Self::Swap { left, right } => [right.clone(), left.clone()].into_iter().collect(),
            Self::Cup { .. } | Self::Discard { .. } => Ty::unit(),
            Self::Measure {
                n_qubits,
                destructive,
                ..
            } => {
                if *destructive {
                    Ty::bits(*n_qubits)
                } else {
                    Ty::qubits(*n_qubits).tensor(&Ty::bits(*n_qubits))
                }
            }
            Self::Encode {
                n_bits, reset_bits, ..
            } => {
                let bits = if *reset_bits { *n_bits } else { 0 };
                Ty::qubits(*n_bits).tensor(&Ty::bits(bits))
            }
            Self::MixedState { cod } => cod.clone(),
        }
    }

    /// The dagger of this generator; an involution.
    #[must_use]
    pub fn dagger(&self) -> Self {
        match self {
            Self::Box(b) if b.adjoint() == Adjoint::SelfAdjoint => self.clone(),
            Self::Box(b) => Self::Box(Arc::new(b.dagger())),
            Self::Cup { left, right } => Self::Cap {
                left: left.clone(),
                right: right.clone(),
            },
            Self::Cap { left, right } => Self::Cup {
                left: left.clone(),
                right: right.clone(),
            },
            Self::Swap { left, right } => Self::Swap {
                left: right.clone(),
                right: left.clone(),
            },
            Self::Measure {
                n_qubits,
                destructive,
                override_bits,
            } => Self::Encode {
                n_bits: *n_qubits,
                constructive: *destructive,
                reset_bits: *override_bits,
            },
            Self::Encode {
                n_bits,
                constructive,
                reset_bits,
            } => Self::Measure {
                n_qubits: *n_bits,
                destructive: *constructive,
                override_bits: *reset_bits,
            },
            Self::Discard { dom } => Self::MixedState { cod: dom.clone() },
            Self::MixedState { cod } => Self::Discard { dom: cod.clone() },
        }
    }

    /// Whether this generator only makes sense as a classical-quantum map.
    pub fn is_mixed(&self) -> bool {
        match self {
            Self::Box(b) => {
                let wires = b.dom().tensor(b.cod());
                wires.count(BIT) > 0 && wires.count(QUBIT) > 0
            }
            Self::Swap { left, right } => left != right,
            Self::Cup { .. } | Self::Cap { .. } => false,
            Self::Measure { .. }
            | Self::Encode { .. }
            | Self::Discard { .. }
            | Self::MixedState { .. } => true,
        }
    }

    /// The box, if this generator is one.
    pub fn as_box(&self) -> Option<&BoxGen> {
        match self {
            Self::Box(b) => Some(b),
            _ => None,
        }
    }

    #[inline]
    pub fn is_cup(&self) -> bool {
        matches!(self, Self::Cup { .. })
    }

    #[inline]
    pub fn is_cap(&self) -> bool {
        matches!(self, Self::Cap { .. })
    }
}

impl From<BoxGen> for Generator {
    fn from(b: BoxGen) -> Self {
        Self::Box(Arc::new(b))
    }
}

impl From<Arc<BoxGen>> for Generator {
    fn from(b: Arc<BoxGen>) -> Self {
        Self::Box(b)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box(b) => write!(f, "{b}"),
            Self::Cup { left, right } => write!(f, "Cup({left}, {right})"),
            Self::Cap { left, right } => write!(f, "Cap({left}, {right})"),
            Self::Swap { left, right } => write!(f, "Swap({left}, {right})"),
            Self::Measure {
                n_qubits,
                destructive,
                override_bits,
            } => write!(
                f,
                "Measure({n_qubits}, destructive={destructive}, override_bits={override_bits})"
            ),
            Self::Encode {
                n_bits,
                constructive,
                reset_bits,
            } => write!(
                f,
                "Encode({n_bits}, constructive={constructive}, reset_bits={reset_bits})"
            ),
            Self::Discard { dom } => write!(f, "Discard({dom})"),
            Self::MixedState { cod } => write!(f, "MixedState({cod})"),
        }
    }
}

//! Evaluation of circuits: diagrams whose wires are bits and qubits.
//!
//! A pure circuit evaluates to a [`Tensor`]. A mixed circuit, one that
//! carries bits and qubits side by side or contains a measurement, discard
//! or preparation, evaluates to a [`CQMap`].

use std::collections::BTreeMap;
use std::fmt;

use ndarray::{ArrayD, Dimension};
use tracing::{debug, instrument};
use yank_ir::{BIT, Diagram, Functor, Generator, IrError, Ob, Object, QUBIT, Ty};

use crate::cq::{CQ, CQMap};
use crate::dim::Dim;
use crate::error::{QuantumError, QuantumResult};
use crate::gates;
use crate::tensor::Tensor;

/// Probabilities below this are reported as zero counts.
const EPSILON: f64 = 1e-10;

/// The value of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum Semantics {
    /// A linear map.
    Pure(Tensor),
    /// A classical-quantum map.
    Mixed(CQMap),
}

impl fmt::Display for Semantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pure(t) => write!(f, "{t}"),
            Self::Mixed(m) => write!(f, "{m}"),
        }
    }
}

fn wire_dims(ty: &Ty) -> QuantumResult<Dim> {
    if let Some(ob) = ty.iter().find(|ob| ob.name() != BIT && ob.name() != QUBIT) {
        return Err(IrError::MissingImage(ob.to_string()).into());
    }
    Ok(Dim::qubits(ty.len()))
}

fn cq_type(ty: &Ty) -> QuantumResult<CQ> {
    ty.iter().try_fold(CQ::unit(), |acc, ob| match ob.name() {
        BIT => Ok(acc.tensor(&CQ::c(Dim::qubits(1)))),
        QUBIT => Ok(acc.tensor(&CQ::q(Dim::qubits(1)))),
        _ => Err(IrError::MissingImage(ob.to_string()).into()),
    })
}

fn box_tensor(generator: &Generator) -> QuantumResult<Tensor> {
    let Generator::Box(b) = generator else {
        return Err(QuantumError::NotMixedEvaluable(generator.to_string()));
    };
    let data = b
        .data()
        .ok_or_else(|| IrError::MissingImage(b.to_string()))?;
    Tensor::from_vec(wire_dims(b.dom())?, wire_dims(b.cod())?, data.to_vec())
}

fn cq_image(generator: &Generator) -> QuantumResult<CQMap> {
    match generator {
        Generator::Discard { dom } => Ok(CQMap::discard(&cq_type(dom)?)),
        Generator::Measure {
            n_qubits,
            destructive,
            override_bits,
        } => {
            let dim = Dim::qubits(*n_qubits);
            let measure = CQMap::measure(&dim, *destructive)?;
            if *override_bits {
                measure.tensor(&CQMap::discard(&CQ::c(dim)))
            } else {
                Ok(measure)
            }
        }
        Generator::Encode { .. } | Generator::MixedState { .. } => {
            Ok(cq_image(&generator.dagger())?.dagger())
        }
        Generator::Box(b) if generator.is_mixed() => {
            Err(QuantumError::NotMixedEvaluable(b.to_string()))
        }
        Generator::Box(b) => {
            let tensor = box_tensor(generator)?;
            let wires = b.dom().tensor(b.cod());
            if !wires.is_empty() && wires.count(BIT) == wires.len() {
                Ok(CQMap::classical(&tensor))
            } else {
                // Scalars are amplitudes and get squared like any pure map.
                Ok(CQMap::pure(&tensor))
            }
        }
        other => Err(IrError::MissingImage(other.to_string()).into()),
    }
}

fn tensor_functor() -> Functor<Tensor> {
    let two = Dim::qubits(1);
    Functor::from_rule(
        [(Ob::new(BIT), two.clone()), (Ob::new(QUBIT), two)],
        box_tensor,
    )
}

fn cq_functor() -> Functor<CQMap> {
    Functor::from_rule(
        [
            (Ob::new(BIT), CQ::c(Dim::qubits(1))),
            (Ob::new(QUBIT), CQ::q(Dim::qubits(1))),
        ],
        cq_image,
    )
}

/// Prepare every input wire in the zero state.
fn initialized(circuit: &Diagram) -> QuantumResult<Diagram> {
    if circuit.dom().is_empty() {
        return Ok(circuit.clone());
    }
    let mut init = Diagram::id(Ty::unit());
    for ob in circuit.dom() {
        let state = if ob.name() == BIT {
            gates::bits(&[0])?
        } else {
            gates::ket(&[0])?
        };
        init = init.tensor(&state);
    }
    Ok(init.then(circuit)?)
}

/// Apply `close` to every qubit output and leave bits alone.
fn close_qubits(circuit: Diagram, close: impl Fn() -> Diagram) -> QuantumResult<Diagram> {
    if circuit.cod().count(BIT) == circuit.cod().len() {
        return Ok(circuit);
    }
    let mut closing = Diagram::id(Ty::unit());
    for ob in circuit.cod() {
        closing = closing.tensor(&if ob.name() == BIT {
            Diagram::id(Ty::bit())
        } else {
            close()
        });
    }
    Ok(circuit.then(&closing)?)
}

/// Evaluation of diagrams over bits and qubits.
pub trait Circuit {
    /// Whether bits and qubits ever run side by side, or some generator has
    /// no pure semantics.
    fn is_mixed(&self) -> bool;

    /// Evaluate a pure circuit as a linear map.
    fn eval_tensor(&self) -> QuantumResult<Tensor>;

    /// Evaluate as a classical-quantum map.
    fn eval_cq(&self) -> QuantumResult<CQMap>;

    /// Evaluate as a classical-quantum map if `mixed` is set or the circuit
    /// is mixed, otherwise as a linear map.
    fn eval(&self, mixed: bool) -> QuantumResult<Semantics>;

    /// Close the circuit: prepare inputs in the zero state and discard
    /// output qubits.
    fn init_and_discard(&self) -> QuantumResult<Diagram>;

    /// Outcome distribution over all outputs, with inputs in the zero state
    /// and output qubits measured in the computational basis.
    fn probabilities(&self) -> QuantumResult<ArrayD<f64>>;

    /// The nonzero entries of [`probabilities`](Self::probabilities), keyed
    /// by bitstring.
    fn counts(&self) -> QuantumResult<BTreeMap<Vec<u8>, f64>>;
}

impl Circuit for Diagram {
    fn is_mixed(&self) -> bool {
        self.scans()
            .iter()
            .any(|t| t.count(BIT) > 0 && t.count(QUBIT) > 0)
            || self.boxes().any(Generator::is_mixed)
    }

    #[instrument(skip_all, fields(layers = self.len()))]
    fn eval_tensor(&self) -> QuantumResult<Tensor> {
        if self.is_mixed() {
            return Err(QuantumError::NotMixedEvaluable(self.to_string()));
        }
        tensor_functor().apply(self)
    }

    #[instrument(skip_all, fields(layers = self.len()))]
    fn eval_cq(&self) -> QuantumResult<CQMap> {
        cq_functor().apply(self)
    }

    fn eval(&self, mixed: bool) -> QuantumResult<Semantics> {
        if mixed || self.is_mixed() {
            Ok(Semantics::Mixed(self.eval_cq()?))
        } else {
            Ok(Semantics::Pure(self.eval_tensor()?))
        }
    }

    fn init_and_discard(&self) -> QuantumResult<Diagram> {
        close_qubits(initialized(self)?, || gates::discard(Ty::qubit()))
    }

    fn probabilities(&self) -> QuantumResult<ArrayD<f64>> {
        let prepared = initialized(self)?;
        let classical = prepared.scans().iter().any(|t| t.count(BIT) > 0);
        if classical || prepared.is_mixed() {
            let measured = close_qubits(prepared, || gates::measure(1))?;
            debug!("Computing outcome distribution of a mixed circuit");
            let map = measured.eval_cq()?;
            return Ok(map.data().array().mapv(|z| z.re));
        }
        let state = prepared.eval_tensor()?;
        Ok(state.array().mapv(|z| z.norm_sqr()))
    }

    fn counts(&self) -> QuantumResult<BTreeMap<Vec<u8>, f64>> {
        let probabilities = self.probabilities()?;
        Ok(probabilities
            .indexed_iter()
            .filter(|(_, p)| **p > EPSILON)
            .map(|(idx, p)| {
                let bits = idx.slice().iter().map(|&i| i as u8).collect();
                (bits, *p)
            })
            .collect())
    }
}

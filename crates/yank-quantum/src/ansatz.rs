//! Parameterized circuit families.

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;
use yank_ir::{Diagram, Ty};

use crate::error::{QuantumError, QuantumResult};
use crate::gates::{self, CX, H};

/// A gate that [`random_tiling`] may place.
#[derive(Debug, Clone, PartialEq)]
pub enum TileGate {
    /// A fixed gate.
    Fixed(Diagram),
    /// An X rotation with a random phase.
    Rx,
    /// A Z rotation with a random phase.
    Rz,
}

impl TileGate {
    fn width(&self) -> usize {
        match self {
            Self::Fixed(d) => d.dom().len(),
            Self::Rx | Self::Rz => 1,
        }
    }

    fn sample(&self, rng: &mut SmallRng) -> Diagram {
        match self {
            Self::Fixed(d) => d.clone(),
            Self::Rx => gates::rx(rng.r#gen()),
            Self::Rz => gates::rz(rng.r#gen()),
        }
    }
}

/// `H`, `Rx` and `CX`.
pub fn default_gateset() -> Vec<TileGate> {
    vec![
        TileGate::Fixed(H.clone()),
        TileGate::Rx,
        TileGate::Fixed(CX.clone()),
    ]
}

fn euler(phases: [f64; 3]) -> QuantumResult<Diagram> {
    Ok(gates::rx(phases[0])
        .then(&gates::rz(phases[1]))?
        .then(&gates::rx(phases[2]))?)
}

/// A random circuit on `n_qubits`, `depth` rows deep.
///
/// Each row is filled from left to right with gates drawn from `gateset`,
/// only picking single-qubit gates for the last free wire. On one qubit
/// this is an Euler decomposition `Rx >> Rz >> Rx` with random phases.
pub fn random_tiling(
    n_qubits: usize,
    depth: usize,
    gateset: &[TileGate],
    seed: u64,
) -> QuantumResult<Diagram> {
    let mut rng = SmallRng::seed_from_u64(seed);
    if n_qubits == 1 {
        return euler([rng.r#gen(), rng.r#gen(), rng.r#gen()]);
    }
    if let Some(bad) = gateset.iter().find(|g| match g {
        TileGate::Fixed(d) => d.dom().is_empty() || d.dom() != d.cod(),
        _ => false,
    }) {
        return Err(QuantumError::InvalidParameters(format!(
            "tiling gates must act on at least one wire, got {bad:?}"
        )));
    }
    let single: Vec<&TileGate> = gateset.iter().filter(|g| g.width() == 1).collect();
    if n_qubits > 0 && single.is_empty() {
        return Err(QuantumError::InvalidParameters(
            "gateset has no single-qubit gate".to_string(),
        ));
    }

    let mut result = Diagram::id(Ty::qubits(n_qubits));
    for _ in 0..depth {
        let mut row = Diagram::id(Ty::unit());
        let mut covered = 0;
        while covered < n_qubits {
            let free = n_qubits - covered;
            let choices: Vec<&TileGate> = gateset.iter().filter(|g| g.width() <= free).collect();
            let choices = if free > 1 { choices } else { single.clone() };
            let gate = choices[rng.gen_range(0..choices.len())].sample(&mut rng);
            covered += gate.dom().len();
            row = row.tensor(&gate);
        }
        result = result.then(&row)?;
    }
    debug!("Built random tiling on {} qubits, depth {}", n_qubits, depth);
    Ok(result)
}

/// An IQP ansatz: rows of Hadamards followed by a ladder of controlled Z
/// rotations, one row per row of `params`.
///
/// `params` has shape `(depth, n_qubits - 1)`. On one qubit it must hold
/// exactly three phases, used for an Euler decomposition.
pub fn iqp_ansatz(n_qubits: usize, params: &Array2<f64>) -> QuantumResult<Diagram> {
    if n_qubits == 1 {
        let phases: Vec<f64> = params.iter().copied().collect();
        return match phases[..] {
            [a, b, c] => euler([a, b, c]),
            _ => Err(QuantumError::InvalidParameters(format!(
                "expected 3 phases for one qubit, got {}",
                phases.len()
            ))),
        };
    }
    if n_qubits < 2 || params.ncols() != n_qubits - 1 {
        return Err(QuantumError::InvalidParameters(format!(
            "expected params of shape (depth, {}), got {:?}",
            n_qubits.saturating_sub(1),
            params.shape()
        )));
    }

    let mut result = Diagram::id(Ty::qubits(n_qubits));
    for thetas in params.rows() {
        let hadamards = (0..n_qubits).fold(Diagram::id(Ty::unit()), |row, _| row.tensor(&H));
        result = result.then(&hadamards)?;
        for (i, &theta) in thetas.iter().enumerate() {
            let rotation = Diagram::id(Ty::qubits(i))
                .tensor(&gates::crz(theta))
                .tensor(&Diagram::id(Ty::qubits(n_qubits - 2 - i)));
            result = result.then(&rotation)?;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_iqp_layout() {
        let circuit = iqp_ansatz(3, &array![[0.1, 0.2], [0.3, 0.4]]).unwrap();
        assert_eq!(
            circuit.to_string(),
            "H @ Id(qubit @ qubit) >> Id(qubit) @ H @ Id(qubit) >> Id(qubit @ qubit) @ H \
             >> CRz(0.1) @ Id(qubit) >> Id(qubit) @ CRz(0.2) \
             >> H @ Id(qubit @ qubit) >> Id(qubit) @ H @ Id(qubit) >> Id(qubit @ qubit) @ H \
             >> CRz(0.3) @ Id(qubit) >> Id(qubit) @ CRz(0.4)"
        );
    }

    #[test]
    fn test_iqp_single_qubit_is_euler() {
        let circuit = iqp_ansatz(1, &array![[0.3, 0.8, 0.4]]).unwrap();
        assert_eq!(circuit.to_string(), "Rx(0.3) >> Rz(0.8) >> Rx(0.4)");
        assert!(iqp_ansatz(1, &array![[0.3, 0.8]]).is_err());
        assert!(iqp_ansatz(3, &array![[0.1, 0.2, 0.3]]).is_err());
    }

    #[test]
    fn test_random_tiling_is_seeded() {
        let gateset = default_gateset();
        let a = random_tiling(3, 4, &gateset, 420).unwrap();
        let b = random_tiling(3, 4, &gateset, 420).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dom(), &Ty::qubits(3));
        assert_eq!(a.cod(), &Ty::qubits(3));
    }

    #[test]
    fn test_random_tiling_rows_cover_every_wire() {
        let gateset = vec![TileGate::Fixed(CX.clone()), TileGate::Rz];
        let circuit = random_tiling(5, 3, &gateset, 7).unwrap();
        let widths: usize = circuit.boxes().map(|g| g.dom().len()).sum();
        assert_eq!(widths, 15);
    }

    #[test]
    fn test_random_tiling_rejects_scalars() {
        let gateset = vec![TileGate::Fixed(gates::sqrt(2.0))];
        assert!(random_tiling(2, 1, &gateset, 0).is_err());
        assert!(random_tiling(2, 1, &[TileGate::Fixed(CX.clone())], 0).is_err());
    }
}

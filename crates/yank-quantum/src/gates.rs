//! Circuit boxes: gates, states, effects and scalars.
//!
//! Gate payloads are flattened matrices with the row index running over the
//! input qubits and the column index over the output qubits, in the same
//! big-endian order as the wires.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::sync::LazyLock;

use num_complex::Complex64;
use yank_ir::{BoxGen, Diagram, Generator, Ty};

use crate::error::{QuantumError, QuantumResult};
use crate::tensor::{ONE, ZERO};

fn real(entries: &[f64]) -> Vec<Complex64> {
    entries.iter().map(|&x| Complex64::new(x, 0.0)).collect()
}

fn named_gate(name: &str, n_qubits: usize, data: Vec<Complex64>) -> BoxGen {
    BoxGen::new(name, Ty::qubits(n_qubits), Ty::qubits(n_qubits)).with_data(data)
}

fn diagram(b: BoxGen) -> Diagram {
    Diagram::from(Generator::from(b))
}

/// Hadamard.
pub static H: LazyLock<Diagram> = LazyLock::new(|| {
    let s = FRAC_1_SQRT_2;
    diagram(named_gate("H", 1, real(&[s, s, s, -s])).self_adjoint())
});
/// Pauli X.
pub static X: LazyLock<Diagram> =
    LazyLock::new(|| diagram(named_gate("X", 1, real(&[0.0, 1.0, 1.0, 0.0])).self_adjoint()));
/// Pauli Y.
pub static Y: LazyLock<Diagram> = LazyLock::new(|| {
    let i = Complex64::i();
    diagram(named_gate("Y", 1, vec![ZERO, -i, i, ZERO]))
});
/// Pauli Z.
pub static Z: LazyLock<Diagram> =
    LazyLock::new(|| diagram(named_gate("Z", 1, real(&[1.0, 0.0, 0.0, -1.0])).self_adjoint()));
/// Phase gate.
pub static S: LazyLock<Diagram> =
    LazyLock::new(|| diagram(named_gate("S", 1, vec![ONE, ZERO, ZERO, Complex64::i()])));
/// pi/8 gate.
pub static T: LazyLock<Diagram> = LazyLock::new(|| {
    let phase = Complex64::from_polar(1.0, PI / 4.0);
    diagram(named_gate("T", 1, vec![ONE, ZERO, ZERO, phase]))
});
/// Controlled X, control on the left wire.
pub static CX: LazyLock<Diagram> = LazyLock::new(|| {
    #[rustfmt::skip]
    let data = real(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 1.0,
        0.0, 0.0, 1.0, 0.0,
    ]);
    diagram(named_gate("CX", 2, data).self_adjoint())
});
/// Controlled Z.
pub static CZ: LazyLock<Diagram> = LazyLock::new(|| {
    #[rustfmt::skip]
    let data = real(&[
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, -1.0,
    ]);
    diagram(named_gate("CZ", 2, data).self_adjoint())
});
/// Exchange of two qubits.
pub static SWAP: LazyLock<Diagram> =
    LazyLock::new(|| Diagram::swap(&Ty::qubit(), &Ty::qubit()));

/// Look up a registered gate by name.
pub fn gate(name: &str) -> Option<Diagram> {
    let registered = match name {
        "H" => &H,
        "X" => &X,
        "Y" => &Y,
        "Z" => &Z,
        "S" => &S,
        "T" => &T,
        "CX" => &CX,
        "CZ" => &CZ,
        "SWAP" => &SWAP,
        _ => return None,
    };
    Some(Diagram::clone(registered))
}

/// `2^n_wires`, the dimension of the state space on `n_wires` bits or qubits.
fn basis_size(n_wires: usize) -> QuantumResult<usize> {
    u32::try_from(n_wires)
        .ok()
        .and_then(|n| 2usize.checked_pow(n))
        .ok_or_else(|| {
            QuantumError::InvalidParameters(format!("{n_wires} wires do not fit in a dense array"))
        })
}

/// A unitary on `n_qubits` given by a `2^n x 2^n` matrix.
pub fn qgate(name: &str, n_qubits: usize, data: Vec<Complex64>) -> QuantumResult<Diagram> {
    if data.len() != basis_size(n_qubits.saturating_mul(2))? {
        return Err(QuantumError::ShapeMismatch {
            expected: vec![2; 2 * n_qubits],
            got: data.len(),
        });
    }
    Ok(diagram(named_gate(name, n_qubits, data)))
}

/// A classical map from `n_bits_in` to `n_bits_out` bits.
pub fn cgate(
    name: &str,
    n_bits_in: usize,
    n_bits_out: usize,
    data: Vec<Complex64>,
) -> QuantumResult<Diagram> {
    let n = n_bits_in.saturating_add(n_bits_out);
    if data.len() != basis_size(n)? {
        return Err(QuantumError::ShapeMismatch {
            expected: vec![2; n],
            got: data.len(),
        });
    }
    let b = BoxGen::new(name, Ty::bits(n_bits_in), Ty::bits(n_bits_out)).with_data(data);
    Ok(diagram(b))
}

fn check_bits(bitstring: &[u8]) -> QuantumResult<()> {
    match bitstring.iter().find(|&&b| b > 1) {
        Some(b) => Err(QuantumError::InvalidParameters(format!(
            "bitstring entries must be 0 or 1, got {b}"
        ))),
        None => Ok(()),
    }
}

fn basis_vector(bitstring: &[u8]) -> QuantumResult<Vec<Complex64>> {
    let size = basis_size(bitstring.len())?;
    let index = bitstring
        .iter()
        .fold(0usize, |acc, &b| (acc << 1) | usize::from(b));
    Ok((0..size).map(|i| if i == index { ONE } else { ZERO }).collect())
}

fn label(prefix: &str, bitstring: &[u8]) -> String {
    let bits: Vec<String> = bitstring.iter().map(ToString::to_string).collect();
    format!("{prefix}({})", bits.join(", "))
}

/// Computational basis state on qubits.
pub fn ket(bitstring: &[u8]) -> QuantumResult<Diagram> {
    check_bits(bitstring)?;
    let b = BoxGen::new(label("Ket", bitstring), Ty::unit(), Ty::qubits(bitstring.len()))
        .with_data(basis_vector(bitstring)?);
    Ok(diagram(b))
}

/// Computational basis effect on qubits.
pub fn bra(bitstring: &[u8]) -> QuantumResult<Diagram> {
    check_bits(bitstring)?;
    let b = BoxGen::new(label("Bra", bitstring), Ty::qubits(bitstring.len()), Ty::unit())
        .with_data(basis_vector(bitstring)?);
    Ok(diagram(b))
}

/// Classical bits in a fixed state.
pub fn bits(bitstring: &[u8]) -> QuantumResult<Diagram> {
    check_bits(bitstring)?;
    let b = BoxGen::new(label("Bits", bitstring), Ty::unit(), Ty::bits(bitstring.len()))
        .with_data(basis_vector(bitstring)?);
    Ok(diagram(b))
}

/// Rotation about X by `phase` half-turns, up to a global phase.
pub fn rx(phase: f64) -> Diagram {
    let half_theta = PI * phase;
    let global = Complex64::from_polar(1.0, half_theta);
    let (sin, cos) = half_theta.sin_cos();
    let i = Complex64::i();
    let data = vec![
        global * cos,
        global * -i * sin,
        global * -i * sin,
        global * cos,
    ];
    diagram(named_gate(&format!("Rx({phase})"), 1, data))
}

/// Rotation about Z: `diag(1, exp(2 pi i phase))`.
pub fn rz(phase: f64) -> Diagram {
    let data = vec![ONE, ZERO, ZERO, Complex64::from_polar(1.0, 2.0 * PI * phase)];
    diagram(named_gate(&format!("Rz({phase})"), 1, data))
}

/// Controlled Z rotation.
pub fn crz(phase: f64) -> Diagram {
    let mut data = vec![ZERO; 16];
    for diagonal in [0, 5, 10] {
        data[diagonal] = ONE;
    }
    data[15] = Complex64::from_polar(1.0, 2.0 * PI * phase);
    diagram(named_gate(&format!("CRz({phase})"), 2, data))
}

/// The scalar `sqrt(x)`.
pub fn sqrt(x: f64) -> Diagram {
    let b = named_gate(&format!("sqrt({x})"), 0, vec![Complex64::new(x.sqrt(), 0.0)]);
    diagram(b.self_adjoint())
}

/// An arbitrary scalar.
pub fn scalar(value: Complex64) -> Diagram {
    let b = named_gate(&format!("scalar({value:.3})"), 0, vec![value]);
    diagram(if value.im == 0.0 { b.self_adjoint() } else { b })
}

/// Destructive measurement of `n_qubits` qubits.
pub fn measure(n_qubits: usize) -> Diagram {
    Diagram::from(Generator::Measure {
        n_qubits,
        destructive: true,
        override_bits: false,
    })
}

/// Preparation of `n_bits` qubits from bits.
pub fn encode(n_bits: usize) -> Diagram {
    Diagram::from(Generator::Encode {
        n_bits,
        constructive: true,
        reset_bits: false,
    })
}

pub fn discard(dom: Ty) -> Diagram {
    Diagram::from(Generator::Discard { dom })
}

pub fn mixed_state(cod: Ty) -> Diagram {
    Diagram::from(Generator::MixedState { cod })
}

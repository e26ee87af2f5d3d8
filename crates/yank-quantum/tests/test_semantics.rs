//! Evaluation of circuits and string diagrams into tensors and CQ maps.

use ndarray::array;
use num_complex::Complex64;
use proptest::prelude::*;
use yank_ir::{BoxGen, Category, Diagram, Functor, Generator, Ob, Ty};
use yank_quantum::gates::{self, CX, H, X, bits, ket, measure};
use yank_quantum::{CQ, CQMap, Circuit, Dim, Semantics, Tensor, iqp_ansatz, random_tiling};
use yank_rewrite::NormalForm;

const TOLERANCE: f64 = 1e-9;

fn bell() -> Diagram {
    ket(&[0, 0])
        .unwrap()
        .then(&H.tensor(&Diagram::id(Ty::qubit())))
        .unwrap()
        .then(&CX)
        .unwrap()
}

fn is_identity(circuit: &Diagram) -> bool {
    let tensor = circuit.eval_tensor().unwrap();
    tensor.approx_eq(&Tensor::id(tensor.dom()), TOLERANCE)
}

/// Small distinct real entries.
fn sample_entries(n: usize) -> Vec<Complex64> {
    (0..n)
        .map(|k| Complex64::new(0.1 * ((k * 7) % 11) as f64 - 0.5, 0.05 * (k % 3) as f64))
        .collect()
}

/// Check that `functor` preserves composition and tensor on diagrams that
/// bend the wires of `f: n -> n` through caps, cups and swaps.
fn assert_functor_laws<C>(functor: &Functor<C>, f: &BoxGen, close: impl Fn(&C, &C) -> bool)
where
    C: Category + Clone,
    C::Error: std::fmt::Debug,
{
    let n = Ty::new("n");
    let apply = |d: &Diagram| functor.apply(d).unwrap();
    let df = Diagram::from(f.clone());
    let bend = Diagram::caps(&n.r(), &n)
        .unwrap()
        .then(&Diagram::id(n.r()).tensor(&df))
        .unwrap();
    let unbend = Diagram::swap(&n.r(), &n)
        .then(&Diagram::cups(&n, &n.r()).unwrap())
        .unwrap();

    let sequential = apply(&bend.then(&unbend).unwrap());
    assert!(close(&sequential, &apply(&bend).then(&apply(&unbend)).unwrap()));

    for (d1, d2) in [(&bend, &df), (&df, &unbend), (&unbend, &bend)] {
        let parallel = apply(&d1.tensor(d2));
        assert!(close(&parallel, &apply(d1).tensor(&apply(d2)).unwrap()));
    }

    let snake = Diagram::id(n.clone())
        .tensor(&Diagram::caps(&n.r(), &n).unwrap())
        .then(&Diagram::cups(&n, &n.r()).unwrap().tensor(&Diagram::id(n.clone())))
        .unwrap();
    let image = functor.map_ty(&n).unwrap();
    assert!(close(&apply(&snake), &C::id(&image)));
}

#[test]
fn test_measure_single_wire() {
    let m = CQMap::measure(&Dim::new([2]), true).unwrap();
    assert_eq!(m.dom(), &CQ::q(Dim::new([2])));
    assert_eq!(m.cod(), &CQ::c(Dim::new([2])));
    let array = m.data().array();
    assert_eq!(array.shape(), &[2, 2, 2]);
    assert_eq!(array[[0, 0, 0]], Complex64::new(1.0, 0.0));
    assert_eq!(array[[1, 1, 1]], Complex64::new(1.0, 0.0));
    assert_eq!(array.iter().filter(|z| z.norm() > 0.0).count(), 2);
}

#[test]
fn test_gates_followed_by_their_dagger() {
    assert!(is_identity(&H.then(&H.dagger()).unwrap()));
    let rx = gates::rx(0.3);
    let roundtrip = rx.then(&rx.dagger()).unwrap();
    assert!(is_identity(&roundtrip));
    assert!(is_identity(&roundtrip.normal_form()));
}

#[test]
fn test_bell_state_probabilities() {
    let expected = array![[0.5, 0.0], [0.0, 0.5]].into_dyn();
    let pure = bell().probabilities().unwrap();
    let mixed = bell().then(&measure(2)).unwrap().probabilities().unwrap();
    for probabilities in [pure, mixed] {
        assert_eq!(probabilities.shape(), &[2, 2]);
        for (p, q) in probabilities.iter().zip(expected.iter()) {
            assert!((p - q).abs() < TOLERANCE);
        }
    }
    let counts = bell().counts().unwrap();
    let outcomes: Vec<&Vec<u8>> = counts.keys().collect();
    assert_eq!(outcomes, vec![&vec![0, 0], &vec![1, 1]]);
}

#[test]
fn test_discarding_prepared_wires_is_one() {
    let prepared = bits(&[1, 0]).unwrap().tensor(&ket(&[0]).unwrap());
    let wires = Ty::bits(2).tensor(&Ty::qubit());
    let circuit = prepared.then(&gates::discard(wires)).unwrap();
    let value = circuit.eval_cq().unwrap();
    assert!(value.dom().is_empty() && value.cod().is_empty());
    assert!((value.data().array().sum() - Complex64::new(1.0, 0.0)).norm() < TOLERANCE);
}

#[test]
fn test_mixed_evaluation_of_hadamard() {
    let Semantics::Mixed(map) = H.eval(true).unwrap() else {
        panic!("expected a CQ map");
    };
    assert_eq!(map.data().array().len(), 16);
    for z in map.data().array() {
        assert!((z.norm() - 0.5).abs() < TOLERANCE);
    }
}

#[test]
fn test_classical_bits_are_not_squared() {
    let flip = gates::cgate("NOT", 1, 1, [0.0, 1.0, 1.0, 0.0].map(Complex64::from).to_vec())
        .unwrap();
    let circuit = X.then(&measure(1)).unwrap().then(&flip).unwrap();
    let counts = circuit.counts().unwrap();
    assert_eq!(counts.len(), 1);
    assert!((counts[&vec![0]] - 1.0).abs() < TOLERANCE);
}

#[test]
fn test_functor_into_tensor_is_monoidal() {
    let n = Ty::new("n");
    let f = BoxGen::new("f", n.clone(), n.clone());
    let g = BoxGen::new("g", n.clone(), n.clone());
    let two = Dim::qubits(1);
    let tf = Tensor::from_real(two.clone(), two.clone(), &[0.0, 1.0, 2.0, 3.0]).unwrap();
    let tg = Tensor::from_real(two.clone(), two.clone(), &[1.0, -1.0, 0.5, 0.0]).unwrap();
    let functor: Functor<Tensor> = Functor::new(
        [(Ob::new("n"), two.clone())],
        [
            (Generator::from(f.clone()), tf.clone()),
            (Generator::from(g.clone()), tg.clone()),
        ],
    );
    let (df, dg) = (Diagram::from(f), Diagram::from(g));

    let sequential = functor.apply(&df.then(&dg).unwrap()).unwrap();
    assert!(sequential.approx_eq(&tf.then(&tg).unwrap(), TOLERANCE));

    let parallel = functor.apply(&df.tensor(&dg)).unwrap();
    assert!(parallel.approx_eq(&tf.tensor(&tg), TOLERANCE));

    let snake = functor.apply(&Diagram::id(n.r()).transpose(true).unwrap()).unwrap();
    assert!(snake.approx_eq(&Tensor::id(&two), TOLERANCE));
}

#[test]
fn test_tensor_functor_laws_through_cups_and_swaps() {
    let n = Ty::new("n");
    let dim = Dim::new([2, 3]);
    let f = BoxGen::new("f", n.clone(), n);
    let tf = Tensor::from_vec(dim.clone(), dim.clone(), sample_entries(36)).unwrap();
    let functor: Functor<Tensor> =
        Functor::new([(Ob::new("n"), dim)], [(Generator::from(f.clone()), tf)]);
    assert_functor_laws(&functor, &f, |a, b| a.approx_eq(b, TOLERANCE));
}

#[test]
fn test_cq_functor_laws_through_cups_and_swaps() {
    let n = Ty::new("n");
    let x = CQ::new(Dim::new([2]), Dim::new([2]));
    let f = BoxGen::new("f", n.clone(), n);
    let cf = CQMap::from_vec(x.clone(), x.clone(), sample_entries(64)).unwrap();
    let functor: Functor<CQMap> =
        Functor::new([(Ob::new("n"), x)], [(Generator::from(f.clone()), cf)]);
    assert_functor_laws(&functor, &f, |a, b| a.approx_eq(b, TOLERANCE));
}

#[test]
fn test_scalars_are_squared_amplitudes() {
    let Semantics::Mixed(map) = gates::sqrt(2.0).eval(true).unwrap() else {
        panic!("expected a CQ map");
    };
    assert!(map.dom().is_empty() && map.cod().is_empty());
    assert!((map.data().array().sum() - Complex64::new(2.0, 0.0)).norm() < TOLERANCE);

    let amplitude = gates::scalar(Complex64::new(0.0, 0.5)).eval_cq().unwrap();
    assert!((amplitude.data().array().sum() - Complex64::new(0.25, 0.0)).norm() < TOLERANCE);
}

#[test]
fn test_leftover_qubits_are_measured() {
    let circuit = bell()
        .then(&measure(1).tensor(&Diagram::id(Ty::qubit())))
        .unwrap();
    assert_eq!(circuit.cod(), &Ty::bit().tensor(&Ty::qubit()));
    let probabilities = circuit.probabilities().unwrap();
    assert_eq!(probabilities.shape(), &[2, 2]);
    let expected = array![[0.5, 0.0], [0.0, 0.5]].into_dyn();
    for (p, q) in probabilities.iter().zip(expected.iter()) {
        assert!((p - q).abs() < TOLERANCE);
    }
    let counts = circuit.counts().unwrap();
    assert_eq!(counts.keys().collect::<Vec<_>>(), vec![&vec![0, 0], &vec![1, 1]]);
}

#[test]
fn test_ansatz_circuits_are_unitary() {
    let circuit = iqp_ansatz(3, &array![[0.1, 0.7], [0.25, 0.4]]).unwrap();
    let u = circuit.eval_tensor().unwrap();
    let product = u.then(&u.dagger()).unwrap();
    assert!(product.approx_eq(&Tensor::id(u.dom()), TOLERANCE));

    let tiling = random_tiling(3, 3, &yank_quantum::default_gateset(), 11).unwrap();
    assert_eq!(tiling, random_tiling(3, 3, &yank_quantum::default_gateset(), 11).unwrap());
    let probabilities = tiling.probabilities().unwrap();
    assert!((probabilities.sum() - 1.0).abs() < TOLERANCE);
}

proptest! {
    #[test]
    fn rotations_are_undone_by_their_dagger(phase in -2.0f64..2.0) {
        let rx = gates::rx(phase);
        prop_assert!(is_identity(&rx.then(&rx.dagger()).unwrap()));
        let rz = gates::rz(phase);
        prop_assert!(is_identity(&rz.dagger().then(&rz).unwrap()));
    }

    #[test]
    fn single_qubit_probabilities_sum_to_one(
        phases in proptest::collection::vec(0.0f64..1.0, 3),
    ) {
        let params = ndarray::Array2::from_shape_vec((1, 3), phases).unwrap();
        let circuit = iqp_ansatz(1, &params).unwrap();
        let probabilities = circuit.probabilities().unwrap();
        prop_assert!((probabilities.sum() - 1.0).abs() < TOLERANCE);
    }
}

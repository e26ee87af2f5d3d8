//! Integration tests for snake removal and interchange normal forms.

use proptest::prelude::*;
use yank_ir::{BoxGen, Diagram, Functor, Generator, Ob, Ty};
use yank_rewrite::{NormalForm, NormalizeConfig, find_snake};

fn count(d: &Diagram, pred: impl Fn(&Generator) -> bool) -> usize {
    d.boxes().filter(|g| pred(g)).count()
}

// ---------------------------------------------------------------------------
// Snake equations
// ---------------------------------------------------------------------------

#[test]
fn test_snakes_on_adjoints() {
    let n = Ty::new("n");
    let left_snake = Diagram::id(n.r()).transpose(true).unwrap();
    let right_snake = Diagram::id(n.l()).transpose(false).unwrap();
    assert_eq!(left_snake.normal_form(), Diagram::id(n.clone()));
    assert_eq!(right_snake.normal_form(), Diagram::id(n));
}

#[test]
fn test_transpose_of_tensor_identity() {
    let (a, b) = (Ty::new("a"), Ty::new("b"));
    let whole = Diagram::id(a.tensor(&b)).transpose(false).unwrap();
    let parts = Diagram::id(b.clone())
        .transpose(false)
        .unwrap()
        .tensor(&Diagram::id(a.clone()).transpose(false).unwrap());
    let nf = whole.normal_form();
    assert_eq!(nf, parts.normal_form());
    assert_eq!(nf, Diagram::id(b.r().tensor(&a.r())));
}

#[test]
fn test_obstructed_snake_keeps_box() {
    let n = Ty::new("n");
    let f = Diagram::box_("f", n.clone(), n.clone());
    let d = Diagram::id(n.clone())
        .tensor(&Diagram::caps(&n.r(), &n).unwrap())
        .then(&f.tensor(&Diagram::id(n.r().tensor(&n))))
        .unwrap()
        .then(&Diagram::cups(&n, &n.r()).unwrap().tensor(&Diagram::id(n.clone())))
        .unwrap();

    let nf = d.normal_form();
    assert_eq!(count(&nf, |g| g.as_box().is_some_and(|b| b.name() == "f")), 1);
    assert_eq!(count(&nf, |g| g.is_cup() || g.is_cap()), 0);
    assert_eq!(nf, f);
}

#[test]
fn test_double_transpose_is_identity_on_boxes() {
    let f = Diagram::box_("f", Ty::new("a"), Ty::new("b"));
    let there_and_back = f.transpose(false).unwrap().transpose(true).unwrap();
    assert_eq!(there_and_back.normal_form(), f);
}

#[test]
fn test_every_step_is_well_typed() {
    let (a, b) = (Ty::new("a"), Ty::new("b"));
    let d = Diagram::id(a.tensor(&b)).transpose(true).unwrap();
    for step in d.normalize() {
        assert_eq!(step.dom(), d.dom());
        assert_eq!(step.cod(), d.cod());
        assert!(Diagram::new(step.dom().clone(), step.cod().clone(), step.layers().to_vec()).is_ok());
    }
}

// ---------------------------------------------------------------------------
// Pregroup grammar
// ---------------------------------------------------------------------------

#[test]
fn test_sentence_reduces_to_meaning() {
    let (s, n) = (Ty::new("s"), Ty::new("n"));
    let alice = BoxGen::new("Alice", Ty::unit(), n.clone());
    let bob = BoxGen::new("Bob", Ty::unit(), n.clone());
    let loves = BoxGen::new("loves", Ty::unit(), n.under(&s).over(&n));
    let love_box = Diagram::box_("loves", n.tensor(&n), s.clone());

    let loves_image = Diagram::caps(&n.r(), &n)
        .unwrap()
        .tensor(&Diagram::caps(&n, &n.l()).unwrap())
        .then(&Diagram::id(n.r()).tensor(&love_box).tensor(&Diagram::id(n.l())))
        .unwrap();
    let functor: Functor<Diagram> = Functor::new(
        [(Ob::new("s"), s.clone()), (Ob::new("n"), n.clone())],
        [
            (Generator::from(alice.clone()), Diagram::from(alice.clone())),
            (Generator::from(bob.clone()), Diagram::from(bob.clone())),
            (Generator::from(loves.clone()), loves_image),
        ],
    );

    let grammar = Diagram::cups(&n, &n.r())
        .unwrap()
        .tensor(&Diagram::id(s.clone()))
        .tensor(&Diagram::cups(&n.l(), &n).unwrap());
    let sentence = Diagram::from(alice.clone())
        .tensor(&Diagram::from(loves))
        .tensor(&Diagram::from(bob.clone()))
        .then(&grammar)
        .unwrap();
    assert_eq!(sentence.cod(), &s);

    let meaning = functor.apply(&sentence).unwrap().normal_form();
    let expected = Diagram::from(alice)
        .then(&Diagram::id(n.clone()).tensor(&Diagram::from(bob)))
        .unwrap()
        .then(&love_box)
        .unwrap();
    assert_eq!(meaning, expected);
}

// ---------------------------------------------------------------------------
// Interchange normal form
// ---------------------------------------------------------------------------

#[test]
fn test_interchange_forms_agree_on_side_by_side_boxes() {
    let f = Diagram::box_("f", Ty::new("a"), Ty::new("b"));
    let g = Diagram::box_("g", Ty::new("c"), Ty::new("d"));
    let one = f.tensor(&g);
    let other = one.interchange(0, 1, false);
    assert_ne!(one, other);
    assert_eq!(one.normal_form(), other.normal_form());

    let left = NormalizeConfig {
        left: true,
        ..NormalizeConfig::default()
    };
    assert_eq!(one.normal_form_with(&left), other.normal_form_with(&left));
    assert_ne!(one.normal_form(), one.normal_form_with(&left));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn arb_ty() -> impl Strategy<Value = Ty> {
    prop::collection::vec(
        (prop_oneof![Just("a"), Just("b")], -1_i32..=1).prop_map(|(n, z)| Ob::with_z(n, z)),
        1..=3,
    )
    .prop_map(|obs| obs.into_iter().collect())
}

proptest! {
    #[test]
    fn snake_law_for_identities(t in arb_ty()) {
        let right = Diagram::id(t.clone()).transpose(false).unwrap();
        prop_assert_eq!(right.normal_form(), Diagram::id(t.r()));
        let left = Diagram::id(t.clone()).transpose(true).unwrap();
        prop_assert_eq!(left.normal_form(), Diagram::id(t.l()));
    }

    #[test]
    fn normal_form_is_idempotent(dom in arb_ty(), cod in arb_ty(), left in any::<bool>()) {
        let f = Diagram::box_("f", dom, cod);
        let d = f.transpose(left).unwrap().tensor(&f);
        let nf = d.normal_form();
        prop_assert_eq!(nf.normal_form(), nf.clone());
        prop_assert!(find_snake(&nf).is_none());
    }
}

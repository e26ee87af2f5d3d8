//! Diagrams in the free rigid monoidal category.
//!
//! A [`Diagram`] is a domain, a codomain and a list of [`Layer`]s. Each layer
//! places one generator at an offset into the running *scan*: starting from the
//! domain, the generator's domain must occur at that offset and is replaced by
//! its codomain. After the last layer the scan equals the codomain. Every
//! `Diagram` value satisfies this; the operations here either preserve it by
//! construction or check it.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::category::{Category, Factors, Object, nested_cups};
use crate::error::{IrError, IrResult};
use crate::generator::{BoxGen, Generator};
use crate::ty::{Ob, Ty};

/// A generator placed at an offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layer {
    pub generator: Generator,
    pub offset: usize,
}

impl Layer {
    pub fn new(generator: Generator, offset: usize) -> Self {
        Self { generator, offset }
    }
}

/// A planar diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DiagramRepr")]
pub struct Diagram {
    dom: Ty,
    cod: Ty,
    layers: Vec<Layer>,
}

#[derive(Deserialize)]
struct DiagramRepr {
    dom: Ty,
    cod: Ty,
    layers: Vec<Layer>,
}

impl TryFrom<DiagramRepr> for Diagram {
    type Error = IrError;

    fn try_from(repr: DiagramRepr) -> IrResult<Self> {
        Self::new(repr.dom, repr.cod, repr.layers)
    }
}

/// Apply one layer to a scan.
fn apply_layer(scan: &Ty, layer: &Layer, index: usize) -> IrResult<Ty> {
    let dom = layer.generator.dom();
    let end = layer.offset + dom.len();
    if end > scan.len() || scan.slice(layer.offset..end) != dom {
        let found = scan.slice(layer.offset.min(scan.len())..end.min(scan.len()));
        return Err(IrError::InvalidLayer {
            index,
            offset: layer.offset,
            expected: dom.to_string(),
            found: found.to_string(),
        });
    }
    Ok(scan
        .slice(..layer.offset)
        .tensor(&layer.generator.cod())
        .tensor(&scan.slice(end..)))
}

impl Diagram {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Build a diagram from its layers, checking the scan.
    pub fn new(dom: Ty, cod: Ty, layers: Vec<Layer>) -> IrResult<Self> {
        let mut scan = dom.clone();
        for (index, layer) in layers.iter().enumerate() {
            scan = apply_layer(&scan, layer, index)?;
        }
        if scan != cod {
            return Err(IrError::InvalidLayer {
                index: layers.len(),
                offset: 0,
                expected: cod.to_string(),
                found: scan.to_string(),
            });
        }
        Ok(Self { dom, cod, layers })
    }

    /// The identity on `dom`.
    pub fn id(dom: Ty) -> Self {
        Self {
            cod: dom.clone(),
            dom,
            layers: Vec::new(),
        }
    }

    /// A one-layer diagram.
    pub fn box_(name: &str, dom: Ty, cod: Ty) -> Self {
        Self::from(BoxGen::new(name, dom, cod))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn dom(&self) -> &Ty {
        &self.dom
    }

    #[inline]
    pub fn cod(&self) -> &Ty {
        &self.cod
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers.
    #[inline]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether this is an identity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The generators, top to bottom.
    pub fn boxes(&self) -> impl Iterator<Item = &Generator> {
        self.layers.iter().map(|l| &l.generator)
    }

    pub fn offsets(&self) -> Vec<usize> {
        self.layers.iter().map(|l| l.offset).collect()
    }

    /// The wires to the left and to the right of each layer's generator.
    pub fn contexts(&self) -> Vec<(Ty, Ty)> {
        let mut scan = self.dom.clone();
        let mut out = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let dom = layer.generator.dom();
            let left = scan.slice(..layer.offset);
            let right = scan.slice(layer.offset + dom.len()..);
            scan = left.tensor(&layer.generator.cod()).tensor(&right);
            out.push((left, right));
        }
        out
    }

    /// The scan after each layer, starting with the domain.
    pub fn scans(&self) -> Vec<Ty> {
        let mut out = Vec::with_capacity(self.layers.len() + 1);
        out.push(self.dom.clone());
        for (layer, (left, right)) in self.layers.iter().zip(self.contexts()) {
            out.push(left.tensor(&layer.generator.cod()).tensor(&right));
        }
        out
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// `self >> other`.
    pub fn then(&self, other: &Self) -> IrResult<Self> {
        if self.cod != other.dom {
            return Err(IrError::NotComposable {
                cod: self.cod.to_string(),
                dom: other.dom.to_string(),
            });
        }
        Ok(self.clone().compose(other))
    }

    /// Composition whose typing is known to hold.
    fn compose(mut self, other: &Self) -> Self {
        debug_assert_eq!(self.cod, other.dom);
        self.layers.extend(other.layers.iter().cloned());
        self.cod = other.cod.clone();
        self
    }

    /// `self @ other`: `other` runs after `self`, on the wires to its right.
    #[must_use]
    pub fn tensor(&self, other: &Self) -> Self {
        let shift = self.cod.len();
        let layers = self
            .layers
            .iter()
            .cloned()
            .chain(
                other
                    .layers
                    .iter()
                    .map(|l| Layer::new(l.generator.clone(), l.offset + shift)),
            )
            .collect();
        Self {
            dom: self.dom.tensor(&other.dom),
            cod: self.cod.tensor(&other.cod),
            layers,
        }
    }

    /// Reverse the layers and dagger every generator.
    #[must_use]
    pub fn dagger(&self) -> Self {
        Self {
            dom: self.cod.clone(),
            cod: self.dom.clone(),
            layers: self
                .layers
                .iter()
                .rev()
                .map(|l| Layer::new(l.generator.dagger(), l.offset))
                .collect(),
        }
    }

    // =========================================================================
    // Interchange
    // =========================================================================

    /// Swap layers `i` and `i + 1` if they act on disjoint wires.
    ///
    /// When the lower generator lies to the left of the upper one and to its
    /// right at the same time (only possible at an empty boundary), `left`
    /// picks the first reading.
    pub fn try_interchange(&self, i: usize, left: bool) -> Option<Self> {
        let (l0, l1) = (self.layers.get(i)?, self.layers.get(i + 1)?);
        let (dom0, cod0) = (l0.generator.dom().len(), l0.generator.cod().len());
        let (dom1, cod1) = (l1.generator.dom().len(), l1.generator.cod().len());
        let (off0, off1) = (l0.offset, l1.offset);

        let right_first = off0 >= off1 + dom1;
        let left_first = off1 >= off0 + cod0;
        let (new_off1, new_off0) = if left && left_first {
            (off1 - cod0 + dom0, off0)
        } else if right_first {
            (off1, off0 - dom1 + cod1)
        } else if left_first {
            (off1 - cod0 + dom0, off0)
        } else {
            return None;
        };

        let mut layers = self.layers.clone();
        layers[i] = Layer::new(l1.generator.clone(), new_off1);
        layers[i + 1] = Layer::new(l0.generator.clone(), new_off0);
        Some(Self {
            dom: self.dom.clone(),
            cod: self.cod.clone(),
            layers,
        })
    }

    /// Move layer `i` to position `j` through adjacent interchanges.
    ///
    /// Total: if some step would cross a dependent layer, or an index is out of
    /// range, the diagram is returned unchanged.
    #[must_use]
    pub fn interchange(&self, i: usize, j: usize, left: bool) -> Self {
        if i == j || i >= self.len() || j >= self.len() {
            return self.clone();
        }
        let steps: Vec<usize> = if i < j {
            (i..j).collect()
        } else {
            (j..i).rev().collect()
        };
        let mut result = self.clone();
        for k in steps {
            match result.try_interchange(k, left) {
                Some(next) => result = next,
                None => return self.clone(),
            }
        }
        result
    }

    /// Remove a contiguous run of layers, checking that the rest still types.
    pub fn without_layers(&self, range: RangeInclusive<usize>) -> IrResult<Self> {
        let (start, end) = (*range.start(), *range.end());
        let layers = self
            .layers
            .get(..start)
            .unwrap_or_default()
            .iter()
            .chain(self.layers.get(end + 1..).unwrap_or_default())
            .cloned()
            .collect();
        Self::new(self.dom.clone(), self.cod.clone(), layers)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Exchange two blocks of wires with elementary swaps.
    pub fn swap(left: &Ty, right: &Ty) -> Self {
        if left.is_empty() {
            return Self::id(right.clone());
        }
        if let [ob] = left.objects() {
            let layers = right
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    Layer::new(
                        Generator::Swap {
                            left: ob.clone(),
                            right: r.clone(),
                        },
                        i,
                    )
                })
                .collect();
            return Self {
                dom: left.tensor(right),
                cod: right.tensor(left),
                layers,
            };
        }
        let (head, tail) = (left.slice(..1), left.slice(1..));
        Self::id(head.clone())
            .tensor(&Self::swap(&tail, right))
            .compose(&Self::swap(&head, right).tensor(&Self::id(tail)))
    }

    /// The permutation sending input wire `perm[k]` to output position `k`.
    pub fn permutation(perm: &[usize], dom: &Ty) -> IrResult<Self> {
        let invalid = || IrError::InvalidPermutation {
            perm: perm.to_vec(),
            len: dom.len(),
        };
        if perm.len() != dom.len() {
            return Err(invalid());
        }
        let mut seen = vec![false; perm.len()];
        for &p in perm {
            match seen.get_mut(p) {
                Some(s) if !*s => *s = true,
                _ => return Err(invalid()),
            }
        }

        let mut current: Vec<usize> = (0..perm.len()).collect();
        let mut scan: Vec<Ob> = dom.objects().to_vec();
        let mut layers = Vec::new();
        for (k, &target) in perm.iter().enumerate() {
            let Some(p) = current.iter().position(|&w| w == target) else {
                return Err(invalid());
            };
            for q in (k..p).rev() {
                layers.push(Layer::new(
                    Generator::Swap {
                        left: scan[q].clone(),
                        right: scan[q + 1].clone(),
                    },
                    q,
                ));
                scan.swap(q, q + 1);
                current.swap(q, q + 1);
            }
        }
        Ok(Self {
            dom: dom.clone(),
            cod: scan.into_iter().collect(),
            layers,
        })
    }

    /// Nested cups from `left @ right` to the unit.
    pub fn cups(left: &Ty, right: &Ty) -> IrResult<Self> {
        nested_cups(left, right, |l, r| Generator::cup(l, r).map(Self::from), false)
    }

    /// Nested caps from the unit to `left @ right`.
    pub fn caps(left: &Ty, right: &Ty) -> IrResult<Self> {
        nested_cups(left, right, |l, r| Generator::cap(l, r).map(Self::from), true)
    }

    // =========================================================================
    // Rigid structure
    // =========================================================================

    /// The transpose, bending both ends round with caps and cups.
    ///
    /// The right transpose goes from `cod.r` to `dom.r`, the left one from
    /// `cod.l` to `dom.l`.
    pub fn transpose(&self, left: bool) -> IrResult<Self> {
        let (dom, cod) = (&self.dom, &self.cod);
        if left {
            let top = Self::id(cod.l()).tensor(&Self::caps(dom, &dom.l())?);
            let middle = Self::id(cod.l())
                .tensor(self)
                .tensor(&Self::id(dom.l()));
            let bottom = Self::cups(&cod.l(), cod)?.tensor(&Self::id(dom.l()));
            return top.then(&middle)?.then(&bottom);
        }
        let top = Self::caps(&dom.r(), dom)?.tensor(&Self::id(cod.r()));
        let middle = Self::id(dom.r())
            .tensor(self)
            .tensor(&Self::id(cod.r()));
        let bottom = Self::id(dom.r()).tensor(&Self::cups(cod, &cod.r())?);
        top.then(&middle)?.then(&bottom)
    }

    /// Bend `n_wires` input wires round to the output.
    ///
    /// With `left`, the first wires of the domain become `wires.r` in front of
    /// the codomain; otherwise the last ones become `wires.l` behind it.
    pub fn curry(&self, n_wires: usize, left: bool) -> IrResult<Self> {
        if n_wires > self.dom.len() {
            return Err(IrError::TypeMismatch {
                expected: format!("at most {} wires", self.dom.len()),
                got: n_wires.to_string(),
            });
        }
        if left {
            let wires = self.dom.slice(..n_wires);
            let rest = self.dom.slice(n_wires..);
            let bend = Self::caps(&wires.r(), &wires)?.tensor(&Self::id(rest));
            return bend.then(&Self::id(wires.r()).tensor(self));
        }
        let split = self.dom.len() - n_wires;
        let wires = self.dom.slice(split..);
        let bend = Self::id(self.dom.slice(..split)).tensor(&Self::caps(&wires, &wires.l())?);
        bend.then(&self.tensor(&Self::id(wires.l())))
    }

    /// Forward application `left @ right -> left[..n - len(right)]`, where
    /// `left` ends in `right.l`.
    pub fn fa(left: &Ty, right: &Ty) -> IrResult<Self> {
        let off = left.len().checked_sub(right.len()).ok_or_else(|| IrError::TypeMismatch {
            expected: format!("a type ending in {}", right.l()),
            got: left.to_string(),
        })?;
        Ok(Self::id(left.slice(..off)).tensor(&Self::cups(&left.slice(off..), right)?))
    }

    /// Backward application `left @ right -> right[len(left)..]`, where
    /// `right` starts with `left.r`.
    pub fn ba(left: &Ty, right: &Ty) -> IrResult<Self> {
        if left.len() > right.len() {
            return Err(IrError::TypeMismatch {
                expected: format!("a type starting with {}", left.r()),
                got: right.to_string(),
            });
        }
        let off = left.len();
        Ok(Self::cups(left, &right.slice(..off))?.tensor(&Self::id(right.slice(off..))))
    }

    /// Forward composition `left @ middle.l @ middle @ right.l -> left @ right.l`.
    pub fn fc(left: &Ty, middle: &Ty, right: &Ty) -> IrResult<Self> {
        Ok(Self::id(left.clone())
            .tensor(&Self::cups(&middle.l(), middle)?)
            .tensor(&Self::id(right.l())))
    }
}

impl From<Generator> for Diagram {
    fn from(generator: Generator) -> Self {
        Self {
            dom: generator.dom(),
            cod: generator.cod(),
            layers: vec![Layer::new(generator, 0)],
        }
    }
}

impl From<BoxGen> for Diagram {
    fn from(b: BoxGen) -> Self {
        Self::from(Generator::from(b))
    }
}

impl fmt::Display for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Id({})", self.dom);
        }
        for (i, (layer, (left, right))) in self.layers.iter().zip(self.contexts()).enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            if !left.is_empty() {
                write!(f, "Id({left}) @ ")?;
            }
            write!(f, "{}", layer.generator)?;
            if !right.is_empty() {
                write!(f, " @ Id({right})")?;
            }
        }
        Ok(())
    }
}

impl Object for Ty {
    fn unit() -> Self {
        Ty::unit()
    }

    fn tensor(&self, other: &Self) -> Self {
        Ty::tensor(self, other)
    }

    fn l(&self) -> Self {
        Ty::l(self)
    }

    fn r(&self) -> Self {
        Ty::r(self)
    }
}

impl Factors for Ty {
    fn len(&self) -> usize {
        Ty::len(self)
    }

    fn slice(&self, range: std::ops::Range<usize>) -> Self {
        Ty::slice(self, range)
    }
}

impl Category for Diagram {
    type Ob = Ty;
    type Error = IrError;

    fn dom(&self) -> Ty {
        self.dom.clone()
    }

    fn cod(&self) -> Ty {
        self.cod.clone()
    }

    fn id(ob: &Ty) -> Self {
        Diagram::id(ob.clone())
    }

    fn then(&self, other: &Self) -> IrResult<Self> {
        Diagram::then(self, other)
    }

    fn tensor(&self, other: &Self) -> IrResult<Self> {
        Ok(Diagram::tensor(self, other))
    }

    fn dagger(&self) -> Self {
        Diagram::dagger(self)
    }

    fn swap(left: &Ty, right: &Ty) -> IrResult<Self> {
        Ok(Diagram::swap(left, right))
    }

    fn cups(left: &Ty, right: &Ty) -> IrResult<Self> {
        Diagram::cups(left, right)
    }

    fn caps(left: &Ty, right: &Ty) -> IrResult<Self> {
        Diagram::caps(left, right)
    }
}

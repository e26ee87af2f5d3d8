//! Monoidal functors out of the free category.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::{debug, instrument, trace};

use crate::category::{Category, Object};
use crate::diagram::Diagram;
use crate::error::IrError;
use crate::generator::Generator;
use crate::ty::{Ob, Ty};

/// A rule computing the image of a generator.
pub type ArrowRule<C> =
    dyn Fn(&Generator) -> Result<C, <C as Category>::Error> + Send + Sync + 'static;

enum ArrowImages<C: Category> {
    Table(FxHashMap<Generator, C>),
    Rule(Arc<ArrowRule<C>>),
}

/// A structure-preserving map from diagrams into a category `C`.
///
/// Objects are mapped through a table keyed by zero-level [`Ob`]s; adjoints
/// are mapped to adjoints of the image. Boxes and other generators are mapped
/// through a table or a rule. Cups, caps and swaps always go to the target's
/// own structure, and a daggered box goes to the dagger of the image of the
/// declared box.
pub struct Functor<C: Category> {
    ob: FxHashMap<Ob, C::Ob>,
    ar: ArrowImages<C>,
}

impl<C: Category> Functor<C> {
    /// A functor given by lookup tables.
    pub fn new(
        ob: impl IntoIterator<Item = (Ob, C::Ob)>,
        ar: impl IntoIterator<Item = (Generator, C)>,
    ) -> Self {
        Self {
            ob: ob.into_iter().collect(),
            ar: ArrowImages::Table(ar.into_iter().collect()),
        }
    }

    /// A functor whose generator images are computed by `rule`.
    pub fn from_rule<F>(ob: impl IntoIterator<Item = (Ob, C::Ob)>, rule: F) -> Self
    where
        F: Fn(&Generator) -> Result<C, C::Error> + Send + Sync + 'static,
    {
        Self {
            ob: ob.into_iter().collect(),
            ar: ArrowImages::Rule(Arc::new(rule)),
        }
    }

    /// Image of an object at any adjoint level.
    pub fn map_ob(&self, ob: &Ob) -> Result<C::Ob, C::Error> {
        let base = ob.base();
        let mut image = self
            .ob
            .get(&base)
            .cloned()
            .ok_or_else(|| IrError::MissingImage(base.to_string()))?;
        for _ in 0..ob.z().unsigned_abs() {
            image = if ob.z() < 0 { image.l() } else { image.r() };
        }
        Ok(image)
    }

    /// Image of a type: the product of the images of its objects.
    pub fn map_ty(&self, ty: &Ty) -> Result<C::Ob, C::Error> {
        ty.iter().try_fold(C::Ob::unit(), |acc, ob| {
            Ok(acc.tensor(&self.map_ob(ob)?))
        })
    }

    /// Image of a single generator.
    pub fn map_generator(&self, generator: &Generator) -> Result<C, C::Error> {
        match generator {
            Generator::Cup { left, right } => C::cups(&self.map_ob(left)?, &self.map_ob(right)?),
            Generator::Cap { left, right } => C::caps(&self.map_ob(left)?, &self.map_ob(right)?),
            Generator::Swap { left, right } => C::swap(&self.map_ob(left)?, &self.map_ob(right)?),
            Generator::Box(b) if b.is_dagger() => {
                Ok(self.lookup(&Generator::from(b.undaggered()))?.dagger())
            }
            _ => self.lookup(generator),
        }
    }

    fn lookup(&self, generator: &Generator) -> Result<C, C::Error> {
        match &self.ar {
            ArrowImages::Table(table) => table
                .get(generator)
                .cloned()
                .ok_or_else(|| IrError::MissingImage(generator.to_string()).into()),
            ArrowImages::Rule(rule) => rule(generator),
        }
    }

    /// Image of a diagram, layer by layer.
    #[instrument(skip_all, fields(layers = diagram.len()))]
    pub fn apply(&self, diagram: &Diagram) -> Result<C, C::Error> {
        let mut result = C::id(&self.map_ty(diagram.dom())?);
        for (layer, (left, right)) in diagram.layers().iter().zip(diagram.contexts()) {
            trace!("Mapping {} at offset {}", layer.generator, layer.offset);
            let image = self.map_generator(&layer.generator)?;
            let slice = C::id(&self.map_ty(&left)?)
                .tensor(&image)?
                .tensor(&C::id(&self.map_ty(&right)?))?;
            result = result.then(&slice)?;
        }
        debug!("Mapped diagram {} -> {}", diagram.dom(), diagram.cod());
        Ok(result)
    }
}

impl<C: Category> Clone for Functor<C> {
    fn clone(&self) -> Self {
        Self {
            ob: self.ob.clone(),
            ar: match &self.ar {
                ArrowImages::Table(table) => ArrowImages::Table(table.clone()),
                ArrowImages::Rule(rule) => ArrowImages::Rule(Arc::clone(rule)),
            },
        }
    }
}

impl<C: Category> fmt::Debug for Functor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrows = match &self.ar {
            ArrowImages::Table(table) => format!("{} generators", table.len()),
            ArrowImages::Rule(_) => "rule".to_string(),
        };
        f.debug_struct("Functor")
            .field("objects", &self.ob.len())
            .field("arrows", &arrows)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::BoxGen;

    #[test]
    fn test_identity_on_generators() {
        let (x, y) = (Ty::new("x"), Ty::new("y"));
        let f = BoxGen::new("f", x.clone(), y.clone());
        let functor: Functor<Diagram> = Functor::new(
            [(Ob::new("x"), x.clone()), (Ob::new("y"), y.clone())],
            [(Generator::from(f.clone()), Diagram::from(f.clone()))],
        );
        let d = Diagram::from(f.clone()).tensor(&Diagram::id(x.clone()));
        assert_eq!(functor.apply(&d).unwrap(), d);
    }

    #[test]
    fn test_adjoint_objects() {
        let n = Ty::new("n");
        let image = Ty::from_names(["a", "b"]);
        let functor: Functor<Diagram> = Functor::new([(Ob::new("n"), image.clone())], []);
        assert_eq!(functor.map_ty(&n.r()).unwrap(), image.r());
        assert_eq!(functor.map_ty(&n.l().l()).unwrap(), image.l().l());
    }

    #[test]
    fn test_cups_map_to_nested_cups() {
        let n = Ty::new("n");
        let image = Ty::from_names(["a", "b"]);
        let functor: Functor<Diagram> = Functor::new([(Ob::new("n"), image.clone())], []);
        let cup = Diagram::cups(&n, &n.r()).unwrap();
        assert_eq!(
            functor.apply(&cup).unwrap(),
            Diagram::cups(&image, &image.r()).unwrap()
        );
    }

    #[test]
    fn test_dagger_box_uses_declared_image() {
        let (x, y) = (Ty::new("x"), Ty::new("y"));
        let f = BoxGen::new("f", x.clone(), y.clone());
        let g = Diagram::box_("g", x.clone(), y.clone());
        let functor: Functor<Diagram> = Functor::new(
            [(Ob::new("x"), x.clone()), (Ob::new("y"), y.clone())],
            [(Generator::from(f.clone()), g.clone())],
        );
        let image = functor.apply(&Diagram::from(f).dagger()).unwrap();
        assert_eq!(image, g.dagger());
    }

    #[test]
    fn test_missing_image() {
        let functor: Functor<Diagram> = Functor::new([], []);
        let err = functor
            .apply(&Diagram::box_("f", Ty::unit(), Ty::unit()))
            .unwrap_err();
        assert!(matches!(err, IrError::MissingImage(_)));
        assert!(matches!(
            functor.map_ty(&Ty::new("x")),
            Err(IrError::MissingImage(_))
        ));
    }

    #[test]
    fn test_rule() {
        let functor: Functor<Diagram> =
            Functor::from_rule([(Ob::new("x"), Ty::new("x"))], |g: &Generator| {
                Ok(Diagram::box_(&format!("F({g})"), g.dom(), g.cod()))
            });
        let d = Diagram::box_("f", Ty::new("x"), Ty::new("x"));
        assert_eq!(functor.apply(&d).unwrap().to_string(), "F(f)");
    }
}

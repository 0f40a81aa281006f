//! Self-referential arbitraries built in two passes.
//!
//! Placeholders are created first and can be embedded in other arbitraries
//! right away; each one is bound to its real arbitrary afterwards. The
//! finished [`Letrec`] owns every binding, while placeholders only hold weak
//! handles, so recursive structures never form reference cycles.
//!
//! ```
//! use shrinkray::{
//!     Arbitrary, ArbitraryExt, IntegerConstraints, LetrecBuilder, OneOfConstraints, Random,
//!     integer, one_of,
//! };
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum Tree {
//!     Leaf(i32),
//!     Node(Box<Tree>, Box<Tree>),
//! }
//!
//! let mut builder = LetrecBuilder::new();
//! let tree = builder.placeholder::<Tree>("tree");
//! let leaf = integer(IntegerConstraints { min: 0, max: 9 }).unwrap().map(|v| Tree::Leaf(*v));
//! let node = tree
//!     .clone()
//!     .zip(tree.clone())
//!     .map(|(l, r)| Tree::Node(Box::new(l.clone()), Box::new(r.clone())));
//! let choice = one_of(
//!     vec![leaf.boxed(), node.boxed()],
//!     OneOfConstraints { max_depth: Some(3), ..Default::default() },
//! )
//! .unwrap();
//! builder.bind(&tree, choice).unwrap();
//!
//! let trees = builder.finish().unwrap();
//! let arbitrary = trees.get(&tree);
//! let generated = arbitrary.generate(&mut Random::new(7), None);
//! assert!(arbitrary.shrink(generated.value(), generated.context()).count() < 10_000);
//! ```

use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use crate::arbitrary::{Arbitrary, BoxedArbitrary};
use crate::error::ConstraintError;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

struct Slot<T> {
    name: String,
    target: OnceCell<BoxedArbitrary<T>>,
}

trait Binding {
    fn name(&self) -> &str;
    fn is_bound(&self) -> bool;
}

impl<T> Binding for Slot<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_bound(&self) -> bool {
        self.target.get().is_some()
    }
}

/// Collects placeholders and their bindings
#[derive(Default)]
pub struct LetrecBuilder {
    slots: Vec<Rc<dyn Binding>>,
}

/// Arbitrary standing in for one that is bound later
pub struct LazyArbitrary<T> {
    name: String,
    slot: Weak<Slot<T>>,
}

impl<T> Clone for LazyArbitrary<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            slot: Weak::clone(&self.slot),
        }
    }
}

impl<T: 'static> LazyArbitrary<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_bound(&self) -> bool {
        self.slot
            .upgrade()
            .is_some_and(|slot| slot.target.get().is_some())
    }

    fn resolve(&self) -> BoxedArbitrary<T> {
        let slot = self.slot.upgrade();
        match slot.as_ref().and_then(|s| s.target.get()) {
            Some(target) => target.clone(),
            None => panic!(
                "letrec: placeholder '{}' used before being bound or after its Letrec was dropped",
                self.name
            ),
        }
    }
}

impl<T: 'static> Arbitrary<T> for LazyArbitrary<T> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<T> {
        self.resolve().generate(rng, bias_factor)
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        self.resolve().can_shrink_without_context(value)
    }

    fn shrink(&self, value: &T, context: Option<&Context>) -> Stream<Value<T>> {
        self.resolve().shrink(value, context)
    }
}

impl LetrecBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unbound placeholder
    pub fn placeholder<T: 'static>(&mut self, name: impl Into<String>) -> LazyArbitrary<T> {
        let name = name.into();
        let slot = Rc::new(Slot {
            name: name.clone(),
            target: OnceCell::new(),
        });
        let lazy = LazyArbitrary {
            name,
            slot: Rc::downgrade(&slot),
        };
        self.slots.push(slot);
        lazy
    }

    /// Bind `placeholder` to the arbitrary it stands for
    pub fn bind<T: 'static>(
        &mut self,
        placeholder: &LazyArbitrary<T>,
        arbitrary: impl Arbitrary<T> + 'static,
    ) -> Result<(), ConstraintError> {
        let slot = placeholder.slot.upgrade().ok_or_else(|| {
            ConstraintError::invalid(format!(
                "letrec: placeholder '{}' does not belong to a live builder",
                placeholder.name
            ))
        })?;
        slot.target
            .set(BoxedArbitrary::new(arbitrary))
            .map_err(|_| ConstraintError::AlreadyBound {
                name: placeholder.name.clone(),
            })?;
        tracing::debug!(name = %placeholder.name, "bound letrec placeholder");
        Ok(())
    }

    /// Check that every placeholder is bound and freeze the bindings
    pub fn finish(self) -> Result<Letrec, ConstraintError> {
        if let Some(unbound) = self.slots.iter().find(|slot| !slot.is_bound()) {
            return Err(ConstraintError::UnboundPlaceholder {
                name: unbound.name().to_string(),
            });
        }
        tracing::debug!(placeholders = self.slots.len(), "letrec bindings complete");
        Ok(Letrec {
            slots: Rc::new(self.slots),
        })
    }
}

/// Owner of a complete set of recursive bindings
pub struct Letrec {
    slots: Rc<Vec<Rc<dyn Binding>>>,
}

impl Letrec {
    /// Arbitrary for `placeholder` that keeps all bindings alive
    pub fn get<T: 'static>(&self, placeholder: &LazyArbitrary<T>) -> BoxedArbitrary<T> {
        BoxedArbitrary::new(Tied {
            _bindings: Rc::clone(&self.slots),
            lazy: placeholder.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

struct Tied<T> {
    _bindings: Rc<Vec<Rc<dyn Binding>>>,
    lazy: LazyArbitrary<T>,
}

impl<T: 'static> Arbitrary<T> for Tied<T> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<T> {
        self.lazy.generate(rng, bias_factor)
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        self.lazy.can_shrink_without_context(value)
    }

    fn shrink(&self, value: &T, context: Option<&Context>) -> Stream<Value<T>> {
        self.lazy.shrink(value, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrary::ArbitraryExt;
    use crate::combinators::{OneOfConstraints, constant, one_of};
    use crate::depth::DepthContext;

    #[derive(Clone, Debug, PartialEq)]
    enum Expr {
        Lit(i32),
        Neg(Box<Expr>),
    }

    fn depth(expr: &Expr) -> usize {
        match expr {
            Expr::Lit(_) => 0,
            Expr::Neg(inner) => 1 + depth(inner),
        }
    }

    #[test]
    fn test_finish_reports_unbound_placeholder() {
        let mut builder = LetrecBuilder::new();
        let a = builder.placeholder::<i32>("a");
        let _b = builder.placeholder::<i32>("b");
        builder.bind(&a, constant(1)).unwrap();
        assert_eq!(
            builder.finish().err(),
            Some(ConstraintError::UnboundPlaceholder {
                name: "b".to_string()
            })
        );
    }

    #[test]
    fn test_bind_twice_fails() {
        let mut builder = LetrecBuilder::new();
        let a = builder.placeholder::<i32>("a");
        builder.bind(&a, constant(1)).unwrap();
        assert_eq!(
            builder.bind(&a, constant(2)),
            Err(ConstraintError::AlreadyBound {
                name: "a".to_string()
            })
        );
    }

    #[test]
    #[should_panic(expected = "placeholder 'x'")]
    fn test_generating_from_unbound_placeholder_panics() {
        let mut builder = LetrecBuilder::new();
        let x = builder.placeholder::<i32>("x");
        x.generate(&mut Random::new(1), None);
    }

    #[test]
    fn test_depth_limited_recursion() {
        let depth_context = DepthContext::new();
        let mut builder = LetrecBuilder::new();
        let expr = builder.placeholder::<Expr>("expr");
        let choice = one_of(
            vec![
                constant(Expr::Lit(1)).boxed(),
                expr.clone().map(|e| Expr::Neg(Box::new(e.clone()))).boxed(),
            ],
            OneOfConstraints {
                max_depth: Some(4),
                depth_context: Some(depth_context.clone()),
                with_cross_shrink: false,
            },
        )
        .unwrap();
        builder.bind(&expr, choice).unwrap();
        let letrec = builder.finish().unwrap();
        assert_eq!(letrec.len(), 1);

        let arbitrary = letrec.get(&expr);
        let mut rng = Random::new(2);
        let mut deepest = 0;
        for _ in 0..200 {
            let generated = arbitrary.generate(&mut rng, None).into_value();
            deepest = deepest.max(depth(&generated));
            assert!(depth(&generated) <= 4);
        }
        assert!(deepest >= 2);
        assert_eq!(depth_context.depth(), 0);
    }

    #[test]
    fn test_bindings_outlive_builder_through_letrec() {
        let mut builder = LetrecBuilder::new();
        let a = builder.placeholder::<i32>("a");
        builder.bind(&a, constant(5)).unwrap();
        let letrec = builder.finish().unwrap();
        let arbitrary = letrec.get(&a);
        drop(letrec);
        assert!(a.is_bound());
        assert_eq!(*arbitrary.generate(&mut Random::new(0), None).value(), 5);
        drop(arbitrary);
        assert!(!a.is_bound());
    }
}

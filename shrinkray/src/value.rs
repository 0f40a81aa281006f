//! Generated values paired with their shrink context.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

/// Opaque shrink state attached to a generated value
///
/// Each arbitrary stores whatever it needs to resume shrinking without
/// recomputing derivation state, and recognises its own contexts by type.
pub type Context = Rc<dyn Any>;

/// A generated value together with the context its producer attached to it
#[derive(Clone)]
pub struct Value<T> {
    value: T,
    context: Option<Context>,
}

impl<T> Value<T> {
    /// Create a value with an optional, already type-erased context
    pub fn new(value: T, context: Option<Context>) -> Self {
        Self { value, context }
    }

    /// Create a value that carries no context
    pub fn without_context(value: T) -> Self {
        Self {
            value,
            context: None,
        }
    }

    /// Create a value whose context is `context`
    pub fn with_context<C: Any>(value: T, context: C) -> Self {
        Self {
            value,
            context: Some(Rc::new(context)),
        }
    }

    /// The generated value
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The context to hand back to `shrink`
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    /// Consume the pair, keeping only the value
    pub fn into_value(self) -> T {
        self.value
    }

    /// Split into value and context
    pub fn into_parts(self) -> (T, Option<Context>) {
        (self.value, self.context)
    }
}

impl<T: fmt::Debug> fmt::Debug for Value<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("value", &self.value)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Look up a context of a specific type, ignoring contexts produced by others
pub(crate) fn downcast<C: Any>(context: Option<&Context>) -> Option<&C> {
    context.and_then(|c| c.downcast_ref::<C>())
}

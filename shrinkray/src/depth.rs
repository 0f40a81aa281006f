//! Explicit recursion-depth tracking for weighted choices.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared counter of how deeply nested the current generation is
///
/// Create one per top-level recursive structure and hand clones of it to
/// every [`crate::OneOfConstraints`] that participates in the recursion.
#[derive(Clone, Default)]
pub struct DepthContext {
    depth: Rc<Cell<usize>>,
}

impl DepthContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Increase the depth until the returned guard is dropped
    pub fn enter(&self) -> DepthGuard {
        self.depth.set(self.depth.get() + 1);
        DepthGuard {
            depth: Rc::clone(&self.depth),
        }
    }

    /// Whether both handles share the same counter
    pub fn same_as(&self, other: &DepthContext) -> bool {
        Rc::ptr_eq(&self.depth, &other.depth)
    }
}

impl fmt::Debug for DepthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DepthContext")
            .field("depth", &self.depth.get())
            .finish()
    }
}

/// Restores the depth of its [`DepthContext`] when dropped
#[must_use = "the depth is restored as soon as the guard is dropped"]
pub struct DepthGuard {
    depth: Rc<Cell<usize>>,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

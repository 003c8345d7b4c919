//! The type-resolution collaborator used to match throws against catches.
//!
//! The builder needs exactly two answers from the outside world: the static
//! type of a thrown expression, and whether a declared exception type is a
//! supertype of (assignable from) that type. Both answers may be
//! unavailable; the builder then degrades the throw node instead of
//! failing.

use compact_str::CompactString;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ast::Expr;

/// Static type information for throw resolution.
pub trait TypeResolver {
    /// The static type of an expression, if known.
    fn static_type(&self, expr: &Expr) -> Option<CompactString>;

    /// Whether `declared` is a supertype of (assignable from) `thrown`.
    /// `None` means the relationship cannot be determined.
    fn assignable(&self, declared: &str, thrown: &str) -> Option<bool>;
}

/// A table-driven [`TypeResolver`].
///
/// Types are declared with their direct supertypes and expressions are
/// annotated with their static type by text. Assignability is answered by
/// walking the supertype graph transitively. This stands in for a full
/// symbol solver in tests, examples and simple front ends.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    /// Type name to its direct supertypes.
    supertypes: FxHashMap<CompactString, Vec<CompactString>>,
    /// Expression text to its static type.
    expr_types: FxHashMap<CompactString, CompactString>,
}

impl TypeTable {
    /// An empty table: every lookup answers "unknown".
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a type and its direct supertypes. Supertypes should be
    /// declared too, or assignability through them stays unknown.
    pub fn declare(&mut self, name: impl Into<CompactString>, supertypes: &[&str]) {
        self.supertypes.insert(
            name.into(),
            supertypes.iter().map(|name| (*name).into()).collect(),
        );
    }

    /// Records the static type of an expression, keyed by its source text.
    pub fn annotate(&mut self, expr_text: impl Into<CompactString>, type_name: impl Into<CompactString>) {
        self.expr_types.insert(expr_text.into(), type_name.into());
    }

    /// Whether `declared` is reachable from `thrown` through the supertype
    /// graph. Cycle-safe; a type is its own supertype.
    fn is_supertype(&self, declared: &str, thrown: &str) -> bool {
        let mut seen = FxHashSet::default();
        let mut todo = vec![thrown];
        while let Some(current) = todo.pop() {
            if current == declared {
                return true;
            }
            if !seen.insert(current) {
                continue;
            }
            if let Some(supers) = self.supertypes.get(current) {
                todo.extend(supers.iter().map(CompactString::as_str));
            }
        }
        false
    }
}

impl TypeResolver for TypeTable {
    fn static_type(&self, expr: &Expr) -> Option<CompactString> {
        self.expr_types.get(expr.text.as_str()).cloned()
    }

    fn assignable(&self, declared: &str, thrown: &str) -> Option<bool> {
        if !self.supertypes.contains_key(thrown) || !self.supertypes.contains_key(declared) {
            return None;
        }
        Some(self.is_supertype(declared, thrown))
    }
}

//! Type-descriptor collaborator
//!
//! The expression parser never resolves types itself. It only needs two
//! answers from the type layer: "does this identifier start a type name"
//! (to tell a cast or compound literal apart from a parenthesized
//! expression) and, if so, an opaque descriptor handle to store on the
//! resulting node. [`TypeLookup`] is that seam; [`TypeTable`] is a flat
//! registry implementation sufficient for stand-alone use and tests.

use rustc_hash::FxHashSet;

/// Opaque handle describing the target type of a cast or compound literal.
///
/// Only the spelled name and pointer depth are recorded here; resolving
/// what the name means is deferred to the type layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    pointer_depth: usize,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, pointer_depth: usize) -> Self {
        Self {
            name: name.into(),
            pointer_depth,
        }
    }

    /// The base type name as spelled in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Levels of pointer indirection (`0` = not a pointer).
    pub fn pointer_depth(&self) -> usize {
        self.pointer_depth
    }
}

/// Answers the parser's type-name queries during cast and compound-literal
/// disambiguation.
pub trait TypeLookup {
    /// Whether `name` denotes a type at this point in the program.
    fn is_type_name(&self, name: &str) -> bool;

    /// Mint a descriptor for `name` with `pointer_depth` levels of
    /// indirection, or `None` if the window does not form a type.
    fn describe(&self, name: &str, pointer_depth: usize) -> Option<TypeDescriptor>;
}

/// Flat registry of known type names.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    names: FxHashSet<String>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the C basic type names.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        for name in [
            "void", "char", "short", "int", "long", "float", "double",
            "signed", "unsigned", "_Bool",
        ] {
            table.register(name);
        }
        table
    }

    /// Register `name` as a type (e.g. a struct tag or typedef name).
    pub fn register(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }
}

impl TypeLookup for TypeTable {
    fn is_type_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    fn describe(&self, name: &str, pointer_depth: usize) -> Option<TypeDescriptor> {
        self.is_type_name(name)
            .then(|| TypeDescriptor::new(name, pointer_depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let table = TypeTable::with_builtins();
        assert!(table.is_type_name("int"));
        assert!(table.is_type_name("unsigned"));
        assert!(!table.is_type_name("Point"));
    }

    #[test]
    fn test_register_and_describe() {
        let mut table = TypeTable::new();
        table.register("Point");

        let descriptor = table.describe("Point", 1).unwrap();
        assert_eq!(descriptor.name(), "Point");
        assert_eq!(descriptor.pointer_depth(), 1);

        assert!(table.describe("notatype", 0).is_none());
    }
}

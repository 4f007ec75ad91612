//! Raw element definitions, as reported by the engine.
//!
//! The engine's introspection API describes each declared data element
//! by kind: the element's own kind, the leaf kind of its contents, and
//! (for tuple leaves) an ordered component list. The catalog classifies
//! this raw shape into an [`crate::schema::ElementSchema`]; everything
//! the catalog cannot classify is rejected there, not here.

use std::fmt;

/// The kind of a declared element or tuple component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// Integer scalar.
    Int,
    /// Numeric (float) scalar.
    Num,
    /// String scalar.
    Str,
    /// Tuple of named components.
    Tuple,
    /// One-dimensional set.
    Set,
    /// Indexed array.
    Array,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefinitionKind::Int => "int",
            DefinitionKind::Num => "num",
            DefinitionKind::Str => "string",
            DefinitionKind::Tuple => "tuple",
            DefinitionKind::Set => "set",
            DefinitionKind::Array => "array",
        };
        f.write_str(name)
    }
}

/// One named component of a tuple definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDefinition {
    /// Component name.
    pub name: String,
    /// Declared component kind.
    pub kind: DefinitionKind,
}

impl ComponentDefinition {
    /// Creates a new component definition.
    pub fn new(name: impl Into<String>, kind: DefinitionKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// The declared shape of one named data element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDefinition {
    /// Element name.
    name: String,
    /// Kind of the element itself.
    kind: DefinitionKind,
    /// Kind of the element's contents.
    leaf: DefinitionKind,
    /// Ordered components, for tuple leaves.
    components: Vec<ComponentDefinition>,
}

impl ElementDefinition {
    /// Declares a set of scalars of the given leaf kind.
    pub fn scalar_set(name: impl Into<String>, leaf: DefinitionKind) -> Self {
        Self {
            name: name.into(),
            kind: DefinitionKind::Set,
            leaf,
            components: Vec::new(),
        }
    }

    /// Declares a set of tuples with the given ordered components.
    pub fn tuple_set(name: impl Into<String>, components: Vec<ComponentDefinition>) -> Self {
        Self {
            name: name.into(),
            kind: DefinitionKind::Set,
            leaf: DefinitionKind::Tuple,
            components,
        }
    }

    /// Declares an element of an arbitrary kind.
    ///
    /// Used for shapes the marshalling layer does not support, so that
    /// catalog rejection paths stay testable.
    pub fn other(name: impl Into<String>, kind: DefinitionKind, leaf: DefinitionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            leaf,
            components: Vec::new(),
        }
    }

    /// Returns the element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of the element itself.
    #[must_use]
    pub const fn kind(&self) -> DefinitionKind {
        self.kind
    }

    /// Returns the leaf kind of the element's contents.
    #[must_use]
    pub const fn leaf(&self) -> DefinitionKind {
        self.leaf
    }

    /// Returns the ordered tuple components.
    #[must_use]
    pub fn components(&self) -> &[ComponentDefinition] {
        &self.components
    }
}

/// The engine's introspection API, as consumed by the catalog.
pub trait DefinitionSource {
    /// Returns the definition of the named element, if declared.
    fn element_definition(&self, name: &str) -> Option<&ElementDefinition>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_set_definition() {
        let def = ElementDefinition::scalar_set("Sites", DefinitionKind::Str);
        assert_eq!(def.kind(), DefinitionKind::Set);
        assert_eq!(def.leaf(), DefinitionKind::Str);
        assert!(def.components().is_empty());
    }

    #[test]
    fn test_tuple_set_definition() {
        let def = ElementDefinition::tuple_set(
            "Products",
            vec![
                ComponentDefinition::new("name", DefinitionKind::Str),
                ComponentDefinition::new("capacity", DefinitionKind::Int),
            ],
        );
        assert_eq!(def.leaf(), DefinitionKind::Tuple);
        assert_eq!(def.components().len(), 2);
        assert_eq!(def.components()[1].name, "capacity");
    }
}

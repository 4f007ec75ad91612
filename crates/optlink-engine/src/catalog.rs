//! Schema catalog: element-name resolution against the engine.
//!
//! The catalog is a read-only view over a [`DefinitionSource`]. It
//! classifies raw definitions into [`ElementSchema`]s, rejecting
//! everything the marshalling layer cannot represent. All shape and
//! field-type rejection happens here, at resolve time, never later
//! during ingestion.

use optlink_common::error::{LinkError, LinkResult};

use crate::definition::{DefinitionKind, DefinitionSource};
use crate::schema::{ElementSchema, FieldSchema, TupleSchema};
use crate::types::ElementType;

/// Read-only, side-effect-free resolver over the engine's metadata.
///
/// Valid only for the lifetime of the engine session that owns the
/// definition source. No caching beyond the source's own store.
#[derive(Debug)]
pub struct SchemaCatalog<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: DefinitionSource + ?Sized> SchemaCatalog<'a, S> {
    /// Creates a catalog over the given definition source.
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolves an element name to its classified schema.
    ///
    /// Fails with `UnknownElement` if no such element is declared, with
    /// `UnsupportedElementShape` if the element is not a one-dimensional
    /// set of scalars or tuples, and with `UnsupportedFieldType` if a
    /// tuple component is not integer/float/string (e.g. a nested tuple).
    pub fn resolve(&self, name: &str) -> LinkResult<ElementSchema> {
        let def = self
            .source
            .element_definition(name)
            .ok_or_else(|| LinkError::UnknownElement {
                element: name.to_string(),
            })?;

        if def.kind() != DefinitionKind::Set {
            return Err(LinkError::UnsupportedElementShape {
                element: name.to_string(),
                shape: def.kind().to_string(),
            });
        }

        match def.leaf() {
            DefinitionKind::Tuple => {
                let mut fields = Vec::with_capacity(def.components().len());
                for component in def.components() {
                    let ty = scalar_type(component.kind).ok_or_else(|| {
                        LinkError::UnsupportedFieldType {
                            element: name.to_string(),
                            field: component.name.clone(),
                            declared: component.kind.to_string(),
                        }
                    })?;
                    fields.push(FieldSchema::new(&component.name, ty));
                }
                Ok(ElementSchema::TupleSet(TupleSchema::new(name, fields)))
            }
            leaf => match scalar_type(leaf) {
                Some(ty) => Ok(ElementSchema::ScalarSet(ty)),
                None => Err(LinkError::UnsupportedElementShape {
                    element: name.to_string(),
                    shape: format!("set of {}", leaf),
                }),
            },
        }
    }
}

/// Classifies a definition kind as a scalar element type, if it is one.
fn scalar_type(kind: DefinitionKind) -> Option<ElementType> {
    match kind {
        DefinitionKind::Int => Some(ElementType::Int),
        DefinitionKind::Num => Some(ElementType::Num),
        DefinitionKind::Str => Some(ElementType::Str),
        DefinitionKind::Tuple | DefinitionKind::Set | DefinitionKind::Array => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{ComponentDefinition, ElementDefinition};
    use std::collections::HashMap;

    struct Definitions(HashMap<String, ElementDefinition>);

    impl Definitions {
        fn new(defs: Vec<ElementDefinition>) -> Self {
            Self(
                defs.into_iter()
                    .map(|d| (d.name().to_string(), d))
                    .collect(),
            )
        }
    }

    impl DefinitionSource for Definitions {
        fn element_definition(&self, name: &str) -> Option<&ElementDefinition> {
            self.0.get(name)
        }
    }

    #[test]
    fn test_resolve_scalar_set() {
        let source = Definitions::new(vec![ElementDefinition::scalar_set(
            "Sites",
            DefinitionKind::Str,
        )]);
        let catalog = SchemaCatalog::new(&source);

        let schema = catalog.resolve("Sites").unwrap();
        assert_eq!(schema, ElementSchema::ScalarSet(ElementType::Str));
    }

    #[test]
    fn test_resolve_tuple_set_preserves_field_order() {
        let source = Definitions::new(vec![ElementDefinition::tuple_set(
            "Products",
            vec![
                ComponentDefinition::new("name", DefinitionKind::Str),
                ComponentDefinition::new("capacity", DefinitionKind::Int),
                ComponentDefinition::new("price", DefinitionKind::Num),
            ],
        )]);
        let catalog = SchemaCatalog::new(&source);

        let schema = catalog.resolve("Products").unwrap();
        let tuple = schema.as_tuple_set().unwrap();
        assert_eq!(tuple.field_names(), ["name", "capacity", "price"]);
        assert_eq!(tuple.field(2).unwrap().ty, ElementType::Num);
    }

    #[test]
    fn test_resolve_unknown_element() {
        let source = Definitions::new(vec![]);
        let catalog = SchemaCatalog::new(&source);

        let err = catalog.resolve("UnknownThing").unwrap_err();
        assert!(matches!(err, LinkError::UnknownElement { element } if element == "UnknownThing"));
    }

    #[test]
    fn test_resolve_rejects_nested_tuple_field() {
        let source = Definitions::new(vec![ElementDefinition::tuple_set(
            "Nested",
            vec![
                ComponentDefinition::new("id", DefinitionKind::Int),
                ComponentDefinition::new("inner", DefinitionKind::Tuple),
            ],
        )]);
        let catalog = SchemaCatalog::new(&source);

        let err = catalog.resolve("Nested").unwrap_err();
        assert!(matches!(err, LinkError::UnsupportedFieldType { field, .. } if field == "inner"));
    }

    #[test]
    fn test_resolve_rejects_array() {
        let source = Definitions::new(vec![ElementDefinition::other(
            "Cost",
            DefinitionKind::Array,
            DefinitionKind::Num,
        )]);
        let catalog = SchemaCatalog::new(&source);

        let err = catalog.resolve("Cost").unwrap_err();
        assert!(matches!(err, LinkError::UnsupportedElementShape { .. }));
    }

    #[test]
    fn test_resolve_rejects_set_of_sets() {
        let source = Definitions::new(vec![ElementDefinition::scalar_set(
            "Groups",
            DefinitionKind::Set,
        )]);
        let catalog = SchemaCatalog::new(&source);

        let err = catalog.resolve("Groups").unwrap_err();
        assert!(matches!(err, LinkError::UnsupportedElementShape { .. }));
    }
}

//! Classified element schemas.
//!
//! An [`ElementSchema`] is the catalog's verdict on a declared data
//! element: either a scalar set of one [`ElementType`], or a tuple set
//! with an ordered field list. Field order is significant and fixed for
//! the schema's lifetime; it determines both positional column binding
//! in generated DDL/DML and positional value binding against solved
//! tuples. Schemas are resolved once per element name and never
//! persisted.

use std::collections::HashMap;
use std::fmt;

use crate::types::ElementType;

/// One named, typed field of a tuple schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Field name; must match a result-set column name on reads.
    pub name: String,
    /// Field type.
    pub ty: ElementType,
}

impl FieldSchema {
    /// Creates a new field schema.
    pub fn new(name: impl Into<String>, ty: ElementType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// The ordered, fixed field list of a tuple-set element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TupleSchema {
    /// Owning element name.
    element: String,
    /// Fields in declaration order.
    fields: Vec<FieldSchema>,
    /// Index by field name for fast lookup.
    index: HashMap<String, usize>,
}

impl TupleSchema {
    /// Creates a tuple schema from an ordered field list.
    pub fn new(element: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Self {
            element: element.into(),
            fields,
            index,
        }
    }

    /// Returns the owning element name.
    #[must_use]
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Returns the number of fields (the tuple arity).
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Returns the field at the given position.
    #[must_use]
    pub fn field(&self, pos: usize) -> Option<&FieldSchema> {
        self.fields.get(pos)
    }

    /// Finds the position of a field by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns the field names in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

impl fmt::Display for TupleSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.element)?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", field)?;
        }
        write!(f, "]")
    }
}

/// The classified shape of a declared data element.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementSchema {
    /// A set of scalars of one type.
    ScalarSet(ElementType),
    /// A set of fixed-arity tuples.
    TupleSet(TupleSchema),
}

impl ElementSchema {
    /// Returns true if this is a tuple set.
    #[must_use]
    pub const fn is_tuple_set(&self) -> bool {
        matches!(self, ElementSchema::TupleSet(_))
    }

    /// Returns the tuple schema, if this is a tuple set.
    #[must_use]
    pub const fn as_tuple_set(&self) -> Option<&TupleSchema> {
        match self {
            ElementSchema::TupleSet(schema) => Some(schema),
            ElementSchema::ScalarSet(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products() -> TupleSchema {
        TupleSchema::new(
            "Products",
            vec![
                FieldSchema::new("name", ElementType::Str),
                FieldSchema::new("capacity", ElementType::Int),
                FieldSchema::new("price", ElementType::Num),
            ],
        )
    }

    #[test]
    fn test_field_order_preserved() {
        let schema = products();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.field_names(), ["name", "capacity", "price"]);
        assert_eq!(schema.field(1).unwrap().ty, ElementType::Int);
    }

    #[test]
    fn test_index_of() {
        let schema = products();
        assert_eq!(schema.index_of("price"), Some(2));
        assert_eq!(schema.index_of("weight"), None);
    }

    #[test]
    fn test_element_schema_accessors() {
        let scalar = ElementSchema::ScalarSet(ElementType::Int);
        assert!(!scalar.is_tuple_set());
        assert!(scalar.as_tuple_set().is_none());

        let tuple = ElementSchema::TupleSet(products());
        assert!(tuple.is_tuple_set());
        assert_eq!(tuple.as_tuple_set().unwrap().element(), "Products");
    }

    #[test]
    fn test_display() {
        let schema = products();
        assert_eq!(
            schema.to_string(),
            "Products[name: string, capacity: int, price: num]"
        );
    }
}

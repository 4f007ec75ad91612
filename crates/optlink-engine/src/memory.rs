//! In-memory model: a concrete implementation of the engine boundary.
//!
//! [`MemoryModel`] stores element definitions and materialized sets. It
//! implements all three engine contracts ([`DefinitionSource`],
//! [`DataHandler`], and [`TupleSource`]) so hosts without a live
//! engine, and every integration test, can run full read and write
//! passes against it. The handler implementation enforces the protocol
//! ordering; violations surface as `Internal` errors.

use std::collections::{BTreeMap, HashMap};

use optlink_common::error::{LinkError, LinkResult};

use crate::definition::{DefinitionKind, DefinitionSource, ElementDefinition};
use crate::handler::DataHandler;
use crate::tuple::{TupleRead, TupleSource};
use crate::types::ScalarValue;

/// One materialized tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryTuple {
    values: Vec<ScalarValue>,
}

impl MemoryTuple {
    /// Creates a tuple from its ordered values.
    #[must_use]
    pub fn new(values: Vec<ScalarValue>) -> Self {
        Self { values }
    }

    /// Returns the ordered values.
    #[must_use]
    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }
}

impl TupleRead for MemoryTuple {
    fn arity(&self) -> usize {
        self.values.len()
    }

    fn int_value(&self, pos: usize) -> LinkResult<i32> {
        match self.values.get(pos) {
            Some(ScalarValue::Int(i)) => Ok(*i),
            other => Err(position_error("int", pos, other)),
        }
    }

    fn num_value(&self, pos: usize) -> LinkResult<f64> {
        match self.values.get(pos) {
            Some(ScalarValue::Num(n)) => Ok(*n),
            other => Err(position_error("num", pos, other)),
        }
    }

    fn str_value(&self, pos: usize) -> LinkResult<&str> {
        match self.values.get(pos) {
            Some(ScalarValue::Str(s)) => Ok(s),
            other => Err(position_error("string", pos, other)),
        }
    }
}

fn position_error(expected: &str, pos: usize, actual: Option<&ScalarValue>) -> LinkError {
    match actual {
        Some(value) => LinkError::internal(format!(
            "tuple position {} holds a {} value, not {}",
            pos,
            value.element_type(),
            expected
        )),
        None => LinkError::internal(format!("tuple position {} is out of range", pos)),
    }
}

/// One materialized element.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoryElement {
    /// A scalar set, in insertion order.
    Scalars(Vec<ScalarValue>),
    /// A tuple set, in insertion order.
    Tuples(Vec<MemoryTuple>),
}

/// In-flight element construction state.
#[derive(Debug)]
struct Builder {
    element: String,
    set_open: bool,
    scalars: Vec<ScalarValue>,
    tuples: Vec<MemoryTuple>,
    tuple: Option<Vec<ScalarValue>>,
}

impl Builder {
    fn new(element: String) -> Self {
        Self {
            element,
            set_open: false,
            scalars: Vec::new(),
            tuples: Vec::new(),
            tuple: None,
        }
    }
}

/// In-memory definition store plus materialized element store.
#[derive(Debug, Default)]
pub struct MemoryModel {
    definitions: HashMap<String, ElementDefinition>,
    elements: BTreeMap<String, MemoryElement>,
    build: Option<Builder>,
}

impl MemoryModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an element definition.
    pub fn define(&mut self, definition: ElementDefinition) {
        self.definitions
            .insert(definition.name().to_string(), definition);
    }

    /// Appends a tuple to the named element, creating the element if
    /// needed. Used to populate solved results directly.
    pub fn insert_tuple(&mut self, element: &str, values: Vec<ScalarValue>) -> LinkResult<()> {
        match self
            .elements
            .entry(element.to_string())
            .or_insert_with(|| MemoryElement::Tuples(Vec::new()))
        {
            MemoryElement::Tuples(tuples) => {
                tuples.push(MemoryTuple::new(values));
                Ok(())
            }
            MemoryElement::Scalars(_) => Err(LinkError::UnsupportedElementShape {
                element: element.to_string(),
                shape: "scalar set".to_string(),
            }),
        }
    }

    /// Returns the materialized element, if present.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&MemoryElement> {
        self.elements.get(name)
    }

    /// Returns the materialized scalar set, if present and scalar.
    #[must_use]
    pub fn scalar_set(&self, name: &str) -> Option<&[ScalarValue]> {
        match self.elements.get(name) {
            Some(MemoryElement::Scalars(values)) => Some(values),
            _ => None,
        }
    }

    /// Returns the materialized tuple set, if present and tuple-shaped.
    #[must_use]
    pub fn tuple_set(&self, name: &str) -> Option<&[MemoryTuple]> {
        match self.elements.get(name) {
            Some(MemoryElement::Tuples(tuples)) => Some(tuples),
            _ => None,
        }
    }

    fn builder(&mut self) -> LinkResult<&mut Builder> {
        self.build
            .as_mut()
            .ok_or_else(|| LinkError::internal("handler call outside an open element"))
    }

    /// True if the named element is defined with a tuple leaf.
    fn defined_as_tuple_set(&self, name: &str) -> bool {
        self.definitions
            .get(name)
            .is_some_and(|d| d.leaf() == DefinitionKind::Tuple)
    }
}

impl DefinitionSource for MemoryModel {
    fn element_definition(&self, name: &str) -> Option<&ElementDefinition> {
        self.definitions.get(name)
    }
}

impl DataHandler for MemoryModel {
    fn start_element(&mut self, name: &str) -> LinkResult<()> {
        if self.build.is_some() {
            return Err(LinkError::internal(
                "start_element while another element is open",
            ));
        }
        self.build = Some(Builder::new(name.to_string()));
        Ok(())
    }

    fn start_set(&mut self) -> LinkResult<()> {
        let builder = self.builder()?;
        if builder.set_open {
            return Err(LinkError::internal("start_set on an already open set"));
        }
        builder.set_open = true;
        Ok(())
    }

    fn start_tuple(&mut self) -> LinkResult<()> {
        let builder = self.builder()?;
        if !builder.set_open {
            return Err(LinkError::internal("start_tuple outside an open set"));
        }
        if builder.tuple.is_some() {
            return Err(LinkError::internal("start_tuple inside an open tuple"));
        }
        if !builder.scalars.is_empty() {
            return Err(LinkError::internal("start_tuple in a scalar set"));
        }
        builder.tuple = Some(Vec::new());
        Ok(())
    }

    fn add_int_item(&mut self, value: i32) -> LinkResult<()> {
        self.add_item(&ScalarValue::Int(value))
    }

    fn add_num_item(&mut self, value: f64) -> LinkResult<()> {
        self.add_item(&ScalarValue::Num(value))
    }

    fn add_str_item(&mut self, value: &str) -> LinkResult<()> {
        self.add_item(&ScalarValue::str(value))
    }

    fn end_tuple(&mut self) -> LinkResult<()> {
        let builder = self.builder()?;
        match builder.tuple.take() {
            Some(values) => {
                builder.tuples.push(MemoryTuple::new(values));
                Ok(())
            }
            None => Err(LinkError::internal("end_tuple without an open tuple")),
        }
    }

    fn end_set(&mut self) -> LinkResult<()> {
        {
            let builder = self
                .build
                .as_ref()
                .ok_or_else(|| LinkError::internal("end_set outside an open element"))?;
            if !builder.set_open {
                return Err(LinkError::internal("end_set without an open set"));
            }
            if builder.tuple.is_some() {
                return Err(LinkError::internal("end_set inside an open tuple"));
            }
        }
        if let Some(builder) = self.build.take() {
            let element =
                if !builder.tuples.is_empty() || self.defined_as_tuple_set(&builder.element) {
                    MemoryElement::Tuples(builder.tuples)
                } else {
                    MemoryElement::Scalars(builder.scalars)
                };
            self.elements.insert(builder.element, element);
        }
        Ok(())
    }

    fn add_item(&mut self, value: &ScalarValue) -> LinkResult<()> {
        let builder = self.builder()?;
        if !builder.set_open {
            return Err(LinkError::internal("add_item outside an open set"));
        }
        match builder.tuple.as_mut() {
            Some(tuple) => tuple.push(value.clone()),
            None => {
                if !builder.tuples.is_empty() {
                    return Err(LinkError::internal("scalar item in a tuple set"));
                }
                builder.scalars.push(value.clone());
            }
        }
        Ok(())
    }
}

impl TupleSource for MemoryModel {
    fn tuples<'a>(
        &'a self,
        element: &str,
    ) -> LinkResult<Box<dyn Iterator<Item = &'a dyn TupleRead> + 'a>> {
        match self.elements.get(element) {
            Some(MemoryElement::Tuples(tuples)) => {
                Ok(Box::new(tuples.iter().map(|t| t as &dyn TupleRead)))
            }
            Some(MemoryElement::Scalars(_)) => Err(LinkError::UnsupportedElementShape {
                element: element.to_string(),
                shape: "scalar set".to_string(),
            }),
            None => Err(LinkError::UnknownElement {
                element: element.to_string(),
            }),
        }
    }
}

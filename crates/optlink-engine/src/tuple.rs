//! Read access to solved tuple sets.
//!
//! After solving, the engine exposes each tuple-set element as an
//! ordered collection of fixed-arity tuples. Both traits are read-only;
//! arity and per-position types are fixed by the owning element's
//! schema, and callers are expected to index per that schema.

use optlink_common::error::LinkResult;

/// Positional, typed read access to one solved tuple.
pub trait TupleRead {
    /// Returns the tuple arity.
    fn arity(&self) -> usize;

    /// Returns the integer value at the given position.
    fn int_value(&self, pos: usize) -> LinkResult<i32>;

    /// Returns the numeric value at the given position.
    fn num_value(&self, pos: usize) -> LinkResult<f64>;

    /// Returns the string value at the given position.
    fn str_value(&self, pos: usize) -> LinkResult<&str>;
}

/// Ordered iteration over the tuples of named tuple-set elements.
pub trait TupleSource {
    /// Returns an iterator over the tuples of the named element.
    ///
    /// Fails with `UnknownElement` if the model holds no such element
    /// and with `UnsupportedElementShape` if the element is not a tuple
    /// set.
    fn tuples<'a>(&'a self, element: &str)
        -> LinkResult<Box<dyn Iterator<Item = &'a dyn TupleRead> + 'a>>;
}

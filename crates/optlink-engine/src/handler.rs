//! The element-construction builder protocol.
//!
//! Sets and tuples are materialized inside the engine through an ordered
//! sequence of handler calls:
//!
//! ```text
//! start_element -> start_set -> (start_tuple -> add_*_item x N -> end_tuple)* -> end_set
//! ```
//!
//! Exactly one `start_element`/`end_set` pair per element; for tuple
//! sets, exactly one `start_tuple`/`end_tuple` pair per source row.
//! Scalar sets skip the tuple calls and add one item per row directly
//! into the open set. Implementations may enforce the ordering and
//! report violations as `Internal` errors.

use optlink_common::error::LinkResult;

use crate::types::ScalarValue;

/// Sink for the ordered element-construction protocol.
pub trait DataHandler {
    /// Opens the named element.
    fn start_element(&mut self, name: &str) -> LinkResult<()>;

    /// Opens the element's set.
    fn start_set(&mut self) -> LinkResult<()>;

    /// Opens a tuple within the open set.
    fn start_tuple(&mut self) -> LinkResult<()>;

    /// Adds an integer item to the open tuple or set.
    fn add_int_item(&mut self, value: i32) -> LinkResult<()>;

    /// Adds a numeric item to the open tuple or set.
    fn add_num_item(&mut self, value: f64) -> LinkResult<()>;

    /// Adds a string item to the open tuple or set.
    fn add_str_item(&mut self, value: &str) -> LinkResult<()>;

    /// Closes the open tuple.
    fn end_tuple(&mut self) -> LinkResult<()>;

    /// Closes the open set, completing the element.
    fn end_set(&mut self) -> LinkResult<()>;

    /// Adds a typed scalar, dispatching to the matching `add_*_item` call.
    fn add_item(&mut self, value: &ScalarValue) -> LinkResult<()> {
        match value {
            ScalarValue::Int(i) => self.add_int_item(*i),
            ScalarValue::Num(n) => self.add_num_item(*n),
            ScalarValue::Str(s) => self.add_str_item(s),
        }
    }
}

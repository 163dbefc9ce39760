//! Dynamic row decoding for statements whose result shape is not known at compile time.

pub mod row;

pub use row::{column_names, row_to_json};

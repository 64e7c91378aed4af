//! Fractal table: a sequence with cheap positional edits.
//!
//! [`FractalTable`] keeps its elements in nested circular blocks whose shape
//! is fixed by a [`TableConfig`](crate::config::TableConfig).

mod block;
mod fractal_table;

pub use fractal_table::{FractalTable, Iter};

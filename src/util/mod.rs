//! Small standalone helpers shared across the catalogue, model, and engine.

pub mod welzl;

pub use welzl::{smallest_enclosing_circle, Circle};

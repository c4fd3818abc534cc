//! Content loading use cases.
//!
//! Loads body part definitions from the configured content sources into the
//! registry, then finalizes and checks it.

mod load_content;

pub use load_content::{ContentLoadReport, LoadContent};

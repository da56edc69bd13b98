//! COCO object-detection annotations reshaped for a viewer client.
//!
//! A COCO annotation file keeps every annotation in one flat list. The
//! [reshape()] function turns it into a two-level lookup, image id to category
//! id to the annotations of that pair, keeping only `id` and `bbox` of each
//! annotation.

mod common;

pub mod dataset;
pub use dataset::*;

pub mod error;
pub use error::*;

pub mod reshape;
pub use reshape::*;

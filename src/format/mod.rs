//! Annotation sidecar persistence.
//!
//! Shapes are stored in plain-text files next to the dataset: a shared
//! `classes.txt` naming the labels (line number = class index) and one
//! `<image stem>.txt` per image with normalized shape rows.

pub mod error;
pub mod sidecar;

#[cfg(test)]
mod tests;

pub use error::SidecarError;

//! Data models for the annotation canvas.

mod label;
mod shape;
mod task;

pub use label::{Label, LabelSet};
pub use shape::{
    Circle, Line, Marker, Polygon, Rectangle, RotatedRect, Shape, ShapeGeometry, ShapeId,
    ShapeKind,
};
pub use task::TaskKind;

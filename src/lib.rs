//! labelcanvas - Interactive annotation canvas core
//!
//! Shape model, drawing-session state machine, scene registry, and
//! plain-text sidecar persistence for computer-vision dataset labeling.

pub mod canvas;
pub mod config;
pub mod constants;
pub mod format;
pub mod geometry;
pub mod model;

pub use canvas::{CanvasController, CanvasError, ImageCatalog, LabelPicker, PointerOutcome, Tool};
pub use config::CanvasConfig;
pub use model::{Shape, ShapeGeometry, ShapeId, ShapeKind, TaskKind};

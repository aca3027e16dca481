//! The interactive annotation canvas: scene registry, drawing-session state
//! machine, and the controller that ties them to persistence.

pub mod controller;
pub mod scene;
pub mod session;

pub use controller::{CanvasController, CanvasError, ImageCatalog, LabelPicker, PointerOutcome};
pub use scene::{ImageInfo, Scene};
pub use session::{DrawStatus, DrawingSession, SessionOutcome, Tool};

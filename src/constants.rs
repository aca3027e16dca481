//! Global interaction constants for the annotation canvas.

/// Margin (in image pixels) added around a shape's boundary for hit-testing,
/// so thin shapes stay easy to hover and select.
pub const HIT_MARGIN: f32 = 8.0;

/// Vertex handle radius (in image pixels) used for hovered/selected shapes.
pub const HANDLE_RADIUS: f32 = 10.0;

/// Distance threshold for closing a polygon by clicking near its first vertex.
pub const POLYGON_CLOSE_THRESHOLD: f32 = 8.0;

/// Minimum extent (width, height, radius, or baseline length) for a shape to
/// be accepted when construction completes.
pub const MIN_SHAPE_EXTENT: f32 = 1.0;

//! Drawing-session state machine.
//!
//! Turns discrete pointer events (down/move/up) into shape construction.
//! The session is a plain value owned by the canvas controller; there is no
//! process-wide drawing status. Two states: `Select` (pointer input
//! manipulates existing shapes) and `Draw` (an in-progress construction owns
//! the pointer).

use crate::constants::POLYGON_CLOSE_THRESHOLD;
use crate::geometry::Point;
use crate::model::{
    Circle, Line, Marker, Polygon, Rectangle, RotatedRect, ShapeGeometry, ShapeKind,
};

/// Drawing tools. `Select` manipulates existing shapes; the rest construct a
/// new shape of the corresponding kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Select,
    Rectangle,
    RotatedRectangle,
    Polygon,
    Circle,
    Line,
    Point,
}

impl Tool {
    /// The shape kind this tool constructs, if any.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Select => None,
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::RotatedRectangle => Some(ShapeKind::RotatedRectangle),
            Tool::Polygon => Some(ShapeKind::Polygon),
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Line => Some(ShapeKind::Line),
            Tool::Point => Some(ShapeKind::Point),
        }
    }

    pub fn is_drawing_tool(&self) -> bool {
        !matches!(self, Tool::Select)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Select => "Select",
            Tool::Rectangle => "Rectangle",
            Tool::RotatedRectangle => "Rotated Rectangle",
            Tool::Polygon => "Polygon",
            Tool::Circle => "Circle",
            Tool::Line => "Line",
            Tool::Point => "Point",
        }
    }
}

/// The two-state drawing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawStatus {
    #[default]
    Select,
    Draw,
}

/// What a pointer event did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// Nothing relevant to drawing happened.
    Idle,
    /// A new construction started.
    Started,
    /// The in-progress construction changed.
    Updated,
    /// Construction completed with a valid geometry.
    Finished(ShapeGeometry),
    /// Construction completed but the result was degenerate and was dropped.
    Discarded,
}

/// Tracks the current tool and the in-progress multi-click construction.
///
/// While drawing, `points` holds the fixed construction points plus one
/// trailing "floating" point that follows the cursor (the Point tool has no
/// floating point). Completion is click-counted for fixed-arity kinds and
/// proximity-driven for polygons.
#[derive(Debug, Clone, Default)]
pub struct DrawingSession {
    tool: Tool,
    status: DrawStatus,
    points: Vec<Point>,
    clicks: usize,
    closable: bool,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn status(&self) -> DrawStatus {
        self.status
    }

    pub fn is_drawing(&self) -> bool {
        self.status == DrawStatus::Draw
    }

    /// Raw construction points of the in-progress shape (for rendering).
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// True when the next click would close the in-progress polygon
    /// (cursor within the close threshold of the first vertex).
    pub fn is_closable(&self) -> bool {
        self.closable
    }

    /// Arm a tool. Ignored while a construction is in progress (tool buttons
    /// are disabled during `Draw`).
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        if self.is_drawing() {
            return false;
        }
        self.tool = tool;
        true
    }

    /// Abort the in-progress construction and return to `Select`.
    pub fn cancel(&mut self) {
        if self.is_drawing() {
            log::debug!("cancelled in-progress {} construction", self.tool.name());
        }
        self.reset();
    }

    pub fn pointer_down(&mut self, p: Point) -> SessionOutcome {
        let Some(kind) = self.tool.shape_kind() else {
            return SessionOutcome::Idle;
        };

        if !self.is_drawing() {
            // First click arms the construction; all kinds except Point get a
            // floating point that tracks the cursor until the next click.
            self.status = DrawStatus::Draw;
            self.points.clear();
            self.points.push(p);
            if kind != ShapeKind::Point {
                self.points.push(p);
            }
            self.clicks = 0;
            self.closable = false;
            return SessionOutcome::Started;
        }

        match kind {
            ShapeKind::Polygon => {
                let first = self.points[0];
                if self.points.len() >= 4 && p.distance_to(&first) <= POLYGON_CLOSE_THRESHOLD {
                    // Close the ring: the floating point becomes a copy of
                    // the first vertex.
                    let idx = self.points.len() - 1;
                    self.points[idx] = first;
                    return self.finalize();
                }
                let idx = self.points.len() - 1;
                self.points[idx] = p;
                self.points.push(p);
                SessionOutcome::Updated
            }
            _ => {
                // Fix the floating point where the click landed.
                let idx = self.points.len() - 1;
                self.points[idx] = p;
                // Rotated rectangles take a third anchor after the baseline.
                if kind == ShapeKind::RotatedRectangle && self.points.len() < 3 {
                    self.points.push(p);
                }
                SessionOutcome::Updated
            }
        }
    }

    pub fn pointer_move(&mut self, p: Point) -> SessionOutcome {
        if !self.is_drawing() {
            return SessionOutcome::Idle;
        }
        if self.tool.shape_kind() == Some(ShapeKind::Point) {
            return SessionOutcome::Idle;
        }
        let idx = self.points.len() - 1;
        self.points[idx] = p;
        if self.tool == Tool::Polygon {
            self.closable =
                self.points.len() >= 4 && p.distance_to(&self.points[0]) <= POLYGON_CLOSE_THRESHOLD;
        }
        SessionOutcome::Updated
    }

    pub fn pointer_up(&mut self, p: Point) -> SessionOutcome {
        if !self.is_drawing() {
            return SessionOutcome::Idle;
        }
        let Some(kind) = self.tool.shape_kind() else {
            return SessionOutcome::Idle;
        };
        if kind != ShapeKind::Point {
            let idx = self.points.len() - 1;
            self.points[idx] = p;
        }
        self.clicks += 1;
        match kind.click_arity() {
            Some(arity) if self.clicks >= arity => self.finalize(),
            _ => SessionOutcome::Updated,
        }
    }

    /// Best-effort geometry of the in-progress construction, for rendering.
    /// Incomplete multi-point shapes degrade to simpler previews.
    pub fn preview(&self) -> Option<ShapeGeometry> {
        if !self.is_drawing() {
            return None;
        }
        let p = &self.points;
        match self.tool {
            Tool::Select => None,
            Tool::Point => p.first().map(|&pt| ShapeGeometry::Point(Marker::new(pt))),
            Tool::Rectangle if p.len() >= 2 => {
                Some(ShapeGeometry::Rectangle(Rectangle::new(p[0], p[1])))
            }
            Tool::Circle if p.len() >= 2 => Some(ShapeGeometry::Circle(Circle::new(p[0], p[1]))),
            Tool::Line if p.len() >= 2 => Some(ShapeGeometry::Line(Line::new(p[0], p[1]))),
            Tool::RotatedRectangle if p.len() >= 3 => {
                RotatedRect::from_anchors(p[0], p[1], p[2]).map(ShapeGeometry::RotatedRectangle)
            }
            Tool::RotatedRectangle if p.len() == 2 => {
                Some(ShapeGeometry::Line(Line::new(p[0], p[1])))
            }
            Tool::Polygon if p.len() >= 3 => {
                Polygon::closed(p.clone()).map(ShapeGeometry::Polygon)
            }
            Tool::Polygon if p.len() == 2 => Some(ShapeGeometry::Line(Line::new(p[0], p[1]))),
            _ => None,
        }
    }

    fn finalize(&mut self) -> SessionOutcome {
        let geometry = self.build_geometry();
        self.reset();
        match geometry {
            Some(g) if g.is_substantial() => SessionOutcome::Finished(g),
            _ => {
                log::debug!("discarded degenerate {} construction", self.tool.name());
                SessionOutcome::Discarded
            }
        }
    }

    fn build_geometry(&self) -> Option<ShapeGeometry> {
        let p = &self.points;
        match self.tool.shape_kind()? {
            ShapeKind::Rectangle => (p.len() >= 2)
                .then(|| ShapeGeometry::Rectangle(Rectangle::new(p[0], p[1]))),
            ShapeKind::Circle => {
                (p.len() >= 2).then(|| ShapeGeometry::Circle(Circle::new(p[0], p[1])))
            }
            ShapeKind::Line => (p.len() >= 2).then(|| ShapeGeometry::Line(Line::new(p[0], p[1]))),
            ShapeKind::Point => p.first().map(|&pt| ShapeGeometry::Point(Marker::new(pt))),
            ShapeKind::RotatedRectangle => {
                if p.len() < 3 {
                    return None;
                }
                RotatedRect::from_anchors(p[0], p[1], p[2]).map(ShapeGeometry::RotatedRectangle)
            }
            ShapeKind::Polygon => Polygon::closed(p.clone()).map(ShapeGeometry::Polygon),
        }
    }

    fn reset(&mut self) {
        self.status = DrawStatus::Select;
        self.points.clear();
        self.clicks = 0;
        self.closable = false;
    }
}

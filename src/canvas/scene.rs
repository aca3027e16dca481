//! The shape registry for the currently displayed image.
//!
//! Owns the authoritative shape collection plus the background image
//! reference and its pixel dimensions. Replaced wholesale when the active
//! image changes; insertion order is the iteration (and save) order.

use std::path::PathBuf;

use crate::constants::{HANDLE_RADIUS, HIT_MARGIN};
use crate::geometry::Point;
use crate::model::{Shape, ShapeGeometry, ShapeId};

/// The background image a scene annotates.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    /// Filename stem used to derive sidecar file names.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
    }
}

/// Shape registry for one image.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    image: Option<ImageInfo>,
    shapes: Vec<Shape>,
    next_id: ShapeId,
    selected: Option<ShapeId>,
    hovered: Option<ShapeId>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            image: None,
            shapes: Vec::new(),
            next_id: 1,
            selected: None,
            hovered: None,
        }
    }

    pub fn for_image(image: ImageInfo) -> Self {
        let mut scene = Self::new();
        scene.image = Some(image);
        scene
    }

    pub fn image(&self) -> Option<&ImageInfo> {
        self.image.as_ref()
    }

    /// Insert a finalized shape, assigning a fresh id unless one is already
    /// set. Returns the shape's id.
    pub fn add(&mut self, mut shape: Shape) -> ShapeId {
        if shape.id == 0 {
            shape.id = self.next_id;
            self.next_id += 1;
        } else {
            self.next_id = self.next_id.max(shape.id + 1);
        }
        let id = shape.id;
        self.shapes.push(shape);
        id
    }

    /// Register a bare geometry (label and color attached later by the
    /// completion flow).
    pub fn add_geometry(&mut self, geometry: ShapeGeometry) -> ShapeId {
        self.add(Shape::new(0, geometry))
    }

    /// Delete by id, returning the removed shape.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let idx = self.shapes.iter().position(|s| s.id == id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        Some(self.shapes.remove(idx))
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    /// Shapes in insertion (save) order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Drop all shapes (image change or explicit clear). Ids are not reused
    /// within this scene.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.selected = None;
        self.hovered = None;
    }

    /// Propagate a label recolor to every shape tagged with it.
    /// Returns how many shapes changed.
    pub fn update_color(&mut self, label: &str, color: [u8; 3]) -> usize {
        let mut changed = 0;
        for shape in &mut self.shapes {
            if shape.label.as_deref() == Some(label) && shape.color != color {
                shape.color = color;
                changed += 1;
            }
        }
        changed
    }

    /// Set the selection. Returns true when the selection actually changed,
    /// which is the signal mirrored to the companion annotation list.
    pub fn select(&mut self, id: Option<ShapeId>) -> bool {
        let id = id.filter(|&i| self.get(i).is_some());
        if self.selected == id {
            return false;
        }
        self.selected = id;
        true
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    /// Hit margin for one shape: hovered/selected shapes expose the larger
    /// vertex-handle radius.
    fn margin_for(&self, id: ShapeId) -> f32 {
        if self.selected == Some(id) || self.hovered == Some(id) {
            HANDLE_RADIUS
        } else {
            HIT_MARGIN
        }
    }

    /// Topmost shape under the pointer, if any. Later shapes draw on top and
    /// win ties.
    pub fn hit_test(&self, p: &Point) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.geometry.hit_test(p, self.margin_for(s.id)))
            .map(|s| s.id)
    }

    /// Update hover state from the pointer position, returning the hovered
    /// shape id.
    pub fn hover_at(&mut self, p: &Point) -> Option<ShapeId> {
        self.hovered = self.hit_test(p);
        self.hovered
    }

    /// Control point of the selected shape under the pointer, if any.
    pub fn vertex_hit_test(&self, p: &Point) -> Option<(ShapeId, usize)> {
        let id = self.selected?;
        let shape = self.get(id)?;
        shape
            .geometry
            .control_points()
            .iter()
            .position(|cp| cp.distance_to(p) <= HANDLE_RADIUS)
            .map(|idx| (id, idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Marker, Rectangle};

    fn rect_shape(x1: f32, y1: f32, x2: f32, y2: f32) -> Shape {
        Shape::new(
            0,
            ShapeGeometry::Rectangle(Rectangle::new(Point::new(x1, y1), Point::new(x2, y2))),
        )
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut scene = Scene::new();
        let a = scene.add(rect_shape(0.0, 0.0, 10.0, 10.0));
        let b = scene.add(rect_shape(20.0, 20.0, 30.0, 30.0));
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);
        assert!(scene.get(a).is_some());
    }

    #[test]
    fn test_preassigned_id_bumps_counter() {
        let mut scene = Scene::new();
        let mut shape = rect_shape(0.0, 0.0, 10.0, 10.0);
        shape.id = 7;
        scene.add(shape);
        let next = scene.add(rect_shape(1.0, 1.0, 2.0, 2.0));
        assert_eq!(next, 8);
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut scene = Scene::new();
        let id = scene.add(rect_shape(0.0, 0.0, 10.0, 10.0));
        scene.select(Some(id));
        assert!(scene.remove(id).is_some());
        assert_eq!(scene.selected(), None);
        assert!(scene.is_empty());
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn test_update_color_propagates_to_matching_label_only() {
        let mut scene = Scene::new();
        let a = scene.add(rect_shape(0.0, 0.0, 10.0, 10.0).with_label("cat", [1, 1, 1]));
        let b = scene.add(rect_shape(20.0, 0.0, 30.0, 10.0).with_label("dog", [2, 2, 2]));
        let c = scene.add(rect_shape(40.0, 0.0, 50.0, 10.0).with_label("cat", [1, 1, 1]));

        let changed = scene.update_color("cat", [9, 9, 9]);
        assert_eq!(changed, 2);
        assert_eq!(scene.get(a).unwrap().color, [9, 9, 9]);
        assert_eq!(scene.get(b).unwrap().color, [2, 2, 2]);
        assert_eq!(scene.get(c).unwrap().color, [9, 9, 9]);
    }

    #[test]
    fn test_select_reports_changes_only() {
        let mut scene = Scene::new();
        let id = scene.add(rect_shape(0.0, 0.0, 10.0, 10.0));
        assert!(scene.select(Some(id)));
        assert!(!scene.select(Some(id)));
        assert!(scene.select(None));
        // Selecting an unknown id degrades to deselection.
        assert!(!scene.select(Some(999)));
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let mut scene = Scene::new();
        let _bottom = scene.add(rect_shape(0.0, 0.0, 100.0, 100.0));
        let top = scene.add(rect_shape(40.0, 40.0, 60.0, 60.0));
        assert_eq!(scene.hit_test(&Point::new(50.0, 50.0)), Some(top));
        assert_eq!(scene.hit_test(&Point::new(500.0, 500.0)), None);
    }

    #[test]
    fn test_hover_expands_hit_margin() {
        let mut scene = Scene::new();
        let id = scene.add(Shape::new(
            0,
            ShapeGeometry::Point(Marker::new(Point::new(50.0, 50.0))),
        ));
        // 9 px away: outside the 8 px margin while not hovered.
        assert_eq!(scene.hit_test(&Point::new(59.0, 50.0)), None);
        scene.hover_at(&Point::new(52.0, 50.0));
        assert_eq!(scene.hovered(), Some(id));
        // Hovered shapes use the 10 px handle radius.
        assert_eq!(scene.hit_test(&Point::new(59.0, 50.0)), Some(id));
    }

    #[test]
    fn test_vertex_hit_test_on_selected_shape() {
        let mut scene = Scene::new();
        let id = scene.add(Shape::new(
            0,
            ShapeGeometry::Line(Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
        ));
        // No selection, no handles.
        assert_eq!(scene.vertex_hit_test(&Point::new(99.0, 1.0)), None);
        scene.select(Some(id));
        assert_eq!(scene.vertex_hit_test(&Point::new(99.0, 1.0)), Some((id, 1)));
        assert_eq!(scene.vertex_hit_test(&Point::new(50.0, 0.0)), None);
    }

    #[test]
    fn test_clear_keeps_id_counter() {
        let mut scene = Scene::new();
        scene.add(rect_shape(0.0, 0.0, 10.0, 10.0));
        scene.clear();
        let id = scene.add(rect_shape(0.0, 0.0, 10.0, 10.0));
        assert_eq!(id, 2);
    }

    #[test]
    fn test_iteration_order_is_insertion_order() {
        let mut scene = Scene::new();
        let a = scene.add(rect_shape(0.0, 0.0, 10.0, 10.0));
        let b = scene.add(rect_shape(20.0, 0.0, 30.0, 10.0));
        let order: Vec<_> = scene.iter().map(|s| s.id).collect();
        assert_eq!(order, vec![a, b]);
    }
}

//! The annotation-session controller.
//!
//! Glues the drawing session, the scene, the label set, and the sidecar
//! persistence together, and talks to the surrounding application through two
//! collaborator traits: a blocking label-selection dialog and the ordered
//! image listing. All mutation is synchronous on the caller's (UI) thread.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::{CanvasConfig, ConfigError};
use crate::format::sidecar;
use crate::geometry::Point;
use crate::model::{LabelSet, Shape, ShapeGeometry, ShapeId, TaskKind};

use super::scene::{ImageInfo, Scene};
use super::session::{DrawingSession, SessionOutcome, Tool};

/// Blocking label-selection dialog shown when a freshly drawn shape
/// completes. Returns the chosen (possibly newly typed) label name, or
/// `None` on cancellation.
pub trait LabelPicker {
    fn pick_label(&mut self, labels: &LabelSet, last_used: Option<&str>) -> Option<String>;
}

/// Ordered image listing with a per-image "labeled" flag, driving
/// next/previous navigation.
pub trait ImageCatalog {
    fn len(&self) -> usize;
    fn path(&self, index: usize) -> Option<PathBuf>;
    fn is_labeled(&self, index: usize) -> bool;
    fn set_labeled(&mut self, index: usize, labeled: bool);
}

/// Errors surfaced by controller operations. All of them are local to the
/// current image or operation; the registries of other images are never
/// affected.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The label prompt was cancelled or empty; the drawn shape was discarded
    #[error("a label is required; the shape was discarded")]
    LabelRequired,

    /// Saving requires an annotation directory to be chosen first
    #[error("no annotation directory configured")]
    NoAnnotationDir,

    /// No image is currently open
    #[error("no image is open")]
    NoImage,

    /// The catalog entry's file does not exist on disk
    #[error("image not found: {path:?}")]
    ImageMissing { path: PathBuf },

    /// Navigation target outside the catalog
    #[error("image index {index} out of range")]
    IndexOutOfRange { index: usize },

    /// The image file could not be decoded
    #[error("failed to read image: {0}")]
    Image(#[from] image::ImageError),

    /// Sidecar file error
    #[error(transparent)]
    Sidecar(#[from] crate::format::SidecarError),

    /// Configuration persistence error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// What a pointer event did, mirrored to the annotation-list UI.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// Nothing observable happened.
    Idle,
    /// A construction started or progressed.
    Drawing,
    /// A finished shape was registered.
    ShapeAdded(ShapeId),
    /// A completed construction was dropped (degenerate geometry).
    ShapeDiscarded,
    /// The canvas-side selection changed.
    SelectionChanged(Option<ShapeId>),
    /// A whole shape was dragged.
    ShapeMoved(ShapeId),
    /// A single control point was dragged.
    VertexMoved(ShapeId, usize),
}

/// In-flight Select-mode drag.
#[derive(Debug, Clone, Copy)]
enum Drag {
    Move { id: ShapeId, last: Point },
    Vertex { id: ShapeId, index: usize },
}

/// Owns the annotation state for one task and one image at a time.
pub struct CanvasController {
    scene: Scene,
    session: DrawingSession,
    labels: LabelSet,
    task: TaskKind,
    config: CanvasConfig,
    config_path: Option<PathBuf>,
    catalog: Box<dyn ImageCatalog>,
    picker: Box<dyn LabelPicker>,
    current_index: Option<usize>,
    drag: Option<Drag>,
}

impl CanvasController {
    pub fn new(
        config: CanvasConfig,
        catalog: Box<dyn ImageCatalog>,
        picker: Box<dyn LabelPicker>,
    ) -> Self {
        let task = config.task;
        let mut controller = Self {
            scene: Scene::new(),
            session: DrawingSession::new(),
            labels: LabelSet::new(),
            task,
            config,
            config_path: None,
            catalog,
            picker,
            current_index: None,
            drag: None,
        };
        controller.reload_labels();
        if let Some(last) = controller.config.last_label.clone() {
            controller.labels.set_last_used(last);
        }
        controller
    }

    /// Where to persist the config on mutation. Unset means config changes
    /// stay in memory.
    pub fn set_config_path(&mut self, path: PathBuf) {
        self.config_path = Some(path);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn task(&self) -> TaskKind {
        self.task
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Switch the task type. Cancels any in-progress construction and
    /// re-applies tool gating.
    pub fn set_task(&mut self, task: TaskKind) {
        self.session.cancel();
        if !task.allowed_tools().contains(&self.session.tool()) {
            self.session.set_tool(Tool::Select);
        }
        self.task = task;
        self.config.task = task;
        self.persist_config();
    }

    /// Drawing tools currently selectable: none while a construction is in
    /// progress, otherwise the task type's legal set.
    pub fn enabled_tools(&self) -> &'static [Tool] {
        if self.session.is_drawing() {
            &[]
        } else {
            self.task.allowed_tools()
        }
    }

    /// Arm a tool. Has no effect for tools the task type does not allow, or
    /// while a construction is in progress. Returns whether the tool was
    /// armed.
    pub fn arm_tool(&mut self, tool: Tool) -> bool {
        if tool != Tool::Select && !self.task.allowed_tools().contains(&tool) {
            return false;
        }
        self.session.set_tool(tool)
    }

    /// Abort the in-progress construction (Escape).
    pub fn cancel_drawing(&mut self) {
        self.session.cancel();
    }

    pub fn pointer_down(&mut self, p: Point) -> Result<PointerOutcome, CanvasError> {
        if self.session.tool().is_drawing_tool() {
            return match self.session.pointer_down(p) {
                SessionOutcome::Finished(geometry) => self.register_drawn_shape(geometry),
                SessionOutcome::Discarded => Ok(PointerOutcome::ShapeDiscarded),
                SessionOutcome::Idle => Ok(PointerOutcome::Idle),
                _ => Ok(PointerOutcome::Drawing),
            };
        }

        // Select mode: grab a vertex handle of the selected shape first,
        // otherwise select (and begin moving) whatever is under the pointer.
        if let Some((id, index)) = self.scene.vertex_hit_test(&p) {
            self.drag = Some(Drag::Vertex { id, index });
            return Ok(PointerOutcome::Idle);
        }
        let hit = self.scene.hit_test(&p);
        let changed = self.scene.select(hit);
        self.drag = hit.map(|id| Drag::Move { id, last: p });
        Ok(if changed {
            PointerOutcome::SelectionChanged(hit)
        } else {
            PointerOutcome::Idle
        })
    }

    pub fn pointer_move(&mut self, p: Point) -> Result<PointerOutcome, CanvasError> {
        if self.session.is_drawing() {
            self.session.pointer_move(p);
            return Ok(PointerOutcome::Drawing);
        }

        match self.drag {
            Some(Drag::Vertex { id, index }) => {
                if let Some(shape) = self.scene.get_mut(id) {
                    if shape.geometry.set_control_point(index, p) {
                        return Ok(PointerOutcome::VertexMoved(id, index));
                    }
                }
                Ok(PointerOutcome::Idle)
            }
            Some(Drag::Move { id, last }) => {
                let (dx, dy) = (p.x - last.x, p.y - last.y);
                if let Some(shape) = self.scene.get_mut(id) {
                    shape.geometry.translate(dx, dy);
                    self.drag = Some(Drag::Move { id, last: p });
                    return Ok(PointerOutcome::ShapeMoved(id));
                }
                Ok(PointerOutcome::Idle)
            }
            None => {
                self.scene.hover_at(&p);
                Ok(PointerOutcome::Idle)
            }
        }
    }

    pub fn pointer_up(&mut self, p: Point) -> Result<PointerOutcome, CanvasError> {
        if self.session.is_drawing() {
            return match self.session.pointer_up(p) {
                SessionOutcome::Finished(geometry) => self.register_drawn_shape(geometry),
                SessionOutcome::Discarded => Ok(PointerOutcome::ShapeDiscarded),
                _ => Ok(PointerOutcome::Drawing),
            };
        }
        self.drag = None;
        Ok(PointerOutcome::Idle)
    }

    /// Completion flow for a freshly drawn shape: prompt for a label, discard
    /// the shape entirely if none is given, otherwise register it with the
    /// label's color.
    fn register_drawn_shape(
        &mut self,
        geometry: ShapeGeometry,
    ) -> Result<PointerOutcome, CanvasError> {
        let choice = self
            .picker
            .pick_label(&self.labels, self.labels.last_used())
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let Some(name) = choice else {
            log::warn!("label prompt rejected; discarding drawn shape");
            return Err(CanvasError::LabelRequired);
        };

        let is_new = !self.labels.contains(&name);
        let color = self.labels.add(&name);
        if is_new {
            self.persist_labels();
        }
        self.labels.set_last_used(&name);
        self.config.last_label = Some(name.clone());

        let id = self.scene.add(Shape::new(0, geometry).with_label(&name, color));
        log::debug!("registered shape {} with label '{}'", id, name);
        Ok(PointerOutcome::ShapeAdded(id))
    }

    /// Mirror a selection made in the annotation list onto the canvas.
    /// Returns whether the canvas selection changed.
    pub fn select_shape(&mut self, id: Option<ShapeId>) -> bool {
        self.scene.select(id)
    }

    /// Delete a shape by id. When the last shape goes away and nothing is on
    /// disk either, the image's labeled flag is cleared.
    pub fn delete_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.scene.remove(id)?;
        if self.scene.is_empty() {
            if let Some(index) = self.current_index {
                if self.sidecar_line_count() == 0 {
                    self.catalog.set_labeled(index, false);
                }
            }
        }
        Some(removed)
    }

    /// Add a label without drawing, returning its color.
    pub fn add_label(&mut self, name: &str) -> [u8; 3] {
        let is_new = !self.labels.contains(name);
        let color = self.labels.add(name);
        if is_new {
            self.persist_labels();
        }
        color
    }

    /// Recolor a label and propagate the new color to every shape tagged
    /// with it. Returns how many shapes changed.
    pub fn recolor_label(&mut self, name: &str, color: [u8; 3]) -> usize {
        if !self.labels.set_color(name, color) {
            return 0;
        }
        self.persist_labels();
        self.scene.update_color(name, color)
    }

    /// Remove a label and every scene shape tagged with it (their class
    /// index would be dangling otherwise).
    pub fn remove_label(&mut self, name: &str) -> Option<crate::model::Label> {
        let removed = self.labels.remove(name)?;
        let orphans: Vec<ShapeId> = self
            .scene
            .iter()
            .filter(|s| s.label.as_deref() == Some(name))
            .map(|s| s.id)
            .collect();
        for id in &orphans {
            self.scene.remove(*id);
        }
        if !orphans.is_empty() {
            log::info!("removed {} shapes tagged '{}'", orphans.len(), name);
        }
        self.persist_labels();
        Some(removed)
    }

    /// The configured annotation directory, if any.
    pub fn annotation_dir(&self) -> Option<&std::path::Path> {
        self.config.annotation_dir.as_deref()
    }

    /// Choose (and create) the annotation directory, persisting it into the
    /// task configuration. Called after the user confirms creation.
    pub fn set_annotation_dir(&mut self, dir: PathBuf) -> Result<(), CanvasError> {
        std::fs::create_dir_all(&dir).map_err(crate::format::SidecarError::Io)?;
        self.config.annotation_dir = Some(dir);
        self.persist_config();
        self.reload_labels();
        Ok(())
    }

    /// Write the classes file and the current image's annotation file, then
    /// mark the image labeled. Fails with [`CanvasError::NoAnnotationDir`]
    /// until a directory is configured; nothing is written in that case.
    pub fn save(&mut self) -> Result<usize, CanvasError> {
        let Some(dir) = self.config.annotation_dir.clone() else {
            return Err(CanvasError::NoAnnotationDir);
        };
        let image = self.scene.image().ok_or(CanvasError::NoImage)?.clone();

        // The classes file is rewritten on every save; its line order is the
        // class-index mapping the annotation lines refer to.
        sidecar::write_classes(&sidecar::classes_path(&dir), &self.labels)?;
        let count = sidecar::write_annotations(
            &sidecar::annotation_path(&dir, image.stem()),
            self.scene.iter(),
            &self.labels,
            image.width,
            image.height,
        )?;

        if let Some(index) = self.current_index {
            self.catalog.set_labeled(index, true);
        }
        Ok(count)
    }

    /// Open the catalog image at `index`, replacing the scene wholesale.
    /// If the image file is missing the scene is left untouched. A sidecar
    /// that fails to parse degrades to an empty shape set for this image
    /// only.
    pub fn open_image(&mut self, index: usize) -> Result<(), CanvasError> {
        let path = self
            .catalog
            .path(index)
            .ok_or(CanvasError::IndexOutOfRange { index })?;
        if !path.exists() {
            return Err(CanvasError::ImageMissing { path });
        }
        let (width, height) = image::image_dimensions(&path)?;
        let mut scene = Scene::for_image(ImageInfo::new(path, width, height));

        if let Some(dir) = self.config.annotation_dir.as_deref() {
            let ann_path = sidecar::annotation_path(dir, scene.image().map(|i| i.stem()).unwrap_or(""));
            if ann_path.exists() {
                match sidecar::read_annotations(&ann_path, width, height, self.task, &self.labels)
                {
                    Ok(shapes) => {
                        for shape in shapes {
                            scene.add(shape);
                        }
                    }
                    Err(e) => {
                        log::warn!("failed to load {:?}: {}; starting empty", ann_path, e);
                    }
                }
            }
        }

        self.session.cancel();
        self.scene = scene;
        self.current_index = Some(index);
        Ok(())
    }

    /// Navigate to the next image, if any. Callers check
    /// [`Self::has_unsaved_changes`] first and drive the save/confirm prompt.
    pub fn next_image(&mut self) -> Result<Option<usize>, CanvasError> {
        let target = match self.current_index {
            Some(i) if i + 1 < self.catalog.len() => i + 1,
            None if self.catalog.len() > 0 => 0,
            _ => return Ok(None),
        };
        self.open_image(target)?;
        Ok(Some(target))
    }

    /// Navigate to the previous image, if any.
    pub fn prev_image(&mut self) -> Result<Option<usize>, CanvasError> {
        let target = match self.current_index {
            Some(i) if i > 0 => i - 1,
            _ => return Ok(None),
        };
        self.open_image(target)?;
        Ok(Some(target))
    }

    /// Whether the scene differs from what is on disk: the finished-shape
    /// count is compared against the sidecar's line count (0 when absent).
    pub fn has_unsaved_changes(&self) -> bool {
        self.scene.len() != self.sidecar_line_count()
    }

    fn sidecar_line_count(&self) -> usize {
        let (Some(dir), Some(image)) = (self.config.annotation_dir.as_deref(), self.scene.image())
        else {
            return 0;
        };
        sidecar::count_annotation_lines(&sidecar::annotation_path(dir, image.stem()))
    }

    /// Repopulate the label set from the classes sidecar, if present.
    fn reload_labels(&mut self) {
        let Some(dir) = self.config.annotation_dir.as_deref() else {
            return;
        };
        let path = sidecar::classes_path(dir);
        if !path.exists() {
            return;
        }
        match sidecar::read_classes(&path) {
            Ok(names) => {
                self.labels = LabelSet::from_names(&names);
                log::info!("loaded {} labels from {:?}", names.len(), path);
            }
            Err(e) => log::warn!("failed to read {:?}: {}", path, e),
        }
    }

    /// Persist the label set to the classes sidecar. Called after every
    /// label mutation; a write failure is logged but does not fail the
    /// originating edit.
    fn persist_labels(&self) {
        let Some(dir) = self.config.annotation_dir.as_deref() else {
            return;
        };
        if let Err(e) = sidecar::write_classes(&sidecar::classes_path(dir), &self.labels) {
            log::warn!("failed to persist labels: {}", e);
        }
    }

    /// Persist the config when a path is configured; log-and-continue on
    /// failure so an edit never fails because of the config file.
    fn persist_config(&self) {
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            log::warn!("failed to persist config: {}", e);
        }
    }
}

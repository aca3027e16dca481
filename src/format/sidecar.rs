//! Sidecar file read/write.
//!
//! Two plain-text formats live next to the images:
//!
//! - `classes.txt`: one label name per line; a label's line number is its
//!   numeric class index.
//! - `<image stem>.txt`: one shape per line,
//!   `<class_index> <v1> <v2> ...`, values normalized to `[0, 1]` against the
//!   image dimensions (even positions divide by width, odd by height) and
//!   formatted with exactly four decimal places.
//!
//! Files are rewritten wholesale on every save.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::format::error::SidecarError;
use crate::model::{LabelSet, Shape, ShapeGeometry, TaskKind};

/// Path of the classes sidecar within an annotation directory.
pub fn classes_path(dir: &Path) -> PathBuf {
    dir.join("classes.txt")
}

/// Path of the per-image annotation sidecar for an image filename stem.
pub fn annotation_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{}.txt", stem))
}

/// Rewrite the classes file: one label name per line, in class-index order.
pub fn write_classes(path: &Path, labels: &LabelSet) -> Result<(), SidecarError> {
    let mut content = String::new();
    for label in labels.iter() {
        content.push_str(&label.name);
        content.push('\n');
    }
    std::fs::write(path, content)?;
    log::debug!("wrote {} labels to {:?}", labels.len(), path);
    Ok(())
}

/// Read the classes file into an ordered name list. Blank lines are skipped.
pub fn read_classes(path: &Path) -> Result<Vec<String>, SidecarError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Format one annotation line (no trailing newline): class index followed by
/// the pixel-space values normalized against the image dimensions.
pub fn format_line(class_index: usize, values: &[f32], width: u32, height: u32) -> String {
    let mut line = class_index.to_string();
    for (i, v) in values.iter().enumerate() {
        let denom = if i % 2 == 0 { width } else { height } as f32;
        let _ = write!(line, " {:.4}", v / denom);
    }
    line
}

/// Write all shapes to the per-image annotation file, in iteration order.
/// Overwrites the file wholesale. Returns the number of lines written.
pub fn write_annotations<'a>(
    path: &Path,
    shapes: impl IntoIterator<Item = &'a Shape>,
    labels: &LabelSet,
    width: u32,
    height: u32,
) -> Result<usize, SidecarError> {
    if width == 0 || height == 0 {
        return Err(SidecarError::InvalidDimensions { width, height });
    }

    let mut content = String::new();
    let mut count = 0;
    for shape in shapes {
        let label = shape
            .label
            .as_deref()
            .ok_or(SidecarError::MissingLabel { id: shape.id })?;
        let class_index = labels
            .index_of(label)
            .ok_or_else(|| SidecarError::unknown_label(label))?;
        content.push_str(&format_line(class_index, &shape.geometry.data(), width, height));
        content.push('\n');
        count += 1;
    }

    std::fs::write(path, content)?;
    log::info!("saved {} annotations to {:?}", count, path);
    Ok(count)
}

/// Read the per-image annotation file back into shapes.
///
/// The value layout of each row is mapped to a shape variant through the
/// task's model type. Any malformed line fails the whole file with a
/// line-numbered error; callers degrade that image to an empty shape set.
/// Reconstructed shapes are flagged as loaded from file so they never
/// re-prompt for a label.
pub fn read_annotations(
    path: &Path,
    width: u32,
    height: u32,
    task: TaskKind,
    labels: &LabelSet,
) -> Result<Vec<Shape>, SidecarError> {
    if width == 0 || height == 0 {
        return Err(SidecarError::InvalidDimensions { width, height });
    }

    let content = std::fs::read_to_string(path)?;
    let mut shapes = Vec::new();

    for (line_no, raw) in content.lines().enumerate() {
        let line_no = line_no + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(first) = parts.next() else {
            continue;
        };
        let class_index: usize = first
            .parse()
            .map_err(|_| SidecarError::parse(line_no, "invalid class index"))?;

        let mut values = Vec::new();
        for part in parts {
            let norm: f32 = part
                .parse()
                .map_err(|_| SidecarError::parse(line_no, format!("invalid value '{}'", part)))?;
            let denom = if values.len() % 2 == 0 { width } else { height } as f32;
            values.push(norm * denom);
        }

        let kind = task.shape_kind_for_row(values.len()).ok_or_else(|| {
            SidecarError::ShapelessTask {
                task: task.name().to_string(),
            }
        })?;
        let geometry = ShapeGeometry::from_data(kind, &values).ok_or_else(|| {
            SidecarError::parse(
                line_no,
                format!("{} values do not form a {}", values.len(), kind.name()),
            )
        })?;

        let label = labels.name_at(class_index).ok_or_else(|| {
            SidecarError::parse(line_no, format!("class index {} out of range", class_index))
        })?;
        let color = labels.color_of(label).unwrap_or([200, 200, 200]);

        shapes.push(
            Shape::new(0, geometry)
                .with_label(label, color)
                .from_file(),
        );
    }

    log::info!("loaded {} annotations from {:?}", shapes.len(), path);
    Ok(shapes)
}

/// Count the non-empty annotation lines on disk; 0 when the file is missing.
/// Used for unsaved-change detection against the in-memory registry.
pub fn count_annotation_lines(path: &Path) -> usize {
    match std::fs::read_to_string(path) {
        Ok(content) => content.lines().filter(|l| !l.trim().is_empty()).count(),
        Err(_) => 0,
    }
}

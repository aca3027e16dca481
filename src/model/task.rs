//! Task model types and the tool-gating table.

use serde::{Deserialize, Serialize};

use super::shape::ShapeKind;
use crate::canvas::Tool;

/// Model type of the dataset/task being annotated. Each task type legalizes
/// exactly one drawing tool (classification legalizes none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    /// Whole-image classification; no shapes are drawn.
    Classify,
    /// Object detection with axis-aligned boxes.
    #[default]
    Detect,
    /// Instance segmentation with polygons.
    Segment,
    /// Keypoint/pose annotation with points.
    Pose,
    /// Oriented bounding boxes.
    Obb,
    /// Anything else; line annotations.
    Other,
}

impl TaskKind {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::Classify => "Classify",
            TaskKind::Detect => "Detect",
            TaskKind::Segment => "Segment",
            TaskKind::Pose => "Pose",
            TaskKind::Obb => "OBB",
            TaskKind::Other => "Other",
        }
    }

    /// Drawing tools legal for this task type. Select is always available and
    /// is not listed here.
    pub fn allowed_tools(&self) -> &'static [Tool] {
        match self {
            TaskKind::Classify => &[],
            TaskKind::Detect => &[Tool::Rectangle],
            TaskKind::Segment => &[Tool::Polygon],
            TaskKind::Pose => &[Tool::Point],
            TaskKind::Obb => &[Tool::RotatedRectangle],
            TaskKind::Other => &[Tool::Line],
        }
    }

    /// Map a parsed annotation row back to a shape variant. Only one shape
    /// kind is legal per task type; for `Other` the value count disambiguates
    /// circles (3 values) from lines (4 values).
    pub fn shape_kind_for_row(&self, value_count: usize) -> Option<ShapeKind> {
        match self {
            TaskKind::Classify => None,
            TaskKind::Detect => Some(ShapeKind::Rectangle),
            TaskKind::Segment => Some(ShapeKind::Polygon),
            TaskKind::Pose => Some(ShapeKind::Point),
            TaskKind::Obb => Some(ShapeKind::RotatedRectangle),
            TaskKind::Other => {
                if value_count == 3 {
                    Some(ShapeKind::Circle)
                } else {
                    Some(ShapeKind::Line)
                }
            }
        }
    }
}

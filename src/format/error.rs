//! Error types for sidecar file operations.

use thiserror::Error;

/// Errors from reading or writing annotation sidecar files.
#[derive(Error, Debug)]
pub enum SidecarError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line in an annotation file could not be parsed
    #[error("malformed annotation at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Description of what was wrong
        message: String,
    },

    /// A shape references a label missing from the label set
    #[error("unknown label '{label}'")]
    UnknownLabel {
        /// The label that has no class index
        label: String,
    },

    /// A shape has no label assigned yet
    #[error("shape {id} has no label")]
    MissingLabel {
        /// Id of the unlabeled shape
        id: u32,
    },

    /// Image dimensions are required for normalization but are zero
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The task type does not admit shapes (classification)
    #[error("task type '{task}' has no shape representation")]
    ShapelessTask {
        /// Name of the task type
        task: String,
    },
}

impl SidecarError {
    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown-label error.
    pub fn unknown_label(label: impl Into<String>) -> Self {
        Self::UnknownLabel {
            label: label.into(),
        }
    }
}

//! Label set: ordered label names with display colors.
//!
//! Insertion order is significant: a label's position in the set is the
//! numeric class index written to annotation files, so the set is backed by a
//! `Vec` rather than a map.

/// A label category with a display color.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub name: String,
    /// RGB color shared (by value) with every shape tagged with this label.
    pub color: [u8; 3],
}

impl Label {
    pub fn new(name: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// The ordered label -> color mapping for one annotation session.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    labels: Vec<Label>,
    /// Most recently assigned label, used to seed the label prompt.
    last_used: Option<String>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from an ordered list of names (classes file contents).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.add(name.as_ref());
        }
        set
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in stable (class-index) order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Class index of a label (its line number in the classes file).
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|l| l.name == name)
    }

    /// Label name at a class index.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(|l| l.name.as_str())
    }

    pub fn color_of(&self, name: &str) -> Option<[u8; 3]> {
        self.get(name).map(|l| l.color)
    }

    /// Add a label if it is not present, generating a well-spread color from
    /// its position. Returns the label's color either way.
    pub fn add(&mut self, name: &str) -> [u8; 3] {
        if let Some(label) = self.get(name) {
            return label.color;
        }
        let color = generate_color(self.labels.len());
        self.labels.push(Label::new(name, color));
        color
    }

    /// Remove a label by name. Class indices of later labels shift down, so
    /// callers must rewrite annotation files that reference them.
    pub fn remove(&mut self, name: &str) -> Option<Label> {
        let idx = self.index_of(name)?;
        if self.last_used.as_deref() == Some(name) {
            self.last_used = None;
        }
        Some(self.labels.remove(idx))
    }

    /// Change a label's color. Returns false if the label is unknown.
    /// Propagation to existing shapes is the scene's job.
    pub fn set_color(&mut self, name: &str, color: [u8; 3]) -> bool {
        match self.labels.iter_mut().find(|l| l.name == name) {
            Some(label) => {
                label.color = color;
                true
            }
            None => false,
        }
    }

    /// The most-recently-used label, seeding the label prompt.
    pub fn last_used(&self) -> Option<&str> {
        self.last_used.as_deref()
    }

    pub fn set_last_used(&mut self, name: impl Into<String>) {
        self.last_used = Some(name.into());
    }
}

/// Generate a display color for the label at `index` using the golden angle
/// for good hue distribution.
fn generate_color(index: usize) -> [u8; 3] {
    let hue = (index as f32 * 137.5) % 360.0;
    hsv_to_rgb(hue, 0.7, 0.9)
}

/// Convert HSV (h in degrees, s and v in 0-1) to RGB bytes.
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}

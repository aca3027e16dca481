//! Geometry primitives for shape construction and hit-testing.

/// A 2D point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between this point and another.
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle defined by its min and max corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Create a rectangle from two arbitrary corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self {
            min: Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            max: Point::new(p1.x.max(p2.x), p1.y.max(p2.y)),
        }
    }

    /// Smallest rectangle enclosing all the given points.
    /// Returns a zero-size rect at the origin if `points` is empty.
    pub fn enclosing(points: &[Point]) -> Self {
        let mut min = Point::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        if points.is_empty() {
            return Self {
                min: Point::default(),
                max: Point::default(),
            };
        }
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(&self.max)
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn expand(&self, margin: f32) -> Rect {
        Rect {
            min: self.min.offset(-margin, -margin),
            max: self.max.offset(margin, margin),
        }
    }

    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Signed perpendicular distance from `p` to the infinite line through `a`
/// and `b`, using the implicit form `Ax + By + C = 0` with `A = y2 - y1`,
/// `B = x1 - x2`, `C = x2*y1 - x1*y2`.
///
/// The sign tells which side of the line `p` falls on (it matches the sign of
/// the 2D cross product of the `a -> b` vector with the `a -> p` vector).
/// Returns 0.0 for a degenerate line (`a == b`).
pub fn signed_line_distance(p: &Point, a: &Point, b: &Point) -> f32 {
    let la = b.y - a.y;
    let lb = a.x - b.x;
    let lc = b.x * a.y - a.x * b.y;
    let norm = (la * la + lb * lb).sqrt();
    if norm == 0.0 {
        return 0.0;
    }
    (la * p.x + lb * p.y + lc) / norm
}

/// Distance from `p` to the line segment `a`-`b`.
pub fn segment_distance(p: &Point, a: &Point, b: &Point) -> f32 {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    if len_sq == 0.0 {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * abx, a.y + t * aby);
    p.distance_to(&proj)
}

/// 2D cross product of the vectors `a -> b` and `a -> p`.
/// Positive means `p` lies to the left of the `a -> b` direction.
pub fn cross(a: &Point, b: &Point, p: &Point) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Point-in-polygon test over a vertex ring (ray casting).
pub fn polygon_contains(vertices: &[Point], p: &Point) -> bool {
    if vertices.len() < 3 {
        return false;
    }
    let mut inside = false;
    let n = vertices.len();
    let mut j = n - 1;
    for i in 0..n {
        let vi = &vertices[i];
        let vj = &vertices[j];
        if ((vi.y > p.y) != (vj.y > p.y))
            && (p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Shortest distance from `p` to any edge of the vertex ring.
pub fn polygon_edge_distance(vertices: &[Point], p: &Point) -> f32 {
    if vertices.is_empty() {
        return f32::INFINITY;
    }
    if vertices.len() == 1 {
        return p.distance_to(&vertices[0]);
    }
    let mut best = f32::INFINITY;
    for i in 0..vertices.len() {
        let a = &vertices[i];
        let b = &vertices[(i + 1) % vertices.len()];
        best = best.min(segment_distance(p, a, b));
    }
    best
}

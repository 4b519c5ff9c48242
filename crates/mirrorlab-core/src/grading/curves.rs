//! Tone curve model and 256-entry lookup table baking.
//!
//! Each channel (master, red, green, blue) owns an ordered list of control
//! points in normalized `[0, 1]²` space. The response between neighboring
//! points is piecewise linear:
//!
//! ```text
//! t = (x − p0.x) / (p1.x − p0.x)        (t = 0 when p1.x == p0.x)
//! y = p0.y + t × (p1.y − p0.y)
//! lut[i] = clamp(floor(y × 255), 0, 255)   with x = i / 255
//! ```
//!
//! `y` need not be monotonic in `x`; inverted and peaked curves are valid.
//!
//! # Complexity
//! - Bake: O(256 × N) with a linear bracket scan (N is a handful of points)

use serde::{Deserialize, Serialize};

/// Number of entries in a channel lookup table.
pub const LUT_SIZE: usize = 256;

/// One control point of a tone curve. `x` is the input level, `y` the output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point with both coordinates clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, 1.0),
            y: self.y.clamp(0.0, 1.0),
        }
    }
}

/// Selects one of the four curve channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveChannel {
    Master,
    Red,
    Green,
    Blue,
}

impl CurveChannel {
    pub const ALL: [Self; 4] = [Self::Master, Self::Red, Self::Green, Self::Blue];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

/// The default linear curve: five evenly spaced points on the diagonal.
pub const LINEAR_CURVE: [Point; 5] = [
    Point::new(0.0, 0.0),
    Point::new(0.25, 0.25),
    Point::new(0.5, 0.5),
    Point::new(0.75, 0.75),
    Point::new(1.0, 1.0),
];

/// Control points for every channel.
///
/// Values are replaced wholesale; [`CurveState::with_channel`] returns a new
/// state rather than editing in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveState {
    pub master: Vec<Point>,
    pub red: Vec<Point>,
    pub green: Vec<Point>,
    pub blue: Vec<Point>,
}

impl Default for CurveState {
    fn default() -> Self {
        Self {
            master: LINEAR_CURVE.to_vec(),
            red: LINEAR_CURVE.to_vec(),
            green: LINEAR_CURVE.to_vec(),
            blue: LINEAR_CURVE.to_vec(),
        }
    }
}

impl CurveState {
    pub fn channel(&self, channel: CurveChannel) -> &[Point] {
        match channel {
            CurveChannel::Master => &self.master,
            CurveChannel::Red => &self.red,
            CurveChannel::Green => &self.green,
            CurveChannel::Blue => &self.blue,
        }
    }

    /// A copy of this state with `channel` replaced by `points` (sorted by x).
    pub fn with_channel(&self, channel: CurveChannel, mut points: Vec<Point>) -> Self {
        sort_by_x(&mut points);
        let mut next = self.clone();
        match channel {
            CurveChannel::Master => next.master = points,
            CurveChannel::Red => next.red = points,
            CurveChannel::Green => next.green = points,
            CurveChannel::Blue => next.blue = points,
        }
        next
    }

    /// This state with every channel sorted by x.
    pub fn sorted(mut self) -> Self {
        for points in [
            &mut self.master,
            &mut self.red,
            &mut self.green,
            &mut self.blue,
        ] {
            sort_by_x(points);
        }
        self
    }

    /// Bake all four channel tables as `[master, red, green, blue]`.
    pub fn lookup_tables(&self) -> [CurveLut; 4] {
        CurveChannel::ALL.map(|channel| build_lookup_table(self.channel(channel)))
    }
}

/// Precomputed 256-entry response table for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveLut {
    table: [u8; LUT_SIZE],
}

impl CurveLut {
    pub fn identity() -> Self {
        let mut table = [0u8; LUT_SIZE];
        for (i, v) in table.iter_mut().enumerate() {
            *v = i as u8;
        }
        Self { table }
    }

    /// Look up an output level. Input is floored and clamped into `[0, 255]`.
    #[inline]
    pub fn map(&self, level: f32) -> f32 {
        let idx = level.floor().clamp(0.0, 255.0) as usize;
        self.table[idx] as f32
    }

    pub fn as_array(&self) -> &[u8; LUT_SIZE] {
        &self.table
    }

    pub fn is_identity(&self) -> bool {
        self.table.iter().enumerate().all(|(i, &v)| v == i as u8)
    }
}

impl Default for CurveLut {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Index<usize> for CurveLut {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.table[index]
    }
}

/// Bake control points into a 256-entry lookup table.
///
/// Points are sorted by x before use. For each level the first consecutive
/// pair bracketing `x` is interpolated; when no pair brackets it (left of the
/// first point, right of the last, or a single point) the first and last
/// points are used, with `t = 0` whenever they share an x.
///
/// An empty curve has nothing to interpolate and bakes to identity.
pub fn build_lookup_table(points: &[Point]) -> CurveLut {
    if points.is_empty() {
        return CurveLut::identity();
    }

    let mut sorted = points.to_vec();
    sort_by_x(&mut sorted);

    let first = sorted[0];
    let last = sorted[sorted.len() - 1];

    let mut table = [0u8; LUT_SIZE];
    for (i, entry) in table.iter_mut().enumerate() {
        let x = i as f64 / 255.0;

        let (p0, p1) = sorted
            .windows(2)
            .find(|pair| x >= pair[0].x as f64 && x <= pair[1].x as f64)
            .map(|pair| (pair[0], pair[1]))
            .unwrap_or((first, last));

        let range = p1.x as f64 - p0.x as f64;
        let t = if range == 0.0 {
            0.0
        } else {
            (x - p0.x as f64) / range
        };
        let y = p0.y as f64 + t * (p1.y as f64 - p0.y as f64);

        *entry = (y * 255.0).floor().clamp(0.0, 255.0) as u8;
    }

    CurveLut { table }
}

/// Stable ascending sort by x.
pub(crate) fn sort_by_x(points: &mut [Point]) {
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
}

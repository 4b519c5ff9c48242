//! Interactive control-point editing for tone curves.
//!
//! Every operation takes the current points by reference and returns a new,
//! x-sorted sequence together with the index of the point the user is now
//! working on. Sorting can relocate the edited point, so the returned index is
//! always derived after the sort, never assumed from insertion order.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::grading::curves::{CurveChannel, LINEAR_CURVE, Point};

/// Max per-axis distance (normalized units) for a click to hit an existing point.
pub const SELECT_THRESHOLD: f32 = 0.05;

/// Result of a point edit: the new sorted points and the selected index.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveEdit {
    pub points: Vec<Point>,
    pub selected: usize,
}

/// Which coordinate of a point a numeric entry targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Input level.
    X,
    /// Output level.
    Y,
}

/// Select the point under `click`, or insert a new one there.
///
/// A point is hit when both `|dx|` and `|dy|` are below [`SELECT_THRESHOLD`];
/// the first hit in sequence order wins and the points are returned unchanged.
/// Otherwise `click` (clamped into `[0, 1]²`) is appended and the sequence is
/// re-sorted.
pub fn insert_or_select(points: &[Point], click: Point) -> CurveEdit {
    let click = click.clamped();

    let hit = points.iter().position(|p| {
        (p.x - click.x).abs() < SELECT_THRESHOLD && (p.y - click.y).abs() < SELECT_THRESHOLD
    });
    if let Some(selected) = hit {
        return CurveEdit {
            points: points.to_vec(),
            selected,
        };
    }

    let mut next = points.to_vec();
    next.push(click);
    sort_tracking(next, points.len())
}

/// Move the point at `index` to `coord` (clamped into `[0, 1]²`).
///
/// Endpoints are not pinned: any point may travel anywhere, including past
/// its neighbors. The returned selection follows the moved point.
pub fn move_point(points: &[Point], index: usize, coord: Point) -> Result<CurveEdit> {
    check_index(points, index)?;
    let mut next = points.to_vec();
    next[index] = coord.clamped();
    Ok(sort_tracking(next, index))
}

/// Set one axis of the point at `index` from a byte-scale value in `[0, 255]`.
///
/// The value is normalized by 255 and clamped into `[0, 1]`.
pub fn set_point_axis(points: &[Point], index: usize, axis: Axis, value: f32) -> Result<CurveEdit> {
    if !value.is_finite() {
        return Err(CoreError::NonFinite("curve point value"));
    }
    check_index(points, index)?;

    let normalized = (value / 255.0).clamp(0.0, 1.0);
    let mut next = points.to_vec();
    match axis {
        Axis::X => next[index].x = normalized,
        Axis::Y => next[index].y = normalized,
    }
    Ok(sort_tracking(next, index))
}

/// Default points for `channel`. All channels share the 5-point diagonal.
pub fn reset(_channel: CurveChannel) -> Vec<Point> {
    LINEAR_CURVE.to_vec()
}

fn check_index(points: &[Point], index: usize) -> Result<()> {
    if index >= points.len() {
        return Err(CoreError::PointIndex {
            index,
            len: points.len(),
        });
    }
    Ok(())
}

/// Stable-sort `points` by x and report where the element originally at
/// `tracked` ended up.
fn sort_tracking(points: Vec<Point>, tracked: usize) -> CurveEdit {
    let mut tagged: Vec<(usize, Point)> = points.into_iter().enumerate().collect();
    tagged.sort_by(|a, b| a.1.x.total_cmp(&b.1.x));

    let selected = tagged
        .iter()
        .position(|(orig, _)| *orig == tracked)
        .unwrap_or(0);
    let points = tagged.into_iter().map(|(_, p)| p).collect();

    CurveEdit { points, selected }
}

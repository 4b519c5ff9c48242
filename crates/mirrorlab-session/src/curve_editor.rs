//! Interactive tone-curve editing state.
//!
//! The editor owns only UI state (active channel, selection, drag). Points
//! live in the store; each gesture reads the current [`CurveState`] and, when
//! the points change, yields an [`AdjustmentEdit::Curve`] to dispatch.

use mirrorlab_core::grading::curve_edit::{self, Axis, CurveEdit};
use mirrorlab_core::{AdjustmentEdit, CurveChannel, CurveState, Point};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneCurveEditor {
    channel: CurveChannel,
    selected: Option<usize>,
    dragging: bool,
}

impl Default for ToneCurveEditor {
    fn default() -> Self {
        Self {
            channel: CurveChannel::Master,
            selected: None,
            dragging: false,
        }
    }
}

impl ToneCurveEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel(&self) -> CurveChannel {
        self.channel
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The selected point of the active channel, if any.
    pub fn selected_point(&self, curves: &CurveState) -> Option<Point> {
        self.selected
            .and_then(|i| curves.channel(self.channel).get(i).copied())
    }

    /// Switch channels. Selection never carries across channels.
    pub fn select_channel(&mut self, channel: CurveChannel) {
        self.channel = channel;
        self.selected = None;
        self.dragging = false;
    }

    /// Pointer down at `click` (normalized, y up): select a nearby point or
    /// insert one, and start dragging it.
    pub fn press(&mut self, curves: &CurveState, click: Point) -> Option<AdjustmentEdit> {
        let points = curves.channel(self.channel);
        let edit = curve_edit::insert_or_select(points, click);
        let changed = edit.points.len() != points.len();
        self.dragging = true;
        self.finish(edit, changed)
    }

    /// Pointer moved while held. Without an active drag this does nothing.
    pub fn drag(&mut self, curves: &CurveState, coord: Point) -> Result<Option<AdjustmentEdit>> {
        let Some(index) = self.selected.filter(|_| self.dragging) else {
            return Ok(None);
        };
        let points = curves.channel(self.channel);
        let edit = curve_edit::move_point(points, index, coord)?;
        let changed = edit.points != points;
        Ok(self.finish(edit, changed))
    }

    /// Pointer up. The selection stays for numeric entry.
    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Numeric entry on the selected point, `value` in `[0, 255]`.
    pub fn set_axis(
        &mut self,
        curves: &CurveState,
        axis: Axis,
        value: f32,
    ) -> Result<Option<AdjustmentEdit>> {
        let Some(index) = self.selected else {
            return Ok(None);
        };
        let points = curves.channel(self.channel);
        let edit = curve_edit::set_point_axis(points, index, axis, value)?;
        let changed = edit.points != points;
        Ok(self.finish(edit, changed))
    }

    /// Restore the active channel to the default diagonal.
    pub fn reset_channel(&mut self) -> AdjustmentEdit {
        self.selected = None;
        self.dragging = false;
        AdjustmentEdit::Curve {
            channel: self.channel,
            points: curve_edit::reset(self.channel),
        }
    }

    fn finish(&mut self, edit: CurveEdit, changed: bool) -> Option<AdjustmentEdit> {
        self.selected = Some(edit.selected);
        changed.then(|| AdjustmentEdit::Curve {
            channel: self.channel,
            points: edit.points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(curves: &CurveState, edit: Option<AdjustmentEdit>) -> CurveState {
        match edit {
            Some(AdjustmentEdit::Curve { channel, points }) => curves.with_channel(channel, points),
            Some(other) => panic!("unexpected edit {other:?}"),
            None => curves.clone(),
        }
    }

    #[test]
    fn test_press_on_existing_point_selects_without_edit() {
        let curves = CurveState::default();
        let mut editor = ToneCurveEditor::new();
        let edit = editor.press(&curves, Point::new(0.52, 0.48));
        assert!(edit.is_none());
        assert_eq!(editor.selected(), Some(2));
        assert!(editor.is_dragging());
    }

    #[test]
    fn test_press_drag_release() {
        let mut curves = CurveState::default();
        let mut editor = ToneCurveEditor::new();
        editor.select_channel(CurveChannel::Red);

        curves = apply(&curves, editor.press(&curves, Point::new(0.1, 0.3)));
        assert_eq!(curves.red.len(), 6);
        assert_eq!(editor.selected(), Some(1));

        // Dragging past the 0.25 point re-sorts and the selection follows.
        curves = apply(&curves, editor.drag(&curves, Point::new(0.4, 0.6)).unwrap());
        assert_eq!(editor.selected(), Some(2));
        assert_eq!(editor.selected_point(&curves), Some(Point::new(0.4, 0.6)));

        editor.release();
        assert!(editor.drag(&curves, Point::new(0.9, 0.9)).unwrap().is_none());
        assert_eq!(curves.master, CurveState::default().master);
    }

    #[test]
    fn test_channel_switch_clears_selection() {
        let curves = CurveState::default();
        let mut editor = ToneCurveEditor::new();
        editor.press(&curves, Point::new(0.0, 0.0));
        editor.select_channel(CurveChannel::Blue);
        assert_eq!(editor.selected(), None);
        assert!(!editor.is_dragging());
    }

    #[test]
    fn test_numeric_entry_requires_selection() {
        let curves = CurveState::default();
        let mut editor = ToneCurveEditor::new();
        assert!(editor.set_axis(&curves, Axis::Y, 200.0).unwrap().is_none());

        editor.press(&curves, Point::new(0.75, 0.75));
        editor.release();
        let next = apply(&curves, editor.set_axis(&curves, Axis::Y, 255.0).unwrap());
        assert_eq!(next.master[3], Point::new(0.75, 1.0));
    }

    #[test]
    fn test_reset_channel() {
        let mut editor = ToneCurveEditor::new();
        editor.select_channel(CurveChannel::Green);
        let AdjustmentEdit::Curve { channel, points } = editor.reset_channel() else {
            panic!("reset must produce a curve edit");
        };
        assert_eq!(channel, CurveChannel::Green);
        assert_eq!(points, CurveState::default().green);
    }
}

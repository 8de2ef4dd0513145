//! Drag-session snapshot and pointer-offset conversion.
//!
//! A drag gesture is resolved against the state captured when it started:
//! the group's pixel extent, the layout, and the cursor position along the
//! layout axis. Working from the captured extent keeps the pixel→percentage
//! conversion stable if the group is resized mid-drag by an unrelated cause;
//! such a resize is handled by a re-normalization pass on the group, not by
//! the offset calculation.

use serde::{Deserialize, Serialize};

use crate::group::HandleId;

/// Layout axis of a panel group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// Cursor position reduced from an input event by the embedding layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CursorPosition {
    pub x: f64,
    pub y: f64,
}

impl CursorPosition {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component along the group's layout axis.
    #[must_use]
    pub fn along(self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Snapshot owned by the active drag session.
///
/// Created on drag start, read-only for the gesture's lifetime, dropped on
/// drag end or cancel. At most one exists per group at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Registered handle that owns this gesture.
    pub handle: HandleId,
    /// Index of the panel before the dragged handle.
    pub handle_index: usize,
    /// Group pixel extent along the axis, captured at drag start.
    pub group_size_pixels: f64,
    /// Layout at drag start; cancel restores this verbatim.
    pub initial_layout: Vec<f64>,
    /// Cursor position along the axis at drag start.
    pub initial_cursor: f64,
}

/// Convert a cursor position along the axis into a percentage-of-group
/// delta relative to where the drag started.
///
/// A non-positive captured extent yields zero offset: without a real extent
/// there is no meaningful pixel→percentage conversion.
#[must_use]
pub fn drag_offset_percentage(cursor: f64, drag: &DragState) -> f64 {
    if drag.group_size_pixels <= 0.0 {
        return 0.0;
    }
    (cursor - drag.initial_cursor) / drag.group_size_pixels * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag_state(group_size_pixels: f64, initial_cursor: f64) -> DragState {
        DragState {
            handle: HandleId::for_tests(1),
            handle_index: 0,
            group_size_pixels,
            initial_layout: vec![50.0, 50.0],
            initial_cursor,
        }
    }

    #[test]
    fn offset_scales_by_captured_extent() {
        let drag = drag_state(1000.0, 200.0);
        assert_eq!(drag_offset_percentage(250.0, &drag), 5.0);
        assert_eq!(drag_offset_percentage(100.0, &drag), -10.0);
    }

    #[test]
    fn zero_extent_yields_zero_offset() {
        let drag = drag_state(0.0, 200.0);
        assert_eq!(drag_offset_percentage(500.0, &drag), 0.0);
    }

    #[test]
    fn cursor_component_follows_axis() {
        let cursor = CursorPosition::new(120.0, 40.0);
        assert_eq!(cursor.along(Axis::Horizontal), 120.0);
        assert_eq!(cursor.along(Axis::Vertical), 40.0);
    }
}

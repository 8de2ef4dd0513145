//! Scripted drag gestures against a [`PanelGroup`].
//!
//! A [`DragScript`] replays a fixed pointer sequence (down, moves, then up
//! or cancel) through the group's drag lifecycle, checking the layout
//! invariants after every step. Positions are scalars along the group's
//! layout axis; the script places them on the right event coordinate for
//! the group's orientation.

use sash_layout::{Axis, CursorPosition, HandleId, LayoutError, PanelGroup};

use crate::invariants::check_layout_invariants;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Down(f64),
    Move(f64),
    Up,
    Cancel,
}

/// A recorded drag gesture for one handle.
#[derive(Debug, Clone)]
pub struct DragScript {
    handle: HandleId,
    steps: Vec<Step>,
}

impl DragScript {
    #[must_use]
    pub fn new(handle: HandleId) -> Self {
        Self {
            handle,
            steps: Vec::new(),
        }
    }

    /// Press at `position` along the axis.
    #[must_use]
    pub fn down(mut self, position: f64) -> Self {
        self.steps.push(Step::Down(position));
        self
    }

    /// Move the pointer to `position` along the axis.
    #[must_use]
    pub fn move_to(mut self, position: f64) -> Self {
        self.steps.push(Step::Move(position));
        self
    }

    /// Release, keeping the final layout.
    #[must_use]
    pub fn up(mut self) -> Self {
        self.steps.push(Step::Up);
        self
    }

    /// Abort, restoring the layout from before the gesture.
    #[must_use]
    pub fn cancel(mut self) -> Self {
        self.steps.push(Step::Cancel);
        self
    }

    /// Replay the script, asserting layout invariants after every step.
    pub fn run(&self, group: &mut PanelGroup) -> Result<(), LayoutError> {
        let axis = group.axis();
        for &step in &self.steps {
            match step {
                Step::Down(position) => {
                    group.start_drag(self.handle, cursor_at(position, axis))?;
                }
                Step::Move(position) => {
                    group.update_drag(self.handle, cursor_at(position, axis))?;
                }
                Step::Up => group.end_drag()?,
                Step::Cancel => {
                    group.cancel_drag()?;
                }
            }
            check_layout_invariants(group);
        }
        Ok(())
    }
}

fn cursor_at(position: f64, axis: Axis) -> CursorPosition {
    match axis {
        Axis::Horizontal => CursorPosition::new(position, 0.0),
        Axis::Vertical => CursorPosition::new(0.0, position),
    }
}

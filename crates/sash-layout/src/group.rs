//! Panel group ownership: layout, drag session, and handle registry.
//!
//! [`PanelGroup`] is the stateful boundary around the pure algorithms in
//! [`resize`](crate::resize): it owns the authoritative layout, at most one
//! [`DragState`], the registry of drag handles, and the collapse tracker.
//! Handles are registered and unregistered explicitly and addressed by a
//! stable [`HandleId`]; nothing outside the group holds a mutable alias into
//! its state.
//!
//! # Invariants
//!
//! 1. The layout always has one entry per panel and sums to 100 within
//!    tolerance (reconciliation runs at mount and on every extent change).
//! 2. At most one drag is active; a second `start_drag` is rejected, and
//!    programmatic resizes are rejected while a gesture owns the layout.
//! 3. `cancel_drag` restores the layout captured at drag start verbatim.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::collapse::{CollapseTracker, CollapseTransition};
use crate::constraint::{PanelConstraints, PercentageConstraints, clamp_size};
use crate::drag::{Axis, CursorPosition, DragState, drag_offset_percentage};
use crate::error::LayoutError;
use crate::resize::{adjust_layout_by_delta, default_layout, reconcile_layout};

/// Stable identifier for a registered drag handle. `0` is reserved, so ids
/// are always non-zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HandleId(u64);

impl HandleId {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[cfg(test)]
    pub(crate) const fn for_tests(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Percentage and pixel size for one panel, for the rendering layer and any
/// persistence collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixedSizes {
    pub size_percentage: f64,
    pub size_pixels: f64,
}

/// One resizable group of adjacent panels along a single axis.
#[derive(Debug, Clone)]
pub struct PanelGroup {
    axis: Axis,
    group_size_pixels: f64,
    panels: Vec<PanelConstraints>,
    normalized: Vec<PercentageConstraints>,
    layout: Vec<f64>,
    drag: Option<DragState>,
    tracker: CollapseTracker,
    /// Handle id → index of the panel before the handle.
    handles: FxHashMap<HandleId, usize>,
    next_handle: u64,
}

impl PanelGroup {
    /// Create a group. Panels take their default sizes; the remainder is
    /// split equally and reconciled against constraints so the layout sums
    /// to 100.
    ///
    /// # Panics
    ///
    /// Panics on an empty panel list.
    pub fn new(
        axis: Axis,
        panels: Vec<PanelConstraints>,
        group_size_pixels: f64,
    ) -> Result<Self, LayoutError> {
        assert!(!panels.is_empty(), "a panel group needs at least one panel");
        let normalized = normalize_all(&panels, group_size_pixels)?;
        let layout = default_layout(&normalized);
        let mut tracker = CollapseTracker::new(panels.len());
        // Seed collapse states for panels that mount on their collapsed size.
        tracker.observe(&layout, &layout, &normalized);
        Ok(Self {
            axis,
            group_size_pixels,
            panels,
            normalized,
            layout,
            drag: None,
            tracker,
            handles: FxHashMap::default(),
            next_handle: 0,
        })
    }

    // =====================================================================
    // Accessors
    // =====================================================================

    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn group_size_pixels(&self) -> f64 {
        self.group_size_pixels
    }

    /// Current layout, in percentages summing to 100.
    #[must_use]
    pub fn layout(&self) -> &[f64] {
        &self.layout
    }

    /// Resolved percentage-space constraints, one per panel.
    #[must_use]
    pub fn normalized_constraints(&self) -> &[PercentageConstraints] {
        &self.normalized
    }

    /// Current size of one panel, in percent.
    ///
    /// # Panics
    ///
    /// Panics when `panel` is out of range.
    #[must_use]
    pub fn panel_size(&self, panel: usize) -> f64 {
        self.assert_panel(panel);
        self.layout[panel]
    }

    #[must_use]
    pub fn is_panel_collapsed(&self, panel: usize) -> bool {
        self.assert_panel(panel);
        self.tracker.is_collapsed(panel)
    }

    #[must_use]
    pub fn is_panel_expanded(&self, panel: usize) -> bool {
        !self.is_panel_collapsed(panel)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Layout snapshot in both unit systems, for rendering and persistence.
    #[must_use]
    pub fn layout_snapshot(&self) -> Vec<MixedSizes> {
        self.layout
            .iter()
            .map(|&size_percentage| MixedSizes {
                size_percentage,
                size_pixels: size_percentage / 100.0 * self.group_size_pixels,
            })
            .collect()
    }

    // =====================================================================
    // Handle registry
    // =====================================================================

    /// Register the drag handle sitting between `panel_index` and
    /// `panel_index + 1`. The returned id is the capability for all drag
    /// calls; unregister it when the handle unmounts.
    ///
    /// # Panics
    ///
    /// Panics when `panel_index` does not address a handle position.
    pub fn register_handle(&mut self, panel_index: usize) -> HandleId {
        assert!(
            panel_index + 1 < self.panels.len(),
            "handle position {panel_index} out of range for {} panels",
            self.panels.len()
        );
        self.next_handle += 1;
        let id = HandleId(self.next_handle);
        self.handles.insert(id, panel_index);
        id
    }

    /// Remove a handle from the registry. An active drag owned by the
    /// handle is discarded with it (the current layout stays).
    pub fn unregister_handle(&mut self, id: HandleId) -> Result<(), LayoutError> {
        if self.handles.remove(&id).is_none() {
            return Err(LayoutError::UnknownHandle(id));
        }
        if let Some(drag) = &self.drag
            && drag.handle == id
        {
            self.drag = None;
        }
        Ok(())
    }

    fn handle_index(&self, id: HandleId) -> Result<usize, LayoutError> {
        self.handles
            .get(&id)
            .copied()
            .ok_or(LayoutError::UnknownHandle(id))
    }

    // =====================================================================
    // Drag lifecycle
    // =====================================================================

    /// Begin a drag on `id`, capturing the group extent, layout, and cursor
    /// position as the gesture's fixed reference frame. Fails while another
    /// drag owns the group.
    pub fn start_drag(&mut self, id: HandleId, cursor: CursorPosition) -> Result<(), LayoutError> {
        let handle_index = self.handle_index(id)?;
        if self.drag.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        self.drag = Some(DragState {
            handle: id,
            handle_index,
            group_size_pixels: self.group_size_pixels,
            initial_layout: self.layout.clone(),
            initial_cursor: cursor.along(self.axis),
        });
        Ok(())
    }

    /// Apply pointer movement for the active drag. The new layout is always
    /// computed from the snapshot captured at drag start, never from the
    /// previous intermediate layout, so repeated small movements cannot
    /// accumulate drift.
    pub fn update_drag(
        &mut self,
        id: HandleId,
        cursor: CursorPosition,
    ) -> Result<Vec<CollapseTransition>, LayoutError> {
        let drag = self.drag.as_ref().ok_or(LayoutError::NoActiveDrag)?;
        if drag.handle != id {
            return Err(LayoutError::HandleNotDragging(id));
        }
        let delta = drag_offset_percentage(cursor.along(self.axis), drag);
        let next = adjust_layout_by_delta(
            &drag.initial_layout,
            &self.normalized,
            drag.handle_index,
            delta,
        );
        Ok(self.commit(next))
    }

    /// Finish the active drag, keeping the current layout.
    pub fn end_drag(&mut self) -> Result<(), LayoutError> {
        self.drag.take().map(|_| ()).ok_or(LayoutError::NoActiveDrag)
    }

    /// Abort the active drag and restore the layout captured at its start.
    pub fn cancel_drag(&mut self) -> Result<Vec<CollapseTransition>, LayoutError> {
        let drag = self.drag.take().ok_or(LayoutError::NoActiveDrag)?;
        Ok(self.commit(drag.initial_layout))
    }

    // =====================================================================
    // Programmatic layout
    // =====================================================================

    /// Nudge a handle by a percentage delta (keyboard-style resize).
    pub fn resize_by(
        &mut self,
        id: HandleId,
        delta: f64,
    ) -> Result<Vec<CollapseTransition>, LayoutError> {
        let handle_index = self.handle_index(id)?;
        self.reject_during_drag()?;
        let next = adjust_layout_by_delta(&self.layout, &self.normalized, handle_index, delta);
        Ok(self.commit(next))
    }

    /// Replace the layout wholesale. Entries are percentages; they are
    /// clamped and reconciled against constraints before being accepted.
    pub fn set_layout(&mut self, layout: Vec<f64>) -> Result<Vec<CollapseTransition>, LayoutError> {
        if layout.len() != self.panels.len() {
            return Err(LayoutError::LayoutLengthMismatch {
                expected: self.panels.len(),
                actual: layout.len(),
            });
        }
        self.reject_during_drag()?;
        let next = reconcile_layout(&layout, &self.normalized);
        Ok(self.commit(next))
    }

    /// Resize one panel toward `size` percent, cascading the difference
    /// through its nearest handle.
    ///
    /// # Panics
    ///
    /// Panics when `panel` is out of range.
    pub fn resize_panel_to(
        &mut self,
        panel: usize,
        size: f64,
    ) -> Result<Vec<CollapseTransition>, LayoutError> {
        self.assert_panel(panel);
        self.reject_during_drag()?;
        if self.panels.len() == 1 {
            // A lone panel always fills the group.
            return Ok(Vec::new());
        }
        let target = clamp_size(size, &self.normalized[panel]);
        let delta = target - self.layout[panel];
        // The handle after the panel moves by +delta; the last panel only
        // has a handle before it, which moves by -delta.
        let next = if panel + 1 < self.panels.len() {
            adjust_layout_by_delta(&self.layout, &self.normalized, panel, delta)
        } else {
            adjust_layout_by_delta(&self.layout, &self.normalized, panel - 1, -delta)
        };
        Ok(self.commit(next))
    }

    /// Collapse a collapsible panel to its collapsed size. A panel that is
    /// not collapsible, or is already collapsed, is left alone.
    pub fn collapse_panel(&mut self, panel: usize) -> Result<Vec<CollapseTransition>, LayoutError> {
        self.assert_panel(panel);
        let constraints = self.normalized[panel];
        if !constraints.collapsible || self.tracker.is_collapsed(panel) {
            return Ok(Vec::new());
        }
        self.resize_panel_to(panel, constraints.collapsed_size)
    }

    /// Expand a collapsed panel, restoring its remembered pre-collapse size
    /// (else its default size, else an equal share), clamped to its bounds.
    pub fn expand_panel(&mut self, panel: usize) -> Result<Vec<CollapseTransition>, LayoutError> {
        self.assert_panel(panel);
        if !self.tracker.is_collapsed(panel) {
            return Ok(Vec::new());
        }
        let constraints = self.normalized[panel];
        let mut target = self
            .tracker
            .expand_target(panel, &constraints, self.panels.len());
        // A remembered size below the current minimum must expand to the
        // minimum, not snap straight back to collapsed.
        if let Some(min) = constraints.min_size {
            target = target.max(min);
        }
        if let Some(max) = constraints.max_size {
            target = target.min(max);
        }
        self.resize_panel_to(panel, target)
    }

    // =====================================================================
    // External geometry
    // =====================================================================

    /// Update the group's pixel extent, re-normalizing pixel constraints
    /// and reconciling the layout against the new bounds.
    ///
    /// Allowed mid-drag: the active gesture keeps converting offsets with
    /// the extent captured at drag start, but its cascades see the updated
    /// constraints.
    pub fn set_group_size_pixels(
        &mut self,
        extent_pixels: f64,
    ) -> Result<Vec<CollapseTransition>, LayoutError> {
        self.group_size_pixels = extent_pixels;
        self.normalized = normalize_all(&self.panels, extent_pixels)?;
        let next = reconcile_layout(&self.layout, &self.normalized);
        Ok(self.commit(next))
    }

    // =====================================================================
    // Internals
    // =====================================================================

    fn commit(&mut self, next: Vec<f64>) -> Vec<CollapseTransition> {
        let previous = std::mem::replace(&mut self.layout, next);
        self.tracker
            .observe(&previous, &self.layout, &self.normalized)
    }

    fn reject_during_drag(&self) -> Result<(), LayoutError> {
        if self.drag.is_some() {
            return Err(LayoutError::DragInProgress);
        }
        Ok(())
    }

    fn assert_panel(&self, panel: usize) {
        assert!(
            panel < self.panels.len(),
            "panel {panel} out of range for {} panels",
            self.panels.len()
        );
    }
}

fn normalize_all(
    panels: &[PanelConstraints],
    extent_pixels: f64,
) -> Result<Vec<PercentageConstraints>, LayoutError> {
    panels
        .iter()
        .enumerate()
        .map(|(panel, constraints)| constraints.normalize(panel, extent_pixels))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_panel_group() -> (PanelGroup, HandleId) {
        let mut group = PanelGroup::new(
            Axis::Horizontal,
            vec![PanelConstraints::default(), PanelConstraints::default()],
            1000.0,
        )
        .unwrap();
        let handle = group.register_handle(0);
        (group, handle)
    }

    #[test]
    fn mounts_with_equal_split() {
        let (group, _) = two_panel_group();
        assert_eq!(group.layout(), &[50.0, 50.0]);
    }

    #[test]
    fn mounts_with_defaults() {
        let group = PanelGroup::new(
            Axis::Horizontal,
            vec![
                PanelConstraints::default().with_default_percentage(70.0),
                PanelConstraints::default(),
            ],
            1000.0,
        )
        .unwrap();
        assert_eq!(group.layout(), &[70.0, 30.0]);
    }

    #[test]
    fn drag_moves_the_boundary() {
        let (mut group, handle) = two_panel_group();
        group
            .start_drag(handle, CursorPosition::new(500.0, 0.0))
            .unwrap();
        group
            .update_drag(handle, CursorPosition::new(600.0, 0.0))
            .unwrap();
        assert_eq!(group.layout(), &[60.0, 40.0]);
        group.end_drag().unwrap();
        assert!(!group.is_dragging());
    }

    #[test]
    fn concurrent_drag_is_rejected() {
        let (mut group, handle) = two_panel_group();
        group
            .start_drag(handle, CursorPosition::new(500.0, 0.0))
            .unwrap();
        assert_eq!(
            group.start_drag(handle, CursorPosition::new(500.0, 0.0)),
            Err(LayoutError::DragInProgress)
        );
    }

    #[test]
    fn cancel_restores_initial_layout_exactly() {
        let (mut group, handle) = two_panel_group();
        let before = group.layout().to_vec();
        group
            .start_drag(handle, CursorPosition::new(500.0, 0.0))
            .unwrap();
        group
            .update_drag(handle, CursorPosition::new(731.0, 0.0))
            .unwrap();
        assert_ne!(group.layout(), before.as_slice());
        group.cancel_drag().unwrap();
        assert_eq!(group.layout(), before.as_slice());
        assert!(!group.is_dragging());
    }

    #[test]
    fn update_without_drag_fails() {
        let (mut group, handle) = two_panel_group();
        assert_eq!(
            group.update_drag(handle, CursorPosition::new(0.0, 0.0)),
            Err(LayoutError::NoActiveDrag)
        );
    }

    #[test]
    fn wrong_handle_cannot_steer_a_drag() {
        let mut group = PanelGroup::new(
            Axis::Horizontal,
            vec![PanelConstraints::default(); 3],
            900.0,
        )
        .unwrap();
        let first = group.register_handle(0);
        let second = group.register_handle(1);
        group
            .start_drag(first, CursorPosition::new(300.0, 0.0))
            .unwrap();
        assert_eq!(
            group.update_drag(second, CursorPosition::new(400.0, 0.0)),
            Err(LayoutError::HandleNotDragging(second))
        );
    }

    #[test]
    fn unregister_drops_owned_drag() {
        let (mut group, handle) = two_panel_group();
        group
            .start_drag(handle, CursorPosition::new(500.0, 0.0))
            .unwrap();
        group.unregister_handle(handle).unwrap();
        assert!(!group.is_dragging());
        assert_eq!(
            group.unregister_handle(handle),
            Err(LayoutError::UnknownHandle(handle))
        );
    }

    #[test]
    fn vertical_axis_reads_y() {
        let mut group = PanelGroup::new(
            Axis::Vertical,
            vec![PanelConstraints::default(), PanelConstraints::default()],
            800.0,
        )
        .unwrap();
        let handle = group.register_handle(0);
        group
            .start_drag(handle, CursorPosition::new(0.0, 400.0))
            .unwrap();
        group
            .update_drag(handle, CursorPosition::new(999.0, 480.0))
            .unwrap();
        assert_eq!(group.layout(), &[60.0, 40.0]);
    }

    #[test]
    fn set_layout_reconciles_and_validates_length() {
        let (mut group, _) = two_panel_group();
        assert_eq!(
            group.set_layout(vec![10.0]),
            Err(LayoutError::LayoutLengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        group.set_layout(vec![30.0, 30.0]).unwrap();
        let total: f64 = group.layout().iter().sum();
        assert!((total - 100.0).abs() < crate::fuzzy::SIZE_EPSILON);
    }

    #[test]
    fn snapshot_reports_both_units() {
        let (group, _) = two_panel_group();
        let snapshot = group.layout_snapshot();
        assert_eq!(snapshot[0].size_percentage, 50.0);
        assert_eq!(snapshot[0].size_pixels, 500.0);
    }

    #[test]
    fn collapse_and_expand_round_trip() {
        let mut group = PanelGroup::new(
            Axis::Horizontal,
            vec![
                PanelConstraints::default(),
                PanelConstraints::default()
                    .collapsible()
                    .with_collapsed_percentage(0.0)
                    .with_min_percentage(20.0)
                    .with_default_percentage(30.0),
            ],
            1000.0,
        )
        .unwrap();
        assert_eq!(group.layout(), &[70.0, 30.0]);

        let transitions = group.collapse_panel(1).unwrap();
        assert_eq!(transitions.len(), 1);
        assert!(group.is_panel_collapsed(1));
        assert_eq!(group.layout(), &[100.0, 0.0]);

        let transitions = group.expand_panel(1).unwrap();
        assert_eq!(transitions.len(), 1);
        assert!(group.is_panel_expanded(1));
        assert_eq!(group.layout(), &[70.0, 30.0]);
    }

    #[test]
    fn group_resize_renormalizes_pixel_constraints() {
        let mut group = PanelGroup::new(
            Axis::Horizontal,
            vec![
                PanelConstraints::default(),
                PanelConstraints::default().with_min_pixels(200.0),
            ],
            1000.0,
        )
        .unwrap();
        group.set_layout(vec![80.0, 20.0]).unwrap();

        // Halving the group doubles the panel's percentage minimum; the
        // layout is pushed back into bounds.
        group.set_group_size_pixels(500.0).unwrap();
        assert_eq!(group.layout(), &[60.0, 40.0]);
    }

    #[test]
    fn resize_by_nudges_like_a_key_press() {
        let (mut group, handle) = two_panel_group();
        group.resize_by(handle, 5.0).unwrap();
        assert_eq!(group.layout(), &[55.0, 45.0]);
    }

    #[test]
    fn invalid_constraints_surface_at_mount() {
        let result = PanelGroup::new(
            Axis::Horizontal,
            vec![
                PanelConstraints::default()
                    .with_min_percentage(60.0)
                    .with_max_percentage(40.0),
            ],
            1000.0,
        );
        assert!(matches!(result, Err(LayoutError::MinAboveMax { .. })));
    }
}

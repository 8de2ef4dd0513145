//! Collapse/expand state tracking per panel.
//!
//! The resize cascade snaps a collapsible panel to its collapsed size when a
//! drag pushes it below its minimum; this module observes those snaps,
//! remembers the size a panel had right before collapsing, and decides what
//! size an expand request restores.
//!
//! # Invariants
//!
//! 1. Only panels marked collapsible ever enter [`CollapseState::Collapsed`].
//! 2. The only transitions are `expanded → collapsed` (layout lands on the
//!    collapsed size) and `collapsed → expanded` (layout leaves it); the
//!    machine has no other states.
//! 3. Expand restore priority: remembered pre-collapse size, then the
//!    normalized default size, then an equal share of the group.

use serde::{Deserialize, Serialize};

use crate::constraint::PercentageConstraints;
use crate::fuzzy;

/// Collapse state of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapseState {
    #[default]
    Expanded,
    Collapsed,
}

/// A panel crossing its collapse threshold during a layout change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseTransition {
    pub panel: usize,
    pub state: CollapseState,
}

/// Observes successive layouts and tracks which collapsible panels sit on
/// their collapsed size.
#[derive(Debug, Clone, Default)]
pub struct CollapseTracker {
    states: Vec<CollapseState>,
    remembered: Vec<Option<f64>>,
}

impl CollapseTracker {
    #[must_use]
    pub fn new(panels: usize) -> Self {
        Self {
            states: vec![CollapseState::Expanded; panels],
            remembered: vec![None; panels],
        }
    }

    /// Current state of `panel`.
    ///
    /// # Panics
    ///
    /// Panics when `panel` is out of range.
    #[must_use]
    pub fn state(&self, panel: usize) -> CollapseState {
        assert!(
            panel < self.states.len(),
            "panel {panel} out of range for {} panels",
            self.states.len()
        );
        self.states[panel]
    }

    #[must_use]
    pub fn is_collapsed(&self, panel: usize) -> bool {
        self.state(panel) == CollapseState::Collapsed
    }

    /// Reconcile tracked states against a new layout, returning the
    /// transitions that fired. `previous` is the layout the group held
    /// before the change; a panel entering the collapsed state remembers its
    /// previous size for later restoration.
    ///
    /// # Panics
    ///
    /// Panics when slice lengths disagree with the tracked panel count.
    pub fn observe(
        &mut self,
        previous: &[f64],
        layout: &[f64],
        constraints: &[PercentageConstraints],
    ) -> Vec<CollapseTransition> {
        assert_eq!(layout.len(), self.states.len(), "layout length mismatch");
        assert_eq!(previous.len(), self.states.len(), "layout length mismatch");
        assert_eq!(
            constraints.len(),
            self.states.len(),
            "constraints length mismatch"
        );

        let mut transitions = Vec::new();
        for (panel, c) in constraints.iter().enumerate() {
            if !c.collapsible {
                continue;
            }
            let collapsed_now = fuzzy::sizes_equal(layout[panel], c.collapsed_size);
            match (self.states[panel], collapsed_now) {
                (CollapseState::Expanded, true) => {
                    if !fuzzy::sizes_equal(previous[panel], c.collapsed_size) {
                        self.remembered[panel] = Some(previous[panel]);
                    }
                    self.states[panel] = CollapseState::Collapsed;
                    transitions.push(CollapseTransition {
                        panel,
                        state: CollapseState::Collapsed,
                    });
                }
                (CollapseState::Collapsed, false) => {
                    self.states[panel] = CollapseState::Expanded;
                    transitions.push(CollapseTransition {
                        panel,
                        state: CollapseState::Expanded,
                    });
                }
                _ => {}
            }
        }
        transitions
    }

    /// Size to restore when `panel` expands.
    ///
    /// # Panics
    ///
    /// Panics when `panel` is out of range or `panels` is zero.
    #[must_use]
    pub fn expand_target(
        &self,
        panel: usize,
        constraints: &PercentageConstraints,
        panels: usize,
    ) -> f64 {
        assert!(panels > 0, "a group has at least one panel");
        assert!(
            panel < self.remembered.len(),
            "panel {panel} out of range for {} panels",
            self.remembered.len()
        );
        if let Some(size) = self.remembered[panel] {
            return size;
        }
        if let Some(default) = constraints.default_size {
            return default;
        }
        100.0 / panels as f64
    }
}

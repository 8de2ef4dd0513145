#![forbid(unsafe_code)]

//! Test harness for exercising panel groups.
//!
//! Provides a concise builder for groups, a scripted drag-gesture driver
//! that checks layout invariants after every step, and the invariant checks
//! themselves. Intended for dev-dependency use from `sash-layout`'s
//! integration tests and from downstream embedders' suites.

pub mod gesture;
pub mod invariants;

pub use gesture::DragScript;
pub use invariants::check_layout_invariants;

use sash_layout::{Axis, PanelConstraints, PanelGroup};

/// Builder for test panel groups.
///
/// ```
/// use sash_harness::GroupBuilder;
/// use sash_layout::PanelConstraints;
///
/// let group = GroupBuilder::horizontal(1000.0)
///     .panel(PanelConstraints::default())
///     .panel(PanelConstraints::default().with_min_percentage(20.0))
///     .build();
/// assert_eq!(group.layout(), &[50.0, 50.0]);
/// ```
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    axis: Axis,
    extent_pixels: f64,
    panels: Vec<PanelConstraints>,
}

impl GroupBuilder {
    #[must_use]
    pub fn horizontal(extent_pixels: f64) -> Self {
        Self {
            axis: Axis::Horizontal,
            extent_pixels,
            panels: Vec::new(),
        }
    }

    #[must_use]
    pub fn vertical(extent_pixels: f64) -> Self {
        Self {
            axis: Axis::Vertical,
            extent_pixels,
            panels: Vec::new(),
        }
    }

    #[must_use]
    pub fn panel(mut self, constraints: PanelConstraints) -> Self {
        self.panels.push(constraints);
        self
    }

    /// Append `count` panels with no constraints.
    #[must_use]
    pub fn unconstrained_panels(mut self, count: usize) -> Self {
        self.panels
            .extend(std::iter::repeat_n(PanelConstraints::default(), count));
        self
    }

    /// Build the group, panicking on invalid constraints (a test bug).
    #[must_use]
    pub fn build(self) -> PanelGroup {
        PanelGroup::new(self.axis, self.panels, self.extent_pixels)
            .expect("harness group constraints must be valid")
    }
}

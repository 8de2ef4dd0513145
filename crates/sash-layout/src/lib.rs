#![forbid(unsafe_code)]

//! Resizable panel-group layout engine.
//!
//! `sash-layout` computes constraint-satisfying size distributions for a row
//! or column of panels separated by drag handles. All algorithms are pure and
//! synchronous: the embedding layer owns measurement, event capture, and
//! rendering, and feeds the engine pixel extents and cursor positions; the
//! engine's sole output is a size per panel.
//!
//! Sizes are percentages of the group and always sum to 100 within
//! [`fuzzy::SIZE_EPSILON`]. Per-panel minimums, maximums, defaults, and
//! collapse thresholds may be declared in percentages, pixels, or both;
//! pixel bounds are resolved against the group's current pixel extent before
//! any arithmetic happens.
//!
//! The main entry points:
//!
//! - [`PanelGroup`] — stateful owner of one group: layout, drag session,
//!   handle registry, collapse tracking.
//! - [`adjust_layout_by_delta`] — the cascading resize algorithm, usable
//!   standalone on a plain size slice.
//! - [`PanelConstraints::normalize`] — mixed-unit constraint resolution.

pub mod collapse;
pub mod constraint;
pub mod drag;
pub mod error;
pub mod fuzzy;
pub mod group;
pub mod resize;

pub use collapse::{CollapseState, CollapseTracker, CollapseTransition};
pub use constraint::{PanelConstraints, PercentageConstraints, clamp_size};
pub use drag::{Axis, CursorPosition, DragState, drag_offset_percentage};
pub use error::LayoutError;
pub use group::{HandleId, MixedSizes, PanelGroup};
pub use resize::{adjust_layout_by_delta, default_layout, reconcile_layout};

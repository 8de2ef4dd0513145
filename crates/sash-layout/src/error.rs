//! Typed failures for configuration and lifecycle misuse.
//!
//! Ordinary constraint clamping is a successful outcome and never surfaces
//! here. Errors are reserved for configuration bugs (an unsatisfiable
//! constraint set) and lifecycle misuse (overlapping drags, stale handle
//! ids). Out-of-range panel and handle indices are caller/engine
//! desynchronization and panic via `assert!` instead of returning a variant.

use thiserror::Error;

use crate::group::HandleId;

/// Errors produced by constraint normalization and [`PanelGroup`] lifecycle
/// operations.
///
/// [`PanelGroup`]: crate::group::PanelGroup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A panel's minimum resolved above its maximum.
    #[error("panel {panel}: min size {min}% exceeds max size {max}%")]
    MinAboveMax { panel: usize, min: f64, max: f64 },

    /// A constraint resolved to a negative size.
    #[error("panel {panel}: {field} resolved to negative size {value}%")]
    NegativeSize {
        panel: usize,
        field: &'static str,
        value: f64,
    },

    /// A panel's collapsed size resolved above its minimum.
    #[error("panel {panel}: collapsed size {collapsed}% exceeds min size {min}%")]
    CollapsedAboveMin {
        panel: usize,
        collapsed: f64,
        min: f64,
    },

    /// A drag was started (or a programmatic resize requested) while another
    /// drag owns the group.
    #[error("a drag is already active for this group")]
    DragInProgress,

    /// A drag operation was issued with no active drag session.
    #[error("no drag is active for this group")]
    NoActiveDrag,

    /// The handle id is not registered with this group.
    #[error("handle {0} is not registered with this group")]
    UnknownHandle(HandleId),

    /// The handle id is registered but does not own the active drag.
    #[error("handle {0} does not own the active drag")]
    HandleNotDragging(HandleId),

    /// A programmatic layout had the wrong number of entries.
    #[error("layout has {actual} entries but the group has {expected} panels")]
    LayoutLengthMismatch { expected: usize, actual: usize },
}

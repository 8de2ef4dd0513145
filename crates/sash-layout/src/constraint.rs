//! Panel sizing constraints in mixed units and their percentage-space form.
//!
//! A panel declares its bounds in percentage of the group, in pixels, or
//! both at once. [`PanelConstraints::normalize`] resolves everything into a
//! single percentage space for a given group pixel extent; downstream code
//! only ever sees [`PercentageConstraints`].
//!
//! # Invariants
//!
//! 1. Normalizing an already-percentage constraint set is a no-op.
//! 2. Resolved bounds satisfy `0 <= collapsed <= min <= max` (where
//!    present) or normalization returns a typed error.
//! 3. A pixel bound paired with a non-positive group extent degrades to
//!    "unconstrained" with a warning; it never aborts the layout.
//!
//! # Failure Modes
//!
//! `min > max`, a negative resolved size, and `collapsed > min` indicate
//! configuration bugs and surface as [`LayoutError`] variants at
//! normalization time rather than being silently clamped.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::fuzzy;

/// Declared sizing constraints for one panel, in mixed units.
///
/// For each bound the percentage field wins when both unit systems are set;
/// the pixel field is converted relative to the group's pixel extent during
/// normalization.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConstraints {
    /// Whether the panel may snap below its minimum to a collapsed size.
    pub collapsible: bool,
    pub collapsed_size_percentage: Option<f64>,
    pub collapsed_size_pixels: Option<f64>,
    pub default_size_percentage: Option<f64>,
    pub default_size_pixels: Option<f64>,
    pub min_size_percentage: Option<f64>,
    pub min_size_pixels: Option<f64>,
    pub max_size_percentage: Option<f64>,
    pub max_size_pixels: Option<f64>,
}

impl PanelConstraints {
    /// Mark the panel collapsible.
    #[must_use]
    pub fn collapsible(mut self) -> Self {
        self.collapsible = true;
        self
    }

    #[must_use]
    pub fn with_collapsed_percentage(mut self, value: f64) -> Self {
        self.collapsed_size_percentage = Some(value);
        self
    }

    #[must_use]
    pub fn with_collapsed_pixels(mut self, value: f64) -> Self {
        self.collapsed_size_pixels = Some(value);
        self
    }

    #[must_use]
    pub fn with_default_percentage(mut self, value: f64) -> Self {
        self.default_size_percentage = Some(value);
        self
    }

    #[must_use]
    pub fn with_default_pixels(mut self, value: f64) -> Self {
        self.default_size_pixels = Some(value);
        self
    }

    #[must_use]
    pub fn with_min_percentage(mut self, value: f64) -> Self {
        self.min_size_percentage = Some(value);
        self
    }

    #[must_use]
    pub fn with_min_pixels(mut self, value: f64) -> Self {
        self.min_size_pixels = Some(value);
        self
    }

    #[must_use]
    pub fn with_max_percentage(mut self, value: f64) -> Self {
        self.max_size_percentage = Some(value);
        self
    }

    #[must_use]
    pub fn with_max_pixels(mut self, value: f64) -> Self {
        self.max_size_pixels = Some(value);
        self
    }

    /// `true` when any bound is declared in pixels.
    #[must_use]
    pub fn has_pixel_constraints(&self) -> bool {
        self.collapsed_size_pixels.is_some()
            || self.default_size_pixels.is_some()
            || self.min_size_pixels.is_some()
            || self.max_size_pixels.is_some()
    }

    /// Resolve into percentage space for a group `extent_pixels` along its
    /// layout axis.
    ///
    /// `panel` is the panel's index within its group, used for error
    /// reporting only.
    pub fn normalize(
        &self,
        panel: usize,
        extent_pixels: f64,
    ) -> Result<PercentageConstraints, LayoutError> {
        let collapsed = resolve_bound(
            self.collapsed_size_percentage,
            self.collapsed_size_pixels,
            extent_pixels,
            "collapsed size",
        );
        let default = resolve_bound(
            self.default_size_percentage,
            self.default_size_pixels,
            extent_pixels,
            "default size",
        );
        let min = resolve_bound(
            self.min_size_percentage,
            self.min_size_pixels,
            extent_pixels,
            "min size",
        );
        let max = resolve_bound(
            self.max_size_percentage,
            self.max_size_pixels,
            extent_pixels,
            "max size",
        );

        for (field, value) in [
            ("collapsed size", collapsed),
            ("default size", default),
            ("min size", min),
            ("max size", max),
        ] {
            if let Some(value) = value
                && fuzzy::compare_sizes(value, 0.0) == Ordering::Less
            {
                return Err(LayoutError::NegativeSize {
                    panel,
                    field,
                    value,
                });
            }
        }
        if let (Some(min), Some(max)) = (min, max)
            && fuzzy::compare_sizes(min, max) == Ordering::Greater
        {
            return Err(LayoutError::MinAboveMax { panel, min, max });
        }
        if let (Some(collapsed), Some(min)) = (collapsed, min)
            && fuzzy::compare_sizes(collapsed, min) == Ordering::Greater
        {
            return Err(LayoutError::CollapsedAboveMin {
                panel,
                collapsed,
                min,
            });
        }

        Ok(PercentageConstraints {
            collapsible: self.collapsible,
            collapsed_size: collapsed.unwrap_or(0.0),
            default_size: default,
            min_size: min,
            max_size: max,
        })
    }
}

/// Fully resolved, percentage-space constraints for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentageConstraints {
    pub collapsible: bool,
    /// Size a collapsible panel snaps to when pushed below its minimum.
    pub collapsed_size: f64,
    pub default_size: Option<f64>,
    pub min_size: Option<f64>,
    pub max_size: Option<f64>,
}

impl Default for PercentageConstraints {
    fn default() -> Self {
        Self {
            collapsible: false,
            collapsed_size: 0.0,
            default_size: None,
            min_size: None,
            max_size: None,
        }
    }
}

/// Clamp a candidate size for one panel.
///
/// Policy order: a candidate below the minimum snaps to the collapsed size
/// for collapsible panels and clamps to the minimum otherwise; the result is
/// then capped at the maximum. Absent bounds pass the candidate through.
///
/// Pure; never inspects sibling panels.
#[must_use]
pub fn clamp_size(requested: f64, constraints: &PercentageConstraints) -> f64 {
    let mut size = requested;
    if let Some(min) = constraints.min_size
        && fuzzy::compare_sizes(size, min) == Ordering::Less
    {
        size = if constraints.collapsible {
            constraints.collapsed_size
        } else {
            min
        };
    }
    if let Some(max) = constraints.max_size {
        size = size.min(max);
    }
    size
}

fn resolve_bound(
    percentage: Option<f64>,
    pixels: Option<f64>,
    extent_pixels: f64,
    field: &'static str,
) -> Option<f64> {
    if let Some(value) = percentage {
        return Some(value);
    }
    let pixels = pixels?;
    if extent_pixels > 0.0 {
        Some(pixels / extent_pixels * 100.0)
    } else {
        tracing::warn!(
            field,
            pixels,
            extent_pixels,
            "pixel constraint with non-positive group extent; treating as unconstrained"
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_only_normalization_is_identity() {
        let constraints = PanelConstraints::default()
            .with_min_percentage(10.0)
            .with_max_percentage(80.0)
            .with_default_percentage(25.0);
        let once = constraints.normalize(0, 1000.0).unwrap();
        assert_eq!(once.min_size, Some(10.0));
        assert_eq!(once.max_size, Some(80.0));
        assert_eq!(once.default_size, Some(25.0));
        // Feeding the resolved values back through produces the same result.
        let again = PanelConstraints::default()
            .with_min_percentage(once.min_size.unwrap())
            .with_max_percentage(once.max_size.unwrap())
            .with_default_percentage(once.default_size.unwrap())
            .normalize(0, 250.0)
            .unwrap();
        assert_eq!(once, again);
    }

    #[test]
    fn pixel_bounds_convert_against_extent() {
        let constraints = PanelConstraints::default()
            .with_min_pixels(100.0)
            .with_max_pixels(500.0);
        let resolved = constraints.normalize(0, 1000.0).unwrap();
        assert_eq!(resolved.min_size, Some(10.0));
        assert_eq!(resolved.max_size, Some(50.0));
    }

    #[test]
    fn percentage_wins_over_pixels() {
        let constraints = PanelConstraints::default()
            .with_min_percentage(15.0)
            .with_min_pixels(100.0);
        let resolved = constraints.normalize(0, 1000.0).unwrap();
        assert_eq!(resolved.min_size, Some(15.0));
    }

    #[test]
    fn zero_extent_degrades_pixel_bounds_to_absent() {
        let constraints = PanelConstraints::default()
            .with_min_pixels(100.0)
            .with_max_pixels(500.0);
        let resolved = constraints.normalize(0, 0.0).unwrap();
        assert_eq!(resolved.min_size, None);
        assert_eq!(resolved.max_size, None);
    }

    #[test]
    fn min_above_max_is_rejected() {
        let constraints = PanelConstraints::default()
            .with_min_percentage(60.0)
            .with_max_percentage(40.0);
        assert_eq!(
            constraints.normalize(3, 1000.0),
            Err(LayoutError::MinAboveMax {
                panel: 3,
                min: 60.0,
                max: 40.0
            })
        );
    }

    #[test]
    fn negative_resolution_is_rejected() {
        let constraints = PanelConstraints::default().with_min_percentage(-5.0);
        assert!(matches!(
            constraints.normalize(0, 1000.0),
            Err(LayoutError::NegativeSize { .. })
        ));
    }

    #[test]
    fn collapsed_above_min_is_rejected() {
        let constraints = PanelConstraints::default()
            .collapsible()
            .with_collapsed_percentage(15.0)
            .with_min_percentage(10.0);
        assert!(matches!(
            constraints.normalize(0, 1000.0),
            Err(LayoutError::CollapsedAboveMin { .. })
        ));
    }

    #[test]
    fn clamp_passes_unconstrained_through() {
        let constraints = PercentageConstraints::default();
        assert_eq!(clamp_size(37.5, &constraints), 37.5);
    }

    #[test]
    fn clamp_holds_non_collapsible_at_min() {
        let constraints = PercentageConstraints {
            min_size: Some(20.0),
            ..Default::default()
        };
        assert_eq!(clamp_size(5.0, &constraints), 20.0);
    }

    #[test]
    fn clamp_snaps_collapsible_below_min() {
        let constraints = PercentageConstraints {
            collapsible: true,
            collapsed_size: 2.0,
            min_size: Some(20.0),
            ..Default::default()
        };
        assert_eq!(clamp_size(5.0, &constraints), 2.0);
    }

    #[test]
    fn clamp_caps_at_max() {
        let constraints = PercentageConstraints {
            max_size: Some(60.0),
            ..Default::default()
        };
        assert_eq!(clamp_size(75.0, &constraints), 60.0);
    }

    #[test]
    fn clamp_within_epsilon_of_min_does_not_collapse() {
        let constraints = PercentageConstraints {
            collapsible: true,
            collapsed_size: 0.0,
            min_size: Some(20.0),
            ..Default::default()
        };
        // 19.95 is fuzzily equal to the minimum, not below it.
        assert_eq!(clamp_size(19.95, &constraints), 19.95);
    }

    #[test]
    fn serde_round_trip() {
        let constraints = PanelConstraints::default()
            .collapsible()
            .with_collapsed_pixels(0.0)
            .with_min_pixels(100.0)
            .with_default_percentage(30.0);
        let json = serde_json::to_string(&constraints).unwrap();
        let back: PanelConstraints = serde_json::from_str(&json).unwrap();
        assert_eq!(constraints, back);
    }
}

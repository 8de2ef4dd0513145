//! Layout invariant assertions.

use sash_layout::fuzzy::SIZE_EPSILON;
use sash_layout::{PanelGroup, clamp_size};

/// Assert the two core layout invariants for a group:
///
/// 1. Sizes sum to 100 within tolerance.
/// 2. Every panel's size satisfies its own resolved constraints or sits on
///    its collapsed size (equivalently: it is a fixed point of the clamp).
///
/// Panics with a JSON dump of the layout snapshot on violation.
pub fn check_layout_invariants(group: &PanelGroup) {
    let layout = group.layout();
    let total: f64 = layout.iter().sum();
    assert!(
        (total - 100.0).abs() < SIZE_EPSILON,
        "layout sums to {total}, not 100: {}",
        dump(group)
    );

    for (panel, (&size, constraints)) in layout
        .iter()
        .zip(group.normalized_constraints())
        .enumerate()
    {
        let clamped = clamp_size(size, constraints);
        assert!(
            (clamped - size).abs() < SIZE_EPSILON,
            "panel {panel} size {size} violates its constraints \
             (clamps to {clamped}): {}",
            dump(group)
        );
    }
}

fn dump(group: &PanelGroup) -> String {
    serde_json::to_string(&group.layout_snapshot()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GroupBuilder;
    use sash_layout::PanelConstraints;

    #[test]
    fn fresh_groups_satisfy_invariants() {
        let group = GroupBuilder::horizontal(1000.0)
            .panel(PanelConstraints::default().with_min_percentage(10.0))
            .panel(PanelConstraints::default().with_max_percentage(80.0))
            .unconstrained_panels(2)
            .build();
        check_layout_invariants(&group);
    }
}

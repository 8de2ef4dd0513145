//! Cascading resize and layout reconciliation.
//!
//! [`adjust_layout_by_delta`] is the heart of the engine: it moves the
//! boundary between two panels by a percentage delta, walking outward from
//! the handle on both sides so that whatever a neighbor cannot absorb spills
//! into the panel beyond it.
//!
//! # Invariants
//!
//! 1. Output length and ordering equal the input's.
//! 2. The output sums to 100 within tolerance whenever the input does:
//!    the growing side receives exactly what the shrinking side gave up.
//! 3. Every output entry satisfies its own constraints or sits on its
//!    collapsed size.
//! 4. Identical inputs produce identical outputs; the outward walk order is
//!    fixed, with the panel adjacent to the handle always absorbing first.
//!
//! # Failure Modes
//!
//! A delta that neither side can absorb is dropped — the handle simply
//! cannot move further. Index mismatches between layout and constraints are
//! caller bugs and panic.

use crate::constraint::{PercentageConstraints, clamp_size};
use crate::fuzzy;

/// Move the handle between panels `handle_index` and `handle_index + 1` by
/// `delta` percentage points. A positive delta grows the panel before the
/// handle and shrinks the panels after it; a negative delta does the
/// reverse.
///
/// A collapse snap on the shrinking side may absorb more than the requested
/// delta (the neighbor jumps); the growing side then receives the full jump
/// when its own bounds allow it.
///
/// # Panics
///
/// Panics when `constraints.len() != initial_layout.len()` or when
/// `handle_index + 1` is not a valid panel index; both indicate
/// caller/engine desynchronization.
#[must_use]
pub fn adjust_layout_by_delta(
    initial_layout: &[f64],
    constraints: &[PercentageConstraints],
    handle_index: usize,
    delta: f64,
) -> Vec<f64> {
    let panels = initial_layout.len();
    assert_eq!(
        constraints.len(),
        panels,
        "one constraint set per panel ({} constraints, {panels} panels)",
        constraints.len()
    );
    assert!(
        handle_index + 1 < panels,
        "handle {handle_index} out of range for {panels} panels"
    );

    if fuzzy::is_zero(delta) {
        return initial_layout.to_vec();
    }

    // Outward walk orders for each side of the handle. The shrinking side
    // faces the handle's motion; the growing side receives whatever the
    // shrinking side actually gives up.
    let (grow, shrink): (Vec<usize>, Vec<usize>) = if delta > 0.0 {
        (
            (0..=handle_index).rev().collect(),
            (handle_index + 1..panels).collect(),
        )
    } else {
        (
            (handle_index + 1..panels).collect(),
            (0..=handle_index).rev().collect(),
        )
    };

    // The two sides are planned against each other until their totals agree.
    // A collapse snap can make the shrink total overshoot the request, and a
    // max bound (or a collapsed panel refusing a sub-threshold expansion)
    // can make the grow total undershoot it; each re-plan strictly lowers
    // the budget, so the loop settles in a handful of passes.
    let mut budget = delta.abs();
    let mut snap_cap = f64::INFINITY;
    for _ in 0..=panels {
        let shrunk = plan_shrink(initial_layout, constraints, &shrink, budget, snap_cap);
        let grown = plan_grow(initial_layout, constraints, &grow, shrunk.total);
        if fuzzy::sizes_equal(shrunk.total, grown.total) {
            let mut layout = initial_layout.to_vec();
            shrunk.commit(&mut layout);
            grown.commit(&mut layout);
            // Keep the sum exact rather than epsilon-close: fold any
            // sub-epsilon residual into the last panel that grew.
            let residual = shrunk.total - grown.total;
            if residual != 0.0
                && let Some(&(panel, size)) = grown.entries.last()
            {
                layout[panel] = size + residual;
            }
            return layout;
        }
        budget = grown.total;
        snap_cap = grown.total;
        if fuzzy::is_zero(budget) {
            break;
        }
    }

    tracing::debug!(
        handle_index,
        delta,
        "resize delta could not be absorbed; handle stays put"
    );
    initial_layout.to_vec()
}

/// Clamp every entry to its constraints, then repair the sum to 100 by a
/// left-to-right pass that gives or takes whatever each panel's bounds
/// allow.
///
/// Used for initial mount, programmatic layouts, and re-normalization after
/// a group pixel resize. An empty layout passes through unchanged.
///
/// # Panics
///
/// Panics when `constraints.len() != layout.len()`.
#[must_use]
pub fn reconcile_layout(layout: &[f64], constraints: &[PercentageConstraints]) -> Vec<f64> {
    assert_eq!(
        constraints.len(),
        layout.len(),
        "one constraint set per panel ({} constraints, {} panels)",
        constraints.len(),
        layout.len()
    );
    if layout.is_empty() {
        return Vec::new();
    }

    let mut next: Vec<f64> = layout
        .iter()
        .zip(constraints)
        .map(|(&size, c)| clamp_size(size, c))
        .collect();

    let mut remainder = 100.0 - next.iter().sum::<f64>();
    for panel in 0..next.len() {
        if fuzzy::is_zero(remainder) {
            remainder = 0.0;
            break;
        }
        let candidate = clamp_size(next[panel] + remainder, &constraints[panel]);
        remainder -= candidate - next[panel];
        next[panel] = candidate;
    }
    if !fuzzy::is_zero(remainder) {
        tracing::warn!(
            remainder,
            "layout cannot reach 100% under the given constraints"
        );
    }
    next
}

/// Initial layout for a group: panels with a resolved default size take it,
/// the rest split the remainder equally; reconciliation then repairs any
/// constraint violations and rounding drift.
#[must_use]
pub fn default_layout(constraints: &[PercentageConstraints]) -> Vec<f64> {
    if constraints.is_empty() {
        return Vec::new();
    }
    let declared: f64 = constraints.iter().filter_map(|c| c.default_size).sum();
    let undeclared = constraints
        .iter()
        .filter(|c| c.default_size.is_none())
        .count();
    let share = if undeclared > 0 {
        ((100.0 - declared) / undeclared as f64).max(0.0)
    } else {
        0.0
    };
    let layout: Vec<f64> = constraints
        .iter()
        .map(|c| c.default_size.unwrap_or(share))
        .collect();
    reconcile_layout(&layout, constraints)
}

/// Per-side resize plan: the panels that change and the total size moved.
struct SidePlan {
    entries: Vec<(usize, f64)>,
    total: f64,
}

impl SidePlan {
    fn commit(&self, layout: &mut [f64]) {
        for &(panel, size) in &self.entries {
            layout[panel] = size;
        }
    }
}

/// Walk `order` outward from the handle, taking size from each panel until
/// `budget` is spent. A collapsible panel whose candidate falls below its
/// minimum snaps to its collapsed size, which may take more than the
/// remaining budget; when the jump would push the side's total past
/// `snap_cap`, the panel holds at its minimum instead.
fn plan_shrink(
    layout: &[f64],
    constraints: &[PercentageConstraints],
    order: &[usize],
    budget: f64,
    snap_cap: f64,
) -> SidePlan {
    let mut entries = Vec::new();
    let mut total = 0.0;
    for &panel in order {
        let remaining = budget - total;
        if remaining <= 0.0 || fuzzy::is_zero(remaining) {
            break;
        }
        let current = layout[panel];
        // Sizes are percentages of the group; zero is the implicit floor
        // for panels with no declared minimum.
        let mut next = clamp_size(current - remaining, &constraints[panel]).max(0.0);
        if next >= current {
            // Pinned at its minimum (or already collapsed): the rest of the
            // delta cascades to the next panel outward.
            continue;
        }
        let mut absorbed = current - next;
        if absorbed > remaining && total + absorbed > snap_cap {
            // The collapse jump exceeds what the growing side can take;
            // hold at the minimum instead of snapping.
            let Some(min) = constraints[panel].min_size else {
                continue;
            };
            next = min;
            absorbed = current - next;
            if absorbed <= 0.0 {
                continue;
            }
        }
        entries.push((panel, next));
        total += absorbed;
    }
    SidePlan { entries, total }
}

/// Walk `order` outward from the handle, giving each panel as much of
/// `budget` as its bounds allow. A collapsed panel refuses expansion until
/// the remaining budget carries it past its minimum; a panel at its maximum
/// passes the budget along.
fn plan_grow(
    layout: &[f64],
    constraints: &[PercentageConstraints],
    order: &[usize],
    budget: f64,
) -> SidePlan {
    let mut entries = Vec::new();
    let mut total = 0.0;
    for &panel in order {
        let remaining = budget - total;
        if remaining <= 0.0 || fuzzy::is_zero(remaining) {
            break;
        }
        let current = layout[panel];
        let next = clamp_size(current + remaining, &constraints[panel]);
        if next <= current {
            continue;
        }
        let absorbed = next - current;
        debug_assert!(
            absorbed <= remaining + f64::EPSILON * 100.0,
            "growing a panel never takes more than the remaining budget"
        );
        entries.push((panel, next));
        total += absorbed;
    }
    SidePlan { entries, total }
}

//! Target gap analysis
//!
//! All quantities are Mt CO2e. The selected potential is taken from the
//! grand total; overlapping measures are summed linearly.

use crate::aggregate::GrandTotal;
use crate::config::GapMode;
use klimakur_catalog::{ReferenceTrajectory, TargetScenario};
use serde::Serialize;

/// Coverage and residual gap against a target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GapResult {
    /// Variant used
    pub mode: GapMode,
    /// Target measured against
    pub target: TargetScenario,
    /// Potential of the selection
    pub selected_potential: f64,
    /// Reduction needed: from the current level (simple) or from the 1990
    /// baseline (baseline decomposition)
    pub required_reduction: f64,
    /// Emissions after the selected measures
    pub resulting_level: f64,
    /// Cut from the 1990 baseline after the selected measures
    pub total_cut_from_baseline: f64,
    /// Cut already delivered by the reference trajectory; 0 in simple mode
    pub reference_contribution: f64,
    /// Remaining reduction needed, never negative
    pub gap: f64,
    /// Share of the required reduction covered, unclamped
    pub coverage_percent: f64,
    /// Resulting level is at or below the target level
    pub reaches_target: bool,
}

impl GapResult {
    /// Coverage clamped to `[0, 100]` for progress display
    #[inline]
    #[must_use]
    pub fn coverage_clamped(&self) -> f64 {
        self.coverage_percent.clamp(0.0, 100.0)
    }
}

/// Analyze the selection against a target
#[must_use]
pub fn analyze_gap(
    total: &GrandTotal,
    target: &TargetScenario,
    trajectory: &ReferenceTrajectory,
    mode: GapMode,
) -> GapResult {
    let selected = total.potential;

    match mode {
        GapMode::Simple => {
            let required = trajectory.current_level - target.level;
            let resulting = trajectory.current_level - selected;
            let coverage = if required > 0.0 { selected / required * 100.0 } else { 100.0 };

            GapResult {
                mode,
                target: *target,
                selected_potential: selected,
                required_reduction: required,
                resulting_level: resulting,
                total_cut_from_baseline: trajectory.baseline_1990 - resulting,
                reference_contribution: 0.0,
                gap: (required - selected).max(0.0),
                coverage_percent: coverage,
                reaches_target: resulting <= target.level,
            }
        }
        GapMode::BaselineDecomposition => {
            let required = trajectory.baseline_1990 - target.level;
            let reference_contribution = trajectory.reference_contribution();
            let resulting = trajectory.reference_level - selected;
            let coverage = if required > 0.0 {
                (reference_contribution + selected) / required * 100.0
            } else {
                100.0
            };

            GapResult {
                mode,
                target: *target,
                selected_potential: selected,
                required_reduction: required,
                resulting_level: resulting,
                total_cut_from_baseline: trajectory.baseline_1990 - resulting,
                reference_contribution,
                gap: (resulting - target.level).max(0.0),
                coverage_percent: coverage,
                reaches_target: resulting <= target.level,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klimakur_catalog::TargetKey;

    const EPS: f64 = 1e-9;

    fn total(potential: f64) -> GrandTotal {
        GrandTotal {
            potential,
            potential_kt: potential * 1000.0,
            ..GrandTotal::ZERO
        }
    }

    fn seventy() -> TargetScenario {
        TargetKey::Cut70By2035.scenario(&ReferenceTrajectory::NORWAY)
    }

    #[test]
    fn baseline_decomposition_short_of_target() {
        let r = analyze_gap(&total(10.0), &seventy(), &ReferenceTrajectory::NORWAY, GapMode::BaselineDecomposition);
        assert!((r.resulting_level - 21.7).abs() < EPS);
        assert!((r.gap - 6.4).abs() < EPS);
        assert!((r.total_cut_from_baseline - 29.3).abs() < EPS);
        assert!((r.reference_contribution - 19.3).abs() < EPS);
        assert!((r.required_reduction - 35.7).abs() < EPS);
        assert!((r.coverage_percent - 29.3 / 35.7 * 100.0).abs() < EPS);
        assert!(!r.reaches_target);
    }

    #[test]
    fn baseline_decomposition_overshoot() {
        let r = analyze_gap(&total(20.0), &seventy(), &ReferenceTrajectory::NORWAY, GapMode::BaselineDecomposition);
        assert_eq!(r.gap, 0.0);
        assert!(r.reaches_target);
        assert!(r.coverage_percent > 100.0);
        assert_eq!(r.coverage_clamped(), 100.0);
    }

    #[test]
    fn simple_empty_selection() {
        let r = analyze_gap(&GrandTotal::ZERO, &seventy(), &ReferenceTrajectory::NORWAY, GapMode::Simple);
        assert_eq!(r.coverage_percent, 0.0);
        assert_eq!(r.gap, r.required_reduction);
        assert!((r.required_reduction - 31.3).abs() < EPS);
        assert!((r.resulting_level - 46.6).abs() < EPS);
        assert!(!r.reaches_target);
    }

    #[test]
    fn simple_already_below_target() {
        let trajectory = ReferenceTrajectory {
            current_level: 10.0,
            ..ReferenceTrajectory::NORWAY
        };
        let r = analyze_gap(&GrandTotal::ZERO, &seventy(), &trajectory, GapMode::Simple);
        assert_eq!(r.coverage_percent, 100.0);
        assert_eq!(r.gap, 0.0);
        assert!(r.reaches_target);
    }

    #[test]
    fn simple_partial_coverage() {
        let r = analyze_gap(&total(15.65), &seventy(), &ReferenceTrajectory::NORWAY, GapMode::Simple);
        assert!((r.coverage_percent - 50.0).abs() < EPS);
        assert!((r.gap - 15.65).abs() < EPS);
    }

    #[test]
    fn negative_coverage_clamps_to_zero() {
        let r = GapResult {
            coverage_percent: -12.0,
            ..analyze_gap(&GrandTotal::ZERO, &seventy(), &ReferenceTrajectory::NORWAY, GapMode::Simple)
        };
        assert_eq!(r.coverage_clamped(), 0.0);
    }
}

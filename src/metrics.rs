use serde::Serialize;

use crate::config::{PortfolioTargets, ShareTarget};
use crate::constants::targets::{
    METRIC_ANIMAL_WELFARE_SHARE, METRIC_FISH_AREA_SHARE, METRIC_FISH_METHOD_SHARE,
    METRIC_ORGANIC_SHARE, METRIC_PLANT_SHARE,
};
use crate::data::ProcurementLine;
use crate::types::MetricName;
use crate::utils::ratio_or_zero;

/// Records that carry a weighting quantity for share calculations.
pub trait Weighted {
    /// Non-negative weight (volume) of the record.
    fn weight(&self) -> f64;
}

impl Weighted for ProcurementLine {
    fn weight(&self) -> f64 {
        self.volume_kg_l
    }
}

/// Weighted share of `records` satisfying `predicate` among those in `base`.
///
/// Returns `0.0` when the base carries no weight. Non-finite or negative
/// weights are treated as zero.
pub fn weighted_share<T, B, P>(records: &[T], base: B, predicate: P) -> f64
where
    T: Weighted,
    B: Fn(&T) -> bool,
    P: Fn(&T) -> bool,
{
    let mut total = 0.0;
    let mut matched = 0.0;
    for record in records.iter().filter(|record| base(*record)) {
        let weight = record.weight();
        if !weight.is_finite() || weight <= 0.0 {
            continue;
        }
        total += weight;
        if predicate(record) {
            matched += weight;
        }
    }
    ratio_or_zero(matched, total)
}

/// Plant-based share over all lines; non-food counts only in the denominator.
pub fn plant_share(lines: &[ProcurementLine]) -> f64 {
    weighted_share(lines, |_| true, ProcurementLine::is_plant_based)
}

/// Organic share over all lines.
pub fn organic_share(lines: &[ProcurementLine]) -> f64 {
    weighted_share(lines, |_| true, |line| line.organic)
}

/// Welfare-certified share over animal-origin lines.
pub fn animal_welfare_share(lines: &[ProcurementLine]) -> f64 {
    weighted_share(lines, |line| line.is_animal, |line| line.welfare_certified)
}

/// Selective-method share over fish lines.
pub fn fish_selective_method_share(lines: &[ProcurementLine]) -> f64 {
    weighted_share(
        lines,
        ProcurementLine::is_fish,
        ProcurementLine::has_selective_method,
    )
}

/// Near-Denmark area share over fish lines.
pub fn fish_near_area_share(lines: &[ProcurementLine]) -> f64 {
    weighted_share(
        lines,
        ProcurementLine::is_fish,
        ProcurementLine::is_from_near_area,
    )
}

/// Every portfolio share at one point in the tuning lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PortfolioSnapshot {
    /// Total volume over all lines.
    pub total_volume: f64,
    /// Plant-based share.
    pub plant_share: f64,
    /// Organic share.
    pub organic_share: f64,
    /// Welfare share over animal-origin lines.
    pub animal_welfare_share: f64,
    /// Selective catch share over fish lines.
    pub fish_selective_method_share: f64,
    /// Near-Denmark area share over fish lines.
    pub fish_near_area_share: f64,
}

impl PortfolioSnapshot {
    /// Compute every share of `lines`.
    pub fn of(lines: &[ProcurementLine]) -> Self {
        Self {
            total_volume: lines.iter().map(Weighted::weight).sum(),
            plant_share: plant_share(lines),
            organic_share: organic_share(lines),
            animal_welfare_share: animal_welfare_share(lines),
            fish_selective_method_share: fish_selective_method_share(lines),
            fish_near_area_share: fish_near_area_share(lines),
        }
    }

    /// Compare each share against its configured band.
    pub fn check(&self, targets: &PortfolioTargets) -> Vec<TargetCheck> {
        let welfare_floor = ShareTarget::new(
            targets.animal_welfare.target,
            (targets.animal_welfare.target - targets.animal_welfare_min).max(0.0),
        );
        vec![
            TargetCheck::new(METRIC_PLANT_SHARE, self.plant_share, targets.plant_share),
            TargetCheck::new(
                METRIC_ORGANIC_SHARE,
                self.organic_share,
                targets.organic_share,
            ),
            TargetCheck::at_least(
                METRIC_ANIMAL_WELFARE_SHARE,
                self.animal_welfare_share,
                welfare_floor,
            ),
            TargetCheck::at_least(
                METRIC_FISH_METHOD_SHARE,
                self.fish_selective_method_share,
                targets.fish_selective_method,
            ),
            TargetCheck::at_least(
                METRIC_FISH_AREA_SHARE,
                self.fish_near_area_share,
                targets.fish_near_area,
            ),
        ]
    }
}

/// Outcome of comparing one share against its target band.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TargetCheck {
    /// Metric name.
    pub metric: MetricName,
    /// Observed share.
    pub actual: f64,
    /// Target share, or the floor for minimum checks.
    pub target: f64,
    /// Accepted deviation.
    pub tolerance: f64,
    /// Observed share meets the target.
    pub satisfied: bool,
}

impl TargetCheck {
    fn new(metric: MetricName, actual: f64, band: ShareTarget) -> Self {
        Self {
            metric,
            actual,
            target: band.target,
            tolerance: band.tolerance,
            satisfied: band.contains(actual),
        }
    }

    /// Minimum-share check: anything at or above `target - tolerance` passes.
    fn at_least(metric: MetricName, actual: f64, band: ShareTarget) -> Self {
        Self {
            satisfied: actual >= band.target - band.tolerance,
            ..Self::new(metric, actual, band)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        weight: f64,
        eligible: bool,
        flag: bool,
    }

    impl Weighted for Item {
        fn weight(&self) -> f64 {
            self.weight
        }
    }

    fn item(weight: f64, eligible: bool, flag: bool) -> Item {
        Item {
            weight,
            eligible,
            flag,
        }
    }

    #[test]
    fn share_is_weighted_by_volume_not_rows() {
        let items = vec![item(90.0, true, true), item(5.0, true, false), item(5.0, true, false)];
        let share = weighted_share(&items, |i| i.eligible, |i| i.flag);
        assert!((share - 0.9).abs() < 1e-12);
    }

    #[test]
    fn share_only_counts_eligible_base() {
        let items = vec![
            item(10.0, true, true),
            item(10.0, true, false),
            item(1_000.0, false, true),
        ];
        let share = weighted_share(&items, |i| i.eligible, |i| i.flag);
        assert!((share - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zero_eligible_volume_yields_zero() {
        let items = vec![item(0.0, true, true), item(0.0, true, false)];
        let share = weighted_share(&items, |i| i.eligible, |i| i.flag);
        assert_eq!(share, 0.0);
        assert!(!share.is_nan());

        let none: Vec<Item> = Vec::new();
        assert_eq!(weighted_share(&none, |_| true, |_| true), 0.0);
    }

    #[test]
    fn duplicated_zero_volume_row_changes_nothing() {
        let mut items = vec![item(10.0, true, true), item(30.0, true, false), item(0.0, true, true)];
        let before = weighted_share(&items, |i| i.eligible, |i| i.flag);
        items.push(item(0.0, true, true));
        let after = weighted_share(&items, |i| i.eligible, |i| i.flag);
        assert_eq!(before, after);
    }

    #[test]
    fn welfare_floor_check_uses_minimum() {
        let targets = PortfolioTargets::default();
        let snapshot = PortfolioSnapshot {
            total_volume: 100.0,
            plant_share: 0.748,
            organic_share: 0.40,
            animal_welfare_share: 0.55,
            fish_selective_method_share: 0.80,
            fish_near_area_share: 0.30,
        };
        let checks = snapshot.check(&targets);
        let by_metric = |metric: &str| {
            checks
                .iter()
                .find(|check| check.metric == metric)
                .expect("metric present")
                .satisfied
        };
        assert!(by_metric(METRIC_PLANT_SHARE));
        assert!(!by_metric(METRIC_ORGANIC_SHARE));
        assert!(by_metric(METRIC_ANIMAL_WELFARE_SHARE));
        assert!(by_metric(METRIC_FISH_METHOD_SHARE));
        assert!(!by_metric(METRIC_FISH_AREA_SHARE));
    }
}

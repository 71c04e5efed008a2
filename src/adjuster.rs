//! Best-effort nudging of volume-weighted portfolio shares.
//!
//! Procurement lines are generated independently, so aggregate shares only
//! land near their targets by chance. A nudge pass samples a fraction of the
//! eligible lines and flips one attribute toward the target. Passes are run a
//! fixed number of times; the driver never loops until convergence, so the
//! final share may still sit outside its band.

use rand::Rng;
use rand::seq::IndexedRandom;
use rand::seq::index;
use serde::Serialize;
use std::borrow::Cow;
use tracing::{debug, info, warn};

use crate::config::{NudgePlan, PortfolioTargets, ShareTarget};
use crate::constants::targets::{
    METRIC_ANIMAL_WELFARE_SHARE, METRIC_FISH_AREA_SHARE, METRIC_FISH_METHOD_SHARE,
    METRIC_ORGANIC_SHARE,
};
use crate::data::{Category, FaoArea, FishingMethod, ProcurementLine};
use crate::metrics::{PortfolioSnapshot, TargetCheck, Weighted, weighted_share};
use crate::types::MetricName;

/// A boolean attribute whose weighted share the adjuster can move.
///
/// The share is `weight(base ∧ is_set) / weight(base)`; only records that are
/// `is_eligible` may be flipped.
pub trait PortfolioFlag {
    /// Record type carrying the attribute.
    type Record: Weighted + Clone;

    /// Metric name used in reports and logs.
    fn metric(&self) -> MetricName;

    /// Records in the share's denominator.
    fn in_base(&self, record: &Self::Record) -> bool;

    /// Current value of the attribute.
    fn is_set(&self, record: &Self::Record) -> bool;

    /// Records the adjuster may flip.
    fn is_eligible(&self, record: &Self::Record) -> bool;

    /// Write `value` into the record; called only when the value differs.
    fn write<R: Rng + ?Sized>(&self, record: &mut Self::Record, value: bool, rng: &mut R);

    /// Current weighted share of the attribute.
    fn share(&self, records: &[Self::Record]) -> f64 {
        weighted_share(
            records,
            |record| self.in_base(record),
            |record| self.is_set(record),
        )
    }

    /// Set the attribute to `value`, returning whether the record changed.
    fn apply<R: Rng + ?Sized>(&self, record: &mut Self::Record, value: bool, rng: &mut R) -> bool {
        if self.is_set(record) == value {
            return false;
        }
        self.write(record, value, rng);
        true
    }
}

/// Which deviations a nudge reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NudgeMode {
    /// Raise when under the band, lower when over it.
    Bidirectional,
    /// Treat the target as a minimum: only raise, and only when under the band.
    RaiseOnly,
}

/// Parameters of a single nudge pass.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NudgeSpec {
    /// Target share.
    pub target: f64,
    /// Accepted absolute deviation from `target`.
    pub tolerance: f64,
    /// Fraction of eligible records sampled per pass.
    pub sample_fraction: f64,
    /// Direction mode.
    pub mode: NudgeMode,
}

impl NudgeSpec {
    /// Nudge toward `band` sampling `sample_fraction` of the eligible records.
    pub fn new(band: ShareTarget, sample_fraction: f64, mode: NudgeMode) -> Self {
        Self {
            target: band.target,
            tolerance: band.tolerance,
            sample_fraction,
            mode,
        }
    }

    /// Value to write for a share of `current`, or `None` when no pass is needed.
    pub fn direction(&self, current: f64) -> Option<bool> {
        if (current - self.target).abs() <= self.tolerance {
            return None;
        }
        match self.mode {
            NudgeMode::Bidirectional => Some(current < self.target),
            NudgeMode::RaiseOnly if current < self.target => Some(true),
            NudgeMode::RaiseOnly => None,
        }
    }
}

/// Number of records sampled from `eligible` candidates.
///
/// Rounds to nearest with ties to even, so 25 candidates at 0.1 sample 2.
pub fn sample_size(eligible: usize, fraction: f64) -> usize {
    let raw = (eligible as f64 * fraction.clamp(0.0, 1.0)).round_ties_even();
    (raw as usize).min(eligible)
}

/// What a nudge pass did.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NudgeAction {
    /// Share already within the band (or above a minimum).
    WithinTolerance,
    /// Off target, but the sample was empty.
    NoCandidates,
    /// Sampled records were set toward the target.
    Flipped {
        /// Value written into the sampled records.
        value: bool,
        /// Indices of the sampled records, ascending.
        sampled: Vec<usize>,
        /// Sampled records whose attribute actually changed.
        changed: usize,
    },
}

/// Audit entry for one nudge pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NudgeReport {
    /// Metric the pass acted on.
    pub metric: MetricName,
    /// Share before the pass.
    pub before: f64,
    /// Share after the pass.
    pub after: f64,
    /// Target share.
    pub target: f64,
    /// Accepted deviation.
    pub tolerance: f64,
    /// What the pass did.
    pub action: NudgeAction,
}

impl NudgeReport {
    /// Records whose attribute changed in this pass.
    pub fn changed(&self) -> usize {
        match &self.action {
            NudgeAction::Flipped { changed, .. } => *changed,
            _ => 0,
        }
    }
}

/// Result of a nudge pass: the (possibly untouched) records and the audit entry.
#[derive(Debug)]
pub struct NudgeOutcome<'a, T: Clone> {
    /// Borrowed input when nothing changed, otherwise an updated copy.
    pub records: Cow<'a, [T]>,
    /// Audit entry for the pass.
    pub report: NudgeReport,
}

impl<T: Clone> NudgeOutcome<'_, T> {
    /// `true` when the input was returned untouched.
    pub fn is_noop(&self) -> bool {
        matches!(self.records, Cow::Borrowed(_))
    }
}

/// Run one nudge pass of `flag` over `records`.
///
/// When the current share is within `nudge.tolerance` of the target the input
/// is returned borrowed. Otherwise [`sample_size`] eligible
/// records are drawn uniformly without replacement and set toward the target.
/// A single pass is not expected to reach the band.
pub fn adjust<'a, F, R>(
    records: &'a [F::Record],
    flag: &F,
    nudge: &NudgeSpec,
    rng: &mut R,
) -> NudgeOutcome<'a, F::Record>
where
    F: PortfolioFlag,
    R: Rng + ?Sized,
{
    let before = flag.share(records);
    let report = |after: f64, action: NudgeAction| NudgeReport {
        metric: flag.metric(),
        before,
        after,
        target: nudge.target,
        tolerance: nudge.tolerance,
        action,
    };

    let Some(value) = nudge.direction(before) else {
        return NudgeOutcome {
            records: Cow::Borrowed(records),
            report: report(before, NudgeAction::WithinTolerance),
        };
    };

    let eligible: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| flag.is_eligible(record))
        .map(|(idx, _)| idx)
        .collect();
    let amount = sample_size(eligible.len(), nudge.sample_fraction);
    if amount == 0 {
        return NudgeOutcome {
            records: Cow::Borrowed(records),
            report: report(before, NudgeAction::NoCandidates),
        };
    }

    let mut sampled: Vec<usize> = index::sample(rng, eligible.len(), amount)
        .into_iter()
        .map(|pos| eligible[pos])
        .collect();
    sampled.sort_unstable();

    let mut updated = records.to_vec();
    let mut changed = 0;
    for &idx in &sampled {
        if flag.apply(&mut updated[idx], value, rng) {
            changed += 1;
        }
    }
    let after = flag.share(&updated);
    NudgeOutcome {
        records: Cow::Owned(updated),
        report: report(
            after,
            NudgeAction::Flipped {
                value,
                sampled,
                changed,
            },
        ),
    }
}

/// Organic flag, flippable only in categories where organic sourcing is plausible.
#[derive(Clone, Debug)]
pub struct OrganicFlag {
    /// Categories whose lines may be flipped.
    pub categories: Vec<Category>,
}

impl PortfolioFlag for OrganicFlag {
    type Record = ProcurementLine;

    fn metric(&self) -> MetricName {
        METRIC_ORGANIC_SHARE
    }

    fn in_base(&self, _record: &ProcurementLine) -> bool {
        true
    }

    fn is_set(&self, record: &ProcurementLine) -> bool {
        record.organic
    }

    fn is_eligible(&self, record: &ProcurementLine) -> bool {
        self.categories.contains(&record.category)
    }

    fn write<R: Rng + ?Sized>(&self, record: &mut ProcurementLine, value: bool, _rng: &mut R) {
        record.organic = value;
    }
}

/// Animal-welfare certification over animal-origin lines.
#[derive(Clone, Debug)]
pub struct WelfareFlag {
    /// Animal-origin categories whose lines may be certified.
    pub categories: Vec<Category>,
}

impl PortfolioFlag for WelfareFlag {
    type Record = ProcurementLine;

    fn metric(&self) -> MetricName {
        METRIC_ANIMAL_WELFARE_SHARE
    }

    fn in_base(&self, record: &ProcurementLine) -> bool {
        record.is_animal
    }

    fn is_set(&self, record: &ProcurementLine) -> bool {
        record.welfare_certified
    }

    fn is_eligible(&self, record: &ProcurementLine) -> bool {
        record.is_animal && self.categories.contains(&record.category)
    }

    fn write<R: Rng + ?Sized>(&self, record: &mut ProcurementLine, value: bool, _rng: &mut R) {
        record.welfare_certified = value;
    }
}

/// Selective catch method (line or Danish seine) over fish lines.
///
/// Only fish lines still caught unselectively are candidates, so every
/// sampled line moves the share.
#[derive(Clone, Copy, Debug, Default)]
pub struct FishMethodFlag;

impl PortfolioFlag for FishMethodFlag {
    type Record = ProcurementLine;

    fn metric(&self) -> MetricName {
        METRIC_FISH_METHOD_SHARE
    }

    fn in_base(&self, record: &ProcurementLine) -> bool {
        record.is_fish()
    }

    fn is_set(&self, record: &ProcurementLine) -> bool {
        record.has_selective_method()
    }

    fn is_eligible(&self, record: &ProcurementLine) -> bool {
        record.is_fish() && !record.has_selective_method()
    }

    fn write<R: Rng + ?Sized>(&self, record: &mut ProcurementLine, value: bool, rng: &mut R) {
        let pool: &[FishingMethod] = if value {
            &FishingMethod::SELECTIVE
        } else {
            &FishingMethod::UNSELECTIVE
        };
        record.fishing_method = pool.choose(rng).copied();
    }
}

/// FAO 27 sub-area near Denmark over fish lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct FishAreaFlag;

impl PortfolioFlag for FishAreaFlag {
    type Record = ProcurementLine;

    fn metric(&self) -> MetricName {
        METRIC_FISH_AREA_SHARE
    }

    fn in_base(&self, record: &ProcurementLine) -> bool {
        record.is_fish()
    }

    fn is_set(&self, record: &ProcurementLine) -> bool {
        record.is_from_near_area()
    }

    fn is_eligible(&self, record: &ProcurementLine) -> bool {
        record.is_fish() && !record.is_from_near_area()
    }

    fn write<R: Rng + ?Sized>(&self, record: &mut ProcurementLine, value: bool, rng: &mut R) {
        let pool: &[FaoArea] = if value {
            &FaoArea::NEAR
        } else {
            &FaoArea::OTHER
        };
        record.fao_area = pool.choose(rng).copied();
    }
}

/// Full audit trail of a tuning run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TuningReport {
    /// Shares before the first pass.
    pub before: PortfolioSnapshot,
    /// One entry per pass, in run order.
    pub passes: Vec<NudgeReport>,
    /// Shares after the last pass.
    pub after: PortfolioSnapshot,
    /// Final shares against their targets.
    pub checks: Vec<TargetCheck>,
}

impl TuningReport {
    /// Total attribute changes across all passes.
    pub fn total_changed(&self) -> usize {
        self.passes.iter().map(NudgeReport::changed).sum()
    }
}

/// Driver that runs the configured nudge passes in a fixed order:
/// organic, then welfare, then fish method and fish area.
///
/// Later passes never re-check earlier metrics.
#[derive(Clone, Debug)]
pub struct PortfolioTuner {
    plan: NudgePlan,
    targets: PortfolioTargets,
}

impl PortfolioTuner {
    /// Create a tuner for `plan` aiming at `targets`.
    pub fn new(plan: NudgePlan, targets: PortfolioTargets) -> Self {
        Self { plan, targets }
    }

    /// Tune `lines` toward the configured targets.
    pub fn tune<R: Rng + ?Sized>(
        &self,
        lines: Vec<ProcurementLine>,
        rng: &mut R,
    ) -> (Vec<ProcurementLine>, TuningReport) {
        let before = PortfolioSnapshot::of(&lines);
        info!(
            lines = lines.len(),
            organic = before.organic_share,
            welfare = before.animal_welfare_share,
            "portfolio before tuning"
        );

        let mut passes = Vec::new();
        let organic = OrganicFlag {
            categories: self.plan.organic_categories.clone(),
        };
        let organic_spec = NudgeSpec::new(
            self.targets.organic_share,
            self.plan.organic_sample_fraction,
            NudgeMode::Bidirectional,
        );
        let mut lines = run_passes(
            lines,
            &organic,
            &organic_spec,
            self.plan.organic_passes,
            &mut passes,
            rng,
        );

        let welfare = WelfareFlag {
            categories: self.plan.welfare_categories.clone(),
        };
        let welfare_spec = NudgeSpec::new(
            self.targets.animal_welfare,
            self.plan.welfare_sample_fraction,
            NudgeMode::RaiseOnly,
        );
        lines = run_passes(
            lines,
            &welfare,
            &welfare_spec,
            self.plan.welfare_passes,
            &mut passes,
            rng,
        );

        let method_spec = NudgeSpec::new(
            self.targets.fish_selective_method,
            self.plan.fish_sample_fraction,
            NudgeMode::RaiseOnly,
        );
        let area_spec = NudgeSpec::new(
            self.targets.fish_near_area,
            self.plan.fish_sample_fraction,
            NudgeMode::RaiseOnly,
        );
        for _ in 0..self.plan.fish_passes {
            lines = run_passes(lines, &FishMethodFlag, &method_spec, 1, &mut passes, rng);
            lines = run_passes(lines, &FishAreaFlag, &area_spec, 1, &mut passes, rng);
        }

        let after = PortfolioSnapshot::of(&lines);
        let checks = after.check(&self.targets);
        for check in checks.iter().filter(|check| !check.satisfied) {
            warn!(
                metric = check.metric,
                actual = check.actual,
                target = check.target,
                tolerance = check.tolerance,
                "portfolio share outside target band after tuning"
            );
        }
        info!(
            plant = after.plant_share,
            organic = after.organic_share,
            welfare = after.animal_welfare_share,
            fish_method = after.fish_selective_method_share,
            fish_area = after.fish_near_area_share,
            "portfolio after tuning"
        );

        (
            lines,
            TuningReport {
                before,
                passes,
                after,
                checks,
            },
        )
    }
}

fn run_passes<F, R>(
    mut records: Vec<F::Record>,
    flag: &F,
    nudge: &NudgeSpec,
    count: usize,
    reports: &mut Vec<NudgeReport>,
    rng: &mut R,
) -> Vec<F::Record>
where
    F: PortfolioFlag,
    R: Rng + ?Sized,
{
    for pass in 0..count {
        let outcome = adjust(&records, flag, nudge, rng);
        let report = outcome.report;
        let next = match outcome.records {
            Cow::Owned(updated) => Some(updated),
            Cow::Borrowed(_) => None,
        };
        debug!(
            metric = report.metric,
            pass,
            before = report.before,
            after = report.after,
            changed = report.changed(),
            "nudge pass"
        );
        reports.push(report);
        if let Some(updated) = next {
            records = updated;
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        volume: f64,
        eligible: bool,
        flag: bool,
    }

    impl Weighted for Row {
        fn weight(&self) -> f64 {
            self.volume
        }
    }

    struct RowFlag;

    impl PortfolioFlag for RowFlag {
        type Record = Row;

        fn metric(&self) -> MetricName {
            "row_flag"
        }

        fn in_base(&self, _record: &Row) -> bool {
            true
        }

        fn is_set(&self, record: &Row) -> bool {
            record.flag
        }

        fn is_eligible(&self, record: &Row) -> bool {
            record.eligible
        }

        fn write<R: Rng + ?Sized>(&self, record: &mut Row, value: bool, _rng: &mut R) {
            record.flag = value;
        }
    }

    fn rows(n: usize, volume: f64, eligible: bool, flag: bool) -> Vec<Row> {
        (0..n)
            .map(|_| Row {
                volume,
                eligible,
                flag,
            })
            .collect()
    }

    fn spec(target: f64, tolerance: f64, fraction: f64) -> NudgeSpec {
        NudgeSpec {
            target,
            tolerance,
            sample_fraction: fraction,
            mode: NudgeMode::Bidirectional,
        }
    }

    #[test]
    fn single_pass_is_best_effort_and_stays_outside_band() {
        let records = rows(10, 10.0, true, false);
        let mut rng = StdRng::from_seed([0_u8; 32]);
        let outcome = adjust(&records, &RowFlag, &spec(0.75, 0.02, 0.3), &mut rng);
        let flipped = outcome.records.iter().filter(|row| row.flag).count();
        assert_eq!(flipped, 3);
        assert!((outcome.report.after - 0.3).abs() < 1e-12);
        assert!((outcome.report.after - 0.75).abs() > 0.02);
        assert_eq!(outcome.report.changed(), 3);
    }

    #[test]
    fn within_tolerance_is_a_borrowed_noop() {
        let mut records = rows(10, 10.0, true, false);
        for row in records.iter_mut().take(7) {
            row.flag = true;
        }
        let mut rng = StdRng::from_seed([1_u8; 32]);
        let outcome = adjust(&records, &RowFlag, &spec(0.71, 0.02, 0.5), &mut rng);
        assert!(outcome.is_noop());
        assert_eq!(outcome.records.as_ref(), records.as_slice());
        assert_eq!(outcome.report.action, NudgeAction::WithinTolerance);
    }

    #[test]
    fn empty_eligible_set_leaves_records_unchanged() {
        let records = rows(8, 5.0, false, false);
        let mut rng = StdRng::from_seed([2_u8; 32]);
        let outcome = adjust(&records, &RowFlag, &spec(0.9, 0.01, 0.5), &mut rng);
        assert!(outcome.is_noop());
        assert_eq!(outcome.records.as_ref(), records.as_slice());
        assert_eq!(outcome.report.action, NudgeAction::NoCandidates);
    }

    #[test]
    fn over_target_lowers_the_flag() {
        let records = rows(20, 1.0, true, true);
        let mut rng = StdRng::from_seed([3_u8; 32]);
        let outcome = adjust(&records, &RowFlag, &spec(0.5, 0.05, 0.25), &mut rng);
        let set = outcome.records.iter().filter(|row| row.flag).count();
        assert_eq!(set, 15);
        match outcome.report.action {
            NudgeAction::Flipped { value, ref sampled, changed } => {
                assert!(!value);
                assert_eq!(sampled.len(), 5);
                assert_eq!(changed, 5);
                assert!(sampled.windows(2).all(|pair| pair[0] < pair[1]));
            }
            ref other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn raise_only_ignores_shares_above_target() {
        let records = rows(10, 1.0, true, true);
        let mut rng = StdRng::from_seed([4_u8; 32]);
        let nudge = NudgeSpec {
            mode: NudgeMode::RaiseOnly,
            ..spec(0.5, 0.0, 0.5)
        };
        let outcome = adjust(&records, &RowFlag, &nudge, &mut rng);
        assert!(outcome.is_noop());
    }

    #[test]
    fn only_sampled_rows_change() {
        let mut records = rows(30, 2.0, true, false);
        for (idx, row) in records.iter_mut().enumerate() {
            row.eligible = idx % 3 == 0;
        }
        let mut rng = StdRng::from_seed([5_u8; 32]);
        let outcome = adjust(&records, &RowFlag, &spec(1.0, 0.0, 0.5), &mut rng);
        let NudgeAction::Flipped { ref sampled, .. } = outcome.report.action else {
            panic!("expected a flip");
        };
        assert_eq!(sampled.len(), 5);
        for (idx, (old, new)) in records.iter().zip(outcome.records.iter()).enumerate() {
            if sampled.contains(&idx) {
                assert!(old.eligible);
                assert!(new.flag);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn sample_size_rounds_half_to_even() {
        assert_eq!(sample_size(10, 0.3), 3);
        assert_eq!(sample_size(25, 0.1), 2);
        assert_eq!(sample_size(5, 0.5), 2);
        assert_eq!(sample_size(7, 0.5), 4);
        assert_eq!(sample_size(3, 0.1), 0);
        assert_eq!(sample_size(0, 0.5), 0);
        assert_eq!(sample_size(4, 2.0), 4);
    }

    fn procurement_line(category: Category, volume: f64) -> ProcurementLine {
        let fish = category == Category::Fish;
        ProcurementLine {
            date: chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            business_unit: "Bankdata Kantine".to_string(),
            unit_type: crate::data::UnitType::Canteen,
            city: "Fredericia".to_string(),
            product: category.label().to_string(),
            category,
            is_animal: category.is_animal_origin(),
            unit: crate::data::MeasureUnit::Kg,
            supplier: "AquaSea".to_string(),
            supplier_country: "DK".to_string(),
            supplier_danish_cert: false,
            organic: false,
            danish: true,
            welfare_certified: false,
            welfare_scheme: None,
            fishing_method: fish.then_some(FishingMethod::Trawl),
            fao_area: fish.then_some(FaoArea::Area2a),
            volume_kg_l: volume,
            price_per_unit_dkk: 10.0,
            cost_dkk: 10.0 * volume,
            co2e_kg: 0.0,
            non_food: category == Category::NonFood,
            swan_labeled: false,
        }
    }

    fn four_of_each_category() -> Vec<ProcurementLine> {
        Category::ALL
            .iter()
            .flat_map(|&category| (0..4).map(move |_| procurement_line(category, 5.0)))
            .collect()
    }

    fn raise_all(band: ShareTarget) -> NudgeSpec {
        NudgeSpec::new(band, 1.0, NudgeMode::RaiseOnly)
    }

    #[test]
    fn organic_flag_flips_only_configured_categories() {
        let lines = four_of_each_category();
        let flag = OrganicFlag {
            categories: NudgePlan::default().organic_categories,
        };
        let mut rng = StdRng::from_seed([6_u8; 32]);
        let outcome = adjust(&lines, &flag, &raise_all(ShareTarget::new(1.0, 0.0)), &mut rng);

        assert_eq!(outcome.report.changed(), 12);
        for line in outcome.records.iter() {
            let expected = matches!(
                line.category,
                Category::FruitVeg | Category::Dairy | Category::Beverages
            );
            assert_eq!(line.organic, expected, "{:?}", line.category);
        }
        assert!((outcome.report.after - 0.5).abs() < 1e-12);
    }

    #[test]
    fn welfare_flag_never_touches_plant_or_non_food_lines() {
        let lines = four_of_each_category();
        let flag = WelfareFlag {
            categories: NudgePlan::default().welfare_categories,
        };
        assert!(lines.iter().filter(|line| !line.is_animal).all(|line| !flag.in_base(line)));

        let mut rng = StdRng::from_seed([7_u8; 32]);
        let outcome = adjust(&lines, &flag, &raise_all(ShareTarget::new(1.0, 0.0)), &mut rng);
        for line in outcome.records.iter() {
            assert_eq!(line.welfare_certified, line.is_animal, "{:?}", line.category);
        }
        assert_eq!(outcome.report.after, 1.0);
    }

    #[test]
    fn fish_flags_rewrite_only_unselective_or_distant_fish_lines() {
        let mut lines = four_of_each_category();
        lines.push(ProcurementLine {
            fishing_method: Some(FishingMethod::Snurrevod),
            fao_area: Some(FaoArea::Area3a),
            ..procurement_line(Category::Fish, 5.0)
        });
        let mut rng = StdRng::from_seed([8_u8; 32]);

        let method = adjust(
            &lines,
            &FishMethodFlag,
            &raise_all(ShareTarget::new(1.0, 0.0)),
            &mut rng,
        );
        let NudgeAction::Flipped { ref sampled, .. } = method.report.action else {
            panic!("expected a flip");
        };
        assert_eq!(sampled.len(), 4);
        assert!(
            sampled
                .iter()
                .all(|&idx| lines[idx].fishing_method == Some(FishingMethod::Trawl))
        );
        assert_eq!(method.report.after, 1.0);

        let area = adjust(
            &method.records,
            &FishAreaFlag,
            &raise_all(ShareTarget::new(1.0, 0.0)),
            &mut rng,
        );
        assert_eq!(area.report.changed(), 4);
        assert_eq!(area.report.after, 1.0);

        for (before, after) in lines.iter().zip(area.records.iter()) {
            if before.is_fish() {
                let catch = after.fishing_method.unwrap();
                let region = after.fao_area.unwrap();
                assert!(FishingMethod::SELECTIVE.contains(&catch));
                assert!(FaoArea::NEAR.contains(&region));
            } else {
                assert_eq!(after, before);
                assert_eq!(after.fishing_method, None);
                assert_eq!(after.fao_area, None);
            }
        }
        assert_eq!(area.records.last(), lines.last());
    }

    #[test]
    fn lowering_a_fish_flag_draws_from_the_other_set() {
        let line = ProcurementLine {
            fishing_method: Some(FishingMethod::Line),
            fao_area: Some(FaoArea::Area3b),
            ..procurement_line(Category::Fish, 2.0)
        };
        let mut rng = StdRng::from_seed([9_u8; 32]);
        for _ in 0..6 {
            let mut copy = line.clone();
            assert!(FishMethodFlag.apply(&mut copy, false, &mut rng));
            assert_eq!(copy.fishing_method, Some(FishingMethod::Trawl));
            assert!(FishAreaFlag.apply(&mut copy, false, &mut rng));
            assert!(FaoArea::OTHER.contains(&copy.fao_area.unwrap()));
            assert!(!FishAreaFlag.apply(&mut copy, false, &mut rng));
        }
    }

    #[test]
    fn direction_respects_band_and_mode() {
        let bidirectional = spec(0.65, 0.03, 0.1);
        assert_eq!(bidirectional.direction(0.66), None);
        assert_eq!(bidirectional.direction(0.50), Some(true));
        assert_eq!(bidirectional.direction(0.80), Some(false));

        let floor = NudgeSpec {
            mode: NudgeMode::RaiseOnly,
            ..bidirectional
        };
        assert_eq!(floor.direction(0.50), Some(true));
        assert_eq!(floor.direction(0.80), None);
    }
}

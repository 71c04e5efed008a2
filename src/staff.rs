use chrono::{Datelike, Days, Months, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::info;

use crate::config::{BusinessUnitSpec, StaffConfig};
use crate::data::{EmploymentType, Gender, StaffMember, TurnoverRisk};
use crate::errors::SynthError;
use crate::utils::{chance, ratio_or_zero, round_to, sample_normal};

/// Employees hired less than this many months ago get reduced training odds.
const NEW_HIRE_MONTHS: u32 = 6;
/// Days after hiring when the last training session may fall, `[low, high)`.
const LAST_TRAINING_OFFSET_DAYS: (u64, u64) = (30, 400);

/// Band a staff member's turnover risk.
///
/// `High` when completion is below 50 % or satisfaction below 6, `Medium`
/// when completion is below 80 % or satisfaction below 7, `Low` otherwise.
pub fn turnover_risk(training_completion: f64, satisfaction: f64) -> TurnoverRisk {
    if training_completion < 0.5 || satisfaction < 6.0 {
        TurnoverRisk::High
    } else if training_completion < 0.8 || satisfaction < 7.0 {
        TurnoverRisk::Medium
    } else {
        TurnoverRisk::Low
    }
}

/// Whole months between `hire` and `reference`, never less than one.
pub fn tenure_months(hire: NaiveDate, reference: NaiveDate) -> u32 {
    let months = (reference.year() - hire.year()) * 12 + reference.month() as i32
        - hire.month() as i32;
    months.max(1) as u32
}

/// Generates the staff table.
pub struct StaffGenerator<'c> {
    config: &'c StaffConfig,
    units: &'c [BusinessUnitSpec],
}

impl<'c> StaffGenerator<'c> {
    /// Bind the generator to its sampling parameters and the unit list.
    pub fn new(config: &'c StaffConfig, units: &'c [BusinessUnitSpec]) -> Self {
        Self { config, units }
    }

    /// Draw `employee_count` members with ids `E001`, `E002`, ...
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<StaffMember>, SynthError> {
        let hiring_start = self
            .config
            .reference_date
            .checked_sub_months(Months::new(self.config.hiring_window_months))
            .ok_or_else(|| {
                SynthError::Configuration(format!(
                    "hiring window of {} months reaches before the supported date range",
                    self.config.hiring_window_months
                ))
            })?;
        let members = (1..=self.config.employee_count)
            .map(|index| self.draw_member(index, hiring_start, rng))
            .collect::<Result<Vec<_>, _>>()?;
        info!(rows = members.len(), "staff table generated");
        Ok(members)
    }

    fn draw_member<R: Rng + ?Sized>(
        &self,
        index: usize,
        hiring_start: NaiveDate,
        rng: &mut R,
    ) -> Result<StaffMember, SynthError> {
        let config = self.config;
        let reference = config.reference_date;

        let first = config.first_names.choose(rng);
        let last = config.last_names.choose(rng);
        let name = match (first, last) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            _ => {
                return Err(SynthError::Configuration(
                    "staff name pools must not be empty".to_string(),
                ));
            }
        };
        let gender = if rng.random::<bool>() {
            Gender::Male
        } else {
            Gender::Female
        };
        let age = config.ages.sample(rng);
        let unit = self
            .units
            .choose(rng)
            .ok_or_else(|| SynthError::Configuration("no business units".to_string()))?;
        let (department, roles) = config
            .departments
            .get_index(rng.random_range(0..config.departments.len().max(1)))
            .ok_or_else(|| SynthError::Configuration("no departments".to_string()))?;
        let role = roles
            .choose(rng)
            .ok_or_else(|| SynthError::missing("department roles", department.as_str()))?;
        let role_spec = config.role(role)?;

        let window_days = (reference - hiring_start).num_days().max(0) as u64;
        let hire_date = hiring_start
            .checked_add_days(Days::new(rng.random_range(0..=window_days)))
            .unwrap_or(reference);
        let tenure = tenure_months(hire_date, reference);
        let employment_type = if chance(rng, config.full_time_share) {
            EmploymentType::FullTime
        } else {
            EmploymentType::PartTime
        };

        let monthly_hours = match employment_type {
            EmploymentType::FullTime => config.full_time_hours,
            EmploymentType::PartTime => config.part_time_hours,
        };
        let hours_worked = round_to(
            sample_normal(rng, f64::from(monthly_hours) * 0.95, 5.0).max(0.0),
            0,
        );
        let salary = round_to(
            sample_normal(rng, role_spec.base_salary_dkk, config.salary_std_dev_dkk),
            0,
        );

        let required = f64::from(role_spec.required_training_hours);
        let completed = if tenure < NEW_HIRE_MONTHS {
            rng.random_range(0.0..=required * 0.5)
        } else {
            rng.random_range(required * 0.4..=required)
        };
        let completion = round_to(ratio_or_zero(completed, required), 2);

        let mentor_assigned = chance(rng, config.mentor_share);
        let satisfaction = if mentor_assigned {
            sample_normal(rng, 7.5, 1.0)
        } else {
            sample_normal(rng, 6.5, 1.2)
        };
        let satisfaction = round_to(satisfaction, 1).clamp(1.0, 10.0);
        let performance =
            round_to(sample_normal(rng, 3.5 + completion * 1.5, 0.7), 1).clamp(1.0, 5.0);

        let (low, high) = LAST_TRAINING_OFFSET_DAYS;
        let last_training_date = hire_date
            .checked_add_days(Days::new(rng.random_range(low..high)))
            .filter(|date| *date <= reference);

        Ok(StaffMember {
            employee_id: format!("E{index:03}"),
            name,
            gender,
            age,
            business_unit: unit.name.clone(),
            unit_type: unit.unit_type,
            department: department.clone(),
            role: role.clone(),
            employment_type,
            hire_date,
            tenure_months: tenure,
            monthly_hours,
            hours_worked,
            salary_dkk: salary,
            training_hours_completed: round_to(completed, 1),
            required_training_hours: role_spec.required_training_hours,
            training_completion_pct: round_to(completion * 100.0, 1),
            mentor_assigned,
            satisfaction_score: satisfaction,
            turnover_risk: turnover_risk(completion, satisfaction),
            last_training_date,
            performance_score: performance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SynthConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn risk_bands() {
        assert_eq!(turnover_risk(0.4, 9.0), TurnoverRisk::High);
        assert_eq!(turnover_risk(0.95, 5.9), TurnoverRisk::High);
        assert_eq!(turnover_risk(0.7, 8.0), TurnoverRisk::Medium);
        assert_eq!(turnover_risk(0.9, 6.5), TurnoverRisk::Medium);
        assert_eq!(turnover_risk(0.8, 7.0), TurnoverRisk::Low);
    }

    #[test]
    fn tenure_is_at_least_one_month() {
        let reference = date(2025, 3, 31);
        assert_eq!(tenure_months(date(2025, 3, 2), reference), 1);
        assert_eq!(tenure_months(date(2024, 12, 15), reference), 3);
        assert_eq!(tenure_months(date(2022, 3, 31), reference), 36);
    }

    #[test]
    fn members_respect_ranges_and_references() {
        let config = SynthConfig::default();
        let generator = StaffGenerator::new(&config.staff, &config.business_units);
        let mut rng = StdRng::from_seed([11_u8; 32]);
        let members = generator.generate(&mut rng).expect("staff");

        assert_eq!(members.len(), 100);
        assert_eq!(members[0].employee_id, "E001");
        assert_eq!(members[99].employee_id, "E100");
        let reference = config.staff.reference_date;
        for member in &members {
            assert!((18..60).contains(&member.age));
            assert!(member.tenure_months >= 1);
            assert!(member.hire_date <= reference);
            assert!(member.hire_date >= date(2022, 3, 31));
            assert!((1.0..=10.0).contains(&member.satisfaction_score));
            assert!((1.0..=5.0).contains(&member.performance_score));
            assert!(member.training_completion_pct <= 100.0);
            if let Some(last) = member.last_training_date {
                assert!(last > member.hire_date && last <= reference);
            }
            let roles = &config.staff.departments[&member.department];
            assert!(roles.contains(&member.role));
            let spec = config.staff.role(&member.role).unwrap();
            assert_eq!(member.required_training_hours, spec.required_training_hours);
            let expected_hours = match member.employment_type {
                EmploymentType::FullTime => 160,
                EmploymentType::PartTime => 80,
            };
            assert_eq!(member.monthly_hours, expected_hours);
        }
    }

    #[test]
    fn risk_column_agrees_with_banding() {
        let config = SynthConfig::default();
        let generator = StaffGenerator::new(&config.staff, &config.business_units);
        let members = generator.generate(&mut StdRng::seed_from_u64(5)).unwrap();
        for member in &members {
            let completion = member.training_completion_pct / 100.0;
            assert_eq!(
                member.turnover_risk,
                turnover_risk(completion, member.satisfaction_score)
            );
        }
    }
}

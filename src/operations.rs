use rand::Rng;
use tracing::info;

use crate::config::{BusinessUnitSpec, OperationsConfig, Period};
use crate::data::OperationsDay;
use crate::utils::{ratio_or_zero, round_to, sample_normal};

/// Draws one operating-figures row per business unit and day.
pub struct OperationsGenerator<'c> {
    config: &'c OperationsConfig,
    units: &'c [BusinessUnitSpec],
    period: Period,
}

impl<'c> OperationsGenerator<'c> {
    /// Bind the generator to its sampling parameters.
    pub fn new(
        config: &'c OperationsConfig,
        units: &'c [BusinessUnitSpec],
        period: Period,
    ) -> Self {
        Self {
            config,
            units,
            period,
        }
    }

    /// Generate `period.len() * units.len()` rows, ordered by date then unit.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<OperationsDay> {
        let mut days = Vec::with_capacity(self.period.len() * self.units.len());
        for date in self.period.days() {
            for unit in self.units {
                days.push(self.draw_day(date, unit, rng));
            }
        }
        info!(rows = days.len(), "operations table generated");
        days
    }

    fn draw_day<R: Rng + ?Sized>(
        &self,
        date: chrono::NaiveDate,
        unit: &BusinessUnitSpec,
        rng: &mut R,
    ) -> OperationsDay {
        let profile = self.config.profile(unit.unit_type);
        let revenue = profile.revenue_dkk.sample(rng);
        let guests = profile.guests.sample(rng);
        let organic_pct = profile.organic_pct.sample(rng);
        let local_pct = profile.local_supplier_pct.sample(rng);

        let mut cost_factor = self.config.cost_factor.sample(rng);
        if organic_pct > self.config.organic_cost_threshold_pct {
            cost_factor += self.config.organic_cost_bump;
        }
        let costs = revenue * cost_factor;

        let waste = sample_normal(
            rng,
            self.config.waste_per_guest_kg * f64::from(guests),
            self.config.waste_std_dev_kg,
        )
        .max(0.0);
        let hours = profile.hours_worked.sample(rng).max(0.0);
        let employees = self.config.employees.sample(rng);

        let revenue_dkk = round_to(revenue, 2);
        let costs_dkk = round_to(costs, 2);
        let waste_kg = round_to(waste, 2);
        let hours_worked = round_to(hours, 1);
        let kpis =
            DerivedKpis::from_figures(revenue_dkk, costs_dkk, guests, waste_kg, hours_worked);
        OperationsDay {
            date,
            business_unit: unit.name.clone(),
            unit_type: unit.unit_type,
            city: unit.city.clone(),
            revenue_dkk,
            costs_dkk,
            guests,
            waste_kg,
            hours_worked,
            organic_percentage: round_to(organic_pct, 1),
            local_supplier_percentage: round_to(local_pct, 1),
            employee_count: employees,
            profit_dkk: kpis.profit_dkk,
            profit_margin_pct: kpis.profit_margin_pct,
            waste_per_guest_kg: kpis.waste_per_guest_kg,
            revenue_per_hour: kpis.revenue_per_hour,
        }
    }
}

/// Ratios computed from the rounded daily figures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedKpis {
    /// Revenue minus costs.
    pub profit_dkk: f64,
    /// Profit over revenue, in percent.
    pub profit_margin_pct: f64,
    /// Waste per guest in kg.
    pub waste_per_guest_kg: f64,
    /// Revenue per staff hour.
    pub revenue_per_hour: f64,
}

impl DerivedKpis {
    /// Any ratio with a zero denominator is reported as `0.0`.
    pub fn from_figures(
        revenue_dkk: f64,
        costs_dkk: f64,
        guests: u32,
        waste_kg: f64,
        hours_worked: f64,
    ) -> Self {
        let profit = round_to(revenue_dkk - costs_dkk, 2);
        Self {
            profit_dkk: profit,
            profit_margin_pct: round_to(ratio_or_zero(profit, revenue_dkk) * 100.0, 2),
            waste_per_guest_kg: round_to(ratio_or_zero(waste_kg, f64::from(guests)), 3),
            revenue_per_hour: round_to(ratio_or_zero(revenue_dkk, hours_worked), 2),
        }
    }
}

use tracing::info;

use crate::adjuster::{PortfolioTuner, TuningReport};
use crate::config::{ProductSpec, SupplierSpec, SynthConfig};
use crate::constants::generation::{
    OPERATIONS_SEED_LABEL, PROCUREMENT_SEED_LABEL, STAFF_SEED_LABEL, TUNING_SEED_LABEL,
};
use crate::data::{OperationsDay, ProcurementLine, StaffMember};
use crate::errors::SynthError;
use crate::hash::derive_seed;
use crate::operations::OperationsGenerator;
use crate::procurement::{ProcurementGenerator, label_non_food};
use crate::rng::DeterministicRng;
use crate::staff::StaffGenerator;

/// Every generated table plus the tuning audit trail.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    /// Procurement lines, tuned unless tuning was skipped.
    pub procurement: Vec<ProcurementLine>,
    /// Product catalog.
    pub products: Vec<ProductSpec>,
    /// Supplier master data.
    pub suppliers: Vec<SupplierSpec>,
    /// One row per unit and day.
    pub operations: Vec<OperationsDay>,
    /// One row per employee.
    pub staff: Vec<StaffMember>,
    /// Absent when tuning was skipped.
    pub tuning: Option<TuningReport>,
}

/// Seeded RNG for one table; each table draws from its own stream.
pub fn table_rng(seed: u64, label: &str) -> DeterministicRng {
    DeterministicRng::new(derive_seed(seed, label))
}

/// Generate all tables from `config`.
///
/// The configuration is validated first. With `tune` set, procurement lines
/// go through the portfolio tuner before non-food labelling.
pub fn generate_dataset(config: &SynthConfig, tune: bool) -> Result<Dataset, SynthError> {
    config.validate()?;
    info!(
        seed = config.seed,
        start = %config.period.start,
        end = %config.period.end,
        units = config.business_units.len(),
        tune,
        "generating dataset"
    );

    let mut procurement_rng = table_rng(config.seed, PROCUREMENT_SEED_LABEL);
    let mut procurement = ProcurementGenerator::new(
        &config.procurement,
        &config.business_units,
        config.period,
        &config.targets,
    )
    .generate(&mut procurement_rng)?;

    let tuning = if tune {
        let tuner = PortfolioTuner::new(config.nudge.clone(), config.targets.clone());
        let mut tuning_rng = table_rng(config.seed, TUNING_SEED_LABEL);
        let (tuned, report) = tuner.tune(procurement, &mut tuning_rng);
        procurement = tuned;
        Some(report)
    } else {
        None
    };
    label_non_food(&mut procurement, &config.procurement)?;

    let mut operations_rng = table_rng(config.seed, OPERATIONS_SEED_LABEL);
    let operations =
        OperationsGenerator::new(&config.operations, &config.business_units, config.period)
            .generate(&mut operations_rng);

    let mut staff_rng = table_rng(config.seed, STAFF_SEED_LABEL);
    let staff =
        StaffGenerator::new(&config.staff, &config.business_units).generate(&mut staff_rng)?;

    Ok(Dataset {
        procurement,
        products: config.procurement.products.clone(),
        suppliers: config.procurement.suppliers.clone(),
        operations,
        staff,
        tuning,
    })
}

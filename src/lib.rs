#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Volume-weighted portfolio nudging and the tuning driver.
pub mod adjuster;
/// CLI runners behind the `loca_generate` and `loca_profile` binaries.
pub mod apps;
/// Generation configuration with defaults and JSON overrides.
pub mod config;
/// Centralized constants: seeds, targets, nudge plan, file names.
pub mod constants;
/// Record types for every generated table.
pub mod data;
/// CSV and JSON writers for generated tables.
pub mod export;
mod hash;
/// Weighted share metrics and target checks.
pub mod metrics;
/// Daily operations table generator.
pub mod operations;
/// End-to-end dataset generation.
pub mod pipeline;
/// Procurement line generator and non-food labelling.
pub mod procurement;
/// Column profiling for CSV tables.
pub mod profile;
/// Deterministic RNG used by every generator.
pub mod rng;
/// Staff table generator.
pub mod staff;
/// Shared type aliases.
pub mod types;
/// Numeric helpers.
pub mod utils;

mod errors;

pub use adjuster::{
    FishAreaFlag, FishMethodFlag, NudgeAction, NudgeMode, NudgeOutcome, NudgeReport, NudgeSpec,
    OrganicFlag, PortfolioFlag, PortfolioTuner, TuningReport, WelfareFlag, adjust,
};
pub use config::{NudgePlan, PortfolioTargets, ShareTarget, SynthConfig};
pub use data::{
    Category, FaoArea, FishingMethod, OperationsDay, ProcurementLine, StaffMember, TurnoverRisk,
    UnitType,
};
pub use errors::SynthError;
pub use export::{ExportedFile, export_dataset, write_csv};
pub use metrics::{PortfolioSnapshot, TargetCheck, Weighted, weighted_share};
pub use pipeline::{Dataset, generate_dataset};
pub use profile::{ColumnKind, ColumnProfile, ProfileReport, profile_csv, profile_directory};
pub use rng::DeterministicRng;
pub use types::{
    BusinessUnitName, CityName, ColumnName, CountryCode, DepartmentName, EmployeeId, MetricName,
    ProductName, RoleName, SupplierName,
};

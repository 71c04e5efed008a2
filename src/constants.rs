/// Constants used when seeding and scheduling dataset generation.
pub mod generation {
    /// Default RNG seed for every generated table.
    pub const DEFAULT_SEED: u64 = 42;
    /// Label mixed into the seed for the procurement table.
    pub const PROCUREMENT_SEED_LABEL: &str = "procurement";
    /// Label mixed into the seed for the operations table.
    pub const OPERATIONS_SEED_LABEL: &str = "operations";
    /// Label mixed into the seed for the staff table.
    pub const STAFF_SEED_LABEL: &str = "staff";
    /// Label mixed into the seed for the portfolio tuning passes.
    pub const TUNING_SEED_LABEL: &str = "portfolio_tuning";
    /// First day of the default generation period as `(year, month, day)`.
    pub const DEFAULT_PERIOD_START: (i32, u32, u32) = (2025, 1, 1);
    /// Last day (inclusive) of the default generation period.
    pub const DEFAULT_PERIOD_END: (i32, u32, u32) = (2025, 3, 31);
}

/// Portfolio metric names and default share targets (all weighted by volume).
pub mod targets {
    use crate::types::MetricName;

    /// Plant-based volume share over all lines (beverages count as plant-based).
    pub const METRIC_PLANT_SHARE: MetricName = "plant_share";
    /// Organic volume share over all lines.
    pub const METRIC_ORGANIC_SHARE: MetricName = "organic_share";
    /// Welfare-certified volume share over animal-origin lines.
    pub const METRIC_ANIMAL_WELFARE_SHARE: MetricName = "animal_welfare_share";
    /// Selective fishing-method volume share over fish lines.
    pub const METRIC_FISH_METHOD_SHARE: MetricName = "fish_selective_method_share";
    /// Near-Denmark FAO 27 sub-area volume share over fish lines.
    pub const METRIC_FISH_AREA_SHARE: MetricName = "fish_near_area_share";

    /// Plant-based share target.
    pub const PLANT_SHARE: f64 = 0.748;
    /// Plant share tolerance.
    pub const PLANT_TOLERANCE: f64 = 0.02;
    /// Organic share target.
    pub const ORGANIC_SHARE: f64 = 0.65;
    /// Organic share tolerance.
    pub const ORGANIC_TOLERANCE: f64 = 0.03;
    /// Hard floor for the welfare share; the nudge aims at [`ANIMAL_WELFARE_TARGET`].
    pub const ANIMAL_WELFARE_MIN: f64 = 0.50;
    /// Animal welfare share target.
    pub const ANIMAL_WELFARE_TARGET: f64 = 0.78;
    /// Minimum selective fishing method share.
    pub const FISH_METHOD_SHARE: f64 = 0.75;
    /// Minimum near-Denmark FAO area share.
    pub const FISH_AREA_SHARE: f64 = 0.50;
}

/// Pass counts and sample fractions for the nudge driver.
pub mod nudge {
    /// Organic nudge passes.
    pub const ORGANIC_PASSES: usize = 4;
    /// Welfare nudge passes.
    pub const WELFARE_PASSES: usize = 3;
    /// Fish nudge rounds.
    pub const FISH_PASSES: usize = 1;
    /// Organic sample fraction.
    pub const ORGANIC_SAMPLE_FRACTION: f64 = 0.10;
    /// Welfare sample fraction.
    pub const WELFARE_SAMPLE_FRACTION: f64 = 0.15;
    /// Fish sample fraction.
    pub const FISH_SAMPLE_FRACTION: f64 = 0.30;
}

/// File names used for exported tables and reports.
pub mod export {
    /// Procurement lines table.
    pub const PROCUREMENT_LINES_FILE: &str = "procurement_lines.csv";
    /// Product catalog table.
    pub const PRODUCTS_CATALOG_FILE: &str = "products_catalog.csv";
    /// Supplier table.
    pub const SUPPLIERS_FILE: &str = "suppliers.csv";
    /// Daily operations table.
    pub const OPERATIONS_FILE: &str = "operations_2025.csv";
    /// Staff table.
    pub const STAFF_FILE: &str = "staff_data.csv";
    /// Tuning audit report.
    pub const TUNING_REPORT_FILE: &str = "portfolio_tuning.json";
    /// Default directory for exported tables.
    pub const DEFAULT_OUTPUT_DIR: &str = "data";
    /// Default directory for profiling reports.
    pub const DEFAULT_REPORT_DIR: &str = "docs/reports";
}

/// Constants used by CSV profiling.
pub mod profile {
    /// Most frequent values kept per categorical column.
    pub const TOP_VALUES: usize = 5;
    /// Extension of input tables picked up when profiling a directory.
    pub const TABLE_EXTENSION: &str = "csv";
    /// Suffix appended to a table's file stem to name its report.
    pub const REPORT_SUFFIX: &str = "_profile.json";
    /// Organisation name used in report titles.
    pub const TITLE_PREFIX: &str = "Loca Gruppen";
}

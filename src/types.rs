/// Business unit (restaurant or canteen) name.
/// Examples: `Almanak i Operaen`, `Bankdata Kantine`
pub type BusinessUnitName = String;
/// City a business unit operates in.
/// Examples: `Copenhagen`, `Fredericia`
pub type CityName = String;
/// Product name from the procurement catalog.
/// Examples: `Carrots`, `White Fish`, `Cleaning Chemicals`
pub type ProductName = String;
/// Supplier name from the supplier table.
/// Examples: `Aarstiderne`, `AquaSea`
pub type SupplierName = String;
/// ISO 3166-1 alpha-2 country code of a supplier.
/// Examples: `DK`, `NO`
pub type CountryCode = String;
/// Department label in the staff table.
/// Examples: `Kitchen`, `Procurement`
pub type DepartmentName = String;
/// Role label in the staff table.
/// Examples: `Sous Chef`, `Warehouse Assistant`
pub type RoleName = String;
/// Zero-padded employee identifier.
/// Example: `E007`
pub type EmployeeId = String;
/// Name of a portfolio metric used in targets and nudge reports.
/// Examples: `organic_share`, `fish_selective_method_share`
pub type MetricName = &'static str;
/// Column header of an exported table.
/// Examples: `volume_kg_l`, `turnover_risk`
pub type ColumnName = String;

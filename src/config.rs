use chrono::NaiveDate;
use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::generation::{DEFAULT_PERIOD_END, DEFAULT_PERIOD_START, DEFAULT_SEED};
use crate::constants::nudge::{
    FISH_PASSES, FISH_SAMPLE_FRACTION, ORGANIC_PASSES, ORGANIC_SAMPLE_FRACTION, WELFARE_PASSES,
    WELFARE_SAMPLE_FRACTION,
};
use crate::constants::targets;
use crate::data::{Category, MeasureUnit, UnitType, WelfareScheme};
use crate::errors::SynthError;
use crate::types::{
    BusinessUnitName, CityName, CountryCode, DepartmentName, ProductName, RoleName, SupplierName,
};
use crate::utils::sample_normal;

/// Half-open uniform range `[low, high)` over reals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    /// Inclusive lower bound.
    pub low: f64,
    /// Exclusive upper bound.
    pub high: f64,
}

impl UniformRange {
    /// Range over `[low, high)`.
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Draw one value; a collapsed range returns `low`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.high <= self.low {
            return self.low;
        }
        rng.random_range(self.low..self.high)
    }

    fn validate(&self, name: &str) -> Result<(), SynthError> {
        if !(self.low.is_finite() && self.high.is_finite()) || self.high <= self.low {
            return Err(SynthError::Configuration(format!(
                "{name} must satisfy low < high (got {}..{})",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Half-open integer range `[low, high)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    /// Inclusive lower bound.
    pub low: u32,
    /// Exclusive upper bound.
    pub high: u32,
}

impl IntRange {
    /// Range over `[low, high)`.
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// Draw one value; a collapsed range returns `low`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.high <= self.low {
            return self.low;
        }
        rng.random_range(self.low..self.high)
    }

    fn validate(&self, name: &str) -> Result<(), SynthError> {
        if self.high <= self.low {
            return Err(SynthError::Configuration(format!(
                "{name} must satisfy low < high (got {}..{})",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Parameters of a normal distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    /// Mean.
    pub mean: f64,
    /// Standard deviation; zero makes every draw the mean.
    pub std_dev: f64,
}

impl NormalParams {
    /// Distribution with the given mean and spread.
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Draw one value.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        sample_normal(rng, self.mean, self.std_dev)
    }

    fn validate(&self, name: &str) -> Result<(), SynthError> {
        if !self.mean.is_finite() || !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(SynthError::Configuration(format!(
                "{name} needs a finite mean and a non-negative std_dev"
            )));
        }
        Ok(())
    }
}

/// Inclusive date range covered by the daily tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First day, inclusive.
    pub start: NaiveDate,
    /// Last day, inclusive.
    pub end: NaiveDate,
}

impl Default for Period {
    fn default() -> Self {
        Self {
            start: ymd(DEFAULT_PERIOD_START),
            end: ymd(DEFAULT_PERIOD_END),
        }
    }
}

impl Period {
    /// Every day from `start` to `end`, inclusive.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |day| *day <= self.end)
    }

    /// Number of days in the period.
    pub fn len(&self) -> usize {
        let span = (self.end - self.start).num_days();
        if span < 0 { 0 } else { span as usize + 1 }
    }

    /// `true` when `end` precedes `start`.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn ymd((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// A restaurant or canteen of the group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessUnitSpec {
    /// Display name, also the join key in every table.
    pub name: BusinessUnitName,
    /// Restaurant or canteen.
    pub unit_type: UnitType,
    /// City the unit operates in.
    pub city: CityName,
}

impl BusinessUnitSpec {
    /// Unit named `name` in `city`.
    pub fn new(name: &str, unit_type: UnitType, city: &str) -> Self {
        Self {
            name: name.to_string(),
            unit_type,
            city: city.to_string(),
        }
    }
}

fn default_business_units() -> Vec<BusinessUnitSpec> {
    use UnitType::{Canteen, Restaurant};
    vec![
        BusinessUnitSpec::new("Almanak i Operaen", Restaurant, "Copenhagen"),
        BusinessUnitSpec::new("Almanak i Kilden", Restaurant, "Hellerup"),
        BusinessUnitSpec::new("Radio", Restaurant, "Copenhagen"),
        BusinessUnitSpec::new("Format", Restaurant, "Copenhagen"),
        BusinessUnitSpec::new("Posthallen", Restaurant, "Copenhagen"),
        BusinessUnitSpec::new("Langelinie Kantine", Canteen, "Copenhagen"),
        BusinessUnitSpec::new("Bankdata Kantine", Canteen, "Fredericia"),
        BusinessUnitSpec::new("Carlsberg Kantine", Canteen, "Valby"),
    ]
}

/// Catalog entry: one purchasable product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductSpec {
    /// Product name.
    pub name: ProductName,
    /// Category driving price, volume, and portfolio rules.
    pub category: Category,
    /// Animal-origin product.
    pub is_animal: bool,
    /// Purchase unit.
    pub unit: MeasureUnit,
    /// Emission factor in kg CO2e per kg or litre.
    pub co2_per_unit: f64,
    /// Welfare labelling scheme; only products under a scheme get a drawn welfare flag.
    pub welfare_scheme: Option<WelfareScheme>,
}

impl ProductSpec {
    fn new(name: &str, category: Category, unit: MeasureUnit, co2_per_unit: f64) -> Self {
        Self {
            name: name.to_string(),
            category,
            is_animal: category.is_animal_origin(),
            unit,
            co2_per_unit,
            welfare_scheme: None,
        }
    }

    fn with_scheme(mut self, scheme: WelfareScheme) -> Self {
        self.welfare_scheme = Some(scheme);
        self
    }
}

fn default_products() -> Vec<ProductSpec> {
    use Category::*;
    use MeasureUnit::{Kg, L};
    vec![
        ProductSpec::new("Carrots", FruitVeg, Kg, 0.15),
        ProductSpec::new("Potatoes", FruitVeg, Kg, 0.20),
        ProductSpec::new("Tomatoes", FruitVeg, Kg, 0.40),
        ProductSpec::new("Leafy Greens", FruitVeg, Kg, 0.25),
        ProductSpec::new("Apples", FruitVeg, Kg, 0.30),
        ProductSpec::new("Milk", Dairy, L, 1.20),
        ProductSpec::new("Butter", Dairy, Kg, 8.00),
        ProductSpec::new("Cheese", Dairy, Kg, 6.00),
        ProductSpec::new("Yogurt", Dairy, Kg, 1.80),
        ProductSpec::new("Pork", MeatPoultry, Kg, 6.00).with_scheme(WelfareScheme::Pork),
        ProductSpec::new("Chicken", MeatPoultry, Kg, 4.50).with_scheme(WelfareScheme::Chicken),
        ProductSpec::new("Beef", MeatPoultry, Kg, 27.0).with_scheme(WelfareScheme::BeefVeal),
        ProductSpec::new("Veal", MeatPoultry, Kg, 22.0).with_scheme(WelfareScheme::BeefVeal),
        ProductSpec::new("White Fish", Fish, Kg, 3.50),
        ProductSpec::new("Salmon", Fish, Kg, 5.00),
        ProductSpec::new("Soft Drinks", Beverages, L, 0.50),
        ProductSpec::new("Beer", Beverages, L, 0.70),
        ProductSpec::new("Juice", Beverages, L, 0.60),
        ProductSpec::new("Coffee Beans", Beverages, Kg, 4.00),
        ProductSpec::new("Cleaning Chemicals", NonFood, L, 1.50),
        ProductSpec::new("Paper Products", NonFood, Kg, 1.00),
    ]
}

/// Supplier master data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupplierSpec {
    /// Supplier name.
    pub name: SupplierName,
    /// ISO country code.
    pub country: CountryCode,
    /// Holds a Danish organic certification (raises organic odds).
    pub danish_certified: bool,
    /// Can deliver Nordic Swan Ecolabel products.
    pub swan_label_capable: bool,
}

impl SupplierSpec {
    fn new(name: &str, country: &str, danish_certified: bool, swan_label_capable: bool) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            danish_certified,
            swan_label_capable,
        }
    }

    /// Supplier is based in Denmark.
    pub fn is_domestic(&self) -> bool {
        self.country == "DK"
    }
}

fn default_suppliers() -> Vec<SupplierSpec> {
    vec![
        SupplierSpec::new("Aarstiderne", "DK", true, true),
        SupplierSpec::new("Hørkram", "DK", true, false),
        SupplierSpec::new("Carlsberg", "DK", false, false),
        SupplierSpec::new("Arla", "DK", true, true),
        SupplierSpec::new("Danish Crown", "DK", true, false),
        SupplierSpec::new("MSC Nordics", "DK", false, false),
        SupplierSpec::new("EuroFoods GmbH", "DE", false, false),
        SupplierSpec::new("Nordic Clean A/S", "DK", false, true),
        SupplierSpec::new("Italia Import Srl", "IT", false, false),
        SupplierSpec::new("AquaSea", "NO", false, false),
    ]
}

fn default_supplier_routes() -> IndexMap<Category, Vec<SupplierName>> {
    let route = |names: &[&str]| -> Vec<SupplierName> {
        names.iter().map(|name| name.to_string()).collect()
    };
    IndexMap::from([
        (
            Category::FruitVeg,
            route(&["Aarstiderne", "Hørkram", "EuroFoods GmbH"]),
        ),
        (Category::Dairy, route(&["Arla", "Hørkram"])),
        (
            Category::MeatPoultry,
            route(&["Danish Crown", "Hørkram", "EuroFoods GmbH"]),
        ),
        (Category::Fish, route(&["MSC Nordics", "AquaSea"])),
        (
            Category::Beverages,
            route(&["Carlsberg", "EuroFoods GmbH", "Italia Import Srl"]),
        ),
        (Category::NonFood, route(&["Nordic Clean A/S", "Hørkram"])),
    ])
}

fn default_base_prices() -> IndexMap<Category, f64> {
    IndexMap::from([
        (Category::FruitVeg, 18.0),
        (Category::Dairy, 28.0),
        (Category::MeatPoultry, 70.0),
        (Category::Fish, 55.0),
        (Category::Beverages, 22.0),
        (Category::NonFood, 20.0),
    ])
}

/// Per-unit-type volume ranges (kg or L per purchase line).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeRanges {
    /// Food lines at restaurants.
    pub food_restaurant: UniformRange,
    /// Food lines at canteens.
    pub food_canteen: UniformRange,
    /// Non-food lines at restaurants.
    pub non_food_restaurant: UniformRange,
    /// Non-food lines at canteens.
    pub non_food_canteen: UniformRange,
}

impl Default for VolumeRanges {
    fn default() -> Self {
        Self {
            food_restaurant: UniformRange::new(40.0, 200.0),
            food_canteen: UniformRange::new(25.0, 120.0),
            non_food_restaurant: UniformRange::new(10.0, 60.0),
            non_food_canteen: UniformRange::new(8.0, 40.0),
        }
    }
}

impl VolumeRanges {
    /// Volume range for a line of `category` bought by a `unit_type`.
    pub fn for_line(&self, category: Category, unit_type: UnitType) -> UniformRange {
        match (category.is_food(), unit_type) {
            (true, UnitType::Restaurant) => self.food_restaurant,
            (true, UnitType::Canteen) => self.food_canteen,
            (false, UnitType::Restaurant) => self.non_food_restaurant,
            (false, UnitType::Canteen) => self.non_food_canteen,
        }
    }
}

/// Master data and sampling parameters for procurement lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcurementConfig {
    /// Product catalog.
    pub products: Vec<ProductSpec>,
    /// Supplier master data.
    pub suppliers: Vec<SupplierSpec>,
    /// Candidate suppliers per category; a line's supplier is drawn uniformly from these.
    pub supplier_routes: IndexMap<Category, Vec<SupplierName>>,
    /// Base price per kg or litre in DKK, before the organic premium.
    pub base_prices: IndexMap<Category, f64>,
    /// Lines purchased per unit and day, inclusive on both ends.
    pub lines_per_unit_day: (u32, u32),
    /// Volume ranges per line.
    pub volumes: VolumeRanges,
    /// Price multiplier for organic lines.
    pub organic_premium: f64,
    /// Relative standard deviation of the per-line price.
    pub price_noise: f64,
}

impl Default for ProcurementConfig {
    fn default() -> Self {
        Self {
            products: default_products(),
            suppliers: default_suppliers(),
            supplier_routes: default_supplier_routes(),
            base_prices: default_base_prices(),
            lines_per_unit_day: (3, 8),
            volumes: VolumeRanges::default(),
            organic_premium: 1.15,
            price_noise: 0.08,
        }
    }
}

impl ProcurementConfig {
    /// Look up a supplier by name.
    pub fn supplier(&self, name: &str) -> Result<&SupplierSpec, SynthError> {
        self.suppliers
            .iter()
            .find(|supplier| supplier.name == name)
            .ok_or_else(|| SynthError::missing("supplier", name))
    }

    /// Candidate suppliers for a category.
    pub fn route(&self, category: Category) -> Result<&[SupplierName], SynthError> {
        self.supplier_routes
            .get(&category)
            .map(Vec::as_slice)
            .filter(|route| !route.is_empty())
            .ok_or_else(|| SynthError::missing("supplier route", category.label()))
    }

    /// Base price for a category.
    pub fn base_price(&self, category: Category) -> Result<f64, SynthError> {
        self.base_prices
            .get(&category)
            .copied()
            .ok_or_else(|| SynthError::missing("base price", category.label()))
    }

    fn validate(&self) -> Result<(), SynthError> {
        if self.products.is_empty() {
            return Err(SynthError::Configuration(
                "product catalog must not be empty".to_string(),
            ));
        }
        let (min_lines, max_lines) = self.lines_per_unit_day;
        if min_lines > max_lines {
            return Err(SynthError::Configuration(format!(
                "lines_per_unit_day must satisfy min <= max (got {min_lines}..={max_lines})"
            )));
        }
        for product in &self.products {
            self.base_price(product.category)?;
            for supplier in self.route(product.category)? {
                self.supplier(supplier)?;
            }
            if !product.co2_per_unit.is_finite() || product.co2_per_unit < 0.0 {
                return Err(SynthError::Configuration(format!(
                    "product '{}' has an invalid emission factor",
                    product.name
                )));
            }
        }
        self.volumes.food_restaurant.validate("volumes.food_restaurant")?;
        self.volumes.food_canteen.validate("volumes.food_canteen")?;
        self.volumes
            .non_food_restaurant
            .validate("volumes.non_food_restaurant")?;
        self.volumes.non_food_canteen.validate("volumes.non_food_canteen")?;
        if self.price_noise < 0.0 || self.organic_premium <= 0.0 {
            return Err(SynthError::Configuration(
                "price_noise must be >= 0 and organic_premium > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// A target fraction with its accepted tolerance band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShareTarget {
    /// Target share in `[0, 1]`.
    pub target: f64,
    /// Accepted absolute deviation from `target`.
    pub tolerance: f64,
}

impl ShareTarget {
    /// Band `target ± tolerance`.
    pub const fn new(target: f64, tolerance: f64) -> Self {
        Self { target, tolerance }
    }

    /// `true` when `share` lies within `target ± tolerance`.
    pub fn contains(&self, share: f64) -> bool {
        (share - self.target).abs() <= self.tolerance
    }

    fn validate(&self, name: &str) -> Result<(), SynthError> {
        if !(0.0..=1.0).contains(&self.target) || !(0.0..=1.0).contains(&self.tolerance) {
            return Err(SynthError::Configuration(format!(
                "{name} target and tolerance must lie in [0, 1]"
            )));
        }
        Ok(())
    }
}

/// Volume-weighted portfolio targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioTargets {
    /// Reported only; no nudge acts on the plant share.
    pub plant_share: ShareTarget,
    /// Organic share over all lines.
    pub organic_share: ShareTarget,
    /// Floor the welfare share must not fall below.
    pub animal_welfare_min: f64,
    /// Welfare share over animal-origin lines.
    pub animal_welfare: ShareTarget,
    /// Selective catch method share over fish lines.
    pub fish_selective_method: ShareTarget,
    /// Near-Denmark FAO area share over fish lines.
    pub fish_near_area: ShareTarget,
}

impl Default for PortfolioTargets {
    fn default() -> Self {
        Self {
            plant_share: ShareTarget::new(targets::PLANT_SHARE, targets::PLANT_TOLERANCE),
            organic_share: ShareTarget::new(targets::ORGANIC_SHARE, targets::ORGANIC_TOLERANCE),
            animal_welfare_min: targets::ANIMAL_WELFARE_MIN,
            animal_welfare: ShareTarget::new(targets::ANIMAL_WELFARE_TARGET, 0.0),
            fish_selective_method: ShareTarget::new(targets::FISH_METHOD_SHARE, 0.0),
            fish_near_area: ShareTarget::new(targets::FISH_AREA_SHARE, 0.0),
        }
    }
}

impl PortfolioTargets {
    fn validate(&self) -> Result<(), SynthError> {
        self.plant_share.validate("plant_share")?;
        self.organic_share.validate("organic_share")?;
        self.animal_welfare.validate("animal_welfare")?;
        self.fish_selective_method.validate("fish_selective_method")?;
        self.fish_near_area.validate("fish_near_area")?;
        if !(0.0..=1.0).contains(&self.animal_welfare_min) {
            return Err(SynthError::Configuration(
                "animal_welfare_min must lie in [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pass counts, sample fractions, and candidate categories for the nudge driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NudgePlan {
    /// Organic nudge passes.
    pub organic_passes: usize,
    /// Welfare nudge passes.
    pub welfare_passes: usize,
    /// Rounds of the two fish nudges.
    pub fish_passes: usize,
    /// Fraction of eligible lines sampled per organic pass.
    pub organic_sample_fraction: f64,
    /// Fraction of eligible lines sampled per welfare pass.
    pub welfare_sample_fraction: f64,
    /// Fraction of eligible fish lines sampled per fish pass.
    pub fish_sample_fraction: f64,
    /// Categories where flipping the organic flag is plausible.
    pub organic_categories: Vec<Category>,
    /// Animal-origin categories where the welfare flag may be set.
    pub welfare_categories: Vec<Category>,
}

impl Default for NudgePlan {
    fn default() -> Self {
        Self {
            organic_passes: ORGANIC_PASSES,
            welfare_passes: WELFARE_PASSES,
            fish_passes: FISH_PASSES,
            organic_sample_fraction: ORGANIC_SAMPLE_FRACTION,
            welfare_sample_fraction: WELFARE_SAMPLE_FRACTION,
            fish_sample_fraction: FISH_SAMPLE_FRACTION,
            organic_categories: vec![Category::FruitVeg, Category::Dairy, Category::Beverages],
            welfare_categories: vec![Category::MeatPoultry, Category::Dairy, Category::Fish],
        }
    }
}

impl NudgePlan {
    fn validate(&self) -> Result<(), SynthError> {
        for (name, fraction) in [
            ("organic_sample_fraction", self.organic_sample_fraction),
            ("welfare_sample_fraction", self.welfare_sample_fraction),
            ("fish_sample_fraction", self.fish_sample_fraction),
        ] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(SynthError::Configuration(format!(
                    "{name} must lie in [0, 1] (got {fraction})"
                )));
            }
        }
        Ok(())
    }
}

/// Per-unit-type sampling parameters for the operations table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationsProfile {
    /// Daily revenue.
    pub revenue_dkk: UniformRange,
    /// Daily guests.
    pub guests: IntRange,
    /// Organic share of purchases, in percent.
    pub organic_pct: UniformRange,
    /// Local supplier share, in percent.
    pub local_supplier_pct: UniformRange,
    /// Staff hours per day.
    pub hours_worked: NormalParams,
}

impl OperationsProfile {
    fn validate(&self, name: &str) -> Result<(), SynthError> {
        self.revenue_dkk.validate(&format!("{name}.revenue_dkk"))?;
        self.guests.validate(&format!("{name}.guests"))?;
        self.organic_pct.validate(&format!("{name}.organic_pct"))?;
        self.local_supplier_pct
            .validate(&format!("{name}.local_supplier_pct"))?;
        self.hours_worked.validate(&format!("{name}.hours_worked"))
    }
}

/// Sampling parameters for the daily operations table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationsConfig {
    /// Parameters for restaurants.
    pub restaurant: OperationsProfile,
    /// Parameters for canteens.
    pub canteen: OperationsProfile,
    /// Share of revenue spent on costs.
    pub cost_factor: UniformRange,
    /// Organic percentage above which the cost factor is raised.
    pub organic_cost_threshold_pct: f64,
    /// Added to the cost factor above the threshold.
    pub organic_cost_bump: f64,
    /// Expected food waste per guest in kg.
    pub waste_per_guest_kg: f64,
    /// Spread of daily waste in kg.
    pub waste_std_dev_kg: f64,
    /// Employees on duty per day.
    pub employees: IntRange,
}

impl Default for OperationsConfig {
    fn default() -> Self {
        Self {
            restaurant: OperationsProfile {
                revenue_dkk: UniformRange::new(40_000.0, 70_000.0),
                guests: IntRange::new(180, 320),
                organic_pct: UniformRange::new(70.0, 90.0),
                local_supplier_pct: UniformRange::new(60.0, 85.0),
                hours_worked: NormalParams::new(150.0, 15.0),
            },
            canteen: OperationsProfile {
                revenue_dkk: UniformRange::new(15_000.0, 30_000.0),
                guests: IntRange::new(80, 160),
                organic_pct: UniformRange::new(60.0, 80.0),
                local_supplier_pct: UniformRange::new(50.0, 75.0),
                hours_worked: NormalParams::new(110.0, 10.0),
            },
            cost_factor: UniformRange::new(0.6, 0.8),
            organic_cost_threshold_pct: 85.0,
            organic_cost_bump: 0.02,
            waste_per_guest_kg: 0.08,
            waste_std_dev_kg: 2.0,
            employees: IntRange::new(10, 15),
        }
    }
}

impl OperationsConfig {
    /// Parameters for `unit_type`.
    pub fn profile(&self, unit_type: UnitType) -> &OperationsProfile {
        match unit_type {
            UnitType::Restaurant => &self.restaurant,
            UnitType::Canteen => &self.canteen,
        }
    }

    fn validate(&self) -> Result<(), SynthError> {
        self.restaurant.validate("operations.restaurant")?;
        self.canteen.validate("operations.canteen")?;
        self.cost_factor.validate("operations.cost_factor")?;
        self.employees.validate("operations.employees")?;
        if self.waste_std_dev_kg < 0.0 {
            return Err(SynthError::Configuration(
                "operations.waste_std_dev_kg must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Pay and training requirements of a role.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleSpec {
    /// Expected monthly salary.
    pub base_salary_dkk: f64,
    /// Training hours the role requires.
    pub required_training_hours: u32,
}

impl RoleSpec {
    /// Role paying `base_salary_dkk` and requiring `required_training_hours`.
    pub const fn new(base_salary_dkk: f64, required_training_hours: u32) -> Self {
        Self {
            base_salary_dkk,
            required_training_hours,
        }
    }
}

fn default_departments() -> IndexMap<DepartmentName, Vec<RoleName>> {
    let roles = |names: &[&str]| -> Vec<RoleName> {
        names.iter().map(|name| name.to_string()).collect()
    };
    IndexMap::from([
        (
            "Kitchen".to_string(),
            roles(&["Chef", "Sous Chef", "Kitchen Assistant"]),
        ),
        (
            "Service".to_string(),
            roles(&["Waiter", "Cashier", "Barista"]),
        ),
        (
            "Admin".to_string(),
            roles(&["HR Assistant", "Accountant", "Receptionist"]),
        ),
        (
            "Procurement".to_string(),
            roles(&["Procurement Officer", "Warehouse Assistant"]),
        ),
    ])
}

fn default_roles() -> IndexMap<RoleName, RoleSpec> {
    [
        ("Chef", RoleSpec::new(35_000.0, 10)),
        ("Sous Chef", RoleSpec::new(32_000.0, 10)),
        ("Kitchen Assistant", RoleSpec::new(27_000.0, 5)),
        ("Waiter", RoleSpec::new(28_000.0, 8)),
        ("Cashier", RoleSpec::new(26_000.0, 8)),
        ("Barista", RoleSpec::new(27_000.0, 8)),
        ("HR Assistant", RoleSpec::new(30_000.0, 6)),
        ("Accountant", RoleSpec::new(32_000.0, 6)),
        ("Receptionist", RoleSpec::new(29_000.0, 6)),
        ("Procurement Officer", RoleSpec::new(33_000.0, 10)),
        ("Warehouse Assistant", RoleSpec::new(28_000.0, 5)),
    ]
    .into_iter()
    .map(|(name, spec)| (name.to_string(), spec))
    .collect()
}

fn default_first_names() -> Vec<String> {
    [
        "Anne", "Mette", "Kirsten", "Hanne", "Camilla", "Louise", "Ida", "Freja", "Sofie", "Emma",
        "Peter", "Jens", "Lars", "Michael", "Henrik", "Søren", "Mads", "Rasmus", "Frederik",
        "Magnus",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

fn default_last_names() -> Vec<String> {
    [
        "Jensen",
        "Nielsen",
        "Hansen",
        "Pedersen",
        "Andersen",
        "Christensen",
        "Larsen",
        "Sørensen",
        "Rasmussen",
        "Jørgensen",
        "Petersen",
        "Madsen",
        "Kristensen",
        "Olsen",
        "Thomsen",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

/// Sampling parameters for the staff table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffConfig {
    /// Number of employees to generate.
    pub employee_count: usize,
    /// "Today" for tenure and training-date calculations.
    pub reference_date: NaiveDate,
    /// Hire dates are drawn from this many months before the reference date.
    pub hiring_window_months: u32,
    /// Roles offered by each department.
    pub departments: IndexMap<DepartmentName, Vec<RoleName>>,
    /// Pay and training per role.
    pub roles: IndexMap<RoleName, RoleSpec>,
    /// Spread of monthly salary around the role's base.
    pub salary_std_dev_dkk: f64,
    /// Age range.
    pub ages: IntRange,
    /// Share of full-time contracts.
    pub full_time_share: f64,
    /// Monthly hours on a full-time contract.
    pub full_time_hours: u32,
    /// Monthly hours on a part-time contract.
    pub part_time_hours: u32,
    /// Share of employees with a mentor.
    pub mentor_share: f64,
    /// First-name pool.
    pub first_names: Vec<String>,
    /// Last-name pool.
    pub last_names: Vec<String>,
}

impl Default for StaffConfig {
    fn default() -> Self {
        Self {
            employee_count: 100,
            reference_date: ymd(DEFAULT_PERIOD_END),
            hiring_window_months: 36,
            departments: default_departments(),
            roles: default_roles(),
            salary_std_dev_dkk: 1_500.0,
            ages: IntRange::new(18, 60),
            full_time_share: 0.75,
            full_time_hours: 160,
            part_time_hours: 80,
            mentor_share: 0.6,
            first_names: default_first_names(),
            last_names: default_last_names(),
        }
    }
}

impl StaffConfig {
    /// Pay and training requirements for a role.
    pub fn role(&self, name: &str) -> Result<&RoleSpec, SynthError> {
        self.roles
            .get(name)
            .ok_or_else(|| SynthError::missing("role", name))
    }

    fn validate(&self) -> Result<(), SynthError> {
        if self.departments.is_empty() {
            return Err(SynthError::Configuration(
                "staff.departments must not be empty".to_string(),
            ));
        }
        for (department, roles) in &self.departments {
            if roles.is_empty() {
                return Err(SynthError::missing("department roles", department.as_str()));
            }
            for role in roles {
                let spec = self.role(role)?;
                if spec.required_training_hours == 0 {
                    return Err(SynthError::Configuration(format!(
                        "role '{role}' must require at least one training hour"
                    )));
                }
            }
        }
        if self.first_names.is_empty() || self.last_names.is_empty() {
            return Err(SynthError::Configuration(
                "staff name pools must not be empty".to_string(),
            ));
        }
        self.ages.validate("staff.ages")?;
        if !(0.0..=1.0).contains(&self.full_time_share) || !(0.0..=1.0).contains(&self.mentor_share)
        {
            return Err(SynthError::Configuration(
                "staff shares must lie in [0, 1]".to_string(),
            ));
        }
        if self.salary_std_dev_dkk < 0.0 {
            return Err(SynthError::Configuration(
                "staff.salary_std_dev_dkk must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Top-level generation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// RNG seed that controls every table's draw sequence.
    pub seed: u64,
    /// Dates covered by the daily tables.
    pub period: Period,
    /// Restaurants and canteens in the group.
    pub business_units: Vec<BusinessUnitSpec>,
    /// Procurement sampling.
    pub procurement: ProcurementConfig,
    /// Operations sampling.
    pub operations: OperationsConfig,
    /// Staff sampling.
    pub staff: StaffConfig,
    /// Portfolio targets.
    pub targets: PortfolioTargets,
    /// Nudge driver settings.
    pub nudge: NudgePlan,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            period: Period::default(),
            business_units: default_business_units(),
            procurement: ProcurementConfig::default(),
            operations: OperationsConfig::default(),
            staff: StaffConfig::default(),
            targets: PortfolioTargets::default(),
            nudge: NudgePlan::default(),
        }
    }
}

impl SynthConfig {
    /// Load a JSON override file; omitted fields keep their defaults.
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, SynthError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let config: SynthConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed configuration before any table is generated.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.period.end < self.period.start {
            return Err(SynthError::Configuration(format!(
                "period end {} precedes start {}",
                self.period.end, self.period.start
            )));
        }
        if self.business_units.is_empty() {
            return Err(SynthError::Configuration(
                "at least one business unit is required".to_string(),
            ));
        }
        self.procurement.validate()?;
        self.operations.validate()?;
        self.staff.validate()?;
        self.targets.validate()?;
        self.nudge.validate()
    }
}

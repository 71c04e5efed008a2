use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use crate::types::{
    BusinessUnitName, CityName, CountryCode, DepartmentName, EmployeeId, ProductName, RoleName,
    SupplierName,
};

/// Product category used for CO2 tracking, pricing, and portfolio rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Fruit and vegetables.
    #[serde(rename = "F&V")]
    FruitVeg,
    /// Milk, cheese, and eggs.
    Dairy,
    /// Meat and poultry.
    #[serde(rename = "Meat&Poultry")]
    MeatPoultry,
    /// Fish and shellfish.
    Fish,
    /// Counted as plant-based in the plant share.
    Beverages,
    /// Cleaning and paper goods; neither plant nor animal.
    #[serde(rename = "Non-Food")]
    NonFood,
}

impl Category {
    /// Every category, in catalog order.
    pub const ALL: [Category; 6] = [
        Category::FruitVeg,
        Category::Dairy,
        Category::MeatPoultry,
        Category::Fish,
        Category::Beverages,
        Category::NonFood,
    ];

    /// Label used in exported tables.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::FruitVeg => "F&V",
            Category::Dairy => "Dairy",
            Category::MeatPoultry => "Meat&Poultry",
            Category::Fish => "Fish",
            Category::Beverages => "Beverages",
            Category::NonFood => "Non-Food",
        }
    }

    /// Everything but non-food.
    pub const fn is_food(&self) -> bool {
        !matches!(self, Category::NonFood)
    }

    /// Dairy, meat, and fish.
    pub const fn is_animal_origin(&self) -> bool {
        matches!(
            self,
            Category::Dairy | Category::MeatPoultry | Category::Fish
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of business unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    /// À la carte restaurant.
    Restaurant,
    /// Staff canteen.
    Canteen,
}

/// Measure a product is purchased in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasureUnit {
    /// Kilograms.
    #[serde(rename = "kg")]
    Kg,
    /// Litres.
    #[serde(rename = "L")]
    L,
}

/// Danish animal-welfare labelling scheme a meat product falls under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WelfareScheme {
    /// Pork.
    #[serde(rename = "Svinekød")]
    Pork,
    /// Chicken.
    #[serde(rename = "Kylling")]
    Chicken,
    /// Beef and veal.
    #[serde(rename = "Kalve/Oksekød")]
    BeefVeal,
}

/// Catch method of a fish line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FishingMethod {
    /// Hook and line.
    Line,
    /// Danish seine.
    Snurrevod,
    /// Bottom trawl.
    Trawl,
}

impl FishingMethod {
    /// Methods counted as selective (low bycatch).
    pub const SELECTIVE: [FishingMethod; 2] = [FishingMethod::Line, FishingMethod::Snurrevod];
    /// Methods counted as unselective.
    pub const UNSELECTIVE: [FishingMethod; 1] = [FishingMethod::Trawl];

    /// Line or Danish seine.
    pub const fn is_selective(&self) -> bool {
        matches!(self, FishingMethod::Line | FishingMethod::Snurrevod)
    }
}

/// FAO major fishing area 27 (North-East Atlantic) sub-area of a fish line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaoArea {
    /// Skagerrak and Kattegat.
    #[serde(rename = "FAO 27.3a")]
    Area3a,
    /// The Sound.
    #[serde(rename = "FAO 27.3b")]
    Area3b,
    /// Central North Sea.
    #[serde(rename = "FAO 27.4b")]
    Area4b,
    /// Northern North Sea.
    #[serde(rename = "FAO 27.4a")]
    Area4a,
    /// Norwegian Sea.
    #[serde(rename = "FAO 27.2a")]
    Area2a,
    /// Spitsbergen and Bear Island.
    #[serde(rename = "FAO 27.2b")]
    Area2b,
}

impl FaoArea {
    /// Sub-areas bordering Denmark.
    pub const NEAR: [FaoArea; 3] = [FaoArea::Area3a, FaoArea::Area3b, FaoArea::Area4b];
    /// Sub-areas further away.
    pub const OTHER: [FaoArea; 3] = [FaoArea::Area4a, FaoArea::Area2a, FaoArea::Area2b];

    /// Skagerrak, Kattegat, the Sound, or the central North Sea.
    pub const fn is_near_denmark(&self) -> bool {
        matches!(self, FaoArea::Area3a | FaoArea::Area3b | FaoArea::Area4b)
    }
}

/// One purchased line item.
///
/// Everything is fixed at generation time except `organic`, `welfare_certified`,
/// `fishing_method`, and `fao_area`, which the portfolio tuner may flip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProcurementLine {
    /// Purchase date.
    pub date: NaiveDate,
    /// Buying unit.
    pub business_unit: BusinessUnitName,
    /// Type of the buying unit.
    pub unit_type: UnitType,
    /// City of the buying unit.
    pub city: CityName,
    /// Catalog product.
    pub product: ProductName,
    /// Product category.
    pub category: Category,
    /// Animal-origin product.
    pub is_animal: bool,
    /// Purchase unit.
    pub unit: MeasureUnit,
    /// Delivering supplier.
    pub supplier: SupplierName,
    /// Supplier country.
    pub supplier_country: CountryCode,
    /// Supplier holds a Danish organic certification.
    pub supplier_danish_cert: bool,
    /// Organic line.
    pub organic: bool,
    /// Product of Danish origin.
    pub danish: bool,
    /// Meaningful only when `is_animal`.
    pub welfare_certified: bool,
    /// Welfare scheme of the product, if any.
    pub welfare_scheme: Option<WelfareScheme>,
    /// Present only for fish lines.
    pub fishing_method: Option<FishingMethod>,
    /// Present only for fish lines.
    pub fao_area: Option<FaoArea>,
    /// Weighting quantity for every portfolio share.
    pub volume_kg_l: f64,
    /// Unit price in DKK.
    pub price_per_unit_dkk: f64,
    /// Line cost in DKK.
    pub cost_dkk: f64,
    /// Emissions in kg CO2e.
    pub co2e_kg: f64,
    /// Non-food line.
    pub non_food: bool,
    /// Carries the Nordic Swan Ecolabel.
    pub swan_labeled: bool,
}

impl ProcurementLine {
    /// Plant-based lines: non-animal food, beverages included.
    pub fn is_plant_based(&self) -> bool {
        !self.is_animal && self.category.is_food()
    }

    /// Fish line.
    pub fn is_fish(&self) -> bool {
        self.category == Category::Fish
    }

    /// Caught with a selective method.
    pub fn has_selective_method(&self) -> bool {
        self.fishing_method
            .is_some_and(|method| method.is_selective())
    }

    /// Caught in a near-Denmark sub-area.
    pub fn is_from_near_area(&self) -> bool {
        self.fao_area.is_some_and(|area| area.is_near_denmark())
    }
}

/// One business unit's operating figures for one day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationsDay {
    /// Business day.
    pub date: NaiveDate,
    /// Reporting unit.
    pub business_unit: BusinessUnitName,
    /// Type of the unit.
    pub unit_type: UnitType,
    /// City of the unit.
    pub city: CityName,
    /// Revenue in DKK.
    pub revenue_dkk: f64,
    /// Costs in DKK.
    pub costs_dkk: f64,
    /// Guests served.
    pub guests: u32,
    /// Food waste in kg.
    pub waste_kg: f64,
    /// Staff hours.
    pub hours_worked: f64,
    /// Organic share of purchases, in percent.
    pub organic_percentage: f64,
    /// Local supplier share, in percent.
    pub local_supplier_percentage: f64,
    /// Employees on duty.
    pub employee_count: u32,
    /// Revenue minus costs.
    pub profit_dkk: f64,
    /// Profit over revenue, in percent.
    pub profit_margin_pct: f64,
    /// Waste per guest.
    pub waste_per_guest_kg: f64,
    /// Revenue per staff hour.
    pub revenue_per_hour: f64,
}

/// Gender as recorded in the staff table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    /// Male.
    #[serde(rename = "M")]
    Male,
    /// Female.
    #[serde(rename = "F")]
    Female,
}

/// Contract type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentType {
    /// Full-time contract.
    #[serde(rename = "Full-time")]
    FullTime,
    /// Part-time contract.
    #[serde(rename = "Part-time")]
    PartTime,
}

/// Turnover risk band derived from training completion and satisfaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnoverRisk {
    /// Completion under 50% or satisfaction under 6.
    High,
    /// Completion under 80% or satisfaction under 7.
    Medium,
    /// Everyone else.
    Low,
}

/// One employee with HR and training figures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Employee id.
    pub employee_id: EmployeeId,
    /// Full name.
    pub name: String,
    /// Gender.
    pub gender: Gender,
    /// Age in years.
    pub age: u32,
    /// Employing unit.
    pub business_unit: BusinessUnitName,
    /// Type of the employing unit.
    pub unit_type: UnitType,
    /// Department.
    pub department: DepartmentName,
    /// Role.
    pub role: RoleName,
    /// Contract type.
    pub employment_type: EmploymentType,
    /// Hire date.
    pub hire_date: NaiveDate,
    /// Whole months employed at the reference date.
    pub tenure_months: u32,
    /// Contracted monthly hours.
    pub monthly_hours: u32,
    /// Hours worked last month.
    pub hours_worked: f64,
    /// Monthly salary in DKK.
    pub salary_dkk: f64,
    /// Training hours completed.
    pub training_hours_completed: f64,
    /// Training hours the role requires.
    pub required_training_hours: u32,
    /// Completed over required, capped at 1.
    pub training_completion_pct: f64,
    /// Has a mentor.
    pub mentor_assigned: bool,
    /// Satisfaction from 1 to 10.
    pub satisfaction_score: f64,
    /// Turnover risk band.
    pub turnover_risk: TurnoverRisk,
    /// Absent when the drawn date falls after the reference date.
    pub last_training_date: Option<NaiveDate>,
    /// Performance from 1 to 5.
    pub performance_score: f64,
}

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use crate::config::{
    BusinessUnitSpec, Period, PortfolioTargets, ProcurementConfig, ProductSpec, SupplierSpec,
};
use crate::data::{Category, FaoArea, FishingMethod, ProcurementLine, WelfareScheme};
use crate::errors::SynthError;
use crate::utils::{chance, round_to, sample_normal};

/// Probability that a line is of Danish origin.
pub fn danish_probability(category: Category, supplier: &SupplierSpec) -> f64 {
    let mut probability: f64 = if supplier.is_domestic() { 0.6 } else { 0.1 };
    match category {
        Category::FruitVeg => probability += 0.15,
        Category::MeatPoultry | Category::Dairy => probability += 0.10,
        _ => {}
    }
    probability.min(0.95)
}

/// Probability that a line is organic at generation time.
pub fn organic_probability(category: Category, supplier: &SupplierSpec) -> f64 {
    let mut probability: f64 = 0.55;
    if supplier.danish_certified {
        probability += 0.10;
    }
    match category {
        Category::FruitVeg | Category::Dairy => probability += 0.10,
        Category::MeatPoultry => probability -= 0.05,
        Category::NonFood => probability -= 0.30,
        _ => {}
    }
    probability.clamp(0.10, 0.95)
}

/// Probability that a meat line under `scheme` carries a welfare label.
pub fn welfare_probability(scheme: WelfareScheme) -> f64 {
    let probability: f64 = match scheme {
        WelfareScheme::Pork => 0.70,
        WelfareScheme::Chicken => 0.65,
        WelfareScheme::BeefVeal => 0.60,
    };
    probability.clamp(0.4, 0.9)
}

/// Generates procurement lines for every business unit and day of a period.
pub struct ProcurementGenerator<'c> {
    config: &'c ProcurementConfig,
    units: &'c [BusinessUnitSpec],
    period: Period,
    targets: &'c PortfolioTargets,
}

impl<'c> ProcurementGenerator<'c> {
    /// Bind the generator to its master data; fish flag odds start at the fish targets.
    pub fn new(
        config: &'c ProcurementConfig,
        units: &'c [BusinessUnitSpec],
        period: Period,
        targets: &'c PortfolioTargets,
    ) -> Self {
        Self {
            config,
            units,
            period,
            targets,
        }
    }

    /// Draw every line; flags are untuned at this point.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<ProcurementLine>, SynthError> {
        let (min_lines, max_lines) = self.config.lines_per_unit_day;
        let mut lines = Vec::new();
        for date in self.period.days() {
            for unit in self.units {
                let count = rng.random_range(min_lines..=max_lines);
                for _ in 0..count {
                    let product = self.config.products.choose(rng).ok_or_else(|| {
                        SynthError::Configuration("product catalog is empty".to_string())
                    })?;
                    lines.push(self.draw_line(date, unit, product, rng)?);
                }
            }
            debug!(%date, total = lines.len(), "procurement day generated");
        }
        info!(
            lines = lines.len(),
            days = self.period.len(),
            units = self.units.len(),
            "procurement lines generated"
        );
        Ok(lines)
    }

    fn draw_line<R: Rng + ?Sized>(
        &self,
        date: chrono::NaiveDate,
        unit: &BusinessUnitSpec,
        product: &ProductSpec,
        rng: &mut R,
    ) -> Result<ProcurementLine, SynthError> {
        let category = product.category;
        let supplier_name = self
            .config
            .route(category)?
            .choose(rng)
            .ok_or_else(|| SynthError::missing("supplier route", category.label()))?;
        let supplier = self.config.supplier(supplier_name)?;

        let volume = round_to(
            self.config
                .volumes
                .for_line(category, unit.unit_type)
                .sample(rng),
            2,
        );
        let danish = chance(rng, danish_probability(category, supplier));
        let organic = chance(rng, organic_probability(category, supplier));
        let welfare_certified = product
            .welfare_scheme
            .is_some_and(|scheme| chance(rng, welfare_probability(scheme)));
        let (fishing_method, fao_area) = if category == Category::Fish {
            self.draw_fish_metadata(rng)
        } else {
            (None, None)
        };
        let price = self.price_per_unit(category, organic, rng)?;

        Ok(ProcurementLine {
            date,
            business_unit: unit.name.clone(),
            unit_type: unit.unit_type,
            city: unit.city.clone(),
            product: product.name.clone(),
            category,
            is_animal: product.is_animal,
            unit: product.unit,
            supplier: supplier.name.clone(),
            supplier_country: supplier.country.clone(),
            supplier_danish_cert: supplier.danish_certified,
            organic,
            danish,
            welfare_certified,
            welfare_scheme: product.welfare_scheme,
            fishing_method,
            fao_area,
            volume_kg_l: volume,
            price_per_unit_dkk: price,
            cost_dkk: round_to(price * volume, 2),
            co2e_kg: round_to(product.co2_per_unit * volume, 3),
            non_food: false,
            swan_labeled: false,
        })
    }

    fn draw_fish_metadata<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> (Option<FishingMethod>, Option<FaoArea>) {
        let methods: &[FishingMethod] =
            if chance(rng, self.targets.fish_selective_method.target) {
                &FishingMethod::SELECTIVE
            } else {
                &FishingMethod::UNSELECTIVE
            };
        let method = methods.choose(rng).copied();
        let areas: &[FaoArea] = if chance(rng, self.targets.fish_near_area.target) {
            &FaoArea::NEAR
        } else {
            &FaoArea::OTHER
        };
        (method, areas.choose(rng).copied())
    }

    fn price_per_unit<R: Rng + ?Sized>(
        &self,
        category: Category,
        organic: bool,
        rng: &mut R,
    ) -> Result<f64, SynthError> {
        let mut base = self.config.base_price(category)?;
        if organic {
            base *= self.config.organic_premium;
        }
        let price = sample_normal(rng, base, base * self.config.price_noise);
        Ok(round_to(price.max(0.0), 2))
    }
}

/// Mark non-food lines and the Swan-labelled ones among them.
///
/// Runs after tuning; a line is Swan-labelled when it is non-food and its
/// supplier can deliver Swan-labelled goods.
pub fn label_non_food(
    lines: &mut [ProcurementLine],
    config: &ProcurementConfig,
) -> Result<(), SynthError> {
    for line in lines.iter_mut() {
        line.non_food = line.category == Category::NonFood;
        line.swan_labeled = line.non_food && config.supplier(&line.supplier)?.swan_label_capable;
    }
    Ok(())
}

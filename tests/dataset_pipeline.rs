use std::fs;

use tempfile::tempdir;

use loca_synth::constants::export::{
    OPERATIONS_FILE, PROCUREMENT_LINES_FILE, PRODUCTS_CATALOG_FILE, STAFF_FILE, SUPPLIERS_FILE,
    TUNING_REPORT_FILE,
};
use loca_synth::profile::ColumnStats;
use loca_synth::{
    Category, ColumnKind, NudgeAction, SynthConfig, export_dataset, generate_dataset,
    profile_csv, profile_directory,
};

fn two_week_config(seed: u64) -> SynthConfig {
    let mut config = SynthConfig {
        seed,
        ..SynthConfig::default()
    };
    config.period.end = config.period.start + chrono::Duration::days(13);
    config.staff.employee_count = 25;
    config
}

#[test]
fn same_seed_same_tables() {
    let config = two_week_config(42);
    let first = generate_dataset(&config, true).unwrap();
    let second = generate_dataset(&config, true).unwrap();
    assert_eq!(first, second);

    let other = generate_dataset(&two_week_config(43), true).unwrap();
    assert_ne!(first.procurement, other.procurement);
}

#[test]
fn tuning_report_follows_the_pass_plan() {
    let config = two_week_config(11);
    let dataset = generate_dataset(&config, true).unwrap();
    let report = dataset.tuning.expect("tuning ran");

    let plan = &config.nudge;
    assert_eq!(
        report.passes.len(),
        plan.organic_passes + plan.welfare_passes + 2 * plan.fish_passes
    );
    assert_eq!(report.before.total_volume, report.after.total_volume);
    assert_eq!(report.checks.len(), 5);

    let flipped: usize = report
        .passes
        .iter()
        .map(|pass| match &pass.action {
            NudgeAction::Flipped { changed, .. } => *changed,
            _ => 0,
        })
        .sum();
    assert_eq!(flipped, report.total_changed());

    for pass in report.passes.iter().filter(|pass| pass.metric == "animal_welfare_share") {
        assert!(pass.after >= pass.before);
    }
}

#[test]
fn generated_lines_keep_fish_metadata_consistent_after_tuning() {
    let dataset = generate_dataset(&two_week_config(5), true).unwrap();
    for line in &dataset.procurement {
        let fish = line.category == Category::Fish;
        assert_eq!(fish, line.fishing_method.is_some());
        assert_eq!(fish, line.fao_area.is_some());
        assert_eq!(line.non_food, line.category == Category::NonFood);
        assert!(!line.swan_labeled || line.non_food);
    }
}

#[test]
fn export_and_profile_round_trip() {
    let dataset = generate_dataset(&two_week_config(3), true).unwrap();
    let dir = tempdir().unwrap();
    let data_dir = dir.path().join("data");
    let report_dir = dir.path().join("reports");

    let written = export_dataset(&dataset, &data_dir).unwrap();
    let names: Vec<String> = written
        .iter()
        .filter_map(|file| file.path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            PROCUREMENT_LINES_FILE,
            PRODUCTS_CATALOG_FILE,
            SUPPLIERS_FILE,
            OPERATIONS_FILE,
            STAFF_FILE,
            TUNING_REPORT_FILE,
        ]
    );
    assert_eq!(written[0].rows, dataset.procurement.len());

    let header = fs::read_to_string(data_dir.join(PROCUREMENT_LINES_FILE))
        .unwrap()
        .lines()
        .next()
        .map(str::to_string)
        .unwrap();
    assert!(header.starts_with("date,business_unit,unit_type,city,product,category"));
    assert!(header.ends_with("cost_dkk,co2e_kg,non_food,swan_labeled"));

    let procurement = profile_csv(&data_dir.join(PROCUREMENT_LINES_FILE), "Procurement").unwrap();
    assert_eq!(procurement.rows, dataset.procurement.len());
    let volume = procurement.column("volume_kg_l").unwrap();
    assert_eq!(volume.stats.kind(), ColumnKind::Numeric);
    assert_eq!(procurement.column("organic").unwrap().stats.kind(), ColumnKind::Boolean);
    assert_eq!(procurement.column("category").unwrap().stats.kind(), ColumnKind::Categorical);

    let fishing = procurement.column("fishing_method").unwrap();
    let fish_rows = dataset
        .procurement
        .iter()
        .filter(|line| line.category == Category::Fish)
        .count();
    assert_eq!(fishing.count, fish_rows);
    assert_eq!(fishing.missing, dataset.procurement.len() - fish_rows);

    let organic = procurement.column("organic").unwrap();
    let ColumnStats::Boolean(stats) = &organic.stats else {
        panic!("organic column should be boolean");
    };
    let organic_rows = dataset.procurement.iter().filter(|line| line.organic).count();
    let expected = organic_rows as f64 / dataset.procurement.len() as f64;
    assert!((stats.true_share - expected).abs() < 1e-12);

    let reports = profile_directory(&data_dir, &report_dir).unwrap();
    assert_eq!(reports.len(), 5);
    assert!(report_dir.join("operations_2025_profile.json").exists());
}

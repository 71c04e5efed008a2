use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::config::SynthConfig;
use crate::constants::export::{DEFAULT_OUTPUT_DIR, DEFAULT_REPORT_DIR};
use crate::export::export_dataset;
use crate::pipeline::generate_dataset;
use crate::profile::profile_directory;

#[derive(Debug, Parser)]
#[command(
    name = "loca_generate",
    disable_help_subcommand = true,
    about = "Generate the synthetic Loca Gruppen dataset",
    long_about = "Generate procurement, operations, and staff tables, nudge procurement shares toward the portfolio targets, and export everything as CSV.",
    after_help = "Values given on the command line override the JSON configuration file. Set RUST_LOG=debug to log every nudge pass."
)]
struct GenerateCli {
    #[arg(long, help = "Deterministic seed; defaults to the configured seed (42)")]
    seed: Option<u64>,
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory the CSV tables are written to (created if missing)"
    )]
    output_dir: PathBuf,
    #[arg(
        long,
        value_name = "FILE",
        help = "JSON file overriding any subset of the default configuration"
    )]
    config: Option<PathBuf>,
    #[arg(
        long = "skip-tuning",
        help = "Export procurement lines exactly as drawn, without nudge passes"
    )]
    skip_tuning: bool,
    #[arg(
        long = "report-dir",
        value_name = "DIR",
        help = "Also profile the exported tables into this directory"
    )]
    report_dir: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(
    name = "loca_profile",
    disable_help_subcommand = true,
    about = "Profile exported CSV tables",
    long_about = "Infer column kinds and summary statistics for every CSV table in a directory and write one JSON report per table."
)]
struct ProfileCli {
    #[arg(
        long = "input-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory holding the CSV tables"
    )]
    input_dir: PathBuf,
    #[arg(
        long = "report-dir",
        value_name = "DIR",
        default_value = DEFAULT_REPORT_DIR,
        help = "Directory the JSON reports are written to (created if missing)"
    )]
    report_dir: PathBuf,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Run the dataset generator with CLI-style arguments (program name excluded).
pub fn run_generate<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    init_tracing();

    let Some(cli) =
        parse_cli::<GenerateCli, _>(std::iter::once("loca_generate".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => SynthConfig::from_json_path(path)?,
        None => SynthConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let dataset = generate_dataset(&config, !cli.skip_tuning)?;
    let written = export_dataset(&dataset, &cli.output_dir)?;

    println!("=== loca dataset ===");
    println!("seed: {}", config.seed);
    println!(
        "period: {} .. {} ({} days)",
        config.period.start,
        config.period.end,
        config.period.len()
    );
    println!();
    println!("[FILES]");
    for file in &written {
        println!("  {} ({} rows)", file.path.display(), file.rows);
    }
    if let Some(report) = &dataset.tuning {
        println!();
        println!("[PORTFOLIO]");
        for check in &report.checks {
            println!(
                "  {:<28} {:>6.3}  target {:.3} ± {:.3}  {}",
                check.metric,
                check.actual,
                check.target,
                check.tolerance,
                if check.satisfied { "ok" } else { "outside band" }
            );
        }
        println!("  changed attributes: {}", report.total_changed());
    }

    if let Some(report_dir) = &cli.report_dir {
        let reports = profile_directory(&cli.output_dir, report_dir)?;
        println!();
        println!("[REPORTS]");
        for path in &reports {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

/// Run the CSV profiler with CLI-style arguments (program name excluded).
pub fn run_profile<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    init_tracing();

    let Some(cli) =
        parse_cli::<ProfileCli, _>(std::iter::once("loca_profile".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let reports = profile_directory(&cli.input_dir, &cli.report_dir)?;
    if reports.is_empty() {
        println!("no CSV tables found in {}", cli.input_dir.display());
    }
    for path in &reports {
        println!("{}", path.display());
    }
    Ok(())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::export::{PROCUREMENT_LINES_FILE, STAFF_FILE, TUNING_REPORT_FILE};
    use tempfile::tempdir;

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn help_is_not_an_error() {
        assert!(run_generate(args(&["--help"])).is_ok());
        assert!(run_profile(args(&["--help"])).is_ok());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(run_generate(args(&["--bogus"])).is_err());
    }

    #[test]
    fn profiling_a_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let reports = dir.path().join("reports");
        assert!(
            run_profile(args(&[
                "--input-dir",
                missing.to_str().unwrap(),
                "--report-dir",
                reports.to_str().unwrap(),
            ]))
            .is_err()
        );
    }

    #[test]
    fn cli_defaults() {
        let cli = parse_cli::<GenerateCli, _>(["loca_generate"]).unwrap().unwrap();
        assert_eq!(cli.seed, None);
        assert_eq!(cli.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(!cli.skip_tuning);

        let cli = parse_cli::<ProfileCli, _>(["loca_profile"]).unwrap().unwrap();
        assert_eq!(cli.report_dir, PathBuf::from(DEFAULT_REPORT_DIR));
    }

    #[test]
    fn generate_then_profile_from_a_small_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(
            &config_path,
            r#"{ "period": { "start": "2025-02-01", "end": "2025-02-03" }, "staff": { "employee_count": 6 } }"#,
        )
        .unwrap();
        let output = dir.path().join("data");
        let reports = dir.path().join("reports");

        run_generate(args(&[
            "--seed",
            "7",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            output.to_str().unwrap(),
            "--report-dir",
            reports.to_str().unwrap(),
        ]))
        .unwrap();

        assert!(output.join(PROCUREMENT_LINES_FILE).exists());
        assert!(output.join(STAFF_FILE).exists());
        assert!(output.join(TUNING_REPORT_FILE).exists());
        assert!(reports.join("staff_data_profile.json").exists());
    }
}

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{print_json, OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::cli::sources;
use crate::core::config::AppConfig;
use crate::core::detect::{self, AnomalyWindow, DetectionReport};

#[derive(Serialize)]
struct DetectionPayload {
    window: AnomalyWindow,
    #[serde(flatten)]
    report: DetectionReport,
}

pub struct DetectArgs {
    pub service: String,
    pub team: String,
    pub env: String,
    pub since: String,
    pub until: Option<String>,
    pub threshold: f64,
    pub aws: Option<PathBuf>,
    pub gcp: Option<PathBuf>,
    pub skip_bad: bool,
}

pub fn run(args: DetectArgs, opts: &OutputOptions) -> Result<()> {
    let window = AnomalyWindow {
        service: args.service,
        team: args.team,
        env: args.env,
        start_date: parse_date(&args.since, "--since")?,
        end_date: args
            .until
            .as_deref()
            .map(|d| parse_date(d, "--until"))
            .transpose()?,
        threshold: args.threshold,
    };

    let config = AppConfig::load().unwrap_or_default();
    let paths = sources::resolve_paths(args.aws, args.gcp, &config)?;
    let loaded = sources::load_sources(&paths, opts)?;
    let unified = sources::normalize_sources(&loaded, args.skip_bad)?;

    let report = detect::detect(&unified, &window);
    if opts.verbose {
        eprintln!(
            "Scanned {} records, {} in window",
            unified.len(),
            report.matched.len()
        );
    }

    match opts.format {
        OutputFormat::Json => print_json(&DetectionPayload { window, report }, opts)?,
        OutputFormat::Text => {
            println!("{}", renderer::render_detection(&report, &window, opts.use_color));
        }
    }
    Ok(())
}

fn parse_date(value: &str, flag: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid {} date '{}' (expected YYYY-MM-DD)", flag, value))
}

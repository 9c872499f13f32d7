use anyhow::{anyhow, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::output::{print_json, OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::cli::sources;
use crate::core::aggregate::{self, GroupKey};
use crate::core::config::AppConfig;

/// JSON row for an ad-hoc `--by` grouping.
#[derive(Serialize)]
struct GroupTotal {
    key: Vec<String>,
    total_cost: f64,
}

pub fn run(
    aws: Option<PathBuf>,
    gcp: Option<PathBuf>,
    by: Option<String>,
    top: usize,
    skip_bad: bool,
    opts: &OutputOptions,
) -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    let paths = sources::resolve_paths(aws, gcp, &config)?;
    let loaded = sources::load_sources(&paths, opts)?;
    let unified = sources::normalize_sources(&loaded, skip_bad)?;

    if let Some(expr) = by {
        let keys = parse_group_keys(&expr)?;
        let totals = aggregate::aggregate(&unified, &keys);
        match opts.format {
            OutputFormat::Json => {
                let rows: Vec<GroupTotal> = totals
                    .iter()
                    .map(|(key, total)| GroupTotal {
                        key: key.clone(),
                        total_cost: *total,
                    })
                    .collect();
                print_json(&rows, opts)?;
            }
            OutputFormat::Text => {
                println!("{}", renderer::render_grouping(&totals, &expr, opts.use_color));
            }
        }
        return Ok(());
    }

    let summary = aggregate::build_summary(&unified, top);
    match opts.format {
        OutputFormat::Json => print_json(&summary, opts)?,
        OutputFormat::Text => {
            println!("{}", renderer::render_summary(&summary, opts.use_color));
        }
    }
    Ok(())
}

fn parse_group_keys(expr: &str) -> Result<Vec<GroupKey>> {
    let keys: Vec<GroupKey> = expr
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            GroupKey::from_id(id).ok_or_else(|| {
                anyhow!(
                    "Unknown group key '{}' (expected date, month, provider, billing_entity, service, team, env)",
                    id
                )
            })
        })
        .collect::<Result<_>>()?;
    if keys.is_empty() {
        return Err(anyhow!("--by needs at least one group key"));
    }
    Ok(keys)
}

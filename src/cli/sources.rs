use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::cli::output::OutputOptions;
use crate::core::config::AppConfig;
use crate::core::loader;
use crate::core::models::billing::{RawBillingRecord, UnifiedBillingRecord};
use crate::core::normalize;
use crate::core::providers::Provider;

/// One provider export resolved to a concrete path and loaded.
pub struct LoadedSource {
    pub provider: Provider,
    pub path: PathBuf,
    pub raw: Vec<RawBillingRecord>,
}

/// Resolve which exports to read: command-line paths win over configured
/// export paths of enabled sources. Providers with neither are skipped with
/// a stderr note; having nothing at all to read is an error.
pub fn resolve_paths(
    aws: Option<PathBuf>,
    gcp: Option<PathBuf>,
    config: &AppConfig,
) -> Result<Vec<(Provider, PathBuf)>> {
    let mut resolved: Vec<(Provider, PathBuf)> = Vec::new();
    for provider in Provider::all() {
        let flag = match provider {
            Provider::Aws => aws.clone(),
            Provider::Gcp => gcp.clone(),
        };
        match flag.or_else(|| config.export_path_for(*provider)) {
            Some(path) => resolved.push((*provider, path)),
            None => eprintln!(
                "Note: no {} export (pass --{} or set export_path in config)",
                provider.display_name(),
                provider.id()
            ),
        }
    }
    if resolved.is_empty() {
        bail!("No billing exports to read. Pass --aws/--gcp or run `costlens config init`.");
    }
    Ok(resolved)
}

pub fn load_sources(
    paths: &[(Provider, PathBuf)],
    opts: &OutputOptions,
) -> Result<Vec<LoadedSource>> {
    let mut sources = Vec::new();
    for (provider, path) in paths {
        let raw = loader::load_csv(path)?;
        if opts.verbose {
            eprintln!(
                "{}: {} rows from {}",
                provider.display_name(),
                raw.len(),
                path.display()
            );
        }
        sources.push(LoadedSource {
            provider: *provider,
            path: path.clone(),
            raw,
        });
    }
    Ok(sources)
}

/// Normalize loaded sources in provider order.
///
/// With `skip_bad`, malformed rows are logged to stderr and dropped;
/// otherwise the first bad row aborts the run. Either way nothing is
/// silently swallowed.
pub fn normalize_sources(
    sources: &[LoadedSource],
    skip_bad: bool,
) -> Result<Vec<UnifiedBillingRecord>> {
    let mut unified: Vec<UnifiedBillingRecord> = Vec::new();
    for source in sources {
        if skip_bad {
            for (index, raw) in source.raw.iter().enumerate() {
                match normalize::normalize_record(raw, source.provider, index) {
                    Ok(record) => unified.push(record),
                    Err(err) => {
                        eprintln!("Skipping {}: {}", source.path.display(), err)
                    }
                }
            }
        } else {
            let records = normalize::normalize(&source.raw, source.provider)
                .with_context(|| format!("Failed to normalize {}", source.path.display()))?;
            unified.extend(records);
        }
    }
    Ok(unified)
}

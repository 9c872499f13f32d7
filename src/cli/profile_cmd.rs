use anyhow::Result;
use std::path::PathBuf;

use crate::cli::output::{print_json, OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::cli::sources;
use crate::core::config::AppConfig;
use crate::core::models::profile::SourceProfile;
use crate::core::profile;

pub fn run(aws: Option<PathBuf>, gcp: Option<PathBuf>, opts: &OutputOptions) -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    let paths = sources::resolve_paths(aws, gcp, &config)?;
    let loaded = sources::load_sources(&paths, opts)?;

    let profiles: Vec<SourceProfile> = loaded
        .iter()
        .map(|source| profile::profile(&source.raw, source.provider))
        .collect();

    match opts.format {
        OutputFormat::Json => print_json(&profiles, opts)?,
        OutputFormat::Text => {
            println!("{}", renderer::render_profiles(&profiles, opts.use_color));
        }
    }
    Ok(())
}

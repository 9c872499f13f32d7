use anyhow::Result;

use crate::cli::output::OutputOptions;
use crate::core::config::AppConfig;
use crate::core::providers::Provider;

pub fn init(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        eprintln!("Config file already exists at {}", path.display());
        eprintln!("Remove it first if you want to regenerate.");
        return Ok(());
    }

    let config = AppConfig::default();
    match config.save() {
        Ok(path) => {
            println!("Generated config at {}", path.display());
            println!("  Set export_path per source so commands can run without --aws/--gcp.");
        }
        Err(e) => {
            eprintln!("Failed to generate config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

pub fn check(_opts: &OutputOptions) -> Result<()> {
    let path = AppConfig::config_path();
    if !path.exists() {
        eprintln!("No config file found at {}", path.display());
        eprintln!("Run `costlens config init` to create one.");
        return Ok(());
    }

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let issues = config.validate();
    if issues.is_empty() {
        println!("Config OK ({})", path.display());
        for source in &config.sources {
            let state = if source.enabled { "enabled" } else { "disabled" };
            let export = source
                .export_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "no export_path".to_string());
            println!("  {:<4} {:<9} {}", source.id, state, export);
        }
    } else {
        eprintln!("Config has {} issue(s):", issues.len());
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        std::process::exit(1);
    }
    Ok(())
}

pub fn add(id: &str, _opts: &OutputOptions) -> Result<()> {
    set_enabled(id, true)
}

pub fn remove(id: &str, _opts: &OutputOptions) -> Result<()> {
    set_enabled(id, false)
}

fn set_enabled(id: &str, enabled: bool) -> Result<()> {
    if Provider::from_id(id).is_none() {
        eprintln!("Unknown provider: '{}'", id);
        std::process::exit(1);
    }

    let mut config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    config.set_enabled(id, enabled);
    match config.save() {
        Ok(path) => {
            let verb = if enabled { "Enabled" } else { "Disabled" };
            println!("{} '{}' in {}", verb, id, path.display());
        }
        Err(e) => {
            eprintln!("Failed to save config: {}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

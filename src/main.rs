mod cli;
mod core;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::config::AppConfig;

#[derive(Parser)]
#[command(name = "costlens", about = "Multi-cloud billing cost reporting CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (text|json)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(short = 'j', long = "json", global = true)]
    json: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize spend across provider exports
    Report {
        /// AWS billing export CSV
        #[arg(long)]
        aws: Option<PathBuf>,

        /// GCP billing export CSV
        #[arg(long)]
        gcp: Option<PathBuf>,

        /// Ad-hoc grouping instead of the standard summary
        /// (comma-separated: date, month, provider, billing_entity, service, team, env)
        #[arg(long)]
        by: Option<String>,

        /// How many top services to show
        #[arg(short, long, default_value_t = 5)]
        top: usize,

        /// Log and skip malformed rows instead of aborting
        #[arg(long)]
        skip_bad: bool,
    },
    /// Scan a service/team/env window for cost outliers
    Detect {
        /// Service name to scan (provider-local, e.g. "Lambda")
        #[arg(long)]
        service: String,

        /// Team tag to scan
        #[arg(long)]
        team: String,

        /// Environment tag to scan
        #[arg(long)]
        env: String,

        /// Window start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        since: String,

        /// Window end date (YYYY-MM-DD, inclusive; open-ended if omitted)
        #[arg(long)]
        until: Option<String>,

        /// Cost ceiling in dollars; rows above it are flagged
        #[arg(long)]
        threshold: f64,

        /// AWS billing export CSV
        #[arg(long)]
        aws: Option<PathBuf>,

        /// GCP billing export CSV
        #[arg(long)]
        gcp: Option<PathBuf>,

        /// Log and skip malformed rows instead of aborting
        #[arg(long)]
        skip_bad: bool,
    },
    /// Profile raw exports (row counts, null counts per column)
    Profile {
        /// AWS billing export CSV
        #[arg(long)]
        aws: Option<PathBuf>,

        /// GCP billing export CSV
        #[arg(long)]
        gcp: Option<PathBuf>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Generate default config file
    Init,
    /// Validate config file and list sources
    Check,
    /// Enable a billing source
    Add {
        /// Provider ID to enable
        provider: String,
    },
    /// Disable a billing source
    Remove {
        /// Provider ID to disable
        provider: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_default();
    let opts = cli::output::OutputOptions::resolve(
        cli.format.as_deref(),
        cli.json,
        cli.pretty,
        cli.no_color,
        cli.verbose,
        &config.settings.default_format,
    );

    match cli.command {
        // Bare `costlens` reports from configured export paths.
        None => cli::report_cmd::run(None, None, None, 5, false, &opts)?,
        Some(Commands::Report {
            aws,
            gcp,
            by,
            top,
            skip_bad,
        }) => cli::report_cmd::run(aws, gcp, by, top, skip_bad, &opts)?,
        Some(Commands::Detect {
            service,
            team,
            env,
            since,
            until,
            threshold,
            aws,
            gcp,
            skip_bad,
        }) => cli::detect_cmd::run(
            cli::detect_cmd::DetectArgs {
                service,
                team,
                env,
                since,
                until,
                threshold,
                aws,
                gcp,
                skip_bad,
            },
            &opts,
        )?,
        Some(Commands::Profile { aws, gcp }) => cli::profile_cmd::run(aws, gcp, &opts)?,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init => cli::config_cmd::init(&opts)?,
            ConfigAction::Check => cli::config_cmd::check(&opts)?,
            ConfigAction::Add { provider } => cli::config_cmd::add(&provider, &opts)?,
            ConfigAction::Remove { provider } => {
                cli::config_cmd::remove(&provider, &opts)?
            }
        },
    }

    Ok(())
}

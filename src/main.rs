//! JUnit reporter CLI
//!
//! Turns a runner statistics dump into one JUnit XML report per execution context.
//!
//! ## Usage
//!
//! ```bash
//! # Write reports for every execution context
//! junit-reporter report --stats stats.json --output-dir ./reports
//!
//! # Custom file names and package qualifier
//! junit-reporter report -s stats.json -o ./reports -f "junit-{cid}.xml" -p nightly
//!
//! # Print the XML of a single context
//! junit-reporter print --stats stats.json --cid 0-0
//!
//! # Create a configuration file
//! junit-reporter config init
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use tracing::{debug, info};

mod cli;

use cli::{Args, ConfigAction, ReportOptionArgs};
use junit_reporter::config::{print_env_help, EnvConfig};
use junit_reporter::utils::{init_logger, LogLevel};
use junit_reporter::{JunitReporter, ReporterOptions, RunnerStats};

fn main() -> Result<()> {
    let args = Args::parse();
    let env = EnvConfig::load();

    let level = args
        .log_level
        .as_deref()
        .or(env.log_level.as_deref())
        .and_then(|level| level.parse().ok())
        .unwrap_or(if args.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        });
    init_logger(level);

    match args.command {
        cli::Command::Report(report_args) => run_report(report_args, &env),
        cli::Command::Print(print_args) => print_reports(print_args, &env),
        cli::Command::Config(config_args) => manage_config(config_args.action, &env),
    }
}

fn run_report(args: cli::ReportArgs, env: &EnvConfig) -> Result<()> {
    let mut options = resolve_options(&args.options, env)?;
    if let Some(dir) = args.output_dir {
        options.output_dir = Some(dir);
    }
    if let Some(format) = args.output_file_format {
        options.output_file_format = Some(format);
    }

    let reporter = JunitReporter::from_options(&options).context("Invalid reporter options")?;
    let stats = RunnerStats::load(&args.options.stats)?;

    info!(
        "Generating JUnit reports for {} execution contexts",
        stats.len()
    );

    let summary = reporter.finalize(&stats, || {
        println!("\nJUnit Reports");
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    });

    for path in &summary.written {
        println!("  ✓ {}", path.display());
    }
    for (cid, error) in &summary.failed {
        println!("  ✗ {cid}: {error}");
    }
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Written: {} | Failed: {}",
        summary.written.len(),
        summary.failed.len()
    );

    Ok(())
}

fn print_reports(args: cli::PrintArgs, env: &EnvConfig) -> Result<()> {
    let options = resolve_options(&args.options, env)?;
    let reporter = JunitReporter::from_options(&options).context("Invalid reporter options")?;
    let stats = RunnerStats::load(&args.options.stats)?;

    if let Some(cid) = &args.cid {
        if stats.context(cid).is_none() {
            anyhow::bail!("Unknown execution context: {cid}");
        }
    }

    for (cid, context) in &stats.runners {
        if args.cid.as_deref().is_some_and(|wanted| wanted != cid) {
            continue;
        }
        let xml = reporter
            .render(context)
            .with_context(|| format!("Failed to render report for {cid}"))?;
        print!("{xml}");
    }

    Ok(())
}

fn manage_config(action: ConfigAction, env: &EnvConfig) -> Result<()> {
    match action {
        ConfigAction::Init { path, force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    path.display()
                );
            }
            ReporterOptions::example().save(&path)?;
            println!("Created configuration file: {}", path.display());
        }
        ConfigAction::Show { config } => {
            let mut options = load_options(config.as_deref(), env)?;
            options.merge_env(env);
            println!(
                "{}",
                serde_yaml::to_string(&options).context("Failed to serialize config")?
            );
            if env.has_any() {
                env.print_summary();
            }
        }
        ConfigAction::Env => print_env_help(),
    }
    Ok(())
}

/// Options from file, then environment, then command line
fn resolve_options(args: &ReportOptionArgs, env: &EnvConfig) -> Result<ReporterOptions> {
    let mut options = load_options(args.config.as_deref(), env)?;
    options.merge_env(env);

    if let Some(package_name) = &args.package_name {
        options.package_name = Some(package_name.clone());
    }
    if let Some(pattern) = &args.suite_name_format {
        options.suite_name_format = Some(pattern.clone());
    }
    if args.no_standard_output {
        options.write_standard_output = false;
    }
    if let Some(dir) = &args.base_dir {
        options.base_dir = Some(dir.clone());
    }

    Ok(options)
}

fn load_options(path: Option<&Path>, env: &EnvConfig) -> Result<ReporterOptions> {
    match path.or(env.config_file.as_deref().map(Path::new)) {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            ReporterOptions::load(path)
        }
        None => ReporterOptions::load_default(),
    }
}

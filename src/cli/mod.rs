//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert test runner statistics into JUnit XML reports
#[derive(Parser, Debug)]
#[command(name = "junit-reporter")]
#[command(author = "hephaex@gmail.com")]
#[command(version)]
#[command(about = "Write one JUnit XML report per execution context")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write JUnit reports for every execution context
    Report(ReportArgs),

    /// Print the JUnit XML of execution contexts to stdout
    Print(PrintArgs),

    /// Manage reporter configuration
    Config(ConfigArgs),
}

/// Options shared by commands that build reports
#[derive(Parser, Debug)]
pub struct ReportOptionArgs {
    /// Runner statistics (JSON)
    #[arg(short, long)]
    pub stats: PathBuf,

    /// Configuration file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Package qualifier appended to the capability label
    #[arg(short, long)]
    pub package_name: Option<String>,

    /// Regex used to split suite and test titles
    #[arg(long)]
    pub suite_name_format: Option<String>,

    /// Do not embed captured commands and results
    #[arg(long)]
    pub no_standard_output: bool,

    /// Prefix stripped from spec file paths
    #[arg(long)]
    pub base_dir: Option<PathBuf>,
}

/// Arguments for report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub options: ReportOptionArgs,

    /// Directory reports are written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// File name template ({capabilities}, {cid})
    #[arg(short = 'f', long)]
    pub output_file_format: Option<String>,
}

/// Arguments for print command
#[derive(Parser, Debug)]
pub struct PrintArgs {
    #[command(flatten)]
    pub options: ReportOptionArgs,

    /// Only print this execution context
    #[arg(long)]
    pub cid: Option<String>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write an example configuration file
    Init {
        /// Path of the configuration file
        #[arg(short, long, default_value = "junit-reporter.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the effective configuration
    Show {
        /// Configuration file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List supported environment variables
    Env,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_report() {
        let args = Args::parse_from([
            "junit-reporter",
            "report",
            "--stats",
            "stats.json",
            "--output-dir",
            "reports",
            "-f",
            "{cid}.xml",
            "--no-standard-output",
        ]);

        match args.command {
            Command::Report(report) => {
                assert_eq!(report.options.stats, PathBuf::from("stats.json"));
                assert_eq!(report.output_dir, Some(PathBuf::from("reports")));
                assert_eq!(report.output_file_format.as_deref(), Some("{cid}.xml"));
                assert!(report.options.no_standard_output);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_print() {
        let args = Args::parse_from(["junit-reporter", "-v", "print", "-s", "s.json", "--cid", "0-1"]);
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Print(PrintArgs { cid: Some(ref cid), .. }) if cid == "0-1"));
    }
}

//! CLI argument definitions for the DVF ETL.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dvf-etl",
    version,
    about = "DVF ETL - Load French real-estate transactions into a document database",
    long_about = "Download the yearly DVF (Demandes de Valeurs Foncières) export,\n\
                  clean and aggregate it into one record per sale, and import it\n\
                  into a document database collection."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr. The file is truncated first.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract, transform and load one year of transactions.
    Run(RunArgs),

    /// Transform an already extracted yearly file.
    Transform(TransformArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Target database.
    #[arg(long = "db", value_name = "NAME")]
    pub database: Option<String>,

    /// Target collection.
    #[arg(long = "collection", value_name = "NAME")]
    pub collection: Option<String>,

    /// Drop the collection before importing.
    #[arg(short = 'r', long = "replace")]
    pub replace: bool,

    /// Reuse an existing `dvf_<year>.csv` instead of downloading it.
    #[arg(long = "skip-extract")]
    pub skip_extract: bool,

    /// Stop after writing the transformed file.
    #[arg(long = "skip-load")]
    pub skip_load: bool,

    #[command(flatten)]
    pub transform: TransformArgs,
}

#[derive(Args)]
pub struct TransformArgs {
    /// Year of the DVF export.
    #[arg(short = 'y', long = "year", value_parser = clap::value_parser!(u16).range(2014..))]
    pub year: u16,

    /// Write the transformed table (always on when loading).
    #[arg(short = 's', long = "save")]
    pub save: bool,

    /// Serialization of the transformed table.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: FormatArg,

    /// Render dates as `{"$date": ...}` in JSON output.
    #[arg(long = "date-envelope")]
    pub date_envelope: bool,

    /// Directory for downloaded and transformed files.
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Csv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_short_flags() {
        let cli = Cli::try_parse_from([
            "dvf-etl", "run", "-y", "2021", "--db", "dvf", "--collection", "sales", "-r", "-s",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.transform.year, 2021);
        assert_eq!(args.database.as_deref(), Some("dvf"));
        assert!(args.replace);
        assert!(args.transform.save);
        assert_eq!(args.transform.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn global_log_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dvf-etl",
            "transform",
            "--year",
            "2020",
            "--format",
            "json",
            "--log-format",
            "json",
            "--log-file",
            "activity.log",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        assert_eq!(cli.log_file, Some(PathBuf::from("activity.log")));
    }

    #[test]
    fn year_is_required() {
        assert!(Cli::try_parse_from(["dvf-etl", "transform"]).is_err());
    }
}

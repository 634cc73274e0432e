mod commands;
mod config;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Genealogical interchange file toolkit.
#[derive(Parser)]
#[command(
    name = "gedtree",
    version,
    about = "Genealogical interchange file toolkit"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Settings file (default: gedtree.toml in the working directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and report record counts or errors
    Check {
        /// Path to the interchange file
        file: PathBuf,
        /// Skip malformed lines instead of stopping at the first one
        #[arg(long)]
        best_effort: bool,
    },

    /// List the records of a file
    Records {
        /// Path to the interchange file
        file: PathBuf,
        /// Only records of this kind (tag such as INDI, or name such as family)
        #[arg(long)]
        kind: Option<String>,
    },

    /// Print one record in the file's line syntax
    Show {
        /// Path to the interchange file
        file: PathBuf,
        /// Cross-reference of the record, with or without the @ signs
        xref: String,
    },

    /// Write a subset of the records to a new file
    Export {
        /// Path to the interchange file
        file: PathBuf,
        /// Record to export; repeat for several
        #[arg(long = "xref", required = true)]
        xrefs: Vec<String>,
        /// Also export every record reachable through pointers
        #[arg(long)]
        with_links: bool,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Re-write a file with the configured line width, line ending and charset
    Normalize {
        /// Path to the interchange file
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Parse a date value and show how it reads
    Date {
        /// Date text, e.g. "ABT 12 JUN 1950"
        text: String,
        /// Display pattern such as YYYY, DD.MM.YYYY or MM/DD/YYYY
        #[arg(long)]
        format: Option<String>,
    },

    /// Show a Gregorian day in every supported calendar
    Calendar {
        /// Day as YYYY-MM-DD
        day: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let _logger = match logging::init(&cli.log_level) {
        Ok(handle) => Some(handle),
        Err(e) => {
            report_error(&e, cli.output, cli.quiet);
            None
        }
    };

    let config: Config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&e, cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Check { file, best_effort } => {
            commands::check::cmd_check(&file, best_effort, &config, cli.output, cli.quiet);
        }
        Commands::Records { file, kind } => {
            commands::records::cmd_records(&file, kind.as_deref(), &config, cli.output, cli.quiet);
        }
        Commands::Show { file, xref } => {
            commands::show::cmd_show(&file, &xref, &config, cli.output, cli.quiet);
        }
        Commands::Export {
            file,
            xrefs,
            with_links,
            out,
        } => {
            commands::export::cmd_export(
                commands::export::ExportRequest {
                    file: &file,
                    xrefs: &xrefs,
                    with_links,
                    out: out.as_deref(),
                },
                &config,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Normalize { file, out } => {
            commands::normalize::cmd_normalize(
                &file,
                out.as_deref(),
                &config,
                cli.output,
                cli.quiet,
            );
        }
        Commands::Date { text, format } => {
            commands::date::cmd_date(&text, format.as_deref(), &config, cli.output, cli.quiet);
        }
        Commands::Calendar { day } => {
            commands::calendar::cmd_calendar(&day, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

//! Extractly - Entry Point

use clap::Parser;
use extractly::app::{run_export, ExportRequest, PayloadKind};
use extractly::export::TextPageWriter;
use std::path::PathBuf;
use tracing::info;

/// Extractly - export an extraction result or history page as paged text
#[derive(Parser, Debug)]
#[command(name = "extractly")]
#[command(version)]
#[command(about = "Lay out Extractly service payloads as paged export documents")]
pub struct Args {
    /// Path to a JSON payload (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Treat the payload as a history page instead of an extraction result
    #[arg(long)]
    pub history: bool,

    /// Directory the export is written to
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Only export history entries containing this term
    #[arg(short, long)]
    pub search: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Advance by the true wrapped line count in the summary export
    #[arg(long)]
    pub exact_summary: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = extractly::config::load_config_with_precedence(args.config.clone())?;
        let merged = extractly::config::merge_config(config_file)?;
        let with_env = extractly::config::apply_env_overrides(merged);
        let exact_override = if args.exact_summary { Some(true) } else { None };
        extractly::config::apply_cli_overrides(with_env, args.out.clone(), exact_override)
    };

    extractly::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let input = extractly::source::detect_input_source(args.file.clone())?;
    let json = input.read_to_string()?;

    let request = ExportRequest {
        payload: if args.history {
            PayloadKind::History
        } else {
            PayloadKind::Summary
        },
        search: args.search.clone(),
    };

    let mut writer = TextPageWriter::new(config.output_dir.clone());
    let report = run_export(&json, &request, &config, &mut writer)?;

    println!(
        "Wrote {} ({} page{}, {} row{})",
        report.path.display(),
        report.pages,
        if report.pages == 1 { "" } else { "s" },
        report.rows,
        if report.rows == 1 { "" } else { "s" },
    );

    Ok(())
}

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use paperlens_analysis::Analyzer;
use paperlens_core::ReportSink;
use paperlens_reporting::{DirectorySink, ExportFormat, export_metadata_json};

mod output;
mod settings;

use output::ColorMode;
use settings::CliOverrides;

const DEFAULT_SAMPLES_DIR: &str = "data/sample_papers";

/// Scientific paper analyzer - sections, metadata, keywords and summary from a PDF
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a PDF (or .txt/.md) document
    Analyze {
        /// Path to the document
        file_path: PathBuf,

        /// Number of keywords to extract
        #[arg(long)]
        top_k: Option<usize>,

        /// Number of summary sentences
        #[arg(long)]
        sentences: Option<usize>,

        /// Directory the report is saved into
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Do not save a report file
        #[arg(long)]
        no_save: bool,

        /// Also write the metadata block as JSON to this path
        #[arg(long)]
        metadata_json: Option<PathBuf>,

        /// Saved report format: json, markdown or text
        #[arg(long)]
        format: Option<ExportFormat>,

        /// Print the full report as JSON instead of the human-readable view
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// List the sample PDFs available for analysis
    Samples {
        /// Directory to look in
        dir: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Analyze {
            file_path,
            top_k,
            sentences,
            output_dir,
            no_save,
            metadata_json,
            format,
            json,
            no_color,
        } => {
            let overrides = CliOverrides {
                top_k,
                sentences,
                output_dir,
                format,
                no_color,
            };
            analyze(file_path, overrides, no_save, metadata_json, json)
        }
        Command::Samples { dir, no_color } => samples(dir, no_color),
    }
}

fn analyze(
    file_path: PathBuf,
    overrides: CliOverrides,
    no_save: bool,
    metadata_json: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let config_file = paperlens_core::config_file::load_config();
    let settings = settings::resolve(&overrides, |k| std::env::var(k).ok(), &config_file)?;
    let color = ColorMode(settings.color && !json);

    // In JSON mode stdout carries only the report; status lines go to stderr.
    let mut writer: Box<dyn Write> = if json {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };

    let text = paperlens_ingest::load_document(&file_path)
        .with_context(|| format!("Failed to load {}", file_path.display()))?;
    let source = format!("File: {}", paperlens_ingest::source_label(&file_path));

    let analyzer = Analyzer::with_config(settings.analysis);
    let report = analyzer.analyze(&text, &source);

    if json {
        println!("{}", report.to_json_pretty()?);
    } else {
        output::print_document_header(&mut writer, &source, report.stats.text_length_chars, color)?;
        output::print_metadata(&mut writer, &report.metadata, color)?;
        output::print_sections(
            &mut writer,
            &report.sections,
            &text,
            settings.preview_chars,
            color,
        )?;
        output::print_keywords(&mut writer, &report.keywords, color)?;
        output::print_summary(&mut writer, &report.summary, color)?;
        writeln!(writer)?;
    }

    if !no_save {
        let sink = DirectorySink::new(&settings.output_dir, settings.format);
        let path = sink.save(&report).with_context(|| {
            format!("Failed to save report to {}", settings.output_dir.display())
        })?;
        output::print_saved(&mut writer, "report", &path, color)?;
    }

    if let Some(path) = metadata_json {
        export_metadata_json(&report.metadata, &path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        output::print_saved(&mut writer, "metadata", &path, color)?;
    }

    Ok(())
}

fn samples(dir: Option<PathBuf>, no_color: bool) -> anyhow::Result<()> {
    let dir = dir.unwrap_or_else(|| PathBuf::from(DEFAULT_SAMPLES_DIR));
    let pdfs = paperlens_ingest::list_pdfs(&dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?;
    let mut stdout = std::io::stdout();
    output::print_samples(&mut stdout, &dir, &pdfs, ColorMode(!no_color))?;
    Ok(())
}

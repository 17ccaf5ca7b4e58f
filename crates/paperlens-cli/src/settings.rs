use std::path::PathBuf;

use anyhow::Context;
use paperlens_analysis::{AnalysisConfig, AnalysisConfigBuilder};
use paperlens_core::config_file::ConfigFile;
use paperlens_reporting::ExportFormat;

pub const DEFAULT_OUTPUT_DIR: &str = "reports";
pub const DEFAULT_PREVIEW_CHARS: usize = 20_000;

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub top_k: Option<usize>,
    pub sentences: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub no_color: bool,
}

/// Fully resolved settings for one `analyze` run.
#[derive(Debug)]
pub struct Settings {
    pub analysis: AnalysisConfig,
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub color: bool,
    pub preview_chars: usize,
}

/// Resolve configuration: CLI flags > env vars > config file > defaults.
///
/// `env` looks up an environment variable; unparsable numeric values are
/// ignored.
pub fn resolve(
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
    file: &ConfigFile,
) -> anyhow::Result<Settings> {
    let file_analysis = file.analysis.clone().unwrap_or_default();
    let file_output = file.output.clone().unwrap_or_default();
    let file_display = file.display.clone().unwrap_or_default();

    let env_usize = |key: &str| env(key).and_then(|v| v.trim().parse::<usize>().ok());

    let top_k = cli
        .top_k
        .or_else(|| env_usize("PAPERLENS_TOP_K"))
        .or(file_analysis.top_k);
    let sentences = cli
        .sentences
        .or_else(|| env_usize("PAPERLENS_SENTENCES"))
        .or(file_analysis.summary_sentences);

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| env("PAPERLENS_OUTPUT_DIR").map(PathBuf::from))
        .or_else(|| file_output.dir.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let format = match (cli.format, file_output.format) {
        (Some(f), _) => f,
        (None, Some(s)) => s
            .parse::<ExportFormat>()
            .map_err(anyhow::Error::msg)
            .context("invalid output.format in config file")?,
        (None, None) => ExportFormat::default(),
    };

    let mut builder = AnalysisConfigBuilder::new();
    if let Some(n) = top_k {
        builder = builder.top_k(n);
    }
    if let Some(n) = sentences {
        builder = builder.summary_sentences(n);
    }
    if let Some(n) = file_analysis.max_title_lines {
        builder = builder.max_title_lines(n);
    }
    if let Some(n) = file_analysis.max_emails {
        builder = builder.max_emails(n);
    }
    for phrase in file_analysis.extra_blacklist_phrases.unwrap_or_default() {
        builder = builder.add_blacklist_phrase(phrase);
    }
    let analysis = builder.build().context("invalid analysis configuration")?;

    Ok(Settings {
        analysis,
        output_dir,
        format,
        color: !cli.no_color && file_display.color.unwrap_or(true),
        preview_chars: file_display.preview_chars.unwrap_or(DEFAULT_PREVIEW_CHARS),
    })
}

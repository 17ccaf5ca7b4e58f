use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub analysis: Option<AnalysisSettings>,
    pub output: Option<OutputConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub top_k: Option<usize>,
    pub summary_sentences: Option<usize>,
    pub max_title_lines: Option<usize>,
    pub max_emails: Option<usize>,
    /// Extra generic phrases to drop from keyword output.
    pub extra_blacklist_phrases: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: Option<String>,
    /// `json`, `markdown` or `text`.
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color: Option<bool>,
    pub preview_chars: Option<usize>,
}

/// Platform config directory path: `<config_dir>/paperlens/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("paperlens").join("config.toml"))
}

/// Load config by cascading CWD `.paperlens.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".paperlens.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let base_analysis = base.analysis.unwrap_or_default();
    let overlay_analysis = overlay.analysis.unwrap_or_default();
    let base_output = base.output.unwrap_or_default();
    let overlay_output = overlay.output.unwrap_or_default();
    let base_display = base.display.unwrap_or_default();
    let overlay_display = overlay.display.unwrap_or_default();

    ConfigFile {
        analysis: Some(AnalysisSettings {
            top_k: overlay_analysis.top_k.or(base_analysis.top_k),
            summary_sentences: overlay_analysis
                .summary_sentences
                .or(base_analysis.summary_sentences),
            max_title_lines: overlay_analysis
                .max_title_lines
                .or(base_analysis.max_title_lines),
            max_emails: overlay_analysis.max_emails.or(base_analysis.max_emails),
            extra_blacklist_phrases: overlay_analysis
                .extra_blacklist_phrases
                .or(base_analysis.extra_blacklist_phrases),
        }),
        output: Some(OutputConfig {
            dir: overlay_output.dir.or(base_output.dir),
            format: overlay_output.format.or(base_output.format),
        }),
        display: Some(DisplayConfig {
            color: overlay_display.color.or(base_display.color),
            preview_chars: overlay_display.preview_chars.or(base_display.preview_chars),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_settings_round_trip_toml() {
        let config = ConfigFile {
            analysis: Some(AnalysisSettings {
                top_k: Some(8),
                ..Default::default()
            }),
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: ConfigFile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.analysis.unwrap().top_k, Some(8));
    }

    #[test]
    fn partial_config_parses() {
        let toml_str = "[output]\ndir = \"out\"\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        assert!(parsed.analysis.is_none());
        assert_eq!(parsed.output.unwrap().dir.as_deref(), Some("out"));
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            analysis: Some(AnalysisSettings {
                top_k: Some(5),
                summary_sentences: Some(2),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            analysis: Some(AnalysisSettings {
                top_k: Some(20),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).analysis.unwrap();
        assert_eq!(merged.top_k, Some(20));
        assert_eq!(merged.summary_sentences, Some(2));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            output: Some(OutputConfig {
                dir: Some("/base/reports".to_string()),
                format: None,
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(merged.output.unwrap().dir.as_deref(), Some("/base/reports"));
    }

    #[test]
    fn load_from_missing_path_is_none() {
        assert!(load_from_path(Path::new("/definitely/not/here/.paperlens.toml")).is_none());
    }
}

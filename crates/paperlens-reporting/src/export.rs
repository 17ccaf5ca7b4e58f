use std::path::Path;

use paperlens_core::{AnalysisReport, Metadata, ReportError};

use crate::types::ExportFormat;

/// Placeholder shown for a metadata field that was not detected.
const NOT_DETECTED: &str = "Not detected";

/// Export a report to the given path in the given format.
pub fn export_report(
    report: &AnalysisReport,
    format: ExportFormat,
    path: &Path,
) -> Result<(), ReportError> {
    let content = render(report, format)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Render a report to a string in the given format.
pub(crate) fn render(report: &AnalysisReport, format: ExportFormat) -> Result<String, ReportError> {
    Ok(match format {
        ExportFormat::Json => report.to_json_pretty()?,
        ExportFormat::Markdown => export_markdown(report),
        ExportFormat::Text => export_text(report),
    })
}

/// Write only the metadata block as pretty JSON.
pub fn export_metadata_json(metadata: &Metadata, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(metadata)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn or_placeholder(s: &str) -> &str {
    if s.is_empty() { NOT_DETECTED } else { s }
}

fn emails_str(emails: &[String]) -> String {
    if emails.is_empty() {
        NOT_DETECTED.to_string()
    } else {
        emails.join(", ")
    }
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

pub fn export_markdown(report: &AnalysisReport) -> String {
    let mut out = String::with_capacity(4096);
    let meta = &report.metadata;

    let heading = if meta.title.is_empty() {
        report.source.as_str()
    } else {
        meta.title.as_str()
    };
    out.push_str(&format!("# {}\n\n", heading));
    out.push_str(&format!("**Source:** {}\n\n", report.source));

    out.push_str("## Metadata\n\n");
    out.push_str("| Field | Value |\n|-------|-------|\n");
    out.push_str(&format!("| Title | {} |\n", md_escape(or_placeholder(&meta.title))));
    out.push_str(&format!("| Year | {} |\n", or_placeholder(&meta.year)));
    out.push_str(&format!(
        "| Emails | {} |\n\n",
        md_escape(&emails_str(&meta.emails))
    ));

    out.push_str("## Stats\n\n");
    out.push_str(&format!(
        "- Text length: {} characters\n",
        report.stats.text_length_chars
    ));
    out.push_str(&format!(
        "- Sections detected: {}\n",
        report.stats.num_sections_detected
    ));
    out.push_str(&format!("- Keywords: {}\n\n", report.stats.num_keywords));

    out.push_str("## Keywords\n\n");
    if report.keywords.is_empty() {
        out.push_str("_None_\n\n");
    } else {
        for kw in &report.keywords {
            out.push_str(&format!("- {}\n", kw));
        }
        out.push('\n');
    }

    out.push_str("## Summary\n\n");
    if report.summary.is_empty() {
        out.push_str("_None_\n\n");
    } else {
        out.push_str(&format!("{}\n\n", report.summary));
    }

    if !report.sections.is_empty() {
        out.push_str("## Sections\n\n");
        for section in &report.sections {
            out.push_str(&format!("### {}\n\n{}\n\n", section.kind, section.body));
        }
    }
    out
}

pub fn export_text(report: &AnalysisReport) -> String {
    let mut out = String::with_capacity(4096);
    let meta = &report.metadata;

    out.push_str(&format!("Source: {}\n", report.source));
    out.push_str(&format!("Title:  {}\n", or_placeholder(&meta.title)));
    out.push_str(&format!("Year:   {}\n", or_placeholder(&meta.year)));
    out.push_str(&format!("Emails: {}\n", emails_str(&meta.emails)));
    out.push_str(&format!(
        "Stats:  {} chars, {} sections, {} keywords\n",
        report.stats.text_length_chars,
        report.stats.num_sections_detected,
        report.stats.num_keywords
    ));

    out.push_str("\nKeywords\n--------\n");
    for (i, kw) in report.keywords.iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", i + 1, kw));
    }

    out.push_str("\nSummary\n-------\n");
    out.push_str(&report.summary);
    out.push('\n');

    for section in &report.sections {
        let name = section.kind.to_string().to_uppercase();
        out.push_str(&format!("\n{}\n{}\n{}\n", name, "-".repeat(name.len()), section.body));
    }
    out
}

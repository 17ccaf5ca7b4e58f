use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use paperlens_analysis::text_processing::char_prefix;
use paperlens_core::{Metadata, SectionMap};

/// Characters of raw text shown when no sections were detected.
pub const FULL_TEXT_PREVIEW_CHARS: usize = 15_000;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn print_heading(w: &mut dyn Write, title: &str, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", title.bold().cyan())?;
    } else {
        writeln!(w, "{}", title)?;
    }
    writeln!(w, "{}", "=".repeat(title.chars().count()))?;
    Ok(())
}

/// Print the document line shown before any analysis output.
pub fn print_document_header(
    w: &mut dyn Write,
    source: &str,
    chars: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "Analyzing".bold(), source.bold())?;
        writeln!(w, "{}", format!("{} characters extracted", chars).dimmed())?;
    } else {
        writeln!(w, "Analyzing {}", source)?;
        writeln!(w, "{} characters extracted", chars)?;
    }
    Ok(())
}

/// Print guessed metadata, with placeholders for misses.
pub fn print_metadata(w: &mut dyn Write, meta: &Metadata, color: ColorMode) -> std::io::Result<()> {
    print_heading(w, "Metadata", color)?;

    let title = if meta.title.is_empty() {
        "Not detected"
    } else {
        meta.title.as_str()
    };
    let year = if meta.year.is_empty() {
        "—"
    } else {
        meta.year.as_str()
    };
    let emails = if meta.emails.is_empty() {
        "Not detected".to_string()
    } else {
        meta.emails.join(", ")
    };

    for (label, value) in [("Title", title), ("Year", year), ("Emails", emails.as_str())] {
        if color.enabled() {
            writeln!(w, "  {:<7} {}", format!("{}:", label).bold(), value)?;
        } else {
            writeln!(w, "  {:<7} {}", format!("{}:", label), value)?;
        }
    }
    Ok(())
}

/// Print each detected section with a bounded body preview, or a preview of
/// the raw text when nothing was detected.
pub fn print_sections(
    w: &mut dyn Write,
    sections: &SectionMap,
    full_text: &str,
    preview_chars: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    print_heading(w, "Sections", color)?;

    if sections.is_empty() {
        let msg = "No standard sections detected. Showing full text preview.";
        if color.enabled() {
            writeln!(w, "{}", msg.yellow())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
        writeln!(w)?;
        writeln!(w, "{}", char_prefix(full_text, FULL_TEXT_PREVIEW_CHARS))?;
        return Ok(());
    }

    for section in sections {
        let name = capitalize(section.kind.as_str());
        if color.enabled() {
            writeln!(w, "\n{}", name.bold().green())?;
        } else {
            writeln!(w, "\n[{}]", name)?;
        }
        let preview = char_prefix(&section.body, preview_chars);
        writeln!(w, "{}", preview)?;
        if preview.len() < section.body.len() {
            let note = "[... truncated]";
            if color.enabled() {
                writeln!(w, "{}", note.dimmed())?;
            } else {
                writeln!(w, "{}", note)?;
            }
        }
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Print the ranked keyword list.
pub fn print_keywords(
    w: &mut dyn Write,
    keywords: &[String],
    color: ColorMode,
) -> std::io::Result<()> {
    print_heading(w, "Keywords", color)?;
    if keywords.is_empty() {
        writeln!(w, "  No keywords found (text too short or too noisy).")?;
        return Ok(());
    }
    for (i, kw) in keywords.iter().enumerate() {
        if color.enabled() {
            writeln!(w, "  {:>2}. {}", i + 1, kw.magenta())?;
        } else {
            writeln!(w, "  {:>2}. {}", i + 1, kw)?;
        }
    }
    Ok(())
}

/// Print the extractive summary.
pub fn print_summary(w: &mut dyn Write, summary: &str, color: ColorMode) -> std::io::Result<()> {
    print_heading(w, "Summary", color)?;
    if summary.is_empty() {
        writeln!(w, "  No summary available.")?;
    } else {
        writeln!(w, "{}", summary)?;
    }
    Ok(())
}

/// Print where a file was written.
pub fn print_saved(
    w: &mut dyn Write,
    what: &str,
    path: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {} to {}", "Saved".green(), what, path.display())?;
    } else {
        writeln!(w, "Saved {} to {}", what, path.display())?;
    }
    Ok(())
}

/// Print the sample PDFs available for analysis.
pub fn print_samples(
    w: &mut dyn Write,
    dir: &Path,
    samples: &[PathBuf],
    color: ColorMode,
) -> std::io::Result<()> {
    if samples.is_empty() {
        writeln!(w, "No sample PDFs found in {}", dir.display())?;
        return Ok(());
    }
    if color.enabled() {
        writeln!(w, "{} {}", "Sample papers in".bold(), dir.display())?;
    } else {
        writeln!(w, "Sample papers in {}", dir.display())?;
    }
    for path in samples {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        writeln!(w, "  - {}", name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperlens_core::{Section, SectionKind};

    fn render(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_metadata_placeholders() {
        let out = render(|w| print_metadata(w, &Metadata::default(), ColorMode(false)));
        assert!(out.contains("Title:  Not detected"));
        assert!(out.contains("Year:   —"));
        assert!(out.contains("Emails: Not detected"));
    }

    #[test]
    fn test_sections_fallback_preview() {
        let text = "x".repeat(20_000);
        let out = render(|w| print_sections(w, &SectionMap::new(), &text, 100, ColorMode(false)));
        assert!(out.contains("No standard sections detected"));
        assert_eq!(out.lines().last().unwrap().len(), FULL_TEXT_PREVIEW_CHARS);
    }

    #[test]
    fn test_sections_truncated_preview() {
        let mut sections = SectionMap::new();
        sections.insert(Section {
            kind: SectionKind::Results,
            heading: "Results".to_string(),
            body: "y".repeat(50),
            span: 0..58,
        });
        let out = render(|w| print_sections(w, &sections, "", 10, ColorMode(false)));
        assert!(out.contains("[Results]\nyyyyyyyyyy\n[... truncated]"));
    }

    #[test]
    fn test_keywords_numbered() {
        let kws = vec!["graph kernels".to_string(), "sparse solvers".to_string()];
        let out = render(|w| print_keywords(w, &kws, ColorMode(false)));
        assert!(out.contains("   1. graph kernels\n   2. sparse solvers\n"));
        let empty = render(|w| print_keywords(w, &[], ColorMode(false)));
        assert!(empty.contains("No keywords found"));
    }

    #[test]
    fn test_samples_listing() {
        let dir = Path::new("data/sample_papers");
        let out = render(|w| print_samples(w, dir, &[dir.join("a.pdf")], ColorMode(false)));
        assert!(out.contains("  - a.pdf"));
        let none = render(|w| print_samples(w, dir, &[], ColorMode(false)));
        assert!(none.starts_with("No sample PDFs found"));
    }
}

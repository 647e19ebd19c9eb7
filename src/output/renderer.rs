use std::path::Path;
use console::{pad_str, style, Alignment};
use serde::Serialize;

use crate::errors::PwnError;
use crate::models::{CommandRecord, Technique};

/// Visual roles in the terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Resolved binary path
    Path,
    /// Function tag heading
    Tag,
    /// Technique code line
    Code,
    /// `[description]` / `[code]` markers
    Label,
}

pub fn paint(text: &str, role: Style) -> String {
    match role {
        Style::Path => style(text).red().to_string(),
        Style::Tag => style(text).bold().to_string(),
        Style::Code => style(text).green().to_string(),
        Style::Label => style(text).dim().to_string(),
    }
}

fn display_path(record: &CommandRecord) -> String {
    record
        .resolved_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| record.name.clone())
}

/// One line per binary: path padded to a shared column, then its sorted tags.
pub fn render_listing(records: &[CommandRecord]) -> String {
    let width = records
        .iter()
        .map(|r| display_path(r).chars().count())
        .max()
        .unwrap_or(0)
        + 4;

    let mut out = String::new();
    for record in records {
        let path = paint(&display_path(record), Style::Path);
        out.push_str(&format!(
            "{}\t{}\n",
            pad_str(&path, width, Alignment::Left, None),
            record.sorted_tags().join(", "),
        ));
    }
    out
}

pub fn render_description_header() -> String {
    "pwnable command description.\n---\n".to_string()
}

/// Describe one binary. With `tags`, only those functions are shown and
/// any the binary lacks are skipped; otherwise all, in document order.
pub fn render_description(record: &CommandRecord, tags: Option<&[String]>) -> String {
    let mut out = format!("{}:\n", paint(&display_path(record), Style::Path));

    match tags {
        Some(tags) => {
            for tag in tags {
                if let Some(techniques) = record.techniques(tag) {
                    out.push_str(&render_techniques(tag, techniques));
                }
            }
        }
        None => {
            for (tag, techniques) in record.techniques_by_tag() {
                out.push_str(&render_techniques(tag, techniques));
            }
        }
    }

    out.push_str("---\n");
    out
}

pub fn render_techniques(tag: &str, techniques: &[Technique]) -> String {
    let mut out = format!("{}:\n", paint(tag, Style::Tag));
    for technique in techniques {
        if let Some(description) = &technique.description {
            out.push_str(&format!("  {} {}\n", paint("[description]", Style::Label), description));
        }
        out.push_str(&format!("  {}\n", paint("[code]", Style::Label)));
        for line in technique.code.split('\n') {
            out.push_str(&format!("  {}\n", paint(line, Style::Code)));
        }
    }
    out
}

pub fn render_functions(tags: &[String]) -> String {
    tags.iter().map(|t| format!("{}\n", t)).collect()
}

pub fn render_update_notice(entries_dir: &Path, catalog_path: &Path) -> String {
    format!(
        "Entries: {}\nFunctions: {}\nUpdate the knowledge base from its upstream repository (e.g. `git pull`) to refresh command information.\n",
        entries_dir.display(),
        catalog_path.display(),
    )
}

#[derive(Debug, Serialize)]
struct CandidateSummary<'a> {
    name: &'a str,
    path: Option<String>,
    tags: Vec<&'a str>,
}

/// Machine-readable form of a listing.
pub fn render_json(records: &[CommandRecord]) -> Result<String, PwnError> {
    let summaries: Vec<CandidateSummary> = records
        .iter()
        .map(|r| CandidateSummary {
            name: &r.name,
            path: r.resolved_path().map(|p| p.display().to_string()),
            tags: r.sorted_tags(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&summaries)?)
}

pub fn render_version() -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");
    let build_ts = option_env!("BUILD_TIMESTAMP").unwrap_or("unknown");
    format!("{} (commit {}, built {})", version, git_hash, build_ts)
}

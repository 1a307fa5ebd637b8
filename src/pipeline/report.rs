// src/pipeline/report.rs

//! Feed and report rendering.

use chrono::SecondsFormat;

use crate::error::Result;
use crate::models::{Posting, ResultSet};

const HEADER: &str = "| Company | Role | Location | Posted | Link |\n|---|---|---|---|---|";

/// Placeholder for postings with no known age.
pub const UNKNOWN_AGE: &str = "-";

/// Context lines printed above the table.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub max_age_days: u32,
    /// Seed list the run was driven by
    pub source: &'a str,
}

/// The JSON feed: `{generatedAt, count, postings}`, pretty-printed.
pub fn render_json(result: &ResultSet) -> Result<String> {
    let mut json = serde_json::to_string_pretty(result)?;
    json.push('\n');
    Ok(json)
}

/// The Markdown report with one table row per posting.
pub fn render_markdown(result: &ResultSet, context: &ReportContext<'_>) -> String {
    let rows: Vec<String> = result.postings.iter().map(table_row).collect();
    format!(
        "# EU New Grad Roles (auto-generated)\n\n\
         - Updated: {updated}\n\
         - New-grad roles from the last {days} days (or unknown date)\n\
         - Source: {source}\n\n\
         {HEADER}\n\
         {rows}\n",
        updated = result.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        days = context.max_age_days,
        source = context.source,
        rows = rows.join("\n"),
    )
}

fn table_row(posting: &Posting) -> String {
    format!(
        "| {} | {} | {} | {} | [Apply]({}) |",
        cell(&posting.company),
        cell(&posting.title),
        cell(&posting.location),
        posting.age_bucket.as_deref().unwrap_or(UNKNOWN_AGE),
        link_target(&posting.apply_url),
    )
}

/// Percent-encode what would end the link or split the row.
fn link_target(url: &str) -> String {
    url.trim()
        .replace(' ', "%20")
        .replace('|', "%7C")
        .replace('(', "%28")
        .replace(')', "%29")
}

/// Keep a value on one line and inside its column.
fn cell(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ").replace('|', "\\|")
}

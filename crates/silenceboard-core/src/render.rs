use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::Result;
use crate::models::SilenceRow;
use crate::text::{code_span, table_cell};

const TABLE_HEADER: &str = "| Comment         | Creator           | Until          | Matchers          |\n\
                            |-----------------|-------------------|----------------|-------------------|";

/// Renders the markdown block published between the section markers.
pub fn render_section(header: &str, rows: &[SilenceRow], rendered_at: DateTime<Utc>) -> Result<String> {
    let mut out = String::new();
    writeln!(out)?;
    writeln!(out, "## {header}")?;
    writeln!(out)?;
    write!(out, "{TABLE_HEADER}")?;
    for row in rows {
        write!(
            out,
            "\n| {} | {} | {} | {} |",
            table_cell(&row.comment),
            table_cell(&row.created_by),
            row.ends_at.format("%Y-%m-%d"),
            code_span(&row.matcher_id),
        )?;
    }
    writeln!(out)?;
    writeln!(out)?;
    writeln!(
        out,
        "Last updated on {}",
        rendered_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    Ok(out)
}

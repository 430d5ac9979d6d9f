use std::io::Write;

use crate::error::StatsError;
use crate::stats::Row;
use crate::utils::format_number;

/// Column label for a row field: `python_version` becomes `Python version`.
pub fn header_label(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Writes one `### title` section with a two-column downloads table.
/// Rows are emitted in the order given.
pub fn write_table<W: Write>(
    out: &mut W,
    title: &str,
    field: &str,
    rows: &[Row],
) -> Result<(), StatsError> {
    writeln!(out, "### {title}")?;
    writeln!(out)?;
    writeln!(out, "| {} | Downloads      |", header_label(field))?;
    writeln!(out, "|:--------|---------------:|")?;
    for row in rows {
        writeln!(
            out,
            "| {} | {} |",
            row.field(field)?,
            format_number(row.download_count)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

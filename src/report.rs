use chrono::NaiveDate;
use std::io::Write;
use std::time::Instant;
use tracing::info;

use crate::client::StatsClient;
use crate::error::StatsError;
use crate::markdown::write_table;
use crate::runner::CommandRunner;
use crate::stats::{Dimension, Overview};
use crate::utils::format_number;

/// Writes the full Markdown report, section by section.
///
/// Each section is written as soon as its data is fetched, so a failure part
/// way through leaves the earlier sections in `out`.
pub fn write_markdown<R: CommandRunner, W: Write>(
    client: &mut StatsClient<R>,
    out: &mut W,
    last_update: NaiveDate,
) -> Result<(), StatsError> {
    let start_time = Instant::now();
    info!(action = "start", component = "report", package = %client.settings().package, "Generating report");

    write_header(out, &client.settings().package, client.settings().days, last_update)?;

    let overview = client.overview()?;
    write_overview(out, &client.settings().package, &overview)?;

    for dimension in Dimension::ALL {
        let rows = client.downloads_by(dimension)?;
        write_table(out, dimension.title(), dimension.field(), &rows)?;
        out.flush()?;
    }

    info!(
        action = "complete",
        component = "report",
        duration_ms = start_time.elapsed().as_millis(),
        "Report generated"
    );
    Ok(())
}

fn write_header<W: Write>(
    out: &mut W,
    package: &str,
    days: u32,
    last_update: NaiveDate,
) -> Result<(), StatsError> {
    writeln!(out, "# Download stats")?;
    writeln!(out)?;
    writeln!(
        out,
        "{package} download statistics of the last {days} days (last update"
    )?;
    writeln!(out, "*{}*).", last_update.format("%Y-%m-%d"))?;
    writeln!(out, "Generated via `pkgstats`.")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn write_overview<W: Write>(
    out: &mut W,
    package: &str,
    overview: &Overview,
) -> Result<(), StatsError> {
    writeln!(out, "### Overview")?;
    writeln!(out)?;
    writeln!(out, "|                           | Downloads        |")?;
    writeln!(out, "|:--------------------------|-----------------:|")?;
    writeln!(
        out,
        "| **Per month**             |      {} |",
        format_number(overview.monthly)
    )?;
    writeln!(
        out,
        "| **Per day**               |        {} |",
        format_number(overview.daily)
    )?;
    writeln!(
        out,
        "| **PYPI ranking**          |      {} |",
        overview.ranking
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "*See more [details](https://pepy.tech/project/{package}).*"
    )?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

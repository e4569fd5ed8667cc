//! Command handlers. Output goes to the given writer so tests can capture it.

use std::io::Write;

use supscout_scraper::{Fetcher, Scout, SearchOutcome};

/// Run the full pipeline and print the rendered cards, or a note on stderr
/// when nothing survived filtering.
///
/// # Errors
///
/// Returns an error for a blank query or when writing the output fails.
pub(crate) async fn run_search<F: Fetcher>(
    scout: &Scout<F>,
    query: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match scout.search(query).await? {
        SearchOutcome::Cards(html) => writeln!(out, "{html}")?,
        SearchOutcome::NoContent => eprintln!("no suppliers found for \"{}\"", query.trim()),
    }
    Ok(())
}

/// Print the merged candidate list as a numbered listing or as JSON.
///
/// # Errors
///
/// Returns an error for a blank query or when serializing or writing fails.
pub(crate) async fn run_collect<F: Fetcher>(
    scout: &Scout<F>,
    query: &str,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let candidates = scout.collect(query).await?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &candidates)?;
        writeln!(out)?;
        return Ok(());
    }

    for (i, candidate) in candidates.iter().enumerate() {
        writeln!(out, "{:>3}. {}", i + 1, candidate.title)?;
        writeln!(out, "     {} ({})", candidate.link, candidate.source)?;
    }
    writeln!(out, "{} candidates", candidates.len())?;
    Ok(())
}

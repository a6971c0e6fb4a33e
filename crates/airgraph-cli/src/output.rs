//! Output formatting for itinerary rendering.

use std::io::{self, Write};

use clap::ValueEnum;

use airgraph_lib::Itinerary;

/// Output format for the `route` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One directions line per stop and leg.
    #[default]
    Text,
    /// Structured itinerary as pretty-printed JSON.
    Json,
}

/// Render an itinerary in the requested format to `writer`.
pub fn render<W: Write>(writer: &mut W, itinerary: &Itinerary, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(writer, itinerary),
        OutputFormat::Json => render_json(writer, itinerary),
    }
}

/// Human-friendly directions, one line per entry.
pub fn render_text<W: Write>(writer: &mut W, itinerary: &Itinerary) -> io::Result<()> {
    for line in itinerary.lines() {
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

/// Render an itinerary in JSON format.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<W: Write>(writer: &mut W, itinerary: &Itinerary) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, itinerary).map_err(io::Error::other)?;
    writer.write_all(b"\n")?;
    Ok(())
}

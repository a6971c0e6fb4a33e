//! Markup export of the flight network.

use std::fmt::Write;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::network::FlightNetwork;

/// File extension required for export destinations.
const EXPORT_EXTENSION: &str = "xml";

/// Written in place of a missing carrier id.
const NULL_MARKER: &str = r"\N";

/// Render every airport and its outbound edges as an XML document.
///
/// Vertices appear in ascending airport id; edges keep adjacency order.
pub fn render_graph_xml(network: &FlightNetwork) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(buffer, "<graph>");

    for airport in network.airports.iter() {
        let _ = writeln!(buffer, "<vertex>");
        let _ = writeln!(buffer, "\t<id>{}</id>", airport.id);
        let _ = writeln!(buffer, "\t<name>{}</name>", escape(&airport.name));
        let _ = writeln!(buffer, "\t<city>{}</city>", escape(&airport.city));
        let _ = writeln!(
            buffer,
            "\t<latitude>{}</latitude>",
            airport.position.latitude
        );
        let _ = writeln!(
            buffer,
            "\t<longitude>{}</longitude>",
            airport.position.longitude
        );
        let _ = writeln!(buffer, "\t<edges>");
        for edge in network.adjacency.neighbours(airport.id) {
            let carrier_id = edge
                .carrier_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| NULL_MARKER.to_string());
            let _ = writeln!(buffer, "\t\t<edge>");
            let _ = writeln!(buffer, "\t\t\t<airportID>{}</airportID>", edge.destination);
            let _ = writeln!(
                buffer,
                "\t\t\t<airportCode>{}</airportCode>",
                escape(&edge.destination_code)
            );
            let _ = writeln!(buffer, "\t\t\t<carrierID>{}</carrierID>", carrier_id);
            let _ = writeln!(
                buffer,
                "\t\t\t<carrierName>{}</carrierName>",
                escape(&edge.carrier_name)
            );
            let _ = writeln!(buffer, "\t\t\t<distance>{}</distance>", edge.distance);
            let _ = writeln!(buffer, "\t\t</edge>");
        }
        let _ = writeln!(buffer, "\t</edges>");
        let _ = writeln!(buffer, "</vertex>");
    }

    let _ = writeln!(buffer, "</graph>");
    buffer
}

/// Write the network to `destination`, which must name an `.xml` file.
pub fn export_graph(network: &FlightNetwork, destination: &Path) -> Result<()> {
    validate_destination(destination)?;
    fs::write(destination, render_graph_xml(network))?;
    info!(
        path = %destination.display(),
        airports = network.airports.len(),
        routes = network.adjacency.edge_count(),
        "exported flight network"
    );
    Ok(())
}

fn validate_destination(destination: &Path) -> Result<()> {
    let has_extension = destination
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == EXPORT_EXTENSION);
    let has_stem = destination
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| !stem.is_empty());

    if has_extension && has_stem {
        Ok(())
    } else {
        Err(Error::InvalidDestination {
            path: destination.to_path_buf(),
        })
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

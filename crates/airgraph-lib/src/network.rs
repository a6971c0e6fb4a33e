use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::record::Record;

/// Source-assigned airport identifier.
pub type AirportId = i64;

/// Source-assigned carrier identifier.
pub type CarrierId = i64;

/// Display name used when a route references a carrier that is not loaded.
pub const UNKNOWN_CARRIER: &str = "Unknown Carrier";

/// Null marker used by the dataset for missing values.
const NULL_MARKER: &str = r"\N";

mod airline_field {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
}

mod airport_field {
    pub const ID: usize = 0;
    pub const NAME: usize = 1;
    pub const CITY: usize = 2;
    pub const IATA: usize = 4;
    pub const LATITUDE: usize = 6;
    pub const LONGITUDE: usize = 7;
}

mod route_field {
    pub const CARRIER_ID: usize = 1;
    pub const SOURCE_ID: usize = 3;
    pub const DESTINATION_IATA: usize = 4;
    pub const DESTINATION_ID: usize = 5;
}

/// An airline that operates routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Carrier {
    pub id: CarrierId,
    pub name: String,
}

/// An airport vertex of the flight network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Airport {
    pub id: AirportId,
    pub code: String,
    pub name: String,
    pub city: String,
    pub position: Coordinates,
}

/// Directed flight connection from one airport to another on one carrier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEdge {
    pub destination: AirportId,
    pub destination_code: String,
    pub carrier_id: Option<CarrierId>,
    pub carrier_name: String,
    pub distance: f64,
}

/// Lookup of carriers by id.
#[derive(Debug, Clone, Default)]
pub struct CarrierDirectory {
    carriers: HashMap<CarrierId, Carrier>,
}

impl CarrierDirectory {
    pub fn get(&self, id: CarrierId) -> Option<&Carrier> {
        self.carriers.get(&id)
    }

    /// Resolve a carrier display name, falling back to [`UNKNOWN_CARRIER`].
    pub fn display_name(&self, id: Option<CarrierId>) -> &str {
        id.and_then(|id| self.carriers.get(&id))
            .map(|carrier| carrier.name.as_str())
            .unwrap_or(UNKNOWN_CARRIER)
    }

    pub fn len(&self) -> usize {
        self.carriers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty()
    }
}

/// Airports keyed by id (iterated in ascending order) with a code index.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: BTreeMap<AirportId, Airport>,
    code_to_id: HashMap<String, AirportId>,
}

impl AirportDirectory {
    pub fn get(&self, id: AirportId) -> Option<&Airport> {
        self.airports.get(&id)
    }

    pub fn contains(&self, id: AirportId) -> bool {
        self.airports.contains_key(&id)
    }

    /// Lookup an airport identifier by its case-sensitive code.
    pub fn id_by_code(&self, code: &str) -> Option<AirportId> {
        self.code_to_id.get(code).copied()
    }

    pub fn by_code(&self, code: &str) -> Option<&Airport> {
        self.id_by_code(code).and_then(|id| self.get(id))
    }

    /// Airports in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Known codes close to `code`, nearest first.
    ///
    /// Comparison ignores ASCII case and only codes within an edit distance
    /// of two are returned.
    pub fn fuzzy_code_matches(&self, code: &str, limit: usize) -> Vec<String> {
        const MAX_DISTANCE: usize = 2;

        let needle = code.to_ascii_uppercase();
        let mut scored: Vec<(usize, &String)> = self
            .code_to_id
            .keys()
            .filter_map(|candidate| {
                let distance = strsim::levenshtein(&needle, &candidate.to_ascii_uppercase());
                (distance <= MAX_DISTANCE).then_some((distance, candidate))
            })
            .collect();

        scored.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}

/// Outbound route edges per airport, in input order.
///
/// Airports without outbound routes have no entry.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyTable {
    outbound: HashMap<AirportId, Vec<RouteEdge>>,
}

impl AdjacencyTable {
    /// Outbound edges of `airport`, or `None` when it has no routes.
    pub fn outbound(&self, airport: AirportId) -> Option<&[RouteEdge]> {
        self.outbound.get(&airport).map(Vec::as_slice)
    }

    /// Outbound edges of `airport`, empty when it has no routes.
    pub fn neighbours(&self, airport: AirportId) -> &[RouteEdge] {
        self.outbound(airport).unwrap_or(&[])
    }

    /// Every parallel edge from `from` to `to`, in adjacency order.
    pub fn edges_between(&self, from: AirportId, to: AirportId) -> Vec<&RouteEdge> {
        self.neighbours(from)
            .iter()
            .filter(|edge| edge.destination == to)
            .collect()
    }

    /// Total number of route edges.
    pub fn edge_count(&self) -> usize {
        self.outbound.values().map(Vec::len).sum()
    }
}

/// How strictly source records are validated during ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IngestMode {
    /// Drop malformed and dangling records, counting them in the [`LoadReport`].
    #[default]
    Lenient,
    /// Fail on the first malformed or dangling record.
    Strict,
}

/// Counts of records dropped during a lenient load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub skipped_airlines: usize,
    pub skipped_airports: usize,
    pub skipped_routes: usize,
    pub dangling_routes: usize,
}

impl LoadReport {
    pub fn total_skipped(&self) -> usize {
        self.skipped_airlines + self.skipped_airports + self.skipped_routes + self.dangling_routes
    }
}

/// The fully built, read-only flight network.
#[derive(Debug, Clone, Default)]
pub struct FlightNetwork {
    pub carriers: CarrierDirectory,
    pub airports: AirportDirectory,
    pub adjacency: AdjacencyTable,
}

/// Build all three directories in dependency order.
pub fn build_network(
    airlines: &[Record],
    airports: &[Record],
    routes: &[Record],
    mode: IngestMode,
) -> Result<(FlightNetwork, LoadReport)> {
    let mut report = LoadReport::default();

    let carriers = build_carrier_directory(airlines, mode, &mut report)?;
    let airports = build_airport_directory(airports, mode, &mut report)?;
    let adjacency = build_adjacency_table(routes, &airports, &carriers, mode, &mut report)?;

    info!(
        carriers = carriers.len(),
        airports = airports.len(),
        routes = adjacency.edge_count(),
        skipped = report.total_skipped(),
        "built flight network"
    );

    Ok((
        FlightNetwork {
            carriers,
            airports,
            adjacency,
        },
        report,
    ))
}

/// Build the carrier directory; the first record for an id wins.
pub fn build_carrier_directory(
    records: &[Record],
    mode: IngestMode,
    report: &mut LoadReport,
) -> Result<CarrierDirectory> {
    let mut carriers = HashMap::new();

    for record in records {
        let parsed = required(record, "airline", airline_field::ID).and_then(|raw| {
            let id = parse_number::<CarrierId>(record, "airline", raw)?;
            let name = required(record, "airline", airline_field::NAME)?;
            Ok((id, name))
        });

        match parsed {
            Ok((id, name)) => {
                carriers.entry(id).or_insert_with(|| Carrier {
                    id,
                    name: name.to_string(),
                });
            }
            Err(err) => {
                reject(mode, err)?;
                report.skipped_airlines += 1;
            }
        }
    }

    Ok(CarrierDirectory { carriers })
}

/// Build the airport directory and its code index.
///
/// The first record for an id wins; for a repeated code the index points
/// at the last retained airport.
pub fn build_airport_directory(
    records: &[Record],
    mode: IngestMode,
    report: &mut LoadReport,
) -> Result<AirportDirectory> {
    let mut directory = AirportDirectory::default();

    for record in records {
        let airport = match parse_airport(record) {
            Ok(airport) => airport,
            Err(err) => {
                reject(mode, err)?;
                report.skipped_airports += 1;
                continue;
            }
        };

        if directory.airports.contains_key(&airport.id) {
            debug!(line = record.line, id = airport.id, "ignoring duplicate airport id");
            continue;
        }

        directory
            .code_to_id
            .insert(airport.code.clone(), airport.id);
        directory.airports.insert(airport.id, airport);
    }

    Ok(directory)
}

/// Build outbound edges for every route whose endpoints are both known.
pub fn build_adjacency_table(
    records: &[Record],
    airports: &AirportDirectory,
    carriers: &CarrierDirectory,
    mode: IngestMode,
    report: &mut LoadReport,
) -> Result<AdjacencyTable> {
    let mut outbound: HashMap<AirportId, Vec<RouteEdge>> = HashMap::new();

    for record in records {
        let (source_id, destination_id) = match parse_route_endpoints(record) {
            Ok(endpoints) => endpoints,
            Err(err) => {
                reject(mode, err)?;
                report.skipped_routes += 1;
                continue;
            }
        };

        let (Some(source), Some(destination)) =
            (airports.get(source_id), airports.get(destination_id))
        else {
            if mode == IngestMode::Strict {
                return Err(Error::DanglingRoute {
                    line: record.line,
                    origin: source_id,
                    destination: destination_id,
                });
            }
            debug!(
                line = record.line,
                source = source_id,
                destination = destination_id,
                "dropping route with unknown airport"
            );
            report.dangling_routes += 1;
            continue;
        };

        let carrier_id = record
            .field(route_field::CARRIER_ID)
            .and_then(|raw| raw.trim().parse::<CarrierId>().ok());

        let edge = RouteEdge {
            destination: destination_id,
            destination_code: record
                .field(route_field::DESTINATION_IATA)
                .unwrap_or_default()
                .to_string(),
            carrier_id,
            carrier_name: carriers.display_name(carrier_id).to_string(),
            distance: source.position.distance_to(&destination.position),
        };
        outbound.entry(source_id).or_default().push(edge);
    }

    Ok(AdjacencyTable { outbound })
}

fn parse_airport(record: &Record) -> Result<Airport> {
    const DATASET: &str = "airport";

    let id = parse_number(record, DATASET, required(record, DATASET, airport_field::ID)?)?;
    let latitude = parse_number(
        record,
        DATASET,
        required(record, DATASET, airport_field::LATITUDE)?,
    )?;
    let longitude = parse_number(
        record,
        DATASET,
        required(record, DATASET, airport_field::LONGITUDE)?,
    )?;

    Ok(Airport {
        id,
        code: required(record, DATASET, airport_field::IATA)?.to_string(),
        name: required(record, DATASET, airport_field::NAME)?.to_string(),
        city: required(record, DATASET, airport_field::CITY)?.to_string(),
        position: Coordinates::new(latitude, longitude),
    })
}

fn parse_route_endpoints(record: &Record) -> Result<(AirportId, AirportId)> {
    const DATASET: &str = "route";

    let source = parse_number(
        record,
        DATASET,
        required(record, DATASET, route_field::SOURCE_ID)?,
    )?;
    let destination = parse_number(
        record,
        DATASET,
        required(record, DATASET, route_field::DESTINATION_ID)?,
    )?;
    Ok((source, destination))
}

fn required<'a>(record: &'a Record, dataset: &'static str, index: usize) -> Result<&'a str> {
    record
        .field(index)
        .ok_or_else(|| Error::MalformedRecord {
            dataset,
            line: record.line,
            message: format!("expected at least {} fields, found {}", index + 1, record.len()),
        })
}

fn parse_number<T: std::str::FromStr>(
    record: &Record,
    dataset: &'static str,
    raw: &str,
) -> Result<T> {
    let value = raw.trim();
    if value == NULL_MARKER {
        return Err(Error::MalformedRecord {
            dataset,
            line: record.line,
            message: "missing numeric value".to_string(),
        });
    }
    value.parse().map_err(|_| Error::MalformedRecord {
        dataset,
        line: record.line,
        message: format!("invalid numeric value '{value}'"),
    })
}

/// Propagate `err` in strict mode; log it and let the caller skip otherwise.
fn reject(mode: IngestMode, err: Error) -> Result<()> {
    match mode {
        IngestMode::Strict => Err(err),
        IngestMode::Lenient => {
            debug!(error = %err, "skipping record");
            Ok(())
        }
    }
}

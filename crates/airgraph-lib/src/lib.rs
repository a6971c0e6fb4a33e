//! Airgraph library entry points.
//!
//! This crate loads the airport, airline, and route datasets into a directed
//! flight network, finds the shortest itinerary between two airports by
//! great-circle distance, and exports the network as XML. Higher-level
//! consumers (the CLI) should only depend on the functions exported here.

#![deny(warnings)]

pub mod dataset;
pub mod error;
pub mod export;
pub mod geo;
pub mod itinerary;
pub mod network;
pub mod path;
pub mod record;
pub mod routing;

pub use dataset::{default_data_dir, load_network, DatasetPaths, LoadOptions, DATA_DIR_ENV};
pub use error::{Error, Result};
pub use export::{export_graph, render_graph_xml};
pub use geo::{great_circle_miles, Coordinates, EARTH_RADIUS_MILES};
pub use itinerary::{
    format_itinerary, shortest_itinerary, Itinerary, ItineraryLeg, ItineraryStop,
};
pub use network::{
    build_adjacency_table, build_airport_directory, build_carrier_directory, build_network,
    AdjacencyTable, Airport, AirportDirectory, AirportId, Carrier, CarrierDirectory, CarrierId,
    FlightNetwork, IngestMode, LoadReport, RouteEdge, UNKNOWN_CARRIER,
};
pub use path::find_route_dijkstra;
pub use record::{parse_record, read_records, Record};
pub use routing::{plan_route, shortest_path, RouteRequest, RoutePlan};

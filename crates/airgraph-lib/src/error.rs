use std::path::PathBuf;

use thiserror::Error;

use crate::network::AirportId;

/// Convenient result alias for the airgraph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an airport code could not be found in the directory.
    #[error("unknown airport code: {code}{}", format_suggestions(.suggestions))]
    UnknownAirport {
        code: String,
        suggestions: Vec<String>,
    },

    /// Raised when the start and destination of a query are the same airport.
    #[error("start and destination are the same airport: {code}")]
    SameAirport { code: String },

    /// Raised when no route could be found between two airports.
    #[error("no route found between {start} and {goal}")]
    NoRouteFound { start: String, goal: String },

    /// Raised when an export target does not name an `.xml` file.
    #[error("invalid export destination {path}; expected a file name ending in .xml")]
    InvalidDestination { path: PathBuf },

    /// A dataset source file could not be located.
    #[error("dataset file not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// No suitable data directory could be resolved for this platform.
    #[error("failed to resolve a data directory for the flight dataset")]
    DataDirUnavailable,

    /// Raised by strict ingestion when a record lacks required fields.
    #[error("malformed {dataset} record on line {line}: {message}")]
    MalformedRecord {
        dataset: &'static str,
        line: usize,
        message: String,
    },

    /// Raised by strict ingestion when a route references an unknown airport.
    #[error("route on line {line} references unknown airport ({origin} -> {destination})")]
    DanglingRoute {
        line: usize,
        origin: AirportId,
        destination: AirportId,
    },

    /// Raised when an itinerary is requested for a path with an unserved leg.
    #[error("no route edge connects airport {from} to airport {to}")]
    DisconnectedLeg { from: AirportId, to: AirportId },

    /// Raised when an itinerary is requested for fewer than two airports.
    #[error("itinerary path must contain at least two airports, found {len}")]
    IncompletePath { len: usize },

    /// Raised when a path references an airport id that is not loaded.
    #[error("airport id {id} is not in the directory")]
    MissingAirport { id: AirportId },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

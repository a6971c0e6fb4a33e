use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::network::{build_network, FlightNetwork, IngestMode, LoadReport};
use crate::record::{read_records, Record};

/// Environment variable that overrides the default data directory.
pub const DATA_DIR_ENV: &str = "AIRGRAPH_DATA_DIR";

const AIRPORTS_FILENAME: &str = "airports.dat";
const AIRLINES_FILENAME: &str = "airlines.dat";
const ROUTES_FILENAME: &str = "routes.dat";

/// Locations of the three source files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub airports: PathBuf,
    pub airlines: PathBuf,
    pub routes: PathBuf,
}

impl DatasetPaths {
    /// Paths using the default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            airports: dir.join(AIRPORTS_FILENAME),
            airlines: dir.join(AIRLINES_FILENAME),
            routes: dir.join(ROUTES_FILENAME),
        }
    }
}

/// Options applied while loading the dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    pub mode: IngestMode,
}

impl LoadOptions {
    pub fn strict() -> Self {
        Self {
            mode: IngestMode::Strict,
        }
    }
}

/// Resolve the data directory from [`DATA_DIR_ENV`] or the platform default.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|value| !value.is_empty()) {
        debug!(env = DATA_DIR_ENV, "using data directory from environment");
        return Ok(PathBuf::from(dir));
    }

    let dirs =
        ProjectDirs::from("com", "airgraph", "airgraph").ok_or(Error::DataDirUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Read the three source files and build the flight network.
pub fn load_network(
    paths: &DatasetPaths,
    options: LoadOptions,
) -> Result<(FlightNetwork, LoadReport)> {
    let airlines = read_source(&paths.airlines)?;
    let airports = read_source(&paths.airports)?;
    let routes = read_source(&paths.routes)?;

    info!(
        airlines = airlines.len(),
        airports = airports.len(),
        routes = routes.len(),
        "read dataset records"
    );

    build_network(&airlines, &airports, &routes, options.mode)
}

fn read_source(path: &Path) -> Result<Vec<Record>> {
    if !path.is_file() {
        return Err(Error::DatasetNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "reading dataset file");
    let file = File::open(path)?;
    Ok(read_records(BufReader::new(file))?)
}

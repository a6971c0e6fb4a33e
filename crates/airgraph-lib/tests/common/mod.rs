#![allow(dead_code)]

use std::path::PathBuf;

use airgraph_lib::{load_network, DatasetPaths, FlightNetwork, LoadOptions, LoadReport};

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_paths() -> DatasetPaths {
    DatasetPaths::in_dir(&fixtures_dir())
}

pub fn fixture_network() -> FlightNetwork {
    load_fixture().0
}

pub fn load_fixture() -> (FlightNetwork, LoadReport) {
    load_network(&fixture_paths(), LoadOptions::default()).expect("fixture dataset loads")
}

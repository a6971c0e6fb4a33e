use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use airgraph_cli::args::parse_airport_code;
use airgraph_cli::output::{render, OutputFormat};
use airgraph_lib::{
    default_data_dir, export_graph, load_network, plan_route, DatasetPaths, FlightNetwork,
    Itinerary, LoadOptions, RouteRequest,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Flight network itinerary and export utilities")]
struct Cli {
    /// Directory holding airports.dat, airlines.dat, and routes.dat.
    /// Defaults to $AIRGRAPH_DATA_DIR or the platform data directory.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Fail on malformed or dangling records instead of skipping them.
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the shortest itinerary between two airport codes.
    Route {
        /// Starting airport code.
        #[arg(long = "from", value_parser = parse_airport_code)]
        from: String,
        /// Destination airport code.
        #[arg(long = "to", value_parser = parse_airport_code)]
        to: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Export every airport and route to an XML file.
    Export {
        /// Destination file; must end in `.xml`.
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let options = if cli.strict {
        LoadOptions::strict()
    } else {
        LoadOptions::default()
    };
    let network = load(cli.data_dir.as_deref(), options)?;

    match cli.command {
        Command::Route { from, to, format } => handle_route(&network, &from, &to, format),
        Command::Export { output } => handle_export(&network, &output),
    }
}

fn load(target: Option<&Path>, options: LoadOptions) -> Result<FlightNetwork> {
    let data_dir = match target {
        Some(dir) => dir.to_path_buf(),
        None => default_data_dir().context("failed to resolve the dataset directory")?,
    };
    let paths = DatasetPaths::in_dir(&data_dir);
    let (network, report) = load_network(&paths, options)
        .with_context(|| format!("failed to load dataset from {}", data_dir.display()))?;

    if report.total_skipped() > 0 {
        warn!(
            skipped_airlines = report.skipped_airlines,
            skipped_airports = report.skipped_airports,
            skipped_routes = report.skipped_routes,
            dangling_routes = report.dangling_routes,
            "skipped dataset records"
        );
    }
    Ok(network)
}

fn handle_route(network: &FlightNetwork, from: &str, to: &str, format: OutputFormat) -> Result<()> {
    let plan = plan_route(network, &RouteRequest::new(from, to))?;
    let itinerary = Itinerary::from_path(network, &plan.steps)?;
    render(&mut io::stdout().lock(), &itinerary, format).context("failed to write itinerary")?;
    Ok(())
}

fn handle_export(network: &FlightNetwork, output: &Path) -> Result<()> {
    export_graph(network, output)
        .with_context(|| format!("failed to export graph to {}", output.display()))?;
    info!(path = %output.display(), "graph exported");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

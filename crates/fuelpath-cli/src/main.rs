use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fuelpath_cli::output::{node_listings, OutputFormat};
use fuelpath_lib::{
    load_network_or_sample, plan_route, Error as LibError, Network, RouteRequest, RouteSummary,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fuel-constrained route planning")]
struct Cli {
    /// Network definition (JSON). Falls back to `FUELPATH_NETWORK`, the user
    /// configuration directory, then the bundled sample network.
    #[arg(long, global = true)]
    network: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest fuel-feasible route between two nodes.
    Route(RouteArgs),
    /// List the nodes of the loaded network.
    Nodes,
}

#[derive(clap::Args, Debug)]
struct RouteArgs {
    /// Starting node identifier.
    #[arg(long = "from")]
    from: String,
    /// Destination node identifier.
    #[arg(long = "to")]
    to: String,
    /// Tank capacity; overrides the network default.
    #[arg(long)]
    capacity: Option<f64>,
    /// Fuel used per unit of distance; overrides the network default.
    #[arg(long)]
    consumption: Option<f64>,
    /// Refuel node (repeatable); replaces the network's refuel set.
    #[arg(long = "refuel", value_name = "ID")]
    refuel: Vec<String>,
    /// Plan with no refuel nodes at all.
    #[arg(long = "no-refuel", conflicts_with = "refuel")]
    no_refuel: bool,
}

impl RouteArgs {
    fn to_request(&self) -> RouteRequest {
        let mut request = RouteRequest::new(self.from.clone(), self.to.clone());
        if let Some(capacity) = self.capacity {
            request = request.with_capacity(capacity);
        }
        if let Some(consumption) = self.consumption {
            request = request.with_consumption(consumption);
        }
        if self.no_refuel {
            request = request.with_refuel_nodes(Vec::<String>::new());
        } else if !self.refuel.is_empty() {
            request = request.with_refuel_nodes(self.refuel.iter().cloned());
        }
        request
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Command::Route(args) => handle_route(cli.network.as_deref(), cli.format, args),
        Command::Nodes => handle_nodes(cli.network.as_deref(), cli.format),
    }
}

fn load(target: Option<&Path>) -> Result<Network> {
    load_network_or_sample(target).context("failed to load the road network")
}

fn handle_route(target: Option<&Path>, format: OutputFormat, args: &RouteArgs) -> Result<()> {
    let network = load(target)?;
    let request = args.to_request();
    debug!(from = %request.start, to = %request.goal, "planning route");

    let plan = plan_route(&network, &request).map_err(handle_route_failure)?;
    let summary = RouteSummary::from_plan(&network, &plan)
        .context("failed to build route summary for display")?;
    format
        .render_route(&summary)
        .context("failed to write route output")
}

fn handle_nodes(target: Option<&Path>, format: OutputFormat) -> Result<()> {
    let network = load(target)?;
    format
        .render_nodes(&node_listings(&network))
        .context("failed to write node listing")
}

fn handle_route_failure(err: LibError) -> anyhow::Error {
    match err {
        LibError::UnknownNode { id, suggestions } => {
            anyhow::anyhow!(format_unknown_node_message(&id, &suggestions))
        }
        LibError::InvalidFuelConfig { message } => {
            anyhow::anyhow!("Invalid fuel settings: {message}.")
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_node_message(id: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown node '{}'.", id);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

//! Output formatting for route and node listings.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use fuelpath_lib::{Network, NodeId, RouteRenderMode, RouteSummary};

/// Output style selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Header, totals, and one line per hop with fuel readings.
    #[default]
    Text,
    /// Node identifiers only, one per line.
    Basic,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    /// Write a route summary to `out` in this format.
    pub fn write_route<W: Write>(self, out: &mut W, summary: &RouteSummary) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                out.write_all(summary.render(RouteRenderMode::PlainText).as_bytes())
            }
            OutputFormat::Basic => out.write_all(summary.render(RouteRenderMode::Basic).as_bytes()),
            OutputFormat::Json => write_json(out, summary),
        }
    }

    /// Write the node listing to `out` in this format.
    pub fn write_nodes<W: Write>(self, out: &mut W, nodes: &[NodeListing]) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                for node in nodes {
                    let marker = if node.refuel { " [refuel]" } else { "" };
                    writeln!(out, "{} ({}, {}){}", node.id, node.x, node.y, marker)?;
                }
                Ok(())
            }
            OutputFormat::Basic => {
                for node in nodes {
                    writeln!(out, "{}", node.id)?;
                }
                Ok(())
            }
            OutputFormat::Json => write_json(out, nodes),
        }
    }

    /// Print a route summary to stdout.
    pub fn render_route(self, summary: &RouteSummary) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_route(&mut handle, summary)
    }

    /// Print the node listing to stdout.
    pub fn render_nodes(self, nodes: &[NodeListing]) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_nodes(&mut handle, nodes)
    }
}

/// One row of the `nodes` command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeListing {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub refuel: bool,
}

/// Nodes of `network` in definition order, flagged when they refill the tank.
pub fn node_listings(network: &Network) -> Vec<NodeListing> {
    network
        .graph()
        .nodes()
        .map(|(id, position)| NodeListing {
            id: id.clone(),
            x: position.x,
            y: position.y,
            refuel: network.fuel().is_refuel_node(id.as_str()),
        })
        .collect()
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

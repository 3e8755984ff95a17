use std::fmt::Write;

use serde::Serialize;

use crate::error::Result;
use crate::fuel::{project_fuel, FuelProjection};
use crate::graph::{NodeId, Position};
use crate::network::Network;
use crate::routing::RoutePlan;

/// Whether a plan produced a route.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    Found,
    NoRoute,
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header, totals, and one line per step with fuel readings.
    PlainText,
    /// Only the node sequence, one per line.
    Basic,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    pub position: Position,
    /// Length of the edge used to arrive here; absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Fuel state on arrival; absent for the first step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<FuelProjection>,
}

/// Structured representation of a planned route that front-ends can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub status: RouteStatus,
    pub start: NodeId,
    pub goal: NodeId,
    pub hops: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_consumed: Option<f64>,
    /// Tank size the route was planned with; `None` when unlimited.
    pub fuel_capacity: Option<f64>,
    pub consumption_per_unit: f64,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with positions and per-hop fuel.
    pub fn from_plan(network: &Network, plan: &RoutePlan) -> Result<Self> {
        let graph = network.graph();
        let Some(path) = plan.outcome.path() else {
            return Ok(Self {
                status: RouteStatus::NoRoute,
                start: plan.start.clone(),
                goal: plan.goal.clone(),
                hops: 0,
                total_distance: None,
                fuel_consumed: None,
                fuel_capacity: finite_capacity(plan.fuel.capacity),
                consumption_per_unit: plan.fuel.consumption_per_unit,
                steps: Vec::new(),
            });
        };

        let projections = project_fuel(graph, &path.steps, &plan.fuel)?;
        let mut steps = Vec::with_capacity(path.steps.len());
        for (index, id) in path.steps.iter().enumerate() {
            let position = graph.position(id.as_str())?;
            let (distance, fuel) = if index == 0 {
                (None, None)
            } else {
                let previous = &path.steps[index - 1];
                (
                    graph.edge_weight(previous.as_str(), id.as_str()),
                    projections.get(index - 1).cloned(),
                )
            };
            steps.push(RouteStep {
                index,
                id: id.clone(),
                position,
                distance,
                fuel,
            });
        }

        Ok(Self {
            status: RouteStatus::Found,
            start: plan.start.clone(),
            goal: plan.goal.clone(),
            hops: path.hop_count(),
            total_distance: Some(path.total_distance),
            fuel_consumed: Some(path.fuel_consumed),
            fuel_capacity: finite_capacity(plan.fuel.capacity),
            consumption_per_unit: plan.fuel.consumption_per_unit,
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match (self.status, mode) {
            (RouteStatus::NoRoute, _) => self.render_no_route(),
            (RouteStatus::Found, RouteRenderMode::PlainText) => self.render_plain(),
            (RouteStatus::Found, RouteRenderMode::Basic) => self.render_basic(),
        }
    }

    fn render_no_route(&self) -> String {
        format!(
            "No route from {} to {} within a fuel capacity of {} (consumption {} per unit).\n",
            self.start,
            self.goal,
            format_tank(self.fuel_capacity),
            self.consumption_per_unit
        )
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops)",
            self.start, self.goal, self.hops
        );
        let _ = writeln!(
            buffer,
            "Total distance: {}",
            format_amount(self.total_distance.unwrap_or(0.0))
        );
        let _ = writeln!(
            buffer,
            "Fuel consumed: {} of {}",
            format_amount(self.fuel_consumed.unwrap_or(0.0)),
            format_tank(self.fuel_capacity)
        );

        for step in &self.steps {
            match (&step.distance, &step.fuel) {
                (Some(distance), Some(fuel)) => {
                    let refuel = if fuel.refueled { " [refueled]" } else { "" };
                    let _ = writeln!(
                        buffer,
                        "{:>3}: {} (+{}, fuel left {}){}",
                        step.index,
                        step.id,
                        format_amount(*distance),
                        format_tank(fuel.remaining),
                        refuel
                    );
                }
                _ => {
                    let _ = writeln!(buffer, "{:>3}: {}", step.index, step.id);
                }
            }
        }

        buffer
    }

    fn render_basic(&self) -> String {
        let mut buffer = String::new();
        for step in &self.steps {
            let _ = writeln!(buffer, "{}", step.id);
        }
        buffer
    }
}

fn finite_capacity(capacity: f64) -> Option<f64> {
    Some(capacity).filter(|c| c.is_finite())
}

fn format_tank(value: Option<f64>) -> String {
    value.map_or_else(|| "unlimited".to_string(), format_amount)
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{plan_route, RouteRequest};

    #[test]
    fn summary_tracks_fuel_per_step() {
        let network = Network::sample().unwrap();
        let plan = plan_route(&network, &RouteRequest::new("A", "B")).unwrap();
        let summary = RouteSummary::from_plan(&network, &plan).unwrap();

        assert_eq!(summary.status, RouteStatus::Found);
        assert_eq!(summary.hops, 1);
        assert_eq!(summary.total_distance, Some(30.0));
        assert_eq!(summary.fuel_consumed, Some(7.5));
        assert_eq!(summary.steps.len(), 2);
        assert!(summary.steps[0].fuel.is_none());
        let fuel = summary.steps[1].fuel.as_ref().unwrap();
        assert_eq!(fuel.hop_cost, 7.5);
        assert_eq!(fuel.remaining, Some(7.5));
        assert_eq!(summary.fuel_capacity, Some(15.0));
    }

    #[test]
    fn unlimited_tank_serializes_without_fuel_readings() {
        let network = Network::sample().unwrap();
        let request = RouteRequest::new("A", "B").with_capacity(f64::INFINITY);
        let plan = plan_route(&network, &request).unwrap();
        let summary = RouteSummary::from_plan(&network, &plan).unwrap();

        assert_eq!(summary.fuel_capacity, None);
        assert_eq!(summary.fuel_consumed, Some(7.5));
        let fuel = summary.steps[1].fuel.as_ref().unwrap();
        assert_eq!(fuel.remaining, None);
        assert_eq!(fuel.cumulative, 7.5);

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["fuel_capacity"].is_null());
        assert!(json["steps"][1]["fuel"]["remaining"].is_null());
        assert_eq!(json["fuel_consumed"], 7.5);

        let text = summary.render(RouteRenderMode::PlainText);
        assert!(text.contains("Fuel consumed: 7.50 of unlimited"));
        assert!(text.contains("  1: B (+30, fuel left unlimited)"));
    }

    #[test]
    fn plain_text_lists_steps() {
        let network = Network::sample().unwrap();
        let plan = plan_route(&network, &RouteRequest::new("A", "B")).unwrap();
        let text = RouteSummary::from_plan(&network, &plan)
            .unwrap()
            .render(RouteRenderMode::PlainText);

        assert!(text.starts_with("Route: A -> B (1 hops)"));
        assert!(text.contains("Total distance: 30"));
        assert!(text.contains("Fuel consumed: 7.50 of 15"));
        assert!(text.contains("  1: B (+30, fuel left 7.50)"));
    }

    #[test]
    fn basic_mode_prints_node_sequence() {
        let network = Network::sample().unwrap();
        let plan = plan_route(&network, &RouteRequest::new("A", "B")).unwrap();
        let text = RouteSummary::from_plan(&network, &plan)
            .unwrap()
            .render(RouteRenderMode::Basic);
        assert_eq!(text, "A\nB\n");
    }

    #[test]
    fn no_route_summary_omits_totals() {
        let network = Network::sample().unwrap();
        let plan = plan_route(&network, &RouteRequest::new("A", "K").with_capacity(1.0)).unwrap();
        let summary = RouteSummary::from_plan(&network, &plan).unwrap();

        assert_eq!(summary.status, RouteStatus::NoRoute);
        assert!(summary.steps.is_empty());
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "no_route");
        assert!(json.get("total_distance").is_none());
        assert!(summary
            .render(RouteRenderMode::PlainText)
            .starts_with("No route from A to K"));
    }

    #[test]
    fn amounts_are_formatted_compactly() {
        assert_eq!(format_amount(4.0), "4");
        assert_eq!(format_amount(0.25), "0.25");
        assert_eq!(format_amount(f64::INFINITY), "unlimited");
    }
}

//! Route planning and node listing handlers, plus the router that wires them up.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use fuelpath_lib::{plan_route, NodeId, RouteStatus, RouteStep, RouteSummary};

use crate::{
    extract_or_generate_request_id, from_lib_error, health_live, health_ready, ApiResponse,
    AppState, ProblemDetails, RouteRequest, Validate,
};

/// Build the service router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/route", post(route_handler))
        .route("/api/v1/nodes", get(nodes_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Route response returned to the caller.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// "found" or "no_route".
    pub status: RouteStatus,
    /// Ordered node identifiers; empty when no route exists.
    pub route: Vec<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_consumed: Option<f64>,
    pub hops: usize,
    /// Capacity the search ran with; `null` when unlimited.
    pub fuel_capacity: Option<f64>,
    pub consumption_per_unit: f64,
    pub steps: Vec<RouteStep>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<RouteSummary> for RouteResponse {
    fn from(summary: RouteSummary) -> Self {
        let message = match summary.status {
            RouteStatus::Found => None,
            RouteStatus::NoRoute => Some(format!(
                "No route from '{}' to '{}' within the available fuel",
                summary.start, summary.goal
            )),
        };

        Self {
            status: summary.status,
            route: summary.steps.iter().map(|step| step.id.clone()).collect(),
            total_distance: summary.total_distance,
            fuel_consumed: summary.fuel_consumed,
            hops: summary.hops,
            fuel_capacity: summary.fuel_capacity,
            consumption_per_unit: summary.consumption_per_unit,
            steps: summary.steps,
            message,
        }
    }
}

/// Handle POST /api/v1/route requests.
async fn route_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> ApiResponse<RouteResponse> {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "rejected route payload");
            return ProblemDetails::bad_request(rejection.body_text(), request_id.as_str()).into();
        }
    };

    info!(
        request_id = %request_id,
        from = %request.from,
        to = %request.to,
        "handling route request"
    );

    if let Err(problem) = request.validate(request_id.as_str()) {
        return (*problem).into();
    }

    let network = state.network();
    let plan = match plan_route(network, &request.to_lib_request()) {
        Ok(plan) => plan,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "route planning failed");
            return from_lib_error(&e, request_id.as_str()).into();
        }
    };

    let summary = match RouteSummary::from_plan(network, &plan) {
        Ok(summary) => summary,
        Err(e) => {
            error!(request_id = %request_id, error = %e, "failed to summarise route");
            return from_lib_error(&e, request_id.as_str()).into();
        }
    };

    let response = RouteResponse::from(summary);
    info!(
        request_id = %request_id,
        status = ?response.status,
        hops = response.hops,
        total_distance = response.total_distance,
        "route request completed"
    );

    ApiResponse::ok(response, request_id)
}

/// One node of the loaded network.
#[derive(Debug, Serialize)]
pub struct NodeEntry {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub refuel: bool,
}

#[derive(Debug, Serialize)]
pub struct NodesResponse {
    pub count: usize,
    pub nodes: Vec<NodeEntry>,
}

/// Handle GET /api/v1/nodes requests.
async fn nodes_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResponse<NodesResponse> {
    let request_id = extract_or_generate_request_id(&headers);
    let network = state.network();
    let nodes: Vec<NodeEntry> = network
        .graph()
        .nodes()
        .map(|(id, position)| NodeEntry {
            id: id.clone(),
            x: position.x,
            y: position.y,
            refuel: network.fuel().is_refuel_node(id.as_str()),
        })
        .collect();

    ApiResponse::ok(
        NodesResponse {
            count: nodes.len(),
            nodes,
        },
        request_id,
    )
}

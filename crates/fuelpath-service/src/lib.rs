//! HTTP front-end for fuelpath route planning.
//!
//! - [`AppState`]: the loaded network, shared by all handlers
//! - [`router`]: `POST /api/v1/route`, `GET /api/v1/nodes`, and health probes
//! - [`ProblemDetails`]: RFC 9457 error bodies
//! - [`ApiResponse`]: JSON or problem reply carrying the request ID header
//! - [`logging`]: JSON or text tracing setup
//!
//! Handlers stay thin: they validate input, call `fuelpath-lib`, and format
//! the result. A route that cannot be completed on the available fuel is a
//! normal `200` answer with `"status": "no_route"`, not an error.

#![deny(warnings)]

mod health;
pub mod logging;
mod problem;
mod request;
mod request_id;
mod response;
mod routes;
mod state;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INTERNAL_ERROR, PROBLEM_INVALID_REQUEST,
    PROBLEM_UNKNOWN_NODE,
};
pub use request::{RouteRequest, Validate};
pub use request_id::{extract_or_generate_request_id, RequestId, REQUEST_ID_HEADER};
pub use response::ApiResponse;
pub use routes::{router, NodeEntry, NodesResponse, RouteResponse};
pub use state::{AppState, AppStateError};

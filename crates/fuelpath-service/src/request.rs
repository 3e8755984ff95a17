//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use fuelpath_lib::RouteRequest as LibRequest;

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
pub trait Validate {
    /// Validate the request; `request_id` fills the problem's `instance`.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request for computing a route between two nodes.
///
/// `from` and `to` default to empty so a missing field is reported by
/// [`Validate`] as a 400 problem rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteRequest {
    /// Starting node identifier.
    #[serde(default)]
    pub from: String,

    /// Destination node identifier.
    #[serde(default)]
    pub to: String,

    /// Tank capacity; the network default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,

    /// Fuel used per unit of distance; the network default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumption: Option<f64>,

    /// Replacement refuel set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refuel_nodes: Option<Vec<String>>,
}

impl RouteRequest {
    /// Convert into a library request. Call [`Validate::validate`] first.
    pub fn to_lib_request(&self) -> LibRequest {
        let mut request = LibRequest::new(self.from.trim(), self.to.trim());
        if let Some(capacity) = self.capacity {
            request = request.with_capacity(capacity);
        }
        if let Some(consumption) = self.consumption {
            request = request.with_consumption(consumption);
        }
        if let Some(nodes) = &self.refuel_nodes {
            request = request.with_refuel_nodes(nodes.iter().map(|n| n.trim().to_string()));
        }
        request
    }
}

impl Validate for RouteRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.from.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'from' field is required and cannot be empty",
                request_id,
            )));
        }

        if self.to.trim().is_empty() {
            return Err(Box::new(ProblemDetails::bad_request(
                "The 'to' field is required and cannot be empty",
                request_id,
            )));
        }

        if let Some(capacity) = self.capacity {
            if capacity < 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'capacity' field cannot be negative",
                    request_id,
                )));
            }
        }

        if let Some(consumption) = self.consumption {
            if consumption < 0.0 {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'consumption' field cannot be negative",
                    request_id,
                )));
            }
        }

        if let Some(nodes) = &self.refuel_nodes {
            if nodes.iter().any(|n| n.trim().is_empty()) {
                return Err(Box::new(ProblemDetails::bad_request(
                    "The 'refuel_nodes' field cannot contain empty identifiers",
                    request_id,
                )));
            }
        }

        Ok(())
    }
}

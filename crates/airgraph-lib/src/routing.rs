use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{AirportId, FlightNetwork};
use crate::path::find_route_dijkstra;

/// Number of code suggestions attached to an unknown-airport error.
const MAX_SUGGESTIONS: usize = 3;

/// Shortest-itinerary request between two airport codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: AirportId,
    pub goal: AirportId,
    pub steps: Vec<AirportId>,
    /// Sum of leg distances in miles.
    pub total_distance: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute the shortest route by great-circle distance.
pub fn plan_route(network: &FlightNetwork, request: &RouteRequest) -> Result<RoutePlan> {
    let start_id = resolve_airport(network, &request.start)?;
    let goal_id = resolve_airport(network, &request.goal)?;

    if request.start == request.goal || start_id == goal_id {
        return Err(Error::SameAirport {
            code: request.start.clone(),
        });
    }

    let Some(steps) = find_route_dijkstra(&network.adjacency, start_id, goal_id) else {
        return Err(Error::NoRouteFound {
            start: request.start.clone(),
            goal: request.goal.clone(),
        });
    };

    let total_distance = steps
        .windows(2)
        .filter_map(|pair| leg_distance(network, pair[0], pair[1]))
        .sum();

    debug!(
        start = %request.start,
        goal = %request.goal,
        hops = steps.len() - 1,
        total_distance,
        "planned route"
    );

    Ok(RoutePlan {
        start: start_id,
        goal: goal_id,
        steps,
        total_distance,
    })
}

/// Airport ids of the shortest route from `start` to `goal`.
pub fn shortest_path(network: &FlightNetwork, start: &str, goal: &str) -> Result<Vec<AirportId>> {
    plan_route(network, &RouteRequest::new(start, goal)).map(|plan| plan.steps)
}

/// Shortest distance among the parallel edges of one leg.
pub(crate) fn leg_distance(network: &FlightNetwork, from: AirportId, to: AirportId) -> Option<f64> {
    network
        .adjacency
        .edges_between(from, to)
        .into_iter()
        .map(|edge| edge.distance)
        .min_by(f64::total_cmp)
}

/// Resolve an airport code to its id, returning an error for unknown codes.
fn resolve_airport(network: &FlightNetwork, code: &str) -> Result<AirportId> {
    network.airports.id_by_code(code).ok_or_else(|| {
        let suggestions = network.airports.fuzzy_code_matches(code, MAX_SUGGESTIONS);
        Error::UnknownAirport {
            code: code.to_string(),
            suggestions,
        }
    })
}

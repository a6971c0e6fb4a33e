//! Human-readable itineraries built from a planned path.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::{Airport, AirportId, FlightNetwork};
use crate::routing::{leg_distance, plan_route, RouteRequest};

/// Airport at either end of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItineraryStop {
    pub id: AirportId,
    pub code: String,
    pub name: String,
}

impl From<&Airport> for ItineraryStop {
    fn from(airport: &Airport) -> Self {
        Self {
            id: airport.id,
            code: airport.code.clone(),
            name: airport.name.clone(),
        }
    }
}

/// One hop of the itinerary with every carrier that serves it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryLeg {
    pub from: String,
    pub to: String,
    pub distance: f64,
    /// Carrier names in adjacency order.
    pub carriers: Vec<String>,
}

impl ItineraryLeg {
    /// Distance truncated to whole miles.
    pub fn miles(&self) -> u64 {
        self.distance.trunc() as u64
    }
}

/// Structured itinerary that can be rendered as lines or serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub start: ItineraryStop,
    pub legs: Vec<ItineraryLeg>,
    pub arrive: ItineraryStop,
    pub total_distance: f64,
}

impl Itinerary {
    /// Build an itinerary for `path`, which must hold at least two airports
    /// with every consecutive pair served by a route edge.
    pub fn from_path(network: &FlightNetwork, path: &[AirportId]) -> Result<Self> {
        let [first, .., last] = path else {
            return Err(Error::IncompletePath { len: path.len() });
        };

        let start = ItineraryStop::from(airport(network, *first)?);
        let arrive = ItineraryStop::from(airport(network, *last)?);

        let mut legs = Vec::with_capacity(path.len().saturating_sub(1));
        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let edges = network.adjacency.edges_between(from, to);
            let distance = leg_distance(network, from, to)
                .ok_or(Error::DisconnectedLeg { from, to })?;

            legs.push(ItineraryLeg {
                from: airport(network, from)?.code.clone(),
                to: airport(network, to)?.code.clone(),
                distance,
                carriers: edges
                    .into_iter()
                    .map(|edge| edge.carrier_name.clone())
                    .collect(),
            });
        }

        let total_distance = legs.iter().map(|leg| leg.distance).sum();

        Ok(Self {
            start,
            legs,
            arrive,
            total_distance,
        })
    }

    /// Render display lines: a start line, one line per leg (plus one
    /// sub-line per carrier when several serve it), and an arrival line.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.legs.len() + 2);
        lines.push(format!("Start from {} ({})", self.start.code, self.start.name));

        for leg in &self.legs {
            match leg.carriers.as_slice() {
                [carrier] => lines.push(format!(
                    "Fly {} miles from {} to {} on {}",
                    leg.miles(),
                    leg.from,
                    leg.to,
                    carrier
                )),
                carriers => {
                    lines.push(format!(
                        "Fly {} miles from {} to {} on one of the following:",
                        leg.miles(),
                        leg.from,
                        leg.to
                    ));
                    lines.extend(carriers.iter().map(|carrier| format!("    - {carrier}")));
                }
            }
        }

        lines.push(format!("Arrive at {} ({})", self.arrive.code, self.arrive.name));
        lines
    }
}

/// Display lines for `path`.
pub fn format_itinerary(network: &FlightNetwork, path: &[AirportId]) -> Result<Vec<String>> {
    Itinerary::from_path(network, path).map(|itinerary| itinerary.lines())
}

/// Plan the shortest route between two codes and render it.
pub fn shortest_itinerary(network: &FlightNetwork, start: &str, goal: &str) -> Result<Vec<String>> {
    let plan = plan_route(network, &RouteRequest::new(start, goal))?;
    format_itinerary(network, &plan.steps)
}

fn airport(network: &FlightNetwork, id: AirportId) -> Result<&Airport> {
    network
        .airports
        .get(id)
        .ok_or(Error::MissingAirport { id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{build_network, IngestMode};
    use crate::record::{parse_record, Record};

    fn records(lines: &[&str]) -> Vec<Record> {
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| Record::new(index + 1, parse_record(line)))
            .collect()
    }

    fn network(routes: &[&str]) -> FlightNetwork {
        build_network(
            &records(&["10,Xair", "20,Yair", "30,Zair"]),
            &records(&[
                "1,Los Angeles Intl,Los Angeles,United States,LAX,KLAX,33.94,-118.41",
                "2,John F Kennedy Intl,New York,United States,JFK,KJFK,40.64,-73.78",
                "3,Chicago O'Hare Intl,Chicago,United States,ORD,KORD,41.98,-87.90",
            ]),
            &records(routes),
            IngestMode::Strict,
        )
        .expect("network builds")
        .0
    }

    #[test]
    fn two_hop_itinerary_has_four_lines() {
        let network = network(&["X,10,LAX,1,ORD,3", "Y,20,ORD,3,JFK,2"]);
        let lines = format_itinerary(&network, &[1, 3, 2]).expect("itinerary");
        assert_eq!(
            lines,
            vec![
                "Start from LAX (Los Angeles Intl)",
                "Fly 1741 miles from LAX to ORD on Xair",
                "Fly 737 miles from ORD to JFK on Yair",
                "Arrive at JFK (John F Kennedy Intl)",
            ]
        );
    }

    #[test]
    fn shortest_itinerary_takes_direct_flight_when_shorter() {
        let network = network(&["X,10,LAX,1,ORD,3", "Y,20,ORD,3,JFK,2", "Z,30,LAX,1,JFK,2"]);
        let lines = shortest_itinerary(&network, "LAX", "JFK").expect("route exists");
        assert_eq!(
            lines,
            vec![
                "Start from LAX (Los Angeles Intl)",
                "Fly 2469 miles from LAX to JFK on Zair",
                "Arrive at JFK (John F Kennedy Intl)",
            ]
        );
    }

    #[test]
    fn shortest_itinerary_connects_without_direct_flight() {
        let network = network(&["X,10,LAX,1,ORD,3", "Y,20,ORD,3,JFK,2"]);
        let lines = shortest_itinerary(&network, "LAX", "JFK").expect("route exists");
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "Fly 1741 miles from LAX to ORD on Xair");
    }

    #[test]
    fn parallel_carriers_are_listed_in_adjacency_order() {
        let network = network(&["Z,30,LAX,1,JFK,2", "X,10,LAX,1,JFK,2", "Q,99,LAX,1,JFK,2"]);
        let lines = format_itinerary(&network, &[1, 2]).expect("itinerary");
        assert_eq!(
            lines,
            vec![
                "Start from LAX (Los Angeles Intl)",
                "Fly 2469 miles from LAX to JFK on one of the following:",
                "    - Zair",
                "    - Xair",
                "    - Unknown Carrier",
                "Arrive at JFK (John F Kennedy Intl)",
            ]
        );
    }

    #[test]
    fn missing_leg_is_reported() {
        let network = network(&["X,10,LAX,1,ORD,3"]);
        let err = Itinerary::from_path(&network, &[1, 2]).expect_err("no LAX->JFK edge");
        assert!(matches!(err, Error::DisconnectedLeg { from: 1, to: 2 }));
    }

    #[test]
    fn single_airport_path_is_rejected() {
        let network = network(&[]);
        let err = format_itinerary(&network, &[1]).expect_err("too short");
        assert!(matches!(err, Error::IncompletePath { len: 1 }));
    }

    #[test]
    fn total_distance_sums_legs() {
        let network = network(&["X,10,LAX,1,ORD,3", "Y,20,ORD,3,JFK,2"]);
        let itinerary = Itinerary::from_path(&network, &[1, 3, 2]).expect("itinerary");
        let expected: f64 = itinerary.legs.iter().map(|leg| leg.distance).sum();
        assert_eq!(itinerary.total_distance, expected);
        assert_eq!(itinerary.legs.len(), 2);
    }
}

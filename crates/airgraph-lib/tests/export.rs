mod common;

use std::collections::BTreeSet;
use std::fs;

use airgraph_lib::{export_graph, render_graph_xml, Error};
use tempfile::tempdir;

use common::fixture_network;

/// (airport id, name, city, destination id, destination code, carrier id, carrier name, distance)
type EdgeTuple = (String, String, String, String, String, String, String, String);

/// Minimal reader for the exported document; only understands the element
/// layout the exporter writes.
fn parse_export(xml: &str) -> (BTreeSet<String>, BTreeSet<EdgeTuple>) {
    let mut vertices = BTreeSet::new();
    let mut edges = BTreeSet::new();
    let mut vertex: Vec<String> = Vec::new();
    let mut edge: Vec<String> = Vec::new();
    let mut in_edge = false;

    for line in xml.lines().map(str::trim) {
        match line {
            "<vertex>" => vertex.clear(),
            "</vertex>" => {
                vertices.insert(vertex[0].clone());
            }
            "<edge>" => {
                in_edge = true;
                edge.clear();
            }
            "</edge>" => {
                in_edge = false;
                edges.insert((
                    vertex[0].clone(),
                    vertex[1].clone(),
                    vertex[2].clone(),
                    edge[0].clone(),
                    edge[1].clone(),
                    edge[2].clone(),
                    edge[3].clone(),
                    edge[4].clone(),
                ));
            }
            _ => {
                if let Some(value) = element_text(line) {
                    if in_edge {
                        edge.push(value);
                    } else {
                        vertex.push(value);
                    }
                }
            }
        }
    }
    (vertices, edges)
}

fn element_text(line: &str) -> Option<String> {
    let open_end = line.find('>')?;
    let close_start = line.rfind("</")?;
    if close_start <= open_end {
        return None;
    }
    Some(unescape(&line[open_end + 1..close_start]))
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[test]
fn export_round_trips_airports_and_edges() {
    let network = fixture_network();
    let dir = tempdir().expect("temp dir");
    let destination = dir.path().join("graph.xml");

    export_graph(&network, &destination).expect("export succeeds");
    let xml = fs::read_to_string(&destination).expect("read export");
    let (vertices, edges) = parse_export(&xml);

    let expected_vertices: BTreeSet<String> = network
        .airports
        .iter()
        .map(|airport| airport.id.to_string())
        .collect();
    assert_eq!(vertices, expected_vertices);

    let mut expected_edges = BTreeSet::new();
    for airport in network.airports.iter() {
        for edge in network.adjacency.neighbours(airport.id) {
            expected_edges.insert((
                airport.id.to_string(),
                airport.name.clone(),
                airport.city.clone(),
                edge.destination.to_string(),
                edge.destination_code.clone(),
                edge.carrier_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| r"\N".to_string()),
                edge.carrier_name.clone(),
                edge.distance.to_string(),
            ));
        }
    }
    assert_eq!(edges, expected_edges);
    assert_eq!(edges.len(), network.adjacency.edge_count());
}

#[test]
fn vertices_follow_ascending_id_order() {
    let network = fixture_network();
    let xml = render_graph_xml(&network);

    let ids: Vec<i64> = xml
        .lines()
        .filter_map(|line| {
            line.strip_prefix("\t<id>")
                .and_then(|rest| rest.strip_suffix("</id>"))
        })
        .map(|id| id.parse().expect("numeric id"))
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
    assert_eq!(ids.len(), network.airports.len());
}

#[test]
fn airport_without_routes_has_empty_edges_block() {
    let network = fixture_network();
    let xml = render_graph_xml(&network);
    let atl = xml
        .split("<vertex>")
        .find(|block| block.contains("<id>3682</id>"))
        .expect("ATL vertex");
    assert!(atl.contains("\t<edges>\n\t</edges>"));
}

#[test]
fn markup_characters_are_escaped() {
    let network = fixture_network();
    let xml = render_graph_xml(&network);
    assert!(xml.contains("<carrierName>Smith, Jones &amp; &quot;Partners&quot; Air</carrierName>"));
    assert!(xml.contains("<name>Chicago O&apos;Hare International Airport</name>"));
}

#[test]
fn non_xml_destination_is_rejected() {
    let network = fixture_network();
    let dir = tempdir().expect("temp dir");
    let destination = dir.path().join("f.txtxml");

    let err = export_graph(&network, &destination).expect_err("invalid destination");
    assert!(matches!(err, Error::InvalidDestination { .. }));
    assert!(!destination.exists());
}

//! Endpoint resolution: free-text queries to on-track anchors

use geo::Point;
use hashbrown::HashMap;
use log::{debug, info};

use crate::store::{GraphStore, StationRegistry};
use crate::{EdgeId, Error, NodeId};

/// Synthetic entry point where a query location meets the graph via a
/// nearby edge. Built once per query and discarded with it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Anchor {
    /// Real endpoint node the anchor attaches to.
    pub node: NodeId,
    pub edge: EdgeId,
    /// Along-track distance from the closest approach to `node`.
    pub distance: f64,
    /// Closest approach to the query point, as a fraction of the edge
    /// shape.
    pub point_fraction: f64,
    /// Position of `node` on the edge shape: 0.0 or 1.0.
    pub endpoint_fraction: f64,
}

/// Where one qualifying edge passes the query point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeContact {
    pub fraction: f64,
    pub length: f64,
}

/// All anchors for one end of a query.
pub(crate) struct AnchorSet {
    /// One minimum-distance anchor per reachable endpoint node.
    pub anchors: Vec<Anchor>,
    /// Contact fraction per qualifying edge, kept so the search can
    /// notice both endpoints landing on the same edge.
    pub contacts: HashMap<EdgeId, EdgeContact>,
}

/// Interprets endpoint text as a literal `lon, lat` pair, falling back
/// to a station name lookup.
pub(crate) fn locate_endpoint<R: StationRegistry + ?Sized>(
    stations: &R,
    query: &str,
) -> Result<Point<f64>, Error> {
    if let Some(point) = parse_coordinate(query) {
        return Ok(point);
    }
    let name = query.trim();
    stations
        .resolve(name)
        .ok_or_else(|| Error::EndpointNotFound(name.to_string()))
}

fn parse_coordinate(text: &str) -> Option<Point<f64>> {
    let (lon, lat) = text.split_once(',')?;
    let lon: f64 = lon.trim().parse().ok()?;
    let lat: f64 = lat.trim().parse().ok()?;
    Some(Point::new(lon, lat))
}

/// Snaps a resolved point onto every edge within `radius`, producing one
/// minimum-distance anchor per reachable endpoint node.
pub(crate) fn resolve_anchors<S: GraphStore + ?Sized>(
    store: &S,
    point: Point<f64>,
    radius: f64,
) -> Result<AnchorSet, Error> {
    let nearby = store.edges_near(point, radius);
    if nearby.is_empty() {
        return Err(Error::EndpointUnreachable {
            x: point.x(),
            y: point.y(),
            radius,
        });
    }
    info!(
        "{} edges within {radius} units of ({}, {})",
        nearby.len(),
        point.x(),
        point.y()
    );

    let mut best: HashMap<NodeId, Anchor> = HashMap::new();
    let mut contacts: HashMap<EdgeId, EdgeContact> = HashMap::new();

    for near in nearby {
        contacts.insert(
            near.edge,
            EdgeContact {
                fraction: near.fraction,
                length: near.length,
            },
        );

        record_anchor(
            &mut best,
            Anchor {
                node: near.node_a,
                edge: near.edge,
                distance: near.length * near.fraction,
                point_fraction: near.fraction,
                endpoint_fraction: 0.0,
            },
        );
        record_anchor(
            &mut best,
            Anchor {
                node: near.node_b,
                edge: near.edge,
                distance: near.length * (1.0 - near.fraction),
                point_fraction: near.fraction,
                endpoint_fraction: 1.0,
            },
        );
    }

    let anchors: Vec<Anchor> = best.into_values().collect();
    for anchor in &anchors {
        debug!(
            "anchor at node {} via edge {}, {} units out",
            anchor.node, anchor.edge, anchor.distance
        );
    }

    Ok(AnchorSet { anchors, contacts })
}

// Keep only the closest anchor per endpoint node; accumulating anchors
// for a node would bias the seeded distances.
fn record_anchor(best: &mut HashMap<NodeId, Anchor>, anchor: Anchor) {
    best.entry(anchor.node)
        .and_modify(|current| {
            if anchor.distance < current.distance {
                *current = anchor;
            }
        })
        .or_insert(anchor);
}

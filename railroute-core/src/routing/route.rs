//! Query pipeline: resolve endpoints, search, reconstruct

use geo::LineString;
use log::info;
use serde::{Deserialize, Serialize};

use crate::routing::dijkstra::run_search;
use crate::routing::reconstruct::assemble_route;
use crate::routing::resolver::{locate_endpoint, resolve_anchors};
use crate::store::{GraphStore, StationRegistry};
use crate::{DEFAULT_SNAP_RADIUS, Error};

/// Tunable parameters of a route query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Edges passing within this distance of an endpoint are valid
    /// start/end positions for the route.
    pub snap_radius: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            snap_radius: DEFAULT_SNAP_RADIUS,
        }
    }
}

/// A found route: continuous origin-to-destination geometry and the
/// total along-track distance.
#[derive(Debug, Clone)]
pub struct Route {
    pub geometry: LineString<f64>,
    pub distance: f64,
}

/// Finds the shortest route between two endpoint descriptors.
///
/// Each descriptor is either a literal `lon, lat` pair or a station name
/// known to `stations`. The result is a single continuous polyline;
/// failures are typed and terminal — no partial route is ever returned.
///
/// # Errors
///
/// [`Error::EndpointNotFound`] for an unknown station name,
/// [`Error::EndpointUnreachable`] when no track lies within the snap
/// radius of a resolved point, [`Error::RouteNotFound`] when the two
/// endpoint neighbourhoods are not connected, and
/// [`Error::RouteReconstruction`] if the search state turns out corrupt.
pub fn find_route<S, R>(
    store: &S,
    stations: &R,
    origin: &str,
    destination: &str,
    config: &RoutingConfig,
) -> Result<Route, Error>
where
    S: GraphStore + ?Sized,
    R: StationRegistry + ?Sized,
{
    let origin_point = locate_endpoint(stations, origin)?;
    let destination_point = locate_endpoint(stations, destination)?;

    info!(
        "Snapping endpoints to track within {} units",
        config.snap_radius
    );
    let origin_anchors = resolve_anchors(store, origin_point, config.snap_radius)?;
    let destination_anchors = resolve_anchors(store, destination_point, config.snap_radius)?;

    let outcome = run_search(store, &origin_anchors, &destination_anchors)?;
    info!(
        "Route found: {} units, {} vertices settled",
        outcome.total_distance, outcome.settled_count
    );

    let geometry = assemble_route(store, &outcome)?;

    Ok(Route {
        geometry,
        distance: outcome.total_distance,
    })
}

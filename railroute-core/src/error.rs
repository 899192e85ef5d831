use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Station not found: {0}")]
    EndpointNotFound(String),
    #[error("No track within {radius} units of ({x}, {y})")]
    EndpointUnreachable { x: f64, y: f64, radius: f64 },
    #[error("Search exhausted without reaching the destination")]
    RouteNotFound,
    #[error("Route reconstruction failed: {0}")]
    RouteReconstruction(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

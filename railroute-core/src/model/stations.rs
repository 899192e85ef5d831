//! Station name gazetteer

use geo::Point;
use hashbrown::HashMap;

use crate::store::StationRegistry;

/// In-memory station registry mapping names to geographic points.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    stations: HashMap<String, Point<f64>>,
}

impl StationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, location: Point<f64>) {
        self.stations.insert(name.into(), location);
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Point<f64>)> for StationIndex {
    fn from_iter<T: IntoIterator<Item = (N, Point<f64>)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (name, location) in iter {
            index.insert(name, location);
        }
        index
    }
}

impl StationRegistry for StationIndex {
    fn resolve(&self, name: &str) -> Option<Point<f64>> {
        self.stations.get(name).copied()
    }
}

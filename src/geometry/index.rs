//! Geometry lookup index keyed by datum X value.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::{BarGeometry, PointGeometry};

/// One indexed drawable, hit-testable at its datum's X value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexedGeometry {
    Bar(BarGeometry),
    Point(PointGeometry),
}

/// Collects index entries during geometry emission.
///
/// The index is built in two phases: emitters append entries here, then
/// [`GeometryIndexBuilder::build`] groups them by key in one pass into the
/// immutable [`GeometryIndex`].
#[derive(Debug, Clone, Default)]
pub struct GeometryIndexBuilder {
    entries: Vec<(String, IndexedGeometry)>,
}

impl GeometryIndexBuilder {
    pub fn push(&mut self, key: String, geometry: IndexedGeometry) {
        self.entries.push((key, geometry));
    }

    pub fn append(&mut self, mut other: GeometryIndexBuilder) {
        self.entries.append(&mut other.entries);
    }

    #[must_use]
    pub fn build(self) -> GeometryIndex {
        let mut map: IndexMap<String, Vec<IndexedGeometry>> = IndexMap::new();
        for (key, geometry) in self.entries {
            map.entry(key).or_default().push(geometry);
        }
        GeometryIndex { map }
    }
}

/// Immutable geometry-by-datum index for hit-testing and tooltips.
///
/// Keys are the stringified datum X values, so numeric and categorical
/// charts share one lookup shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeometryIndex {
    map: IndexMap<String, Vec<IndexedGeometry>>,
}

impl GeometryIndex {
    #[must_use]
    pub fn get(&self, key: &str) -> &[IndexedGeometry] {
        self.map.get(key).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

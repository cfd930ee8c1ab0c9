//! Overpass API response DTOs.
//!
//! Only the `out body` JSON shape is modelled: a flat list of elements tagged
//! by `type`. Relations and any other element kinds are accepted and ignored.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level Overpass JSON response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassResponse {
    /// Elements in response order.
    #[serde(default)]
    pub elements: Vec<OverpassElement>,

    /// Set by Overpass when the query hit a runtime error or timeout.
    /// The element list may be truncated in that case.
    #[serde(default)]
    pub remark: Option<String>,
}

impl OverpassResponse {
    /// Number of node elements.
    pub fn node_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, OverpassElement::Node { .. }))
            .count()
    }

    /// Number of way elements.
    pub fn way_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, OverpassElement::Way { .. }))
            .count()
    }
}

/// A single Overpass element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverpassElement {
    /// A point with a location.
    Node { id: i64, lat: f64, lon: f64 },

    /// An ordered list of node references.
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: Option<HashMap<String, String>>,
        /// Inline geometry, present only for `out geom` queries.
        #[serde(default)]
        geometry: Option<Vec<LatLon>>,
    },

    /// Relations, areas and anything else we don't use.
    #[serde(other)]
    Other,
}

/// Inline geometry point.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

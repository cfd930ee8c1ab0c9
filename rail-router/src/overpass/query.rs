//! Overpass QL query construction.

use crate::domain::BoundingBox;

/// Query selecting every `railway=rail` way inside `bbox`, together with the
/// nodes those ways reference.
///
/// The `(._;>;)` recursion pulls member nodes into the result set so node
/// coordinates are available to build the graph.
pub fn rail_ways_query(bbox: &BoundingBox, timeout_secs: u32) -> String {
    format!(
        "[out:json][timeout:{timeout_secs}];\n\
         way[\"railway\"=\"rail\"]({},{},{},{});\n\
         (._;>;);\n\
         out body;",
        bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
    )
}

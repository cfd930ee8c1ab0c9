//! Overpass API client for rail network geometry.
//!
//! Fetches every `railway=rail` way inside a bounding box together with the
//! nodes it references. Key characteristics of Overpass:
//! - Node IDs are global OSM IDs, stable only for the lifetime of one response
//!   as far as we are concerned
//! - Public instances are rate-limited and answer 429 or 504 under load
//! - A query that times out server-side may still return 200 with a `remark`
//!   and a truncated element list

mod client;
mod error;
mod query;
mod types;

use std::future::Future;

use crate::domain::BoundingBox;

pub use client::{OverpassClient, OverpassConfig};
pub use error::OverpassError;
pub use query::rail_ways_query;
pub use types::{LatLon, OverpassElement, OverpassResponse};

/// Trait for providing rail network elements inside a bounding box.
///
/// This abstraction allows the route builder to be tested with canned data.
pub trait RailNetworkProvider {
    /// Fetch all rail ways (and their nodes) intersecting `bbox`.
    fn fetch_rail_network(
        &self,
        bbox: &BoundingBox,
    ) -> impl Future<Output = Result<OverpassResponse, OverpassError>> + Send;
}

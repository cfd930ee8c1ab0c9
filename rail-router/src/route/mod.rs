//! Route construction: geocode, fetch track, route each leg, fall back.
//!
//! The caller always receives a drawable route; failures only degrade how
//! faithfully it follows the track.

mod assembly;
mod builder;

pub use assembly::assemble_route;
pub use builder::{RouteBuilder, RoutePlan};

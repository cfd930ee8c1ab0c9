//! Domain types for the rail router.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them (the graph builder, the path engine) can trust that every
//! coordinate is finite and in range.

mod coordinate;
mod route;
mod stop;

pub use coordinate::{BoundingBox, Coordinate, EARTH_RADIUS_METERS, InvalidCoordinate};
pub use route::{LegMethod, LegReport, RouteGeometry, straight_line_distance};
pub use stop::GeocodedStop;

//! Railway-aware route construction.
//!
//! Turns an ordered list of stop names into a drawable route that follows
//! OpenStreetMap rail track where it can and falls back to straight
//! great-circle segments where it cannot.

pub mod config;
pub mod domain;
pub mod geocoder;
pub mod graph;
pub mod overpass;
pub mod route;
pub mod web;

#[cfg(test)]
mod test_support;

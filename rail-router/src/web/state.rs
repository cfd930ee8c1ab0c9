//! Application state for the web layer.

use std::sync::Arc;

use crate::geocoder::NominatimClient;
use crate::overpass::OverpassClient;
use crate::route::RouteBuilder;

/// Shared application state.
///
/// Generic over the geocoder and rail network source so handlers can be
/// exercised with in-process fakes.
pub struct AppState<G, R> {
    /// Route builder wrapping both upstream clients
    pub builder: Arc<RouteBuilder<G, R>>,
}

impl<G, R> AppState<G, R> {
    /// Create a new app state.
    pub fn new(builder: RouteBuilder<G, R>) -> Self {
        Self {
            builder: Arc::new(builder),
        }
    }
}

// Manual impl: cloning the state only clones the `Arc`.
impl<G, R> Clone for AppState<G, R> {
    fn clone(&self) -> Self {
        Self {
            builder: Arc::clone(&self.builder),
        }
    }
}

/// State used by the server binary.
pub type ServerState = AppState<NominatimClient, OverpassClient>;

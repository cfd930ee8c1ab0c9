//! Web layer for the rail router.
//!
//! Provides HTTP endpoints for geocoding stops and building routes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, ServerState};

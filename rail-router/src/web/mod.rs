//! Web layer for the route planner.
//!
//! Provides HTTP endpoints for resolving station names and querying routes.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;

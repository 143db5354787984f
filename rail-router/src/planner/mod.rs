//! Route planner using Dijkstra search.
//!
//! This module implements the core route finding algorithm that answers:
//! "What is the shortest way through the network from this station to that one?"
//!
//! Queries take station ids only. Name disambiguation happens before a query
//! reaches the planner (see [`crate::registry::StationRegistry::resolve`]).

mod config;
mod dijkstra;
mod route;
mod search;


pub use config::PlanOptions;
pub use dijkstra::shortest_path;
pub use route::{PlanError, Route, RouteRequest};
pub use search::Planner;

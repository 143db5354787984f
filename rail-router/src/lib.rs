//! Railway route planner server.
//!
//! Loads a station network from CSV tables and answers:
//! "What is the shortest way through the network from this station to that one?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod format;
pub mod loader;
pub mod network;
pub mod planner;
pub mod registry;
pub mod web;

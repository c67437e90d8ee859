//! Disease predictor HTTP server
//!
//! Loads the three task classifiers at startup and serves predictions,
//! health probes and Prometheus metrics over HTTP.

pub mod api;
pub mod config;
pub mod startup;

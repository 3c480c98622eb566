//! Reaches a GraphQL-LD translation service over HTTP.
//!
//! The service receives the GraphQL query together with the JSON-LD context
//! and the SPARQL endpoint, translates the query to SPARQL, evaluates it
//! against the endpoint and answers with a GraphQL response envelope.

mod client;
mod config;
mod error;

pub use client::{HttpBridgeClient, HttpBridgeFactory};
pub use config::{BridgeConfig, DEFAULT_TIMEOUT};
pub use error::BridgeError;

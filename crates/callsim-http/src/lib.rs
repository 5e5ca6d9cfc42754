#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// CallerHttpClient's backend parameter is an implementation detail; external
// code goes through DefaultCallerClient and the CallerBackendPort trait
#![allow(private_interfaces, private_bounds)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::{CallerHttpClient, DefaultCallerClient};

// Configuration
pub use config::{DEFAULT_BASE_URL, HttpClientConfig};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use tokio_test as _;

#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used only by main.rs
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod parser;
pub mod presentation;
pub mod repl;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap};
pub use commands::{CommandError, ReplCommand};
pub use parser::Cli;

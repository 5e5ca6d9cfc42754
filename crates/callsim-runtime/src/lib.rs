#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod clock;
mod controller;
mod log_tailer;
mod readiness;
pub mod tasks;

#[cfg(test)]
mod test_support;

pub use controller::{CallerController, LAUNCH_FAILED_STATUS, OPTIONS_FAILED_STATUS};
pub use readiness::check_ready;
pub use tasks::{TaskPurpose, TaskSlots};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

//! Domain types for the caller controller.
//!
//! Pure data with no I/O.

pub mod lifecycle;
pub mod options;
pub mod selection;
pub mod session;

pub use lifecycle::{CallerLifecycleState, LifecycleAction, TransitionError};
pub use options::{Gender, OptionsCatalog, Scenario, UnknownGender, VoiceOption};
pub use selection::Selection;
pub use session::{CallSession, format_elapsed};

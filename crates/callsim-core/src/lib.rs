#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod display;
pub mod domain;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use display::{
    ButtonTone, CallButton, GenderToggle, LaunchButton, LoadingEllipsis, PhoneContent, VoiceList,
};
pub use domain::{
    CallSession, CallerLifecycleState, Gender, LifecycleAction, OptionsCatalog, Scenario,
    Selection, TransitionError, VoiceOption,
};
pub use ports::{
    BackendError, BackendResult, CallerBackendPort, CallerView, ControllerError, Endpoint,
    LaunchOutcome, LaunchRequest, LaunchResponse, LogsResponse, NoopView, OptionsResponse,
    ValidationError,
};
pub use settings::{ControllerSettings, SettingsError, validate_settings};


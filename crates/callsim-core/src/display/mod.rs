//! Pure view models: phone panel, controls, ellipsis animation, clock.

pub mod clock;
pub mod controls;
pub mod ellipsis;
pub mod phone;

pub use clock::format_phone_time;
pub use controls::{
    ButtonTone, GenderToggle, LaunchButton, NO_VOICES_PLACEHOLDER, VoiceList, gender_toggles,
};
pub use ellipsis::{LOADING_TEXT_INITIAL, LoadingEllipsis};
pub use phone::{CallButton, PhoneContent, call_subtitle, capitalize, render};

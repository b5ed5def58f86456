//! UI components built with Leptos.
//!
//! - [`AuthGate`] - Start-up, error and sign-in screens (main entry point)
//! - [`explorer`] - File browser UI
//! - [`actions`] - Event-handler entry points into the engine
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod actions;
mod auth_gate;
pub mod explorer;
pub mod icons;

pub use auth_gate::AuthGate;

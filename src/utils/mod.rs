//! Utility modules for DOM, network and formatting.
//!
//! Provides:
//! - [`dom`] - Browser API access, console logging, dialogs
//! - [`fetch`] - Requests with timeout racing
//! - [`format_size`], [`format_date`] - Display formatting

pub mod dom;
pub mod fetch;
mod format;

pub use format::{format_date, format_size, format_usage};

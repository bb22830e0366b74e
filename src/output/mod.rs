//! Output abstraction layer that routes report text, JSON and tagged
//! diagnostics based on mode.

pub mod context;

pub use context::{OutputContext, OutputMode, tagged};

//! Core types and constants for the geolocation front-end

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;

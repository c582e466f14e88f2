//! Core types and constants for the trajectory explorer

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;

//! Input validation and error types

pub mod data;
pub mod error;

pub use data::validate_observation;
pub use error::{AnchorError, IngestError, ObservationFault};

use thiserror::Error;

/// Rejection of an input buffer at ingestion. Any error aborts the whole
/// buffer so partially decoded data never reaches a trajectory.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Observation buffer is not a JSON array: {0}")]
    NotAnArray(#[source] serde_json::Error),

    #[error("Malformed observation at index {index}: {source}")]
    Decode {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed observation at index {index}: {reason}")]
    MalformedObservation { index: usize, reason: ObservationFault },
}

/// What exactly is wrong with an otherwise decodable observation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObservationFault {
    #[error("empty hash_id")]
    EmptyHashId,
    #[error("non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("negative {field}: {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("invalid distance {distance} for anchor '{anchor_id}'")]
    InvalidDistance { anchor_id: String, distance: f64 },
}

/// Rejection of an anchor feature collection
#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("Anchor collection could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Anchor feature {index} has no usable id")]
    MissingId { index: usize },

    #[error("Anchor feature {index} needs [lon, lat] coordinates, got {found} values")]
    MissingCoordinates { index: usize, found: usize },

    #[error("Anchor feature {index} has non-finite coordinates")]
    NonFiniteCoordinates { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_record() {
        let err = IngestError::MalformedObservation {
            index: 3,
            reason: ObservationFault::Negative { field: "uncertainty", value: -1.0 },
        };
        assert_eq!(err.to_string(), "Malformed observation at index 3: negative uncertainty: -1");

        let err = AnchorError::MissingCoordinates { index: 0, found: 1 };
        assert!(err.to_string().contains("got 1 values"));
    }
}

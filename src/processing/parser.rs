use crate::core::Observation;
use crate::validation::{validate_observation, IngestError};
use serde_json::Value;

/// Decode the raw observation buffer handed over by the data source.
///
/// The buffer must be a JSON array of observation records. The first record
/// that is missing a required field, has a field of the wrong type, or fails
/// [`validate_observation`] rejects the whole buffer.
pub fn parse_observations(json: &str) -> Result<Vec<Observation>, IngestError> {
    let records: Vec<Value> = serde_json::from_str(json).map_err(IngestError::NotAnArray)?;
    decode_records(records)
}

/// Same as [`parse_observations`] for an already decoded JSON value
pub fn observations_from_value(value: Value) -> Result<Vec<Observation>, IngestError> {
    let records: Vec<Value> = serde_json::from_value(value).map_err(IngestError::NotAnArray)?;
    decode_records(records)
}

fn decode_records(records: Vec<Value>) -> Result<Vec<Observation>, IngestError> {
    let mut observations = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let obs: Observation = serde_json::from_value(record)
            .map_err(|source| IngestError::Decode { index, source })?;
        validate_observation(&obs)
            .map_err(|reason| IngestError::MalformedObservation { index, reason })?;
        observations.push(obs);
    }

    tracing::debug!(count = observations.len(), "decoded observation buffer");
    Ok(observations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ObservationFault;

    #[test]
    fn test_parse_full_and_minimal_records() {
        let json = r#"[
            {"timestamp": 200, "hash_id": "a", "longitude": 1.0, "latitude": 1.0,
             "uncertainty": 3.5, "error": 0.25, "devices": {"aabbccddeeff": 12.0}},
            {"timestamp": 100, "hash_id": "a", "longitude": 0.0, "latitude": 0.0}
        ]"#;

        let observations = parse_observations(json).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].uncertainty, 3.5);
        assert_eq!(observations[0].devices.get("aabbccddeeff"), Some(&12.0));
        assert_eq!(observations[1].error, 0.0);
        assert!(observations[1].devices.is_empty());
    }

    #[test]
    fn test_empty_buffer_is_not_an_error() {
        assert!(parse_observations("[]").unwrap().is_empty());
    }

    #[test]
    fn test_missing_required_field_names_index() {
        let json = r#"[
            {"timestamp": 1, "hash_id": "a", "longitude": 0.0, "latitude": 0.0},
            {"timestamp": 2, "longitude": 0.0, "latitude": 0.0}
        ]"#;

        match parse_observations(json) {
            Err(IngestError::Decode { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let json = r#"[{"timestamp": "yesterday", "hash_id": "a", "longitude": 0.0, "latitude": 0.0}]"#;
        assert!(matches!(parse_observations(json), Err(IngestError::Decode { index: 0, .. })));
    }

    #[test]
    fn test_semantic_validation_runs_after_decode() {
        let json = r#"[{"timestamp": 1, "hash_id": "a", "longitude": 0.0, "latitude": 0.0, "uncertainty": -2.0}]"#;
        match parse_observations(json) {
            Err(IngestError::MalformedObservation { index, reason }) => {
                assert_eq!(index, 0);
                assert_eq!(reason, ObservationFault::Negative { field: "uncertainty", value: -2.0 });
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_from_value() {
        let value = serde_json::json!([{"timestamp": 7, "hash_id": "z", "longitude": 1.5, "latitude": -2.0}]);
        let observations = observations_from_value(value).unwrap();
        assert_eq!(observations[0].hash_id, "z");
        assert_eq!(observations[0].timestamp, 7);
    }

    #[test]
    fn test_non_array_buffer_is_rejected() {
        assert!(matches!(parse_observations(r#"{"a": 1}"#), Err(IngestError::NotAnArray(_))));
    }
}

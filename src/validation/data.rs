use crate::core::Observation;
use crate::validation::error::ObservationFault;

/// Checks an observation beyond what the decoder enforces. Required fields
/// are already present by the time this runs; here we reject values that
/// would poison a trajectory.
pub fn validate_observation(obs: &Observation) -> Result<(), ObservationFault> {
    if obs.hash_id.is_empty() {
        return Err(ObservationFault::EmptyHashId);
    }

    for (field, value) in [("longitude", obs.longitude), ("latitude", obs.latitude)] {
        if !value.is_finite() {
            return Err(ObservationFault::NonFinite { field, value });
        }
    }

    for (field, value) in [("uncertainty", obs.uncertainty), ("error", obs.error)] {
        if !value.is_finite() {
            return Err(ObservationFault::NonFinite { field, value });
        }
        if value < 0.0 {
            return Err(ObservationFault::Negative { field, value });
        }
    }

    if let Some((anchor_id, distance)) = obs
        .devices
        .iter()
        .find(|(_, d)| !d.is_finite() || **d < 0.0)
    {
        return Err(ObservationFault::InvalidDistance {
            anchor_id: anchor_id.clone(),
            distance: *distance,
        });
    }

    Ok(())
}

//! Waiting for a prediction to leave the `starting`/`processing` states.

use std::time::Duration;

use crate::api::{Prediction, PredictionBackend, ReplicateApiError};

/// Tunable parameters for prediction polling.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before each status fetch.
    pub interval: Duration,
    /// Upper bound on status fetches before giving up.
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 150,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ReplicateApiError),

    #[error("Prediction {id} still pending after {attempts} polls")]
    TimedOut { id: String, attempts: u32 },
}

/// Poll a prediction until it is no longer pending.
///
/// Sleeps [`PollConfig::interval`] before every fetch and returns the first
/// settled prediction, whatever its final status.
pub async fn wait_for_prediction(
    backend: &dyn PredictionBackend,
    id: &str,
    config: &PollConfig,
) -> Result<Prediction, PollError> {
    for attempt in 1..=config.max_attempts {
        tokio::time::sleep(config.interval).await;

        let prediction = backend.get_prediction(id).await?;
        if !prediction.status.is_pending() {
            tracing::debug!(
                prediction_id = id,
                attempt,
                status = ?prediction.status,
                "Prediction settled",
            );
            return Ok(prediction);
        }
    }

    tracing::warn!(
        prediction_id = id,
        attempts = config.max_attempts,
        "Prediction polling timed out",
    );
    Err(PollError::TimedOut {
        id: id.to_string(),
        attempts: config.max_attempts,
    })
}

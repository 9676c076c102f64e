//! Runtime state shared between the dashboard and the worker

/// Where sample provisioning stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SamplesStatus {
    /// Not reported back yet
    #[default]
    Pending,
    /// Every sample image is on disk
    Ready,
    /// Provisioning failed; user-facing message
    Unavailable(String),
}

/// Runtime state that is not persisted
#[derive(Debug, Clone, Default)]
pub struct RuntimeState {
    /// Whether a recognition request is running
    pub is_processing: bool,
    /// Sample provisioning outcome
    pub samples: SamplesStatus,
    /// Requests finished, successfully or not
    pub requests_completed: u64,
    /// Duration of the last request in milliseconds
    pub last_processing_time_ms: u64,
}

impl RuntimeState {
    /// Record the outcome of a provisioning attempt
    pub fn set_samples(&mut self, all_present: bool, error: Option<String>) {
        self.samples = match (all_present, error) {
            (true, _) => SamplesStatus::Ready,
            (false, Some(message)) => SamplesStatus::Unavailable(message),
            // Keep an earlier failure visible until the files show up
            (false, None) => match &self.samples {
                SamplesStatus::Unavailable(_) => self.samples.clone(),
                _ => SamplesStatus::Pending,
            },
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let runtime = RuntimeState::default();
        assert!(!runtime.is_processing);
        assert_eq!(runtime.samples, SamplesStatus::Pending);
        assert_eq!(runtime.requests_completed, 0);
    }

    #[test]
    fn test_samples_lifecycle() {
        let mut runtime = RuntimeState::default();

        runtime.set_samples(false, Some("Sample images are unavailable".to_string()));
        assert_eq!(
            runtime.samples,
            SamplesStatus::Unavailable("Sample images are unavailable".to_string())
        );

        // A later check that finds files still missing keeps the message
        runtime.set_samples(false, None);
        assert!(matches!(runtime.samples, SamplesStatus::Unavailable(_)));

        runtime.set_samples(true, None);
        assert_eq!(runtime.samples, SamplesStatus::Ready);
    }
}

//! Engine Configuration
//!
//! Timing and DOM-contract knobs, with defaults tuned for short, snappy
//! transitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `id` of the element whose children are replaced on navigation.
    pub region_id: String,
    /// Class applied to navigation links matching the current path.
    pub active_class: String,
    /// Fixed wait for the exit transition.
    pub exit_duration: Duration,
    /// Fixed wait for the entrance transition.
    pub enter_duration: Duration,
    /// Hover debounce before a prefetch starts.
    pub prefetch_debounce: Duration,
    /// How long the progress bar takes to fade after completing.
    pub progress_fade: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            region_id: "main-content".to_string(),
            active_class: "active".to_string(),
            exit_duration: Duration::from_millis(150),
            enter_duration: Duration::from_millis(150),
            prefetch_debounce: Duration::from_millis(65),
            progress_fade: Duration::from_millis(200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.region_id, "main-content");
        assert!(config.prefetch_debounce < config.exit_duration);
    }
}

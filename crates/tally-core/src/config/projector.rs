use serde::{Deserialize, Serialize};

/// Configuration for the projector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectorConfig {
    /// Maximum number of events applied per `run_once` call
    /// Default: 1000
    #[serde(default = "default_batch_events_max")]
    pub batch_events_max: usize,

    /// Maximum time spent in one `run_once` call (milliseconds)
    /// The current event is always finished before the limit is checked
    /// Default: 100ms
    #[serde(default = "default_max_apply_latency_ms")]
    pub max_apply_latency_ms: u64,

    /// Poll interval when the source is caught up (milliseconds)
    /// Default: 10ms
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_batch_events_max() -> usize {
    1000
}

fn default_max_apply_latency_ms() -> u64 {
    100
}

fn default_poll_interval_ms() -> u64 {
    10
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            batch_events_max: default_batch_events_max(),
            max_apply_latency_ms: default_max_apply_latency_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ProjectorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_batch_events_max(mut self, max: usize) -> Self {
        self.batch_events_max = max;
        self
    }

    pub fn with_max_apply_latency_ms(mut self, ms: u64) -> Self {
        self.max_apply_latency_ms = ms;
        self
    }

    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval_ms = ms;
        self
    }
}

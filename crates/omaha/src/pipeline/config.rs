//! Pipeline settings.

use std::time::Duration;

/// Worker pool and scoring settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Worker threads (default: 20). Zero is treated as one.
    pub threads: usize,
    /// Minimum composite score for a ticker to be recorded (default: 5.0)
    pub cutoff: f64,
    /// Pause after every ticker, success or failure (default: 2s)
    pub item_delay: Duration,
    /// Extra pause after a rate-limited request (default: 10s)
    pub rate_limit_backoff: Duration,
    /// Add the cyclicality adjustment to the composite (default: off)
    pub cyclicality: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: 20,
            cutoff: 5.0,
            item_delay: Duration::from_secs(2),
            rate_limit_backoff: Duration::from_secs(10),
            cyclicality: false,
        }
    }
}

impl PipelineConfig {
    /// Set the number of worker threads.
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the score cutoff.
    pub const fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Set the per-ticker delay.
    pub const fn with_item_delay(mut self, delay: Duration) -> Self {
        self.item_delay = delay;
        self
    }

    /// Set the rate-limit backoff.
    pub const fn with_rate_limit_backoff(mut self, backoff: Duration) -> Self {
        self.rate_limit_backoff = backoff;
        self
    }

    /// Enable or disable the cyclicality adjustment.
    pub const fn with_cyclicality(mut self, enabled: bool) -> Self {
        self.cyclicality = enabled;
        self
    }

    /// Thread count actually spawned.
    pub const fn worker_count(&self) -> usize {
        if self.threads == 0 { 1 } else { self.threads }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.threads, 20);
        assert_eq!(config.cutoff, 5.0);
        assert_eq!(config.item_delay, Duration::from_secs(2));
        assert_eq!(config.rate_limit_backoff, Duration::from_secs(10));
        assert!(!config.cyclicality);
    }

    #[test]
    fn test_zero_threads_runs_one_worker() {
        let config = PipelineConfig::default().with_threads(0);
        assert_eq!(config.worker_count(), 1);
    }
}

use serde::{Deserialize, Serialize};

/// Job-level retry and timing knobs (§4.8, §5).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Job-level retries tolerated by the refresher/orchestrator queue
    /// workers before a job is dropped (§4.8, §7 error kind 6).
    #[serde(default = "default_job_retries")]
    pub job_retries: u32,

    /// Per-call empty-result retries inside the orchestrator (§4.6), kept
    /// independent of job-level retries.
    #[serde(default = "default_call_retries")]
    pub call_retries: u32,

    /// Delay before the first dependent-translated-feed job after a
    /// successful source refresh (§4.7 step 9).
    #[serde(default = "default_fanout_delay_secs")]
    pub fanout_delay_secs: u64,

    /// Timeout for engine HTTP calls (§5).
    #[serde(default = "default_engine_timeout_secs")]
    pub engine_timeout_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            job_retries: default_job_retries(),
            call_retries: default_call_retries(),
            fanout_delay_secs: default_fanout_delay_secs(),
            engine_timeout_secs: default_engine_timeout_secs(),
        }
    }
}

fn default_job_retries() -> u32 {
    3
}
fn default_call_retries() -> u32 {
    3
}
fn default_fanout_delay_secs() -> u64 {
    1
}
fn default_engine_timeout_secs() -> u64 {
    120
}

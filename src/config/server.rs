use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Process-level configuration: where artifacts live (`DATA_FOLDER`, §6) and
/// how much work runs concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Root of the data directory; feed artifacts live under `<data_dir>/feeds`.
    #[serde(default)]
    pub data_dir: PathBuf,

    /// Worker pool size for the job queue.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::new(),
            workers: default_workers(),
        }
    }
}

impl ServerConfig {
    pub fn feeds_dir(&self) -> PathBuf {
        self.data_dir.join("feeds")
    }
}

fn default_workers() -> usize {
    4
}

use serde::{Deserialize, Serialize};

use crate::JoinError;

/// Which nearest-road lookup a join builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IndexStrategy {
    #[default]
    #[serde(rename = "rtree")]
    RTree,
    #[serde(rename = "linear-scan")]
    LinearScan,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JoinConf {
    /// Query buildings on the rayon thread pool.
    pub parallel: bool,
    /// Slack on distance under which two roads count as tied.
    pub tie_tolerance: f64,
    pub strategy: IndexStrategy,
}

impl Default for JoinConf {
    fn default() -> Self {
        Self {
            parallel: false,
            tie_tolerance: 0.0,
            strategy: IndexStrategy::RTree,
        }
    }
}

impl JoinConf {
    pub fn validate(&self) -> Result<(), JoinError> {
        if !self.tie_tolerance.is_finite() || self.tie_tolerance < 0.0 {
            return Err(JoinError::InvalidTolerance(self.tie_tolerance));
        }
        Ok(())
    }
}

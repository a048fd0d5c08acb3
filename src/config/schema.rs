use serde::{Deserialize, Serialize};

use crate::cache::CacheSettings;
use crate::model::ModelCalibration;
use crate::sandbagging::SandbaggingConfig;
use crate::team::SimulationBounds;

/// Top-level configuration. Every section is optional in the file.
///
/// Example YAML:
/// ```yaml
/// calibration:
///   team_allowance_percent: 90
///   score_std:
///     scratch_sigma: 3.2
/// simulation:
///   default_simulations: 20000
/// cache:
///   ttl: 10m
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub calibration: ModelCalibration,
    pub simulation: SimulationBounds,
    pub sandbagging: SandbaggingConfig,
    pub cache: CacheSettings,
}

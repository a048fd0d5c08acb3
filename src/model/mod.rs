pub mod calibration;
pub mod score_model;
pub mod types;

pub use calibration::{MilestoneConfig, ModelCalibration, NineHoleScaling, ScoreStdCurve};
pub use score_model::ScoreModel;
pub use types::*;

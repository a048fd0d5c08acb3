//! Probability that a golfer, or a two-player best-ball team, shoots at or
//! below a target score, and statistical screening of score histories for
//! handicap manipulation.
//!
//! Every computation is a pure function of its inputs and the loaded
//! [`config::Config`]. The Monte Carlo team simulator takes an explicit
//! seed. The library emits `tracing` events but never installs a
//! subscriber.
pub mod analysis;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod probability;
pub mod sandbagging;
pub mod service;
pub mod team;

pub use error::{OddsError, Result};
pub use model::{CourseSetup, GolferProfile, Holes, ScoreModel};
pub use service::OddsService;

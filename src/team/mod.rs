//! Two-player best-ball odds by Monte Carlo simulation.

pub mod players;
pub mod simulator;

pub use players::{net_distribution, playing_handicap};
pub use simulator::{
    expected_minimum, simulate_team_best_ball, team_event_odds, SimulationBounds, TeamEventOdds,
    TeamSimulation, APPROXIMATION_NOTES,
};

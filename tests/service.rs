use golf_odds::config::Config;
use golf_odds::model::{
    BestBallTarget, CompletedRoundScore, CourseSetup, EventStructure, GolferProfile, Holes, ScoringTarget,
    TeamProfile,
};
use golf_odds::sandbagging::{FlagType, RiskLevel};
use golf_odds::service::*;
use golf_odds::OddsError;

fn municipal() -> CourseSetup {
    CourseSetup::new("Municipal", 72.0, 113, 72)
}

fn links() -> CourseSetup {
    CourseSetup::new("Links", 71.2, 125, 72)
}

fn rounds(scores: &[u32]) -> Vec<CompletedRoundScore> {
    scores
        .iter()
        .enumerate()
        .map(|(i, s)| CompletedRoundScore::new(i as u32 + 1, *s, Holes::Eighteen))
        .collect()
}

fn team() -> TeamProfile {
    TeamProfile {
        player_a: GolferProfile::new("Avery", 8.0),
        player_b: GolferProfile::new("Blake", 14.0),
    }
}

fn cached_service() -> OddsService {
    OddsService::from_config(&Config::default()).unwrap()
}

#[test]
fn single_round_for_mid_handicapper() {
    let service = OddsService::default();
    let response = service
        .single_round(&SingleRoundRequest {
            golfer: GolferProfile::new("Sam", 18.0),
            course: municipal(),
            target: ScoringTarget { target_score: 85 },
            holes_played: Holes::Eighteen,
        })
        .unwrap();

    assert_eq!(response.expected_score, 90.0);
    assert!((response.score_std - 5.16).abs() < 1e-12);
    assert!(response.z_score < 0.0);
    assert!(response.probability_score_at_or_below_target > 0.15);
    assert!(response.probability_score_at_or_below_target < 0.25);
}

#[test]
fn multi_round_at_least_once_exceeds_single_round() {
    let service = OddsService::default();
    let response = service
        .multi_round(&MultiRoundRequest {
            golfer: GolferProfile::new("Sam", 18.0),
            course: municipal(),
            target: ScoringTarget { target_score: 85 },
            event: EventStructure { num_rounds: 4 },
            min_success_rounds: 1,
            holes_played: Holes::Eighteen,
        })
        .unwrap();

    assert!(response.binomial_model_used);
    assert!(response.probability_at_least_once > response.single_round_probability);
    assert!((response.probability_at_least_once - response.probability_at_least_min_success_rounds).abs() < 1e-9);
}

#[test]
fn multi_round_needing_more_successes_is_harder() {
    let service = OddsService::default();
    let mut request = MultiRoundRequest {
        golfer: GolferProfile::new("Sam", 18.0),
        course: municipal(),
        target: ScoringTarget { target_score: 88 },
        event: EventStructure { num_rounds: 5 },
        min_success_rounds: 1,
        holes_played: Holes::Eighteen,
    };
    let once = service.multi_round(&request).unwrap();
    request.min_success_rounds = 3;
    let three = service.multi_round(&request).unwrap();
    request.min_success_rounds = 6;
    let impossible = service.multi_round(&request).unwrap();

    assert!(three.probability_at_least_min_success_rounds < once.probability_at_least_min_success_rounds);
    assert_eq!(impossible.probability_at_least_min_success_rounds, 0.0);
}

#[test]
fn milestones_bracket_the_expected_score() {
    let service = OddsService::default();
    let response = service
        .milestones(&MilestoneRequest {
            golfer: GolferProfile::new("Sam", 18.0),
            course: municipal(),
            event: EventStructure { num_rounds: 3 },
            holes_played: Holes::Eighteen,
        })
        .unwrap();

    let targets: Vec<u32> = response.milestones.iter().map(|m| m.target_score).collect();
    assert_eq!(targets, vec![80, 85, 90, 95]);
    for pair in response.milestones.windows(2) {
        assert!(pair[0].prob_single_round_at_or_below < pair[1].prob_single_round_at_or_below);
    }
    for milestone in &response.milestones {
        assert!(milestone.prob_at_least_once_in_event >= milestone.prob_single_round_at_or_below);
    }
}

#[test]
fn consecutive_eighteen_hole_rounds() {
    let service = OddsService::default();
    let response = service
        .consecutive(&ConsecutiveRequest {
            golfer: GolferProfile::new("Sam", 18.0),
            course: municipal(),
            target: ScoringTarget { target_score: 90 },
            consecutive_count: 3,
            total_matches: Some(12),
            holes_per_round: Holes::Eighteen,
        })
        .unwrap();

    let p = response.single_round_probability;
    assert!((response.probability_all_consecutive - p.powi(3)).abs() < 1e-12);
    let streak = response.probability_streak_in_matches.unwrap();
    assert!(streak > response.probability_all_consecutive);
    assert!(streak <= 1.0);
    assert_eq!(response.holes_per_round, 18);
}

#[test]
fn consecutive_nine_hole_rounds_use_nine_hole_model() {
    let service = OddsService::default();
    let response = service
        .consecutive(&ConsecutiveRequest {
            golfer: GolferProfile::new("Sam", 18.0),
            course: municipal(),
            target: ScoringTarget { target_score: 45 },
            consecutive_count: 2,
            total_matches: None,
            holes_per_round: Holes::Nine,
        })
        .unwrap();

    assert_eq!(response.expected_score, 45.0);
    assert!((response.score_std - 5.16 * 0.65).abs() < 1e-12);
    assert_eq!(response.holes_per_round, 9);
    assert!(response.probability_streak_in_matches.is_none());
}

#[test]
fn consecutive_limits_are_enforced() {
    let service = OddsService::default();
    let mut request = ConsecutiveRequest {
        golfer: GolferProfile::new("Sam", 18.0),
        course: municipal(),
        target: ScoringTarget { target_score: 90 },
        consecutive_count: 0,
        total_matches: None,
        holes_per_round: Holes::Eighteen,
    };
    assert!(matches!(
        service.consecutive(&request),
        Err(OddsError::InvalidParameter { name: "consecutive_count", .. })
    ));
    request.consecutive_count = 2;
    request.total_matches = Some(0);
    assert!(matches!(
        service.consecutive(&request),
        Err(OddsError::InvalidParameter { name: "total_matches", .. })
    ));
}

#[test]
fn team_single_round_is_repeatable_for_a_seed() {
    let service = OddsService::default();
    let request = TeamSingleRoundRequest {
        team: team(),
        course: links(),
        bestball_target: BestBallTarget { target_net_score: 70 },
        simulation: SimulationOptions {
            num_simulations: Some(20_000),
            seed: Some(7),
        },
    };
    let first = service.team_single_round(&request).unwrap();
    let second = service.team_single_round(&request).unwrap();
    assert_eq!(first, second);

    // course handicaps 8 and 15, receiving 7 and 13 strokes at 85%
    assert_eq!(first.player_a_net_expected_score, 73.0);
    assert_eq!(first.player_b_net_expected_score, 74.0);
    assert_eq!(first.handicap_allowance_percent, 85.0);
    assert!(first.expected_team_bestball_score_single_round < 73.0);
    assert!((first.expected_team_bestball_score_single_round - first.closed_form_expected_score).abs()
        < 4.0 * first.standard_error);
    assert_eq!(first.num_simulations_used, 20_000);
    assert_eq!(first.seed, 7);
    assert!(!first.approximation_notes.is_empty());
}

#[test]
fn team_single_round_defaults_seed_and_count() {
    let service = OddsService::default();
    let response = service
        .team_single_round(&TeamSingleRoundRequest {
            team: team(),
            course: links(),
            bestball_target: BestBallTarget { target_net_score: 70 },
            simulation: SimulationOptions::default(),
        })
        .unwrap();
    assert_eq!(response.seed, DEFAULT_SEED);
    assert_eq!(response.num_simulations_used, 10_000);
}

#[test]
fn team_single_round_rejects_out_of_range_simulations() {
    let service = OddsService::default();
    let result = service.team_single_round(&TeamSingleRoundRequest {
        team: team(),
        course: links(),
        bestball_target: BestBallTarget { target_net_score: 70 },
        simulation: SimulationOptions {
            num_simulations: Some(10),
            seed: None,
        },
    });
    assert!(matches!(
        result,
        Err(OddsError::InvalidParameter { name: "num_simulations", .. })
    ));
}

#[test]
fn team_targets_outside_score_range_are_rejected() {
    let service = OddsService::default();
    for target_net_score in [0, 100_000] {
        let single = service.team_single_round(&TeamSingleRoundRequest {
            team: team(),
            course: links(),
            bestball_target: BestBallTarget { target_net_score },
            simulation: SimulationOptions::default(),
        });
        assert!(matches!(
            single,
            Err(OddsError::InvalidParameter { name: "target_net_score", .. })
        ));

        let multi = service.team_multi_round(&TeamMultiRoundRequest {
            team: team(),
            course: links(),
            bestball_target: BestBallTarget { target_net_score },
            event: EventStructure { num_rounds: 3 },
            min_success_rounds: 1,
            consecutive_count: None,
            simulation: SimulationOptions::default(),
        });
        assert!(matches!(
            multi,
            Err(OddsError::InvalidParameter { name: "target_net_score", .. })
        ));
    }
}

#[test]
fn team_multi_round_combines_simulation_with_event_odds() {
    let service = OddsService::default();
    let response = service
        .team_multi_round(&TeamMultiRoundRequest {
            team: team(),
            course: links(),
            bestball_target: BestBallTarget { target_net_score: 70 },
            event: EventStructure { num_rounds: 3 },
            min_success_rounds: 2,
            consecutive_count: Some(2),
            simulation: SimulationOptions {
                num_simulations: Some(5_000),
                seed: Some(3),
            },
        })
        .unwrap();

    let p = response.probability_net_bestball_at_or_below_target_single_round;
    assert!((response.probability_at_least_once_in_event - (1.0 - (1.0 - p).powi(3))).abs() < 1e-9);
    assert!(response.probability_at_least_min_success_rounds <= response.probability_at_least_once_in_event);
    assert_eq!(response.consecutive_count, Some(2));
    let streak = response.probability_streak_in_event.unwrap();
    assert!(streak <= response.probability_at_least_min_success_rounds + 1e-9);
    assert_eq!(response.seed, 3);
}

#[test]
fn team_multi_round_rejects_zero_min_success() {
    let service = OddsService::default();
    let result = service.team_multi_round(&TeamMultiRoundRequest {
        team: team(),
        course: links(),
        bestball_target: BestBallTarget { target_net_score: 70 },
        event: EventStructure { num_rounds: 3 },
        min_success_rounds: 0,
        consecutive_count: None,
        simulation: SimulationOptions::default(),
    });
    assert!(matches!(
        result,
        Err(OddsError::InvalidParameter { name: "min_success_rounds", .. })
    ));
}

#[test]
fn completed_rounds_summary() {
    let service = OddsService::default();
    let response = service
        .completed_rounds(&CompletedRoundsRequest {
            golfer: GolferProfile::new("Sam", 18.0),
            course: municipal(),
            completed_scores: rounds(&[88, 92, 85]),
        })
        .unwrap();

    assert_eq!(response.num_rounds_analyzed, 3);
    assert_eq!(response.best_round.actual_score, 85);
    assert_eq!(response.worst_round.actual_score, 92);
    assert!((response.average_actual_score - 265.0 / 3.0).abs() < 1e-12);
    assert!((response.total_strokes_from_expected + 5.0).abs() < 1e-12);
    let product: f64 = response.round_analyses.iter().map(|r| r.probability_at_or_below).product();
    assert!((response.overall_probability - product).abs() < 1e-15);
}

#[test]
fn completed_rounds_requires_a_round() {
    let service = OddsService::default();
    let result = service.completed_rounds(&CompletedRoundsRequest {
        golfer: GolferProfile::new("Sam", 18.0),
        course: municipal(),
        completed_scores: Vec::new(),
    });
    assert!(matches!(result, Err(OddsError::InsufficientData { needed: 1, got: 0 })));
}

#[test]
fn sandbagging_flags_suspicious_history() {
    let service = cached_service();
    let response = service
        .sandbagging(&SandbaggingRequest {
            golfer: GolferProfile::new("Sam", 18.0),
            course: municipal(),
            tournament_scores: rounds(&[80, 81, 80, 82, 81]),
            casual_scores: Some(rounds(&[95, 96, 94, 97])),
        })
        .unwrap();

    assert_eq!(response.risk_level, RiskLevel::Severe);
    assert!(response.sandbagging_risk_score >= 75.0);
    assert!(response.has_casual_comparison);
    assert!(response
        .red_flags
        .iter()
        .any(|f| f.flag_type == FlagType::TournamentExcellence));
    assert!(!response.score_breakdown.is_empty());
}

#[test]
fn sandbagging_clears_honest_history() {
    let service = OddsService::default();
    let response = service
        .sandbagging(&SandbaggingRequest {
            golfer: GolferProfile::new("Sam", 18.0),
            course: municipal(),
            tournament_scores: rounds(&[95, 86, 91, 99, 88, 92]),
            casual_scores: None,
        })
        .unwrap();

    assert_eq!(response.risk_level, RiskLevel::Low);
    assert!(response.red_flags.is_empty());
    assert!(!response.has_casual_comparison);
    assert!(response.casual_vs_tournament_diff.is_none());
}

#[test]
fn invalid_inputs_surface_as_errors() {
    let service = OddsService::default();
    let mut request = SingleRoundRequest {
        golfer: GolferProfile::new("Sam", 60.0),
        course: municipal(),
        target: ScoringTarget { target_score: 90 },
        holes_played: Holes::Eighteen,
    };
    assert!(matches!(
        service.single_round(&request),
        Err(OddsError::InvalidParameter { name: "handicap_index", .. })
    ));

    request.golfer.handicap_index = 18.0;
    request.course.slope_rating = 200;
    assert!(matches!(
        service.single_round(&request),
        Err(OddsError::InvalidParameter { name: "slope_rating", .. })
    ));

    request.course = municipal();
    request.target.target_score = 300;
    assert!(matches!(
        service.single_round(&request),
        Err(OddsError::InvalidParameter { name: "target_score", .. })
    ));
}

#[test]
fn cached_and_uncached_services_agree() {
    let request = MultiRoundRequest {
        golfer: GolferProfile::new("Sam", 18.0),
        course: municipal(),
        target: ScoringTarget { target_score: 86 },
        event: EventStructure { num_rounds: 4 },
        min_success_rounds: 2,
        holes_played: Holes::Eighteen,
    };
    let cached = cached_service();
    let first = cached.multi_round(&request).unwrap();
    let again = cached.multi_round(&request).unwrap();
    let fresh = OddsService::default().multi_round(&request).unwrap();
    assert_eq!(first, again);
    assert_eq!(first, fresh);
}

#[test]
fn requests_parse_from_json() {
    let json = r#"{
        "golfer": {"name": "Sam", "handicap_index": 18.0},
        "course": {"course_name": "Municipal", "course_rating": 72.0, "slope_rating": 113, "par": 72},
        "tournament_scores": [
            {"round_number": 1, "gross_score": 80},
            {"round_number": 2, "gross_score": 41, "holes_played": 9, "round_date": "2024-05-04"}
        ]
    }"#;
    let request: SandbaggingRequest = serde_json::from_str(json).unwrap();
    assert_eq!(request.tournament_scores.len(), 2);
    assert_eq!(request.tournament_scores[1].holes_played, Holes::Nine);
    assert!(request.casual_scores.is_none());

    let response = OddsService::default().sandbagging(&request).unwrap();
    let value = serde_json::to_value(&response).unwrap();
    assert!(value["risk_level"].is_string());
    assert!(value["sandbagging_risk_score"].is_number());
}

use crate::models::{CrossoverShot, Round, RoundResult, ScoringConfig, Shot, Side};

/// Score a single end against a scoring table
///
/// Contributions, in trace order:
/// 1. touchers for A, then B (`touchers * toucher_points`)
/// 2. crossover bonus (A, B, or the full bonus to each side when undecided)
/// 3. ranked shots (1st/2nd/3rd tier points to whichever side holds them)
/// 4. sweep flag when one side holds all three ranked shots
/// 5. manual adjustments, verbatim
///
/// Total over every input: there is no failure path.
pub fn score_round(round: &Round, config: &ScoringConfig) -> RoundResult {
    let mut a = 0.0;
    let mut b = 0.0;
    let mut detail: Vec<String> = Vec::new();

    if round.touchers_a > 0 {
        a += round.touchers_a as f64 * config.toucher_points;
        detail.push(format!("A touchers {}×{}", round.touchers_a, config.toucher_points));
    }
    if round.touchers_b > 0 {
        b += round.touchers_b as f64 * config.toucher_points;
        detail.push(format!("B touchers {}×{}", round.touchers_b, config.toucher_points));
    }

    let bonus = config.crossover_bonus;
    match round.crossover_shot {
        CrossoverShot::SideA => {
            a += bonus;
            detail.push(format!("Crossover shot A +{}", bonus));
        }
        CrossoverShot::SideB => {
            b += bonus;
            detail.push(format!("Crossover shot B +{}", bonus));
        }
        CrossoverShot::Both => {
            a += bonus;
            b += bonus;
            detail.push(format!("Crossover shot undecided +{} each", bonus));
        }
        CrossoverShot::None => {}
    }

    let tiers = &config.rank_points;
    for (shot, points) in [
        (round.first, tiers.first),
        (round.second, tiers.second),
        (round.third, tiers.third),
    ] {
        match shot.side() {
            Some(Side::A) => a += points,
            Some(Side::B) => b += points,
            None => {}
        }
    }

    let is_sweep = is_sweep(round.first, round.second, round.third);
    if is_sweep {
        detail.push(format!("Ultimate End ({} pts sweep)", tiers.total()));
    }

    if round.adjustment_a != 0.0 {
        a += round.adjustment_a;
        detail.push(format!("Adj A {}", signed(round.adjustment_a)));
    }
    if round.adjustment_b != 0.0 {
        b += round.adjustment_b;
        detail.push(format!("Adj B {}", signed(round.adjustment_b)));
    }

    RoundResult {
        delta_a: a,
        delta_b: b,
        detail: detail.join("; "),
        is_sweep,
    }
}

/// A sweep ("Ultimate End") is all three ranked shots held by the same side
#[inline]
pub fn is_sweep(first: Shot, second: Shot, third: Shot) -> bool {
    first.is_set() && first == second && second == third
}

#[inline]
fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RankPoints;

    fn sweep_round(side: Shot) -> Round {
        Round {
            first: side,
            second: side,
            third: side,
            ..Round::default()
        }
    }

    #[test]
    fn test_blank_round_scores_nothing() {
        let result = score_round(&Round::default(), &ScoringConfig::default());

        assert_eq!(result.delta_a, 0.0);
        assert_eq!(result.delta_b, 0.0);
        assert_eq!(result.detail, "");
        assert!(!result.is_sweep);
    }

    #[test]
    fn test_full_sweep_with_touchers_and_crossover() {
        let round = Round {
            touchers_a: 2,
            crossover_shot: CrossoverShot::SideA,
            ..sweep_round(Shot::SideA)
        };

        let result = score_round(&round, &ScoringConfig::default());

        assert_eq!(result.delta_a, 27.0);
        assert_eq!(result.delta_b, 0.0);
        assert!(result.is_sweep);
        assert_eq!(
            result.detail,
            "A touchers 2×3; Crossover shot A +3; Ultimate End (18 pts sweep)"
        );
    }

    #[test]
    fn test_undecided_crossover_credits_both() {
        let round = Round {
            crossover_shot: CrossoverShot::Both,
            ..Round::default()
        };

        let result = score_round(&round, &ScoringConfig::default());

        assert_eq!(result.delta_a, 3.0);
        assert_eq!(result.delta_b, 3.0);
        assert!(!result.is_sweep);
        assert_eq!(result.detail, "Crossover shot undecided +3 each");
    }

    #[test]
    fn test_adjustments_are_verbatim() {
        let round = Round {
            adjustment_a: -5.0,
            adjustment_b: 2.0,
            ..Round::default()
        };

        let result = score_round(&round, &ScoringConfig::default());

        assert_eq!(result.delta_a, -5.0);
        assert_eq!(result.delta_b, 2.0);
        assert_eq!(result.detail, "Adj A -5; Adj B +2");
    }

    #[test]
    fn test_fractional_adjustment_trace() {
        let round = Round {
            adjustment_b: 0.5,
            ..Round::default()
        };

        let result = score_round(&round, &ScoringConfig::default());

        assert_eq!(result.delta_b, 0.5);
        assert_eq!(result.detail, "Adj B +0.5");
    }

    #[test]
    fn test_ranked_shots_split_between_sides() {
        let round = Round {
            first: Shot::SideB,
            second: Shot::SideA,
            third: Shot::SideB,
            ..Round::default()
        };

        let result = score_round(&round, &ScoringConfig::default());

        assert_eq!(result.delta_a, 5.0);
        assert_eq!(result.delta_b, 13.0);
        assert!(!result.is_sweep);
        assert_eq!(result.detail, "");
    }

    #[test]
    fn test_sweep_requires_all_three_set() {
        assert!(is_sweep(Shot::SideB, Shot::SideB, Shot::SideB));
        assert!(!is_sweep(Shot::Unset, Shot::Unset, Shot::Unset));
        assert!(!is_sweep(Shot::SideA, Shot::SideA, Shot::Unset));
        assert!(!is_sweep(Shot::SideA, Shot::SideB, Shot::SideA));
    }

    #[test]
    fn test_sweep_adds_no_extra_points() {
        let config = ScoringConfig {
            rank_points: RankPoints {
                first: 7.0,
                second: 4.0,
                third: 1.0,
            },
            ..ScoringConfig::default()
        };

        let result = score_round(&sweep_round(Shot::SideB), &config);

        assert_eq!(result.delta_b, 12.0);
        assert_eq!(result.delta_a, 0.0);
        assert_eq!(result.detail, "Ultimate End (12 pts sweep)");
    }

    #[test]
    fn test_toucher_scaling() {
        let config = ScoringConfig {
            toucher_points: 4.0,
            ..ScoringConfig::default()
        };

        for n in 0..20u32 {
            let round = Round {
                touchers_a: n,
                touchers_b: n * 2,
                ..Round::default()
            };
            let result = score_round(&round, &config);
            assert_eq!(result.delta_a, n as f64 * 4.0);
            assert_eq!(result.delta_b, (n * 2) as f64 * 4.0);
        }
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let round = Round {
            touchers_b: 1,
            crossover_shot: CrossoverShot::SideB,
            first: Shot::SideA,
            adjustment_a: 1.25,
            notes: "re-measured".to_string(),
            ..Round::default()
        };
        let config = ScoringConfig::default();

        assert_eq!(score_round(&round, &config), score_round(&round, &config));
    }
}

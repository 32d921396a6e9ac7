//! Distance to points conversion

/// One row of the score table
#[derive(Debug, Clone, Copy)]
pub struct ScoreTier {
    /// Exclusive upper bound of the tier
    pub max_distance_km: f64,
    pub points: u32,
}

/// Score tiers, checked in order (must be sorted by distance)
pub static SCORE_TIERS: &[ScoreTier] = &[
    ScoreTier {
        max_distance_km: 10.0,
        points: 1000,
    },
    ScoreTier {
        max_distance_km: 50.0,
        points: 900,
    },
    ScoreTier {
        max_distance_km: 100.0,
        points: 800,
    },
    ScoreTier {
        max_distance_km: 200.0,
        points: 700,
    },
    ScoreTier {
        max_distance_km: 500.0,
        points: 500,
    },
    ScoreTier {
        max_distance_km: 1000.0,
        points: 300,
    },
    ScoreTier {
        max_distance_km: 2000.0,
        points: 150,
    },
];

/// Points for anything at or beyond the last tier
pub const FALLBACK_SCORE: u32 = 50;

/// Best possible score for a single round
pub const MAX_ROUND_SCORE: u32 = 1000;

/// Map a distance to its score tier.
///
/// There is no lower bound: negative distances land in the first tier.
/// NaN fails every comparison and gets the fallback score.
pub fn score_for_distance(distance_km: f64) -> u32 {
    SCORE_TIERS
        .iter()
        .find(|tier| distance_km < tier.max_distance_km)
        .map(|tier| tier.points)
        .unwrap_or(FALLBACK_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(score_for_distance(0.0), 1000);
        assert_eq!(score_for_distance(9.99), 1000);
        assert_eq!(score_for_distance(10.0), 900);
        assert_eq!(score_for_distance(49.9), 900);
        assert_eq!(score_for_distance(50.0), 800);
        assert_eq!(score_for_distance(100.0), 700);
        assert_eq!(score_for_distance(200.0), 500);
        assert_eq!(score_for_distance(500.0), 300);
        assert_eq!(score_for_distance(1000.0), 150);
        assert_eq!(score_for_distance(1999.9), 150);
        assert_eq!(score_for_distance(2000.0), 50);
        assert_eq!(score_for_distance(9999.0), 50);
    }

    #[test]
    fn test_negative_distance_scores_as_closest_tier() {
        assert_eq!(score_for_distance(-5.0), 1000);
    }

    #[test]
    fn test_score_is_monotonic() {
        let mut previous = score_for_distance(0.0);
        let mut d = 0.0;
        while d < 25_000.0 {
            let score = score_for_distance(d);
            assert!(score <= previous, "score rose at {d} km");
            previous = score;
            d += 7.5;
        }
    }

    #[test]
    fn test_tiers_sorted() {
        for pair in SCORE_TIERS.windows(2) {
            assert!(pair[0].max_distance_km < pair[1].max_distance_km);
            assert!(pair[0].points > pair[1].points);
        }
        assert_eq!(SCORE_TIERS[0].points, MAX_ROUND_SCORE);
    }
}

//! Club strength model.
//!
//! Strength is a scalar in [10, 100] that biases every fixture a club plays in
//! one simulated season. It is drawn once per club per season.

use rand::Rng;

use crate::models::Club;

pub const MIN_STRENGTH: f64 = 10.0;
pub const MAX_STRENGTH: f64 = 100.0;

const BASE_STRENGTH: f64 = 50.0;
const NOISE: f64 = 10.0;

/// Deterministic part of a club's strength, before noise and clamping.
///
/// `_tier` is accepted so callers can pass the league context through; it
/// does not modify the result.
pub fn base_strength(club: &Club, previous_position: Option<u32>, _tier: u32) -> f64 {
    let mut strength = BASE_STRENGTH;

    strength += club.stability_points as f64 * 2.0;

    // Finishing above 20th is a bonus, below it a penalty.
    if let Some(position) = previous_position {
        strength += (20.0 - position as f64) * 1.5;
    }

    strength += club.league_titles as f64 * 3.0;
    strength += club.promotions as f64 * 2.0;
    strength -= club.relegations as f64 * 1.5;
    strength += club.vcc_titles as f64 * 5.0;
    strength += club.ccc_titles as f64 * 3.0;

    strength
}

/// Calculate a club's strength for one season.
pub fn calculate_strength(
    club: &Club,
    previous_position: Option<u32>,
    tier: u32,
    rng: &mut impl Rng,
) -> f64 {
    let noise = rng.gen_range(-NOISE..NOISE);
    (base_strength(club, previous_position, tier) + noise).clamp(MIN_STRENGTH, MAX_STRENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntityId;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn club() -> Club {
        Club::with_id(EntityId::from("c1"), "Ashford".to_string())
    }

    #[test]
    fn test_neutral_club_is_base() {
        assert_eq!(base_strength(&club(), None, 1), 50.0);
    }

    #[test]
    fn test_stability_dominates() {
        let c = club().with_stability(10);
        assert_eq!(base_strength(&c, None, 1), 70.0);
    }

    #[test]
    fn test_previous_position_bonus_and_penalty() {
        assert_eq!(base_strength(&club(), Some(1), 1), 50.0 + 28.5);
        assert_eq!(base_strength(&club(), Some(20), 1), 50.0);
        assert_eq!(base_strength(&club(), Some(24), 1), 44.0);
    }

    #[test]
    fn test_history_weights() {
        let mut c = club();
        c.league_titles = 2;
        c.promotions = 1;
        c.relegations = 2;
        c.vcc_titles = 1;
        c.ccc_titles = 1;

        // 50 + 6 + 2 - 3 + 5 + 3
        assert_eq!(base_strength(&c, None, 1), 63.0);
    }

    #[test]
    fn test_tier_is_passed_through() {
        assert_eq!(base_strength(&club(), Some(5), 1), base_strength(&club(), Some(5), 4));
    }

    #[test]
    fn test_noise_stays_within_ten() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let s = calculate_strength(&club(), None, 1, &mut rng);
            assert!((40.0..60.0).contains(&s));
        }
    }

    #[test]
    fn test_extremes_are_clamped() {
        let mut rng = StdRng::seed_from_u64(3);
        let rich = club().with_stability(1_000);
        let broke = club().with_stability(-1_000);

        assert_eq!(calculate_strength(&rich, None, 1, &mut rng), MAX_STRENGTH);
        assert_eq!(calculate_strength(&broke, None, 1, &mut rng), MIN_STRENGTH);
    }

    #[test]
    fn test_same_seed_same_strength() {
        let a = calculate_strength(&club(), Some(3), 2, &mut StdRng::seed_from_u64(42));
        let b = calculate_strength(&club(), Some(3), 2, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_strength_is_bounded(
            stability in -10_000i64..10_000,
            titles in 0u32..200,
            relegations in 0u32..200,
            previous in proptest::option::of(1u32..200),
            seed in any::<u64>(),
        ) {
            let mut c = club().with_stability(stability);
            c.league_titles = titles;
            c.relegations = relegations;
            let mut rng = StdRng::seed_from_u64(seed);

            let s = calculate_strength(&c, previous, 1, &mut rng);
            prop_assert!((MIN_STRENGTH..=MAX_STRENGTH).contains(&s));
        }
    }
}

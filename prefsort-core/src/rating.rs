/// Elo-style rating updates for multi-way comparisons and skips.
///
/// A choice is scored as one win for the chosen item against every other
/// group member. The learning rate anneals with the winner's view count, and
/// sigma decays on every appearance (faster once an item is well observed).
///
/// The winner's gain is damped by `1/sqrt(num_losers)` while each loser takes
/// its full penalty. Both are kept as observed behavior.
use crate::constants::{
    ANNEALING_RATE, K_FACTOR_INITIAL, LOSER_SIGMA_DECAY, MATCH_SCALE, PROVEN_LOSS_MODIFIER,
    SKIP_RATING_PENALTY, SKIP_SIGMA_DECAY, UNPROVEN_LOSS_MODIFIER, WELL_OBSERVED_SIGMA_DECAY,
    WELL_OBSERVED_VIEWS, WINNER_SIGMA_DECAY,
};
use crate::error::{EngineError, Result};
use crate::registry::ItemRegistry;

/// Logistic Elo expectation that an item rated `rating` beats one rated `opponent`.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) / MATCH_SCALE))
}

/// Learning-rate multiplier for an item with `view_count` prior appearances.
pub fn annealing_factor(view_count: u32) -> f64 {
    1.0 / (1.0 + view_count as f64 * ANNEALING_RATE)
}

fn sigma_decay(view_count: u32, early: f64) -> f64 {
    if view_count > WELL_OBSERVED_VIEWS {
        WELL_OBSERVED_SIGMA_DECAY
    } else {
        early
    }
}

/// Apply a resolved comparison: `winner_id` was preferred over every other
/// member of `group`.
///
/// Losers are processed in group order and the winner's rating moves after
/// each one, so later losers see the already-updated winner.
pub fn apply_choice(registry: &mut ItemRegistry, winner_id: i64, group: &[i64]) -> Result<()> {
    if !group.contains(&winner_id) {
        return Err(EngineError::NotInGroup(winner_id));
    }
    let loser_ids: Vec<i64> = group.iter().copied().filter(|&id| id != winner_id).collect();
    for &id in group {
        if !registry.contains(id) {
            return Err(EngineError::UnknownItem(id));
        }
    }

    let (mut winner_rating, winner_views) = match registry.get(winner_id) {
        Some(w) => (w.rating, w.view_count),
        None => return Err(EngineError::UnknownItem(winner_id)),
    };

    let k = K_FACTOR_INITIAL * annealing_factor(winner_views);
    let damping = (loser_ids.len().max(1) as f64).sqrt();

    for &loser_id in &loser_ids {
        let Some(loser) = registry.get_mut(loser_id) else {
            continue;
        };
        let winner_expected = expected_score(winner_rating, loser.rating);
        let loser_expected = expected_score(loser.rating, winner_rating);

        let loss_modifier = if loser.wins == 0 {
            UNPROVEN_LOSS_MODIFIER
        } else {
            PROVEN_LOSS_MODIFIER
        };

        winner_rating += k * (1.0 - winner_expected) / damping;
        loser.rating += k * (0.0 - loser_expected) * loss_modifier;

        loser.sigma *= sigma_decay(loser.view_count, LOSER_SIGMA_DECAY);
        loser.clamp_sigma();
        loser.view_count += 1;
    }

    if let Some(winner) = registry.get_mut(winner_id) {
        winner.rating = winner_rating;
        winner.sigma *= sigma_decay(winner.view_count, WINNER_SIGMA_DECAY);
        winner.clamp_sigma();
        winner.view_count += 1;
        winner.wins += 1;
    }

    Ok(())
}

/// Apply a skip to every member of `group`. Returns the IDs eliminated because
/// their pass count reached `elimination_threshold`.
pub fn apply_skip(registry: &mut ItemRegistry, group: &[i64], elimination_threshold: u32) -> Vec<i64> {
    let mut eliminated = Vec::new();
    for &id in group {
        let reached = match registry.get_mut(id) {
            Some(item) => {
                item.pass_count += 1;
                item.view_count += 1;
                item.rating -= SKIP_RATING_PENALTY;
                item.sigma *= SKIP_SIGMA_DECAY;
                item.clamp_sigma();
                item.pass_count >= elimination_threshold
            }
            None => false,
        };
        if reached && registry.eliminate(id) {
            eliminated.push(id);
        }
    }
    eliminated
}

/// Group selection for multi-way comparisons.
///
/// Every group is built around a pivot: the active item with the highest
/// `rating * 1.5 + sigma`, i.e. a strong item we are still unsure about.
/// The other members depend on the phase:
///   Exploration: uniformly random from the rest of the pool (coverage).
///   Precision: the items rated closest to the pivot (discrimination).
///
/// The finished group is shuffled so display position carries no signal.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::constants::PIVOT_RATING_WEIGHT;
use crate::types::{Item, Phase};

/// Result of asking for the next group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// Item IDs in display order.
    Group(Vec<i64>),
    /// Fewer than two active items: nothing left to compare.
    SessionShouldEnd,
}

/// Group sizes per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupSizes {
    pub exploration: usize,
    pub precision: usize,
}

impl GroupSizes {
    pub fn for_phase(&self, phase: Phase) -> usize {
        match phase {
            Phase::Exploration => self.exploration,
            Phase::Precision => self.precision,
        }
    }
}

/// Pivot selection score. Higher rating and higher uncertainty both push an
/// item towards the front.
pub fn selection_score(item: &Item) -> f64 {
    item.rating * PIVOT_RATING_WEIGHT + item.sigma
}

/// Target size for the next group, clamped to the number of active items.
pub fn target_group_size(phase: Phase, active_count: usize, sizes: GroupSizes) -> usize {
    sizes.for_phase(phase).min(active_count)
}

/// Pick the next group from `active`.
///
/// `last_winner_id` is left out of the pool whenever the pool is larger than
/// the target size, so the previous winner never gets an immediate rematch.
pub fn compose_next_group<R: Rng + ?Sized>(
    active: &[&Item],
    phase: Phase,
    last_winner_id: Option<i64>,
    sizes: GroupSizes,
    rng: &mut R,
) -> Composition {
    if active.len() < 2 {
        return Composition::SessionShouldEnd;
    }

    let size = target_group_size(phase, active.len(), sizes).max(2);

    let mut pool: Vec<&Item> = active.to_vec();
    if let Some(winner) = last_winner_id {
        if pool.len() > size {
            pool.retain(|item| item.id != winner);
        }
    }

    pool.sort_by(|a, b| {
        selection_score(b)
            .partial_cmp(&selection_score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let pivot = pool[0];
    let mut others: Vec<&Item> = pool[1..].to_vec();

    match phase {
        Phase::Exploration => others.shuffle(rng),
        Phase::Precision => {
            others.sort_by(|a, b| {
                let dist_a = (a.rating - pivot.rating).abs();
                let dist_b = (b.rating - pivot.rating).abs();
                dist_a.partial_cmp(&dist_b).unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }

    let mut group: Vec<i64> = Vec::with_capacity(size);
    group.push(pivot.id);
    group.extend(others.iter().take(size - 1).map(|item| item.id));
    group.shuffle(rng);

    Composition::Group(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::input;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const SIZES: GroupSizes = GroupSizes { exploration: 6, precision: 4 };

    fn items(ratings: &[f64]) -> Vec<Item> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| {
                let mut item = Item::new(input(i as i64 + 1));
                item.rating = r;
                item
            })
            .collect()
    }

    fn compose(items: &[Item], phase: Phase, last_winner: Option<i64>, seed: u64) -> Composition {
        let refs: Vec<&Item> = items.iter().collect();
        let mut rng = SmallRng::seed_from_u64(seed);
        compose_next_group(&refs, phase, last_winner, SIZES, &mut rng)
    }

    fn group_of(c: Composition) -> Vec<i64> {
        match c {
            Composition::Group(g) => g,
            Composition::SessionShouldEnd => panic!("expected a group"),
        }
    }

    #[test]
    fn test_fewer_than_two_items_ends_session() {
        let one = items(&[1500.0]);
        assert_eq!(compose(&one, Phase::Exploration, None, 1), Composition::SessionShouldEnd);
        assert_eq!(compose(&[], Phase::Precision, None, 1), Composition::SessionShouldEnd);
    }

    #[test]
    fn test_group_size_per_phase_and_clamped() {
        let many = items(&[1500.0; 10]);
        assert_eq!(group_of(compose(&many, Phase::Exploration, None, 3)).len(), 6);
        assert_eq!(group_of(compose(&many, Phase::Precision, None, 3)).len(), 4);

        let three = items(&[1500.0; 3]);
        assert_eq!(group_of(compose(&three, Phase::Exploration, None, 3)).len(), 3);
        assert_eq!(group_of(compose(&three, Phase::Precision, None, 3)).len(), 3);
    }

    #[test]
    fn test_group_members_are_unique() {
        let many = items(&[1500.0; 12]);
        for seed in 0..20 {
            let mut group = group_of(compose(&many, Phase::Exploration, None, seed));
            group.sort();
            group.dedup();
            assert_eq!(group.len(), 6);
        }
    }

    #[test]
    fn test_pivot_is_always_included() {
        // Item 3 has the best selection score.
        let many = items(&[1500.0, 1510.0, 1700.0, 1490.0, 1450.0, 1520.0, 1480.0, 1400.0]);
        for seed in 0..20 {
            assert!(group_of(compose(&many, Phase::Exploration, None, seed)).contains(&3));
        }
    }

    #[test]
    fn test_last_winner_excluded_when_pool_allows() {
        let many = items(&[1500.0, 1900.0, 1500.0, 1500.0, 1500.0, 1500.0, 1500.0, 1500.0]);
        for seed in 0..20 {
            let group = group_of(compose(&many, Phase::Exploration, Some(2), seed));
            assert!(!group.contains(&2), "seed {seed}: last winner came back");
        }
    }

    #[test]
    fn test_last_winner_kept_when_pool_is_tight() {
        // Six active items, target size six: excluding the winner would shrink the group.
        let six = items(&[1500.0; 6]);
        let group = group_of(compose(&six, Phase::Exploration, Some(4), 9));
        assert_eq!(group.len(), 6);
        assert!(group.contains(&4));
    }

    #[test]
    fn test_precision_picks_nearest_ratings_to_pivot() {
        // Pivot is item 1 (1800). Nearest: 4 (1790), 2 (1760), 6 (1750).
        let many = items(&[1800.0, 1760.0, 1300.0, 1790.0, 1200.0, 1750.0, 1500.0]);
        let mut group = group_of(compose(&many, Phase::Precision, None, 5));
        group.sort();
        assert_eq!(group, vec![1, 2, 4, 6]);
    }

    #[test]
    fn test_same_seed_same_group() {
        let many = items(&[1500.0; 15]);
        let a = compose(&many, Phase::Exploration, None, 77);
        let b = compose(&many, Phase::Exploration, None, 77);
        assert_eq!(a, b);
    }

    #[test]
    fn test_selection_score_prefers_uncertain_items_on_ties() {
        let mut many = items(&[1500.0, 1500.0]);
        many[1].sigma = 80.0;
        assert!(selection_score(&many[0]) > selection_score(&many[1]));
    }
}

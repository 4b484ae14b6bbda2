/// Final ranking and tiering.
///
/// Items are ordered by effective rating (`rating - sigma`), a one-sigma
/// lower bound: an item only ranks high if we are fairly sure it deserves it.
/// Tiers are fixed effective-rating bands, so the same rating always lands in
/// the same tier regardless of collection size.
use std::fmt;

use crate::constants::{MATCH_SCALE, RATING_BASE};
use crate::types::{Item, RankedItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    /// Best to worst.
    pub const ALL: [Tier; 5] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D];

    /// Lowest effective rating that still lands in this tier. `D` takes everything.
    pub fn min_effective_rating(self) -> f64 {
        match self {
            Tier::S => 1650.0,
            Tier::A => 1550.0,
            Tier::B => 1450.0,
            Tier::C => 1350.0,
            Tier::D => f64::NEG_INFINITY,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tier::S => "decisive favorite",
            Tier::A => "consistent favorite",
            Tier::B => "statistical favorite",
            Tier::C => "undecided",
            Tier::D => "not selected",
        }
    }

    pub fn for_effective_rating(effective_rating: f64) -> Tier {
        Tier::ALL
            .into_iter()
            .find(|t| effective_rating >= t.min_effective_rating())
            .unwrap_or(Tier::D)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tier::S => "S",
            Tier::A => "A",
            Tier::B => "B",
            Tier::C => "C",
            Tier::D => "D",
        };
        f.write_str(label)
    }
}

/// Percent chance (rounded) that an item at `rating` beats a fresh item at the base rating.
pub fn match_probability(rating: f64) -> u8 {
    let p = 1.0 / (1.0 + 10f64.powf((RATING_BASE - rating) / MATCH_SCALE));
    (p * 100.0).round() as u8
}

/// All items, sorted by effective rating descending, with rank, tier and match probability.
pub fn rank_items(items: &[Item]) -> Vec<RankedItem> {
    let mut sorted: Vec<&Item> = items.iter().collect();
    sorted.sort_by(|a, b| {
        b.effective_rating()
            .partial_cmp(&a.effective_rating())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let effective_rating = item.effective_rating();
            RankedItem {
                rank: i + 1,
                item: item.clone(),
                effective_rating,
                tier: Tier::for_effective_rating(effective_rating),
                match_probability: match_probability(item.rating),
            }
        })
        .collect()
}

/// A non-empty tier and its members, in ranking order.
#[derive(Debug, Clone, PartialEq)]
pub struct TierGroup {
    pub tier: Tier,
    pub items: Vec<RankedItem>,
}

/// Split a ranking into tiers, best first. Empty tiers are left out.
pub fn group_by_tier(ranked: &[RankedItem]) -> Vec<TierGroup> {
    Tier::ALL
        .into_iter()
        .filter_map(|tier| {
            let items: Vec<RankedItem> = ranked.iter().filter(|r| r.tier == tier).cloned().collect();
            (!items.is_empty()).then_some(TierGroup { tier, items })
        })
        .collect()
}

/// Mean sigma over all items, or 0 for an empty slice.
pub fn average_sigma(items: &[Item]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(|i| i.sigma).sum::<f64>() / items.len() as f64
}

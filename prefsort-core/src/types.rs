use std::fmt;

use crate::constants::{RATING_BASE, SIGMA_INIT, SIGMA_MIN};
use crate::tiers::Tier;

/// What the host hands over for each image.
///
/// The engine never looks inside `name` or `image_ref`; they ride along so the
/// host can render groups and results without keeping a side table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemInput {
    /// Caller-provided ID. Must be unique within the registry.
    pub id: i64,
    pub name: String,
    /// Path, URL or whatever the host uses to find the image again.
    pub image_ref: String,
}

/// Lifecycle of an item within one session. Only `Active` items are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ItemStatus {
    Active,
    /// Resolved as top tier, kept out of further comparisons.
    Frozen,
    /// Resolved as low tier, kept out of further comparisons.
    Eliminated,
}

/// Confidence label attached to a frozen item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EliteType {
    None,
    /// Runaway leader: very high rating after only a few views.
    God,
    /// Leader whose ±1σ band clears the runner-up's.
    Strong,
    /// Statistical separation (±1.62σ), or resolved by a stagnation rule.
    Stat,
}

/// One image under ranking, with its mutable rating state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub image_ref: String,
    pub rating: f64,
    pub sigma: f64,
    /// Resolved comparisons and skips this item has appeared in.
    pub view_count: u32,
    pub pass_count: u32,
    pub wins: u32,
    pub status: ItemStatus,
    pub elite_type: EliteType,
}

impl Item {
    pub fn new(input: ItemInput) -> Self {
        Item {
            id: input.id,
            name: input.name,
            image_ref: input.image_ref,
            rating: RATING_BASE,
            sigma: SIGMA_INIT,
            view_count: 0,
            pass_count: 0,
            wins: 0,
            status: ItemStatus::Active,
            elite_type: EliteType::None,
        }
    }

    /// Back to the pre-session defaults. Identity fields are untouched.
    pub fn reset(&mut self) {
        self.rating = RATING_BASE;
        self.sigma = SIGMA_INIT;
        self.view_count = 0;
        self.pass_count = 0;
        self.wins = 0;
        self.status = ItemStatus::Active;
        self.elite_type = EliteType::None;
    }

    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }

    /// `rating - sigma`. Only used for the final ordering, never for selection.
    pub fn effective_rating(&self) -> f64 {
        self.rating - self.sigma
    }

    pub(crate) fn clamp_sigma(&mut self) {
        self.sigma = self.sigma.max(SIGMA_MIN);
    }
}

/// Comparison phase. Precision is sticky for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Phase {
    /// Large random groups to spread views quickly.
    #[default]
    Exploration,
    /// Small groups of near-tied items around a pivot.
    Precision,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Exploration => write!(f, "exploration"),
            Phase::Precision => write!(f, "precision"),
        }
    }
}

/// Entry of the session's action log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Win(i64),
    Pass,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FinishReason {
    /// Fewer than two active items left to compare.
    CandidatesExhausted,
    /// Too many skips in the recent action window.
    PassExhaustion,
    /// Consecutive skips hit the pass-streak limit.
    RepeatedSkip,
    /// The last few survivors are rated nearly the same.
    PreferenceConvergence,
    /// Every active sigma dropped below the impact threshold.
    ConvergenceComplete,
    /// Host asked to finish early.
    ManualTermination,
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FinishReason::CandidatesExhausted => "candidates exhausted",
            FinishReason::PassExhaustion => "pass exhaustion",
            FinishReason::RepeatedSkip => "manual termination via repeated skip",
            FinishReason::PreferenceConvergence => "preference convergence",
            FinishReason::ConvergenceComplete => "convergence complete",
            FinishReason::ManualTermination => "manual termination",
        };
        f.write_str(text)
    }
}

/// One row of the final ranking.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedItem {
    /// 1-based position after sorting by effective rating.
    pub rank: usize,
    pub item: Item,
    /// `rating - sigma`.
    pub effective_rating: f64,
    pub tier: Tier,
    /// Chance (0-100) of beating a freshly added item, from the Elo expectation.
    pub match_probability: u8,
}

/// prefsort-core: preference ranking engine.
///
/// Multi-way comparisons → Elo-style ratings with uncertainty → tiered ranking.
/// No IO, no rendering, no timers. The host shows groups and reports choices.
///
/// Items are identified by caller-provided `i64` IDs.
///
/// # Quick start
///
/// ```rust
/// use prefsort_core::{EngineConfig, ItemInput, RankingEngine};
///
/// let mut engine = RankingEngine::new(EngineConfig::default());
/// engine.initialize_items(
///     (1..=8)
///         .map(|id| ItemInput { id, name: format!("photo-{id}.jpg"), image_ref: format!("photos/{id}.jpg") })
///         .collect(),
/// ).unwrap();
///
/// engine.start_session().unwrap();
/// while engine.is_running() {
///     // A real host asks the user. Here the lowest ID always wins.
///     let winner = *engine.current_group_ids().iter().min().unwrap();
///     engine.record_choice(winner).unwrap();
/// }
///
/// println!("finished: {}", engine.finish_reason().unwrap());
/// for r in engine.final_ranking() {
///     println!("{:>2}. [{}] {} ({:.0} ± {:.0})", r.rank, r.tier, r.item.name, r.item.rating, r.item.sigma);
/// }
/// ```

pub mod constants;
pub mod engine;
pub mod error;
pub mod history;
pub mod matching;
pub mod rating;
pub mod registry;
pub mod session;
pub mod tiers;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::{EngineConfig, RankingEngine};
pub use error::{EngineError, Result};
pub use matching::{compose_next_group, Composition, GroupSizes};
pub use rating::{annealing_factor, expected_score};
pub use session::{SessionState, SessionStatus};
pub use tiers::{average_sigma, group_by_tier, match_probability, Tier, TierGroup};
pub use types::{Action, EliteType, FinishReason, Item, ItemInput, ItemStatus, Phase, RankedItem};

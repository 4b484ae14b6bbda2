/// Session state and the per-cycle evaluation pipeline.
///
/// After every update the engine runs [`evaluate`], which walks a fixed list
/// of checks:
///   1. insufficient candidates
///   2. pass exhaustion
///   3. phase lock
///   4. elite freeze
///   5. pruning
///   6. per-item stagnation
///   7. similarity finish
///   8. convergence finish
///
/// Any status change (freeze or elimination) restarts the list from step 1,
/// because the active set it was computed on no longer exists. Each restart
/// removes at least one active item, so the loop is bounded by the item count.
use tracing::debug;

use crate::constants::{
    BREAKER_FREEZE_RATING, GOD_MIN_RATING, GOD_MIN_VIEWS, IMPACT_THRESHOLD, PASS_WINDOW,
    PASS_WINDOW_LIMIT, PRUNE_MAX_RATING, PRUNE_MIN_VIEWS, SIMILARITY_MAX_ACTIVE, SIMILARITY_MAX_SPREAD,
    SIMILARITY_MIN_MEAN_VIEWS, STAGNATION_FREEZE_RATING, STAGNATION_VIEWS, STAT_BAND, STAT_MIN_RATING,
    STAT_MIN_VIEWS, STRONG_BAND, STRONG_MIN_RATING, STRONG_MIN_VIEWS, UNSTABLE_RATIO_BORDER,
    UNSTABLE_SIGMA_THRESHOLD,
};
use crate::registry::ItemRegistry;
use crate::types::{Action, EliteType, FinishReason, Item, ItemStatus, Phase};

/// Where the engine is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SessionStatus {
    /// No session yet, or the last one was quit. Items can be edited.
    #[default]
    Idle,
    Running,
    Finished,
}

/// Mutable per-session counters. Plain values only, so a clone is a full snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    pub phase: Phase,
    pub phase_locked: bool,
    /// Consecutive skips since the last resolved comparison.
    pub global_pass_streak: u32,
    /// Precision-phase comparisons since the last freeze or elimination.
    pub stalemate_counter: u32,
    /// Most recently chosen item. Cleared by a skip.
    pub last_winner_id: Option<i64>,
    pub total_actions: u32,
    /// Sum of sigma at session start, for progress reporting only.
    pub initial_uncertainty_mass: f64,
    pub action_log: Vec<Action>,
    pub finish_reason: Option<FinishReason>,
}

impl SessionState {
    /// Fresh counters for a new session.
    pub fn begin(initial_uncertainty_mass: f64) -> Self {
        SessionState {
            initial_uncertainty_mass,
            ..Self::default()
        }
    }

    pub(crate) fn log_choice(&mut self, winner_id: i64) {
        self.global_pass_streak = 0;
        self.action_log.push(Action::Win(winner_id));
        self.last_winner_id = Some(winner_id);
        self.total_actions += 1;
    }

    /// Returns the pass streak after this skip.
    pub(crate) fn log_skip(&mut self) -> u32 {
        self.global_pass_streak += 1;
        self.action_log.push(Action::Pass);
        self.last_winner_id = None;
        self.total_actions += 1;
        self.global_pass_streak
    }

    /// Skips among the last `window` logged actions, or `None` while the log
    /// is not yet longer than the window.
    pub fn recent_passes(&self, window: usize) -> Option<usize> {
        if self.action_log.len() <= window {
            return None;
        }
        let recent = &self.action_log[self.action_log.len() - window..];
        Some(recent.iter().filter(|a| matches!(a, Action::Pass)).count())
    }

    fn lock_precision(&mut self) {
        self.phase_locked = true;
        self.phase = Phase::Precision;
    }
}

/// Outcome of one full evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Continue,
    Finished(FinishReason),
}

enum Cycle {
    Settled,
    StatusChanged,
    Finished(FinishReason),
}

/// Run the check list until a pass produces no status change.
pub fn evaluate(registry: &mut ItemRegistry, state: &mut SessionState) -> Evaluation {
    for _ in 0..=registry.len() {
        match run_cycle(registry, state) {
            Cycle::Settled => return Evaluation::Continue,
            Cycle::Finished(reason) => return Evaluation::Finished(reason),
            Cycle::StatusChanged => continue,
        }
    }
    // Every restart removed an active item; getting here means none are left.
    Evaluation::Finished(FinishReason::CandidatesExhausted)
}

fn run_cycle(registry: &mut ItemRegistry, state: &mut SessionState) -> Cycle {
    let mut active: Vec<Item> = registry.active().cloned().collect();

    if active.len() < 2 {
        return Cycle::Finished(FinishReason::CandidatesExhausted);
    }

    if let Some(passes) = state.recent_passes(PASS_WINDOW) {
        if passes >= PASS_WINDOW_LIMIT {
            return Cycle::Finished(FinishReason::PassExhaustion);
        }
    }

    if !state.phase_locked {
        let unstable = active.iter().filter(|i| i.sigma > UNSTABLE_SIGMA_THRESHOLD).count();
        let unstable_ratio = unstable as f64 / active.len() as f64;
        if unstable_ratio <= UNSTABLE_RATIO_BORDER {
            debug!(unstable_ratio, active = active.len(), "locking precision phase");
            state.lock_precision();
        }
    }

    active.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(elite) = classify_elite(&active[0], &active[1]) {
        let top = active[0].id;
        if registry.freeze(top, elite) {
            debug!(item = top, ?elite, rating = active[0].rating, "elite freeze");
            state.stalemate_counter = 0;
            return Cycle::StatusChanged;
        }
    }

    let mut changed = false;

    for item in &active {
        if item.view_count >= PRUNE_MIN_VIEWS && item.rating <= PRUNE_MAX_RATING && registry.eliminate(item.id) {
            debug!(item = item.id, rating = item.rating, "pruned");
            changed = true;
        }
    }

    for item in &active {
        if item.view_count < STAGNATION_VIEWS {
            continue;
        }
        let resolved = if item.rating >= STAGNATION_FREEZE_RATING {
            registry.freeze(item.id, EliteType::Stat)
        } else {
            registry.eliminate(item.id)
        };
        if resolved {
            debug!(item = item.id, rating = item.rating, "stagnant item resolved");
            changed = true;
        }
    }

    if changed {
        state.stalemate_counter = 0;
        return Cycle::StatusChanged;
    }

    if active.len() <= SIMILARITY_MAX_ACTIVE {
        let mean_views = active.iter().map(|i| i.view_count as f64).sum::<f64>() / active.len() as f64;
        let spread = active[0].rating - active[active.len() - 1].rating;
        if mean_views >= SIMILARITY_MIN_MEAN_VIEWS && spread < SIMILARITY_MAX_SPREAD {
            return Cycle::Finished(FinishReason::PreferenceConvergence);
        }
    }

    let max_sigma = active.iter().map(|i| i.sigma).fold(f64::NEG_INFINITY, f64::max);
    if state.phase == Phase::Precision && active.len() > 2 && max_sigma < IMPACT_THRESHOLD {
        return Cycle::Finished(FinishReason::ConvergenceComplete);
    }

    Cycle::Settled
}

/// Elite label for the current leader, judged against the runner-up.
pub fn classify_elite(top: &Item, second: &Item) -> Option<EliteType> {
    let separated = |k: f64| top.rating - k * top.sigma > second.rating + k * second.sigma;

    if top.rating > GOD_MIN_RATING && top.view_count >= GOD_MIN_VIEWS {
        Some(EliteType::God)
    } else if top.rating > STRONG_MIN_RATING && top.view_count >= STRONG_MIN_VIEWS && separated(STRONG_BAND) {
        Some(EliteType::Strong)
    } else if top.rating > STAT_MIN_RATING && top.view_count >= STAT_MIN_VIEWS && separated(STAT_BAND) {
        Some(EliteType::Stat)
    } else {
        None
    }
}

/// Stagnation breaker: resolve the weakest member of `group` (by live rating)
/// unless it is the winner. Returns the resolved item and its new status.
pub fn break_stagnation(
    registry: &mut ItemRegistry,
    state: &mut SessionState,
    group: &[i64],
    winner_id: i64,
) -> Option<(i64, ItemStatus)> {
    let weakest = group
        .iter()
        .filter_map(|&id| registry.get(id))
        .min_by(|a, b| a.rating.partial_cmp(&b.rating).unwrap_or(std::cmp::Ordering::Equal))?;

    if weakest.id == winner_id {
        return None;
    }

    let (id, rating) = (weakest.id, weakest.rating);
    let status = if rating >= BREAKER_FREEZE_RATING {
        registry.freeze(id, EliteType::Stat).then_some(ItemStatus::Frozen)
    } else {
        registry.eliminate(id).then_some(ItemStatus::Eliminated)
    }?;

    debug!(item = id, rating, ?status, "stagnation breaker fired");
    state.stalemate_counter = 0;
    Some((id, status))
}

/// Share of the initial uncertainty that has been burned off, 0..=100.
pub fn progress(registry: &ItemRegistry, state: &SessionState) -> u8 {
    if registry.active_count() == 0 {
        return 100;
    }
    if state.initial_uncertainty_mass <= 0.0 {
        return 0;
    }
    let remaining = registry.active_sigma() / state.initial_uncertainty_mass;
    ((1.0 - remaining) * 100.0).floor().clamp(0.0, 100.0) as u8
}

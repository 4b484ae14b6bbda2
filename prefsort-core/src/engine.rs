/// Ranking engine orchestrator.
///
/// Pure computation: no IO, no timers. The host shows `current_group()`,
/// collects the user's decision and feeds it back through `record_choice` or
/// `record_skip`. Every mutating call runs to completion:
///
///   snapshot -> rating update -> evaluation loop -> next group
///
/// `undo_last` restores a snapshot and only re-composes the group; the
/// restored state was already settled when it was captured.
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use crate::constants::{
    EXPLORATION_GROUP_SIZE, GLOBAL_PASS_LIMIT, PASS_ELIMINATION_THRESHOLD, PRECISION_GROUP_SIZE,
    STALEMATE_LIMIT,
};
use crate::error::{EngineError, Result};
use crate::history::HistoryManager;
use crate::matching::{compose_next_group, Composition, GroupSizes};
use crate::rating::{apply_choice, apply_skip};
use crate::registry::ItemRegistry;
use crate::session::{break_stagnation, evaluate, progress, Evaluation, SessionState, SessionStatus};
use crate::tiers::rank_items;
use crate::types::{FinishReason, Item, ItemInput, Phase, RankedItem};

/// Tunable knobs for the engine. The rating math itself lives in `constants`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub exploration_group_size: usize,
    pub precision_group_size: usize,
    /// Skips after which an item is eliminated.
    pub pass_elimination_threshold: u32,
    /// Consecutive skips that end the session.
    pub global_pass_limit: u32,
    /// Precision comparisons without a status change before the stagnation breaker fires.
    pub stalemate_limit: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            exploration_group_size: EXPLORATION_GROUP_SIZE,
            precision_group_size: PRECISION_GROUP_SIZE,
            pass_elimination_threshold: PASS_ELIMINATION_THRESHOLD,
            global_pass_limit: GLOBAL_PASS_LIMIT,
            stalemate_limit: STALEMATE_LIMIT,
        }
    }
}

impl EngineConfig {
    fn group_sizes(&self) -> GroupSizes {
        GroupSizes {
            exploration: self.exploration_group_size.clamp(2, EXPLORATION_GROUP_SIZE),
            precision: self.precision_group_size.clamp(2, EXPLORATION_GROUP_SIZE),
        }
    }
}

pub struct RankingEngine<R: Rng = ThreadRng> {
    registry: ItemRegistry,
    session: SessionState,
    status: SessionStatus,
    /// Item IDs in display order. Empty outside a running session.
    current_group: Vec<i64>,
    history: HistoryManager,
    config: EngineConfig,
    rng: R,
}

impl RankingEngine<ThreadRng> {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, rand::rng())
    }
}

impl<R: Rng> RankingEngine<R> {
    /// Engine with an explicit random source. Group selection is reproducible
    /// for a seeded `rng`.
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        RankingEngine {
            registry: ItemRegistry::new(),
            session: SessionState::default(),
            status: SessionStatus::Idle,
            current_group: Vec::new(),
            history: HistoryManager::new(),
            config,
            rng,
        }
    }

    // -----------------------------------------------------------------------
    // Item management (only between sessions)
    // -----------------------------------------------------------------------

    /// Replace all items. Stats start at their defaults.
    pub fn initialize_items(&mut self, items: Vec<ItemInput>) -> Result<()> {
        self.ensure_not_running()?;
        self.registry.initialize(items)?;
        self.reset_to_idle();
        Ok(())
    }

    pub fn add_item(&mut self, item: ItemInput) -> Result<()> {
        self.ensure_not_running()?;
        self.registry.add(item)
    }

    pub fn remove_item(&mut self, id: i64) -> Result<Item> {
        self.ensure_not_running()?;
        self.registry.remove(id)
    }

    pub fn clear_items(&mut self) -> Result<()> {
        self.ensure_not_running()?;
        self.registry.clear();
        self.reset_to_idle();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Session lifecycle
    // -----------------------------------------------------------------------

    /// Start (or restart) a session: reset every item and counter, enter
    /// exploration and compose the first group.
    pub fn start_session(&mut self) -> Result<()> {
        if self.registry.len() < 2 {
            return Err(EngineError::NotEnoughItems {
                required: 2,
                available: self.registry.len(),
            });
        }

        self.registry.reset_stats();
        self.history.clear();
        self.session = SessionState::begin(self.registry.total_sigma());
        self.status = SessionStatus::Running;
        self.current_group.clear();

        info!(items = self.registry.len(), "session started");
        self.settle();
        Ok(())
    }

    /// The user preferred `winner_id` over the rest of the current group.
    pub fn record_choice(&mut self, winner_id: i64) -> Result<()> {
        self.ensure_running()?;
        if !self.current_group.contains(&winner_id) {
            return Err(EngineError::NotInGroup(winner_id));
        }

        self.history.snapshot(&self.registry, &self.session);

        let group = self.current_group.clone();
        if let Err(e) = apply_choice(&mut self.registry, winner_id, &group) {
            self.history.undo(&mut self.registry, &mut self.session);
            return Err(e);
        }
        self.session.log_choice(winner_id);

        if self.session.phase == Phase::Precision {
            self.session.stalemate_counter += 1;
            if self.session.stalemate_counter > self.config.stalemate_limit {
                break_stagnation(&mut self.registry, &mut self.session, &group, winner_id);
            }
        }

        debug!(
            winner = winner_id,
            group = ?group,
            total_actions = self.session.total_actions,
            "choice recorded"
        );
        self.settle();
        Ok(())
    }

    /// The user declined to pick from the current group.
    pub fn record_skip(&mut self) -> Result<()> {
        self.ensure_running()?;

        self.history.snapshot(&self.registry, &self.session);

        let group = std::mem::take(&mut self.current_group);
        let eliminated = apply_skip(&mut self.registry, &group, self.config.pass_elimination_threshold);
        if !eliminated.is_empty() {
            self.session.stalemate_counter = 0;
        }
        let streak = self.session.log_skip();

        debug!(group = ?group, ?eliminated, streak, "skip recorded");

        if streak >= self.config.global_pass_limit {
            self.finish(FinishReason::RepeatedSkip);
            return Ok(());
        }
        self.settle();
        Ok(())
    }

    /// Step back to the state before the last choice or skip.
    ///
    /// Returns `Ok(false)` when there is nothing to undo.
    pub fn undo_last(&mut self) -> Result<bool> {
        self.ensure_running()?;
        if !self.history.undo(&mut self.registry, &mut self.session) {
            return Ok(false);
        }
        debug!(depth = self.history.depth(), "undo");
        self.compose();
        Ok(true)
    }

    /// End the session now, as long as at least one item has been looked at.
    pub fn request_early_finish(&mut self) -> Result<()> {
        self.ensure_running()?;
        if self.registry.items().iter().all(|i| i.view_count == 0) {
            return Err(EngineError::NothingViewed);
        }
        self.finish(FinishReason::ManualTermination);
        Ok(())
    }

    /// Abandon the session and return to the pre-session state. Items stay
    /// registered with their stats reset.
    pub fn quit_session(&mut self) {
        if self.status != SessionStatus::Idle {
            info!(total_actions = self.session.total_actions, "session abandoned");
        }
        self.reset_to_idle();
    }

    // -----------------------------------------------------------------------
    // Read accessors. None of these mutate.
    // -----------------------------------------------------------------------

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    /// Current group as owned item copies, in display order.
    pub fn current_group(&self) -> Vec<Item> {
        self.current_group
            .iter()
            .filter_map(|&id| self.registry.get(id))
            .cloned()
            .collect()
    }

    pub fn current_group_ids(&self) -> &[i64] {
        &self.current_group
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn progress(&self) -> u8 {
        progress(&self.registry, &self.session)
    }

    pub fn active_count(&self) -> usize {
        self.registry.active_count()
    }

    pub fn frozen_count(&self) -> usize {
        self.registry.frozen_count()
    }

    pub fn eliminated_count(&self) -> usize {
        self.registry.eliminated_count()
    }

    pub fn pass_streak(&self) -> u32 {
        self.session.global_pass_streak
    }

    pub fn total_actions(&self) -> u32 {
        self.session.total_actions
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.session.finish_reason
    }

    pub fn can_undo(&self) -> bool {
        self.is_running() && self.history.can_undo()
    }

    pub fn history_depth(&self) -> usize {
        self.history.depth()
    }

    pub fn items(&self) -> &[Item] {
        self.registry.items()
    }

    pub fn item(&self, id: i64) -> Option<&Item> {
        self.registry.get(id)
    }

    pub fn num_items(&self) -> usize {
        self.registry.len()
    }

    /// Read-only view of the session counters.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Every item (active, frozen and eliminated) ordered by `rating - sigma`.
    pub fn final_ranking(&self) -> Vec<RankedItem> {
        rank_items(self.registry.items())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Run the evaluation loop, then either finish or compose the next group.
    fn settle(&mut self) {
        match evaluate(&mut self.registry, &mut self.session) {
            Evaluation::Finished(reason) => self.finish(reason),
            Evaluation::Continue => self.compose(),
        }
    }

    fn compose(&mut self) {
        let active: Vec<&Item> = self.registry.active().collect();
        let composition = compose_next_group(
            &active,
            self.session.phase,
            self.session.last_winner_id,
            self.config.group_sizes(),
            &mut self.rng,
        );
        match composition {
            Composition::Group(group) => {
                self.current_group = group;
                self.status = SessionStatus::Running;
            }
            Composition::SessionShouldEnd => self.finish(FinishReason::CandidatesExhausted),
        }
    }

    fn finish(&mut self, reason: FinishReason) {
        self.current_group.clear();
        self.session.finish_reason = Some(reason);
        self.status = SessionStatus::Finished;
        info!(
            %reason,
            total_actions = self.session.total_actions,
            active = self.registry.active_count(),
            frozen = self.registry.frozen_count(),
            eliminated = self.registry.eliminated_count(),
            "session finished"
        );
    }

    fn reset_to_idle(&mut self) {
        self.registry.reset_stats();
        self.history.clear();
        self.session = SessionState::default();
        self.current_group.clear();
        self.status = SessionStatus::Idle;
    }

    fn ensure_running(&self) -> Result<()> {
        if self.is_running() {
            Ok(())
        } else {
            Err(EngineError::NoActiveSession)
        }
    }

    fn ensure_not_running(&self) -> Result<()> {
        if self.is_running() {
            Err(EngineError::SessionInProgress)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
impl<R: Rng> RankingEngine<R> {
    /// Direct item access for setting up scenarios.
    pub(crate) fn item_mut(&mut self, id: i64) -> &mut Item {
        self.registry.get_mut(id).expect("unknown item in test setup")
    }

    pub(crate) fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub(crate) fn force_group(&mut self, group: Vec<i64>) {
        self.current_group = group;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{RATING_BASE, SIGMA_INIT, SIGMA_MIN};
    use crate::registry::input;
    use crate::types::{EliteType, ItemStatus};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn engine(n: i64, seed: u64) -> RankingEngine<SmallRng> {
        let mut engine = RankingEngine::with_rng(EngineConfig::default(), SmallRng::seed_from_u64(seed));
        engine.initialize_items((1..=n).map(input).collect()).unwrap();
        engine
    }

    fn started(n: i64, seed: u64) -> RankingEngine<SmallRng> {
        let mut engine = engine(n, seed);
        engine.start_session().unwrap();
        engine
    }

    #[test]
    fn test_start_requires_two_items() {
        let mut one = engine(1, 1);
        assert_eq!(
            one.start_session(),
            Err(EngineError::NotEnoughItems { required: 2, available: 1 })
        );
        assert_eq!(one.status(), SessionStatus::Idle);
        assert!(one.current_group_ids().is_empty());
    }

    #[test]
    fn test_start_session_presents_exploration_group() {
        let e = started(10, 2);
        assert!(e.is_running());
        assert_eq!(e.phase(), Phase::Exploration);
        assert_eq!(e.current_group_ids().len(), 6);
        assert_eq!(e.progress(), 0);
        assert_eq!(e.session().initial_uncertainty_mass, 10.0 * SIGMA_INIT);
    }

    #[test]
    fn test_two_items_make_a_pair() {
        let e = started(2, 3);
        let mut group = e.current_group_ids().to_vec();
        group.sort();
        assert_eq!(group, vec![1, 2]);
    }

    #[test]
    fn test_choice_outside_group_is_declined() {
        let mut e = started(10, 4);
        let outsider = (1..=10).find(|id| !e.current_group_ids().contains(id)).unwrap();
        let group_before = e.current_group_ids().to_vec();
        let items_before = e.items().to_vec();

        assert_eq!(e.record_choice(outsider), Err(EngineError::NotInGroup(outsider)));
        assert_eq!(e.current_group_ids(), group_before.as_slice());
        assert_eq!(e.items(), items_before.as_slice());
        assert_eq!(e.total_actions(), 0);
        assert!(!e.can_undo());
    }

    #[test]
    fn test_choice_updates_group_and_rotates() {
        let mut e = started(10, 5);
        let group = e.current_group_ids().to_vec();
        let winner = group[0];
        e.record_choice(winner).unwrap();

        assert!(e.item(winner).unwrap().rating > RATING_BASE);
        for &id in &group[1..] {
            assert!(e.item(id).unwrap().rating < RATING_BASE);
        }
        assert_eq!(e.total_actions(), 1);
        assert_eq!(e.session().last_winner_id, Some(winner));
        assert!(!e.current_group_ids().contains(&winner), "immediate rematch");
    }

    #[test]
    fn test_operations_require_running_session() {
        let mut e = engine(5, 6);
        assert_eq!(e.record_choice(1), Err(EngineError::NoActiveSession));
        assert_eq!(e.record_skip(), Err(EngineError::NoActiveSession));
        assert_eq!(e.undo_last(), Err(EngineError::NoActiveSession));
        assert_eq!(e.request_early_finish(), Err(EngineError::NoActiveSession));
    }

    #[test]
    fn test_items_locked_during_session() {
        let mut e = started(5, 7);
        assert_eq!(e.add_item(input(99)), Err(EngineError::SessionInProgress));
        assert_eq!(e.remove_item(1).unwrap_err(), EngineError::SessionInProgress);
        assert_eq!(e.clear_items(), Err(EngineError::SessionInProgress));
        e.quit_session();
        e.add_item(input(99)).unwrap();
        assert_eq!(e.num_items(), 6);
    }

    #[test]
    fn test_three_skips_end_session() {
        let mut e = started(30, 8);
        e.record_skip().unwrap();
        e.record_skip().unwrap();
        assert!(e.is_running());
        assert_eq!(e.pass_streak(), 2);
        e.record_skip().unwrap();

        assert!(e.is_finished());
        assert_eq!(e.finish_reason(), Some(FinishReason::RepeatedSkip));
        assert_eq!(
            e.finish_reason().unwrap().to_string(),
            "manual termination via repeated skip"
        );
        assert!(e.current_group_ids().is_empty());
    }

    #[test]
    fn test_choice_resets_pass_streak() {
        let mut e = started(30, 9);
        e.record_skip().unwrap();
        e.record_skip().unwrap();
        let winner = e.current_group_ids()[0];
        e.record_choice(winner).unwrap();
        assert_eq!(e.pass_streak(), 0);
        e.record_skip().unwrap();
        e.record_skip().unwrap();
        assert!(e.is_running());
    }

    #[test]
    fn test_skipping_the_whole_pool_twice_exhausts_candidates() {
        // Six items, group of six: the second skip eliminates everybody.
        let mut e = started(6, 10);
        e.record_skip().unwrap();
        e.record_skip().unwrap();
        assert_eq!(e.eliminated_count(), 6);
        assert_eq!(e.finish_reason(), Some(FinishReason::CandidatesExhausted));
        assert_eq!(e.progress(), 100);
    }

    #[test]
    fn test_undo_restores_exact_state() {
        let mut e = started(12, 11);
        for _ in 0..3 {
            let w = e.current_group_ids()[1];
            e.record_choice(w).unwrap();
        }
        let items_before = e.items().to_vec();
        let session_before = e.session().clone();

        e.record_skip().unwrap();
        let w = e.current_group_ids()[0];
        e.record_choice(w).unwrap();

        assert_eq!(e.undo_last(), Ok(true));
        assert_eq!(e.undo_last(), Ok(true));
        assert_eq!(e.items(), items_before.as_slice());
        assert_eq!(e.session(), &session_before);
        assert_eq!(e.current_group_ids().len(), 6);
    }

    #[test]
    fn test_undo_with_empty_history_is_noop() {
        let mut e = started(8, 12);
        let group = e.current_group_ids().to_vec();
        let items = e.items().to_vec();
        assert_eq!(e.undo_last(), Ok(false));
        assert_eq!(e.current_group_ids(), group.as_slice());
        assert_eq!(e.items(), items.as_slice());
    }

    #[test]
    fn test_early_finish_needs_a_view() {
        let mut e = started(8, 13);
        assert_eq!(e.request_early_finish(), Err(EngineError::NothingViewed));
        assert!(e.is_running());

        let w = e.current_group_ids()[0];
        e.record_choice(w).unwrap();
        e.request_early_finish().unwrap();
        assert_eq!(e.finish_reason(), Some(FinishReason::ManualTermination));
        assert!(!e.can_undo());
    }

    #[test]
    fn test_quit_resets_everything() {
        let mut e = started(8, 14);
        let w = e.current_group_ids()[0];
        e.record_choice(w).unwrap();
        e.quit_session();

        assert_eq!(e.status(), SessionStatus::Idle);
        assert_eq!(e.total_actions(), 0);
        assert_eq!(e.history_depth(), 0);
        assert!(e.current_group_ids().is_empty());
        assert!(e.items().iter().all(|i| i.rating == RATING_BASE && i.view_count == 0));
        assert_eq!(e.num_items(), 8);
    }

    #[test]
    fn test_restart_resets_stats() {
        let mut e = started(8, 15);
        for _ in 0..4 {
            let w = e.current_group_ids()[0];
            e.record_choice(w).unwrap();
        }
        e.start_session().unwrap();
        assert_eq!(e.total_actions(), 0);
        assert!(!e.can_undo());
        assert!(e.items().iter().all(|i| i.sigma == SIGMA_INIT && i.status == ItemStatus::Active));
    }

    #[test]
    fn test_god_freeze_scenario() {
        let mut e = started(10, 16);
        let group = e.current_group_ids().to_vec();
        let (x, other) = (group[0], group[1]);
        {
            let item = e.item_mut(x);
            item.rating = 1775.0;
            item.view_count = 3;
        }
        // One more win pushes X past 1770 with four views.
        e.record_choice(x).unwrap();
        let item = e.item(x).unwrap();
        assert!(item.rating > 1770.0);
        assert_eq!(item.status, ItemStatus::Frozen);
        assert_eq!(item.elite_type, EliteType::God);
        assert!(!e.current_group_ids().contains(&x));
        assert_eq!(e.item(other).unwrap().status, ItemStatus::Active);
        assert_eq!(e.frozen_count(), 1);
    }

    #[test]
    fn test_convergence_scenario() {
        let mut e = started(3, 17);
        for (id, rating) in [(1, 1600.0), (2, 1500.0), (3, 1400.0)] {
            let item = e.item_mut(id);
            item.rating = rating;
            item.sigma = 31.0;
            item.view_count = 2;
        }
        {
            let session = e.session_mut();
            session.phase = Phase::Precision;
            session.phase_locked = true;
        }
        e.force_group(vec![1, 2, 3]);

        // Winner sigma 31 * 0.85, losers 31 * 0.92: all drop below 30.
        e.record_choice(2).unwrap();
        assert!(e.items().iter().all(|i| i.sigma < 30.0));
        assert_eq!(e.finish_reason(), Some(FinishReason::ConvergenceComplete));
    }

    #[test]
    fn test_stagnation_breaker_in_precision() {
        let mut e = started(10, 18);
        for id in 1..=10 {
            let item = e.item_mut(id);
            item.rating = 1500.0 + id as f64;
            item.sigma = 60.0;
            item.view_count = 2;
            item.wins = 1;
        }
        {
            let session = e.session_mut();
            session.phase = Phase::Precision;
            session.phase_locked = true;
            session.stalemate_counter = 5;
        }
        e.force_group(vec![10, 9, 8, 3]);

        e.record_choice(10).unwrap();
        // Item 3 was the weakest in the group and below the freeze rating.
        assert_eq!(e.item(3).unwrap().status, ItemStatus::Eliminated);
        assert_eq!(e.session().stalemate_counter, 0);
    }

    #[test]
    fn test_skip_elimination_resets_stalemate() {
        let mut e = started(10, 19);
        e.item_mut(1).pass_count = 1;
        {
            let session = e.session_mut();
            session.phase = Phase::Precision;
            session.phase_locked = true;
            session.stalemate_counter = 4;
        }
        e.force_group(vec![1, 2, 3, 4]);

        e.record_skip().unwrap();
        assert_eq!(e.item(1).unwrap().status, ItemStatus::Eliminated);
        assert_eq!(e.session().stalemate_counter, 0);
    }

    #[test]
    fn test_skip_without_elimination_keeps_stalemate() {
        let mut e = started(10, 19);
        {
            let session = e.session_mut();
            session.phase = Phase::Precision;
            session.phase_locked = true;
            session.stalemate_counter = 4;
        }
        e.force_group(vec![1, 2, 3, 4]);

        e.record_skip().unwrap();
        assert_eq!(e.eliminated_count(), 0);
        assert_eq!(e.session().stalemate_counter, 4);
    }

    #[test]
    fn test_invariants_hold_over_long_random_session() {
        let mut e = started(25, 19);
        let mut driver = SmallRng::seed_from_u64(99);
        let mut previous: Vec<Item> = e.items().to_vec();

        for _ in 0..400 {
            if !e.is_running() {
                break;
            }
            let group = e.current_group_ids().to_vec();
            assert!(group.len() >= 2 && group.len() <= 6);
            assert!(group.len() <= e.active_count());
            assert!(group.iter().all(|&id| e.item(id).unwrap().is_active()));

            if driver.random::<f64>() < 0.1 {
                e.record_skip().unwrap();
            } else {
                let w = group[driver.random_range(0..group.len())];
                e.record_choice(w).unwrap();
            }

            for (now, before) in e.items().iter().zip(&previous) {
                assert!(now.sigma >= SIGMA_MIN);
                if before.status != ItemStatus::Active {
                    assert_eq!(now.status, before.status, "item {} changed status twice", now.id);
                    assert_eq!(now.elite_type, before.elite_type);
                }
            }
            previous = e.items().to_vec();
        }
        assert!(e.is_finished(), "session never terminated");
        assert!(e.finish_reason().is_some());
    }

    #[test]
    fn test_accessors_do_not_mutate() {
        let e = started(9, 20);
        let items = e.items().to_vec();
        let session = e.session().clone();
        let _ = (
            e.current_group(),
            e.phase(),
            e.progress(),
            e.active_count(),
            e.frozen_count(),
            e.pass_streak(),
            e.total_actions(),
            e.finish_reason(),
            e.final_ranking(),
        );
        assert_eq!(e.items(), items.as_slice());
        assert_eq!(e.session(), &session);
    }

    #[test]
    fn test_final_ranking_covers_every_item() {
        let mut e = started(12, 21);
        while e.is_running() {
            let w = e.current_group_ids()[0];
            e.record_choice(w).unwrap();
        }
        let ranking = e.final_ranking();
        assert_eq!(ranking.len(), 12);
        for pair in ranking.windows(2) {
            assert!(pair[0].effective_rating >= pair[1].effective_rating);
        }
    }
}

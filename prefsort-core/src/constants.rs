/// Starting rating for every item. Also the reference point for match probability.
pub const RATING_BASE: f64 = 1500.0;

/// Starting uncertainty for every item.
pub const SIGMA_INIT: f64 = 150.0;

/// Floor applied to sigma after every mutation. Sigma never drops below this.
pub const SIGMA_MIN: f64 = 5.0;

/// Base learning rate before annealing.
pub const K_FACTOR_INITIAL: f64 = 100.0;

/// Logistic scale of the Elo expectation (a 400-point gap ~ 10:1 odds).
pub const MATCH_SCALE: f64 = 400.0;

/// Per-view decay of the learning rate: alpha = 1 / (1 + views * ANNEALING_RATE).
pub const ANNEALING_RATE: f64 = 0.15;

/// Items with more views than this are "well observed" and their sigma decays faster.
pub const WELL_OBSERVED_VIEWS: u32 = 8;

pub const WINNER_SIGMA_DECAY: f64 = 0.85;
pub const LOSER_SIGMA_DECAY: f64 = 0.92;
pub const WELL_OBSERVED_SIGMA_DECAY: f64 = 0.7;

/// Loss penalty multiplier for an item that has never won.
/// Keeps one early loss from burying an item nobody has looked at properly yet.
pub const UNPROVEN_LOSS_MODIFIER: f64 = 0.2;
pub const PROVEN_LOSS_MODIFIER: f64 = 0.6;

/// Flat rating penalty applied to every member of a skipped group.
pub const SKIP_RATING_PENALTY: f64 = 30.0;
pub const SKIP_SIGMA_DECAY: f64 = 0.75;

/// An item skipped this many times is eliminated.
pub const PASS_ELIMINATION_THRESHOLD: u32 = 2;

/// This many consecutive skips end the session.
pub const GLOBAL_PASS_LIMIT: u32 = 3;

/// Pass exhaustion: look at the last PASS_WINDOW actions, end if PASS_WINDOW_LIMIT are skips.
/// Only evaluated once the log is longer than the window.
pub const PASS_WINDOW: usize = 10;
pub const PASS_WINDOW_LIMIT: usize = 4;

pub const EXPLORATION_GROUP_SIZE: usize = 6;
pub const PRECISION_GROUP_SIZE: usize = 4;

/// Weight of rating in the pivot selection score `rating * w + sigma`.
pub const PIVOT_RATING_WEIGHT: f64 = 1.5;

/// Sigma above which an item counts as "unstable" for the phase lock.
pub const UNSTABLE_SIGMA_THRESHOLD: f64 = SIGMA_INIT * 0.6;

/// Precision is locked once the unstable fraction of active items is at or below this.
pub const UNSTABLE_RATIO_BORDER: f64 = 0.35;

/// Elite freeze thresholds. The band multipliers are applied to sigma on both
/// sides: top.rating - k*top.sigma must clear second.rating + k*second.sigma.
pub const GOD_MIN_RATING: f64 = 1770.0;
pub const GOD_MIN_VIEWS: u32 = 4;
pub const STRONG_MIN_RATING: f64 = 1600.0;
pub const STRONG_MIN_VIEWS: u32 = 6;
pub const STRONG_BAND: f64 = 1.0;
pub const STAT_MIN_RATING: f64 = 1520.0;
pub const STAT_MIN_VIEWS: u32 = 7;
/// ~90% one-sided separation.
pub const STAT_BAND: f64 = 1.62;

/// Pruning: enough views and a rating this low means the item is out.
pub const PRUNE_MIN_VIEWS: u32 = 5;
pub const PRUNE_MAX_RATING: f64 = 1200.0;

/// Per-item stagnation: an item seen this often gets resolved one way or the other.
pub const STAGNATION_VIEWS: u32 = 10;
pub const STAGNATION_FREEZE_RATING: f64 = 1500.0;

/// Similarity finish: a handful of near-tied, well-viewed survivors.
pub const SIMILARITY_MAX_ACTIVE: usize = 4;
pub const SIMILARITY_MIN_MEAN_VIEWS: f64 = 6.0;
pub const SIMILARITY_MAX_SPREAD: f64 = 50.0;

/// Convergence finish: every active sigma below this.
pub const IMPACT_THRESHOLD: f64 = 30.0;

/// Precision-phase comparisons without a status change before the stagnation breaker fires.
pub const STALEMATE_LIMIT: u32 = 5;

/// The stagnation breaker freezes its target as STAT at or above this rating, otherwise eliminates.
pub const BREAKER_FREEZE_RATING: f64 = 1520.0;

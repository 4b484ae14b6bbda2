/// Simulate command: measures how many comparisons the engine needs and how
/// close its ranking gets to a known answer.
///
/// Each image gets a hidden score drawn from a standard normal. The simulated
/// judge sees `score + noise * N(0, 1)` for every image in the group and picks
/// the highest, or skips the whole group with probability `skip_rate`.
use prefsort_core::{EngineConfig, EngineError, FinishReason, ItemInput, RankingEngine};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

pub struct SimulationOptions {
    pub items: usize,
    pub trials: usize,
    pub noise: f64,
    pub skip_rate: f64,
    pub seed: Option<u64>,
    pub engine: EngineConfig,
}

#[derive(Serialize, Debug, Clone)]
pub struct TrialResult {
    pub seed: u64,
    pub comparisons: u32,
    pub skips: u32,
    pub finish_reason: Option<FinishReason>,
    /// Spearman correlation between the final ranking and the hidden scores.
    pub spearman: f64,
    pub top1_hit: bool,
    /// Fraction of the true top-k found in the engine's top-k.
    pub top_k_overlap: f64,
}

#[derive(Serialize)]
struct JsonSummary {
    items: usize,
    noise: f64,
    skip_rate: f64,
    trials: Vec<TrialResult>,
    mean_comparisons: f64,
    mean_spearman: f64,
    top1_rate: f64,
    mean_top_k_overlap: f64,
}

/// Box-Muller standard normal sample.
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // random() is in [0, 1); flip it so ln() never sees zero.
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Size of the "top" bucket used for the overlap metric.
pub fn top_k_for(items: usize) -> usize {
    (items / 5).max(1)
}

/// Spearman rank correlation of `predicted` (best first) against hidden `truth`.
pub fn spearman(predicted: &[i64], truth: &HashMap<i64, f64>) -> f64 {
    let n = predicted.len();
    if n < 2 {
        return 1.0;
    }

    let mut by_truth: Vec<i64> = predicted.to_vec();
    by_truth.sort_by(|a, b| truth[b].total_cmp(&truth[a]));
    let true_pos: HashMap<i64, usize> = by_truth.iter().enumerate().map(|(i, &id)| (id, i)).collect();

    let d_squared: f64 = predicted
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let d = i as f64 - true_pos[id] as f64;
            d * d
        })
        .sum();

    let n = n as f64;
    1.0 - 6.0 * d_squared / (n * (n * n - 1.0))
}

/// Run one full session against a fresh set of hidden scores.
pub fn run_trial(
    items: usize,
    noise: f64,
    skip_rate: f64,
    seed: u64,
    config: &EngineConfig,
) -> Result<TrialResult, EngineError> {
    let mut judge_rng = SmallRng::seed_from_u64(seed);
    let engine_rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    let truth: HashMap<i64, f64> = (1..=items as i64).map(|id| (id, standard_normal(&mut judge_rng))).collect();
    let inputs: Vec<ItemInput> = (1..=items as i64)
        .map(|id| ItemInput {
            id,
            name: format!("sim-{id:04}.png"),
            image_ref: format!("sim/{id:04}.png"),
        })
        .collect();

    let mut engine = RankingEngine::with_rng(config.clone(), engine_rng);
    engine.initialize_items(inputs)?;
    engine.start_session()?;

    let mut skips = 0u32;
    while engine.is_running() {
        if skip_rate > 0.0 && judge_rng.random::<f64>() < skip_rate {
            engine.record_skip()?;
            skips += 1;
            continue;
        }

        let mut best: Option<(i64, f64)> = None;
        for &id in engine.current_group_ids() {
            let perceived = truth[&id] + noise * standard_normal(&mut judge_rng);
            if best.map_or(true, |(_, score)| perceived > score) {
                best = Some((id, perceived));
            }
        }
        match best {
            Some((winner, _)) => engine.record_choice(winner)?,
            None => break,
        }
    }

    let predicted: Vec<i64> = engine.final_ranking().iter().map(|r| r.item.id).collect();
    let mut true_order = predicted.clone();
    true_order.sort_by(|a, b| truth[b].total_cmp(&truth[a]));

    let k = top_k_for(items);
    let hits = predicted[..k].iter().filter(|id| true_order[..k].contains(id)).count();

    Ok(TrialResult {
        seed,
        comparisons: engine.total_actions(),
        skips,
        finish_reason: engine.finish_reason(),
        spearman: spearman(&predicted, &truth),
        top1_hit: predicted.first() == true_order.first(),
        top_k_overlap: hits as f64 / k as f64,
    })
}

/// Run all trials and print the summary.
pub fn run_simulation(opts: &SimulationOptions, json: bool) {
    let base_seed = opts.seed.unwrap_or_else(|| rand::rng().random());

    if !json {
        eprintln!(
            "Simulating {} trial(s): {} images, noise {:.2}, skip rate {:.2}, seed {}",
            opts.trials, opts.items, opts.noise, opts.skip_rate, base_seed,
        );
    }

    let mut trials = Vec::with_capacity(opts.trials);
    for t in 0..opts.trials {
        let seed = base_seed.wrapping_add(t as u64);
        let result = run_trial(opts.items, opts.noise, opts.skip_rate, seed, &opts.engine)
            .unwrap_or_else(|e| crate::bail(format!("Simulation failed: {e}")));
        debug!(trial = t, ?result, "trial complete");
        trials.push(result);
    }

    let count = trials.len().max(1) as f64;
    let mean_comparisons = trials.iter().map(|t| t.comparisons as f64).sum::<f64>() / count;
    let mean_spearman = trials.iter().map(|t| t.spearman).sum::<f64>() / count;
    let top1_rate = trials.iter().filter(|t| t.top1_hit).count() as f64 / count;
    let mean_top_k_overlap = trials.iter().map(|t| t.top_k_overlap).sum::<f64>() / count;

    info!(mean_comparisons, mean_spearman, "simulation finished");

    if json {
        let summary = JsonSummary {
            items: opts.items,
            noise: opts.noise,
            skip_rate: opts.skip_rate,
            trials,
            mean_comparisons,
            mean_spearman,
            top1_rate,
            mean_top_k_overlap,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(out) => println!("{out}"),
            Err(e) => crate::bail(format!("Failed to serialize summary: {e}")),
        }
        return;
    }

    println!(" Trial |   Seed               | Comparisons | Skips | Spearman | Top-1 | Top-{} | Finish", top_k_for(opts.items));
    println!("-------|----------------------|-------------|-------|----------|-------|-------|-------");
    for (i, t) in trials.iter().enumerate() {
        println!(
            "{:>6} | {:>20} | {:>11} | {:>5} | {:>8.3} | {:>5} | {:>5.0}% | {}",
            i + 1,
            t.seed,
            t.comparisons,
            t.skips,
            t.spearman,
            if t.top1_hit { "yes" } else { "no" },
            t.top_k_overlap * 100.0,
            t.finish_reason.map(|r| r.to_string()).unwrap_or_default(),
        );
    }

    let full_round_robin = opts.items * opts.items.saturating_sub(1) / 2;
    println!(
        "\nMean comparisons: {:.1} (a full round robin of pairs would be {})",
        mean_comparisons, full_round_robin,
    );
    println!("Mean Spearman:    {mean_spearman:.3}");
    println!("Top-1 found:      {:.0}%", top1_rate * 100.0);
    println!("Top-{} overlap:    {:.0}%", top_k_for(opts.items), mean_top_k_overlap * 100.0);
}

/// Output formatting: tiered terminal table and JSON.
use prefsort_core::{average_sigma, group_by_tier, FinishReason, Item, ItemStatus, RankedItem, Tier};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedItem {
    rank: usize,
    id: i64,
    name: String,
    image: String,
    tier: Tier,
    rating: f64,
    sigma: f64,
    effective_rating: f64,
    match_probability: u8,
    views: u32,
    wins: u32,
    status: String,
}

#[derive(Serialize)]
struct JsonOutput {
    items: Vec<JsonRankedItem>,
    finish_reason: Option<FinishReason>,
    total_comparisons: u32,
    average_sigma: f64,
}

/// Summary of a finished session, shared by both output formats.
pub struct Report<'a> {
    pub ranking: &'a [RankedItem],
    pub items: &'a [Item],
    pub finish_reason: Option<FinishReason>,
    pub total_comparisons: u32,
}

fn status_label(item: &Item) -> String {
    match item.status {
        ItemStatus::Active => "active".to_string(),
        ItemStatus::Frozen => format!("frozen ({:?})", item.elite_type).to_lowercase(),
        ItemStatus::Eliminated => "eliminated".to_string(),
    }
}

/// Display width of the name column, in characters.
fn name_width(ranking: &[RankedItem]) -> usize {
    ranking
        .iter()
        .map(|r| r.item.name.chars().count())
        .max()
        .unwrap_or(5)
        .max(5) // at least "Image"
}

/// Print results as a terminal table, one block per non-empty tier.
pub fn print_table(report: &Report) {
    let name_width = name_width(report.ranking);

    for group in group_by_tier(report.ranking) {
        println!("\n{} tier: {}", group.tier, group.tier.description());
        println!(" # | {:<name_width$} |  Rating |  Sigma | Match | Views | Status", "Image");
        println!("---|-{}-|---------|--------|-------|-------|-------", "-".repeat(name_width));
        for r in &group.items {
            println!(
                "{:>2} | {:<name_width$} | {:>7.0} | {:>6.0} | {:>4}% | {:>5} | {}",
                r.rank,
                r.item.name,
                r.item.rating,
                r.item.sigma,
                r.match_probability,
                r.item.view_count,
                status_label(&r.item),
            );
        }
    }

    println!();
    if let Some(reason) = report.finish_reason {
        println!("Finished: {reason}");
    }
    println!(
        "{} images ranked in {} comparisons (average uncertainty ±{:.0})",
        report.ranking.len(),
        report.total_comparisons,
        average_sigma(report.items),
    );
}

/// Print results as JSON.
pub fn print_json(report: &Report) {
    let items: Vec<JsonRankedItem> = report
        .ranking
        .iter()
        .map(|r| JsonRankedItem {
            rank: r.rank,
            id: r.item.id,
            name: r.item.name.clone(),
            image: r.item.image_ref.clone(),
            tier: r.tier,
            rating: r.item.rating,
            sigma: r.item.sigma,
            effective_rating: r.effective_rating,
            match_probability: r.match_probability,
            views: r.item.view_count,
            wins: r.item.wins,
            status: status_label(&r.item),
        })
        .collect();

    let output = JsonOutput {
        items,
        finish_reason: report.finish_reason,
        total_comparisons: report.total_comparisons,
        average_sigma: average_sigma(report.items),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize results: {e}")),
    }
}

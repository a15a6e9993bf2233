use anyhow::{Context, Result};
use colored::Colorize;

use crate::numbers::usize_to_f64;
use crate::simulation::Aggregate;

/// Render a batch of per-strategy aggregates to stdout.
pub fn print_console(aggregates: &[Aggregate]) {
    for aggregate in aggregates {
        let completion_pct = if aggregate.runs == 0 {
            0.0
        } else {
            usize_to_f64(aggregate.completions) / usize_to_f64(aggregate.runs) * 100.0
        };
        let completion = format!("{completion_pct:.1}% completed");
        let completion = if completion_pct >= 50.0 {
            completion.as_str().green()
        } else {
            completion.as_str().red()
        };

        println!();
        println!(
            "{} {} ({} runs, {})",
            "Strategy".bold(),
            aggregate.strategy.as_str().bold(),
            aggregate.runs,
            completion
        );
        println!(
            "  avg cards resolved {:.2} | avg meters: budget {:.1}, audience {:.1}, satisfaction {:.1}, technology {:.1}",
            aggregate.avg_cards_resolved,
            aggregate.avg_metrics.budget,
            aggregate.avg_metrics.audience,
            aggregate.avg_metrics.satisfaction,
            aggregate.avg_metrics.technology,
        );

        let endings = aggregate
            .ending_counts
            .iter()
            .map(|(ending, count)| format!("{ending}:{count}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  endings  {}", endings.as_str().cyan());

        if aggregate.badge_counts.is_empty() {
            println!("  badges   {}", "none".dimmed());
        } else {
            let badges = aggregate
                .badge_counts
                .iter()
                .map(|(badge, count)| format!("{badge}:{count}"))
                .collect::<Vec<_>>()
                .join(" ");
            println!("  badges   {}", badges.as_str().yellow());
        }
    }
    println!();
}

/// Serialize a batch of aggregates as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(aggregates: &[Aggregate]) -> Result<String> {
    serde_json::to_string_pretty(aggregates).context("serializing report")
}

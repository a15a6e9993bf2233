use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use launchpath_game::{
    Badge, CampaignConfig, CampaignState, Category, DeckData, Ending, Metrics, Side,
};

use crate::numbers::{i64_to_f64, usize_to_f64};
use crate::policy::{GameplayStrategy, PolicyDecision};

/// Configuration for one simulated campaign.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub seed: u64,
    pub strategy: GameplayStrategy,
    pub campaign: CampaignConfig,
}

impl SimulationConfig {
    #[must_use]
    pub fn new(strategy: GameplayStrategy, seed: u64) -> Self {
        Self {
            seed,
            strategy,
            campaign: CampaignConfig::default(),
        }
    }

    #[must_use]
    pub const fn with_campaign(mut self, campaign: CampaignConfig) -> Self {
        self.campaign = campaign;
        self
    }
}

/// Snapshot of one resolved card.
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRecord {
    pub card_id: String,
    pub side: Side,
    pub category: Category,
    pub rationale: Option<String>,
}

/// Result of one full campaign run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub strategy: String,
    pub ending: Ending,
    pub cards_resolved: usize,
    pub metrics: Metrics,
    pub badges: Vec<Badge>,
    pub decisions: Vec<DecisionRecord>,
}

/// Drive a policy through a full campaign over the given deck.
///
/// # Errors
///
/// Returns an error if the campaign configuration is rejected or the engine
/// reports a contract violation (which would be a bug in this harness).
pub fn run_campaign(deck: &DeckData, config: &SimulationConfig) -> Result<RunSummary> {
    let mut policy = config.strategy.create_policy(config.seed);
    let mut state = CampaignState::new(deck.clone(), config.campaign)
        .context("campaign configuration rejected")?;

    let mut decisions = Vec::new();
    while let Some(card) = state.current_card() {
        let card_id = card.id.clone();
        let PolicyDecision { side, rationale } = policy.pick_side(&state, card);
        let outcome = state.apply_choice(side)?;
        decisions.push(DecisionRecord {
            card_id,
            side,
            category: outcome.category,
            rationale,
        });
    }

    let ending = state
        .ending()
        .context("campaign stopped without an ending")?;
    Ok(RunSummary {
        seed: config.seed,
        strategy: config.strategy.label().to_string(),
        ending,
        cards_resolved: state.cards_resolved(),
        metrics: state.metrics(),
        badges: state.earned_badges().into_vec(),
        decisions,
    })
}

/// Mean final meters across a batch of runs.
#[derive(Debug, Clone, Serialize)]
pub struct MetricAverages {
    pub budget: f64,
    pub audience: f64,
    pub satisfaction: f64,
    pub technology: f64,
}

/// Distribution summary for one strategy across many runs.
#[derive(Debug, Clone, Serialize)]
pub struct Aggregate {
    pub strategy: String,
    pub runs: usize,
    pub completions: usize,
    pub ending_counts: BTreeMap<String, usize>,
    pub badge_counts: BTreeMap<String, usize>,
    pub avg_cards_resolved: f64,
    pub avg_metrics: MetricAverages,
}

#[must_use]
pub fn aggregate_runs(strategy: GameplayStrategy, runs: &[RunSummary]) -> Aggregate {
    let mut ending_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut badge_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut completions = 0usize;
    let mut cards_total = 0usize;
    let mut sums = (0i64, 0i64, 0i64, 0i64);

    for run in runs {
        *ending_counts.entry(run.ending.to_string()).or_default() += 1;
        if run.ending == Ending::Completed {
            completions += 1;
        }
        for badge in &run.badges {
            *badge_counts.entry(badge.to_string()).or_default() += 1;
        }
        cards_total += run.cards_resolved;
        sums.0 += i64::from(run.metrics.budget);
        sums.1 += i64::from(run.metrics.audience);
        sums.2 += i64::from(run.metrics.satisfaction);
        sums.3 += i64::from(run.metrics.technology);
    }

    let denom = usize_to_f64(runs.len()).max(1.0);
    Aggregate {
        strategy: strategy.label().to_string(),
        runs: runs.len(),
        completions,
        ending_counts,
        badge_counts,
        avg_cards_resolved: usize_to_f64(cards_total) / denom,
        avg_metrics: MetricAverages {
            budget: i64_to_f64(sums.0) / denom,
            audience: i64_to_f64(sums.1) / denom,
            satisfaction: i64_to_f64(sums.2) / denom,
            technology: i64_to_f64(sums.3) / denom,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpath_game::canonical;

    #[test]
    fn growth_policy_completes_the_canonical_deck() {
        let config = SimulationConfig::new(GameplayStrategy::Growth, 7);
        let summary = run_campaign(canonical(), &config).unwrap();
        assert_eq!(summary.ending, Ending::Completed);
        assert_eq!(summary.cards_resolved, 10);
        assert_eq!(summary.metrics, Metrics::new(4, 100, 100, 65));
        assert!(summary.badges.contains(&Badge::PeoplePerson));
        assert!(summary.badges.contains(&Badge::TechEnthusiast));
    }

    #[test]
    fn frugal_policy_collapses_on_the_opening_card() {
        let config = SimulationConfig::new(GameplayStrategy::Frugal, 7);
        let summary = run_campaign(canonical(), &config).unwrap();
        assert_eq!(summary.ending, Ending::Audience);
        assert_eq!(summary.cards_resolved, 1);
        assert_eq!(summary.decisions.len(), 1);
        assert_eq!(summary.decisions[0].card_id, "venue-choice");
    }

    #[test]
    fn random_runs_repeat_for_a_fixed_seed() {
        let config = SimulationConfig::new(GameplayStrategy::Random, 0xBEEF);
        let first = run_campaign(canonical(), &config).unwrap();
        let second = run_campaign(canonical(), &config).unwrap();
        assert_eq!(first.ending, second.ending);
        assert_eq!(first.metrics, second.metrics);
        assert_eq!(
            first
                .decisions
                .iter()
                .map(|decision| decision.side)
                .collect::<Vec<_>>(),
            second
                .decisions
                .iter()
                .map(|decision| decision.side)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn aggregates_count_every_run_once() {
        let growth = SimulationConfig::new(GameplayStrategy::Growth, 1);
        let runs = vec![
            run_campaign(canonical(), &growth).unwrap(),
            run_campaign(canonical(), &growth).unwrap(),
        ];
        let aggregate = aggregate_runs(GameplayStrategy::Growth, &runs);
        assert_eq!(aggregate.runs, 2);
        assert_eq!(aggregate.completions, 2);
        assert_eq!(aggregate.ending_counts.get("completed"), Some(&2));
        assert!((aggregate.avg_cards_resolved - 10.0).abs() < f64::EPSILON);
        assert!((aggregate.avg_metrics.audience - 100.0).abs() < f64::EPSILON);
    }
}

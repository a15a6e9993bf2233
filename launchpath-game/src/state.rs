use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::{
    DEFAULT_GRACE_STEPS, METRIC_MAX, METRIC_MIN, START_AUDIENCE, START_BUDGET, START_SATISFACTION,
    START_TECHNOLOGY,
};
use crate::data::{Card, Category, DeckData, Effects, Metric, Side};

/// The four campaign meters, each held in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub budget: i32,
    pub audience: i32,
    pub satisfaction: i32,
    pub technology: i32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            budget: START_BUDGET,
            audience: START_AUDIENCE,
            satisfaction: START_SATISFACTION,
            technology: START_TECHNOLOGY,
        }
    }
}

impl Metrics {
    #[must_use]
    pub const fn new(budget: i32, audience: i32, satisfaction: i32, technology: i32) -> Self {
        Self {
            budget,
            audience,
            satisfaction,
            technology,
        }
    }

    #[must_use]
    pub const fn get(self, metric: Metric) -> i32 {
        match metric {
            Metric::Budget => self.budget,
            Metric::Audience => self.audience,
            Metric::Satisfaction => self.satisfaction,
            Metric::Technology => self.technology,
        }
    }

    pub fn clamp(&mut self) {
        self.budget = self.budget.clamp(METRIC_MIN, METRIC_MAX);
        self.audience = self.audience.clamp(METRIC_MIN, METRIC_MAX);
        self.satisfaction = self.satisfaction.clamp(METRIC_MIN, METRIC_MAX);
        self.technology = self.technology.clamp(METRIC_MIN, METRIC_MAX);
    }

    /// Apply a choice's deltas, clamping every meter back into range.
    pub fn apply(&mut self, effects: &Effects) {
        self.budget = self.budget.saturating_add(effects.budget);
        self.audience = self.audience.saturating_add(effects.audience);
        self.satisfaction = self.satisfaction.saturating_add(effects.satisfaction);
        self.technology = self.technology.saturating_add(effects.technology);
        self.clamp();
    }

    #[must_use]
    pub fn in_bounds(self) -> bool {
        Metric::ALL
            .into_iter()
            .all(|metric| (METRIC_MIN..=METRIC_MAX).contains(&self.get(metric)))
    }
}

/// Per-campaign tally of chosen categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CategoryCounts([u32; Category::ALL.len()]);

impl CategoryCounts {
    pub fn record(&mut self, category: Category) {
        let slot = &mut self.0[category as usize];
        *slot = slot.saturating_add(1);
    }

    #[must_use]
    pub const fn count(&self, category: Category) -> u32 {
        self.0[category as usize]
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|count| *count == 0)
    }

    /// The most-chosen category, ties broken by [`Category`] declaration
    /// order. `None` when nothing was ever chosen.
    #[must_use]
    pub fn leading(&self) -> Option<Category> {
        let mut best: Option<(Category, u32)> = None;
        for category in Category::ALL {
            let count = self.count(category);
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((category, count)),
            }
        }
        best.map(|(category, _)| category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL
            .into_iter()
            .map(|category| (category, self.count(category)))
    }
}

/// Why a campaign stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// Budget collapsed.
    Budget,
    /// Audience collapsed.
    Audience,
    /// Satisfaction collapsed.
    Satisfaction,
    /// Every card was resolved.
    Completed,
}

impl Ending {
    #[must_use]
    pub const fn is_failure(self) -> bool {
        !matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Audience => "audience",
            Self::Satisfaction => "satisfaction",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison used when testing a meter for collapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollapseBound {
    /// A meter at or below zero ends the campaign.
    #[default]
    AtOrBelow,
    /// Only a meter strictly below zero ends the campaign. Clamping keeps
    /// meters at zero or above, so this bound effectively disables early
    /// collapse; it exists for tuning sweeps that want full-length runs.
    Below,
}

impl CollapseBound {
    #[must_use]
    pub const fn collapses(self, value: i32) -> bool {
        match self {
            Self::AtOrBelow => value <= METRIC_MIN,
            Self::Below => value < METRIC_MIN,
        }
    }
}

/// Errors raised when campaign configuration invariants are violated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("start {metric} must be between {min} and {max} (got {value})")]
    StartOutOfRange {
        metric: Metric,
        min: i32,
        max: i32,
        value: i32,
    },
}

/// Tunable campaign parameters.
///
/// The start vector is explicit because balance tuning varies it; the
/// shipped defaults are the canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignConfig {
    #[serde(default)]
    pub start: Metrics,
    #[serde(default)]
    pub bound: CollapseBound,
    /// Number of opening cards exempt from collapse checks.
    #[serde(default)]
    pub grace_steps: u8,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            start: Metrics::default(),
            bound: CollapseBound::default(),
            grace_steps: DEFAULT_GRACE_STEPS,
        }
    }
}

impl CampaignConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` when any start meter lies outside [0, 100].
    pub fn validate(&self) -> Result<(), ConfigError> {
        for metric in Metric::ALL {
            let value = self.start.get(metric);
            if !(METRIC_MIN..=METRIC_MAX).contains(&value) {
                return Err(ConfigError::StartOutOfRange {
                    metric,
                    min: METRIC_MIN,
                    max: METRIC_MAX,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Errors raised when the caller violates the campaign's state contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("campaign already ended with {ending}")]
    CampaignOver { ending: Ending },
    #[error("card index {index} out of range (deck holds {len})")]
    CardOutOfRange { index: usize, len: usize },
}

/// Snapshot returned after a card is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceOutcome {
    pub category: Category,
    pub metrics: Metrics,
    pub ending: Option<Ending>,
}

/// One play-through of the deck.
///
/// The state is append-only: once an ending is recorded, further choices are
/// rejected and the recorded meters never change. Each session owns its own
/// tally, so any number of sessions can run independently in one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignState {
    deck: DeckData,
    config: CampaignConfig,
    metrics: Metrics,
    categories: CategoryCounts,
    card_index: usize,
    ending: Option<Ending>,
}

impl CampaignState {
    /// Start a fresh campaign over the given deck.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation. Deck
    /// validation happens at deck construction; see [`DeckData::validate`].
    pub fn new(deck: DeckData, config: CampaignConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            metrics: config.start,
            categories: CategoryCounts::default(),
            card_index: 0,
            ending: None,
            deck,
            config,
        })
    }

    /// Start a fresh campaign over the canonical deck.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_canonical_deck(config: CampaignConfig) -> Result<Self, ConfigError> {
        Self::new(crate::deck::canonical().clone(), config)
    }

    /// Resolve the current card with the chosen side.
    ///
    /// Applies the choice's deltas with clamping, records its category,
    /// advances the deck, and runs the collapse checks in budget, audience,
    /// satisfaction order (technology never collapses). Resolving the last
    /// card without collapsing ends the campaign with [`Ending::Completed`].
    ///
    /// # Errors
    ///
    /// Returns `EngineError::CampaignOver` when the campaign already ended
    /// and `EngineError::CardOutOfRange` when the card index escaped the
    /// deck. Both are contract violations; no state is mutated.
    pub fn apply_choice(&mut self, side: Side) -> Result<ChoiceOutcome, EngineError> {
        if let Some(ending) = self.ending {
            return Err(EngineError::CampaignOver { ending });
        }
        let Some(card) = self.deck.get(self.card_index) else {
            return Err(EngineError::CardOutOfRange {
                index: self.card_index,
                len: self.deck.len(),
            });
        };
        let chosen = card.choice(side);
        let category = chosen.category;
        let effects = chosen.effects;

        self.metrics.apply(&effects);
        self.categories.record(category);
        self.card_index += 1;

        let ending = self.detect_ending();
        self.ending = ending;
        Ok(ChoiceOutcome {
            category,
            metrics: self.metrics,
            ending,
        })
    }

    fn detect_ending(&self) -> Option<Ending> {
        if self.card_index > usize::from(self.config.grace_steps) {
            let bound = self.config.bound;
            if bound.collapses(self.metrics.budget) {
                return Some(Ending::Budget);
            }
            if bound.collapses(self.metrics.audience) {
                return Some(Ending::Audience);
            }
            if bound.collapses(self.metrics.satisfaction) {
                return Some(Ending::Satisfaction);
            }
        }
        if self.card_index == self.deck.len() {
            return Some(Ending::Completed);
        }
        None
    }

    /// The card awaiting a decision, or `None` once the campaign ended.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        if self.ending.is_some() {
            return None;
        }
        self.deck.get(self.card_index)
    }

    #[must_use]
    pub const fn metrics(&self) -> Metrics {
        self.metrics
    }

    #[must_use]
    pub const fn categories(&self) -> &CategoryCounts {
        &self.categories
    }

    #[must_use]
    pub const fn ending(&self) -> Option<Ending> {
        self.ending
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.ending.is_some()
    }

    #[must_use]
    pub const fn cards_resolved(&self) -> usize {
        self.card_index
    }

    #[must_use]
    pub const fn config(&self) -> &CampaignConfig {
        &self.config
    }

    #[must_use]
    pub const fn deck(&self) -> &DeckData {
        &self.deck
    }

    /// Badges earned by the campaign in its current state.
    #[must_use]
    pub fn earned_badges(&self) -> crate::badges::BadgeSet {
        crate::badges::evaluate_badges(&self.categories, &self.metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Card, Choice};

    fn choice(category: Category, effects: Effects) -> Choice {
        Choice {
            label: category.as_str().to_string(),
            category,
            effects,
        }
    }

    fn card(id: &str, left: Choice, right: Choice) -> Card {
        Card {
            id: id.to_string(),
            prompt: format!("Prompt {id}"),
            left,
            right,
        }
    }

    fn two_card_deck() -> DeckData {
        DeckData::from_cards(vec![
            card(
                "one",
                choice(
                    Category::MoneyFocused,
                    Effects {
                        budget: 10,
                        audience: -5,
                        satisfaction: -5,
                        technology: 0,
                    },
                ),
                choice(
                    Category::Strategic,
                    Effects {
                        budget: -10,
                        audience: 12,
                        satisfaction: 9,
                        technology: 3,
                    },
                ),
            ),
            card(
                "two",
                choice(
                    Category::Creative,
                    Effects {
                        budget: -200,
                        audience: 5,
                        satisfaction: 5,
                        technology: 0,
                    },
                ),
                choice(
                    Category::Organized,
                    Effects {
                        budget: 4,
                        audience: 4,
                        satisfaction: 4,
                        technology: 4,
                    },
                ),
            ),
        ])
    }

    #[test]
    fn apply_clamps_and_tallies() {
        let mut state = CampaignState::new(two_card_deck(), CampaignConfig::default()).unwrap();
        let outcome = state.apply_choice(Side::Right).unwrap();
        assert_eq!(outcome.category, Category::Strategic);
        assert_eq!(state.metrics(), Metrics::new(90, 12, 9, 3));
        assert_eq!(state.categories().count(Category::Strategic), 1);
        assert_eq!(state.categories().total(), 1);
        assert_eq!(state.cards_resolved(), 1);
        assert!(!state.is_over());
    }

    #[test]
    fn extreme_negative_delta_pins_at_zero_and_collapses_budget() {
        let mut state = CampaignState::new(two_card_deck(), CampaignConfig::default()).unwrap();
        state.apply_choice(Side::Right).unwrap();
        let outcome = state.apply_choice(Side::Left).unwrap();
        assert_eq!(outcome.metrics.budget, 0);
        assert_eq!(outcome.ending, Some(Ending::Budget));
        assert!(state.metrics().in_bounds());
    }

    #[test]
    fn collapse_checks_run_in_budget_audience_satisfaction_order() {
        let deck = DeckData::from_cards(vec![card(
            "wipeout",
            choice(
                Category::Balanced,
                Effects {
                    budget: -200,
                    audience: -200,
                    satisfaction: -200,
                    technology: 0,
                },
            ),
            choice(Category::Balanced, Effects::default()),
        )]);
        let mut state = CampaignState::new(deck, CampaignConfig::default()).unwrap();
        let outcome = state.apply_choice(Side::Left).unwrap();
        assert_eq!(outcome.ending, Some(Ending::Budget));
    }

    #[test]
    fn technology_never_collapses() {
        let deck = DeckData::from_cards(vec![card(
            "tech-crash",
            choice(
                Category::PlatformUser,
                Effects {
                    budget: 1,
                    audience: 1,
                    satisfaction: 1,
                    technology: -50,
                },
            ),
            choice(Category::PlatformUser, Effects::default()),
        )]);
        let config = CampaignConfig {
            start: Metrics::new(50, 50, 50, 10),
            ..CampaignConfig::default()
        };
        let mut state = CampaignState::new(deck, config).unwrap();
        let outcome = state.apply_choice(Side::Left).unwrap();
        assert_eq!(outcome.metrics.technology, 0);
        assert_eq!(outcome.ending, Some(Ending::Completed));
    }

    #[test]
    fn terminal_campaign_rejects_choices_without_mutation() {
        let mut state = CampaignState::new(two_card_deck(), CampaignConfig::default()).unwrap();
        state.apply_choice(Side::Left).unwrap();
        assert_eq!(state.ending(), Some(Ending::Audience));
        let snapshot = state.clone();
        let err = state.apply_choice(Side::Right).unwrap_err();
        assert_eq!(
            err,
            EngineError::CampaignOver {
                ending: Ending::Audience
            }
        );
        assert_eq!(state, snapshot);
        assert!(state.current_card().is_none());
    }

    #[test]
    fn grace_steps_defer_collapse_checks() {
        let config = CampaignConfig {
            grace_steps: 1,
            ..CampaignConfig::default()
        };
        let mut state = CampaignState::new(two_card_deck(), config).unwrap();
        let outcome = state.apply_choice(Side::Left).unwrap();
        assert_eq!(outcome.ending, None);
        assert_eq!(state.metrics(), Metrics::new(100, 0, 0, 0));
        let outcome = state.apply_choice(Side::Right).unwrap();
        assert_eq!(outcome.ending, Some(Ending::Completed));
    }

    #[test]
    fn below_bound_lets_clamped_meters_survive() {
        let config = CampaignConfig {
            bound: CollapseBound::Below,
            ..CampaignConfig::default()
        };
        let mut state = CampaignState::new(two_card_deck(), config).unwrap();
        let outcome = state.apply_choice(Side::Left).unwrap();
        assert_eq!(outcome.metrics.audience, 0);
        assert_eq!(outcome.ending, None);
    }

    #[test]
    fn config_rejects_out_of_range_start() {
        let config = CampaignConfig {
            start: Metrics::new(120, 0, 0, 0),
            ..CampaignConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartOutOfRange {
                metric: Metric::Budget,
                min: 0,
                max: 100,
                value: 120,
            })
        );
        assert!(CampaignState::new(two_card_deck(), config).is_err());
    }

    #[test]
    fn leading_breaks_ties_by_declaration_order() {
        let mut counts = CategoryCounts::default();
        counts.record(Category::MoneyFocused);
        counts.record(Category::Proactive);
        assert_eq!(counts.leading(), Some(Category::Proactive));
        counts.record(Category::MoneyFocused);
        assert_eq!(counts.leading(), Some(Category::MoneyFocused));
        assert_eq!(CategoryCounts::default().leading(), None);
    }

    #[test]
    fn counts_iterate_in_declaration_order() {
        let mut counts = CategoryCounts::default();
        counts.record(Category::Creative);
        let collected: Vec<_> = counts.iter().filter(|(_, count)| *count > 0).collect();
        assert_eq!(collected, vec![(Category::Creative, 1)]);
    }
}

//! LaunchPath Game Engine
//!
//! Platform-agnostic core logic for the LaunchPath campaign quiz. This crate
//! provides the deterministic decision engine and badge evaluator without UI
//! or platform-specific dependencies: the caller owns a [`CampaignState`],
//! feeds it one [`Side`] per card, renders the returned meters, and asks for
//! badges once the campaign ends.

pub mod badges;
pub mod constants;
pub mod data;
pub mod deck;
pub mod state;

// Re-export commonly used types
pub use badges::{Badge, BadgeSet, evaluate_badges};
pub use data::{Card, Category, Choice, DeckData, DeckError, Effects, Metric, Side};
pub use deck::canonical;
pub use state::{
    CampaignConfig, CampaignState, CategoryCounts, ChoiceOutcome, CollapseBound, ConfigError,
    EngineError, Ending, Metrics,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_card_right_side_keeps_campaign_alive() {
        let mut state = CampaignState::with_canonical_deck(CampaignConfig::default()).unwrap();
        let outcome = state.apply_choice(Side::Right).unwrap();
        assert_eq!(outcome.metrics, Metrics::new(80, 15, 12, 8));
        assert_eq!(outcome.ending, None);
        assert_eq!(state.current_card().unwrap().id, "invite-list");
    }

    #[test]
    fn opening_card_left_side_collapses_audience_first() {
        let mut state = CampaignState::with_canonical_deck(CampaignConfig::default()).unwrap();
        let outcome = state.apply_choice(Side::Left).unwrap();
        assert_eq!(outcome.metrics, Metrics::new(100, 0, 0, 2));
        assert_eq!(outcome.ending, Some(Ending::Audience));
        assert!(state.is_over());
    }

    #[test]
    fn identical_choice_sequences_are_identical_campaigns() {
        let sides = [Side::Right, Side::Left, Side::Right, Side::Right];
        let mut first = CampaignState::with_canonical_deck(CampaignConfig::default()).unwrap();
        let mut second = CampaignState::with_canonical_deck(CampaignConfig::default()).unwrap();
        for side in sides {
            let a = first.apply_choice(side).unwrap();
            let b = second.apply_choice(side).unwrap();
            assert_eq!(a, b);
        }
        assert_eq!(first, second);
        assert_eq!(first.earned_badges(), second.earned_badges());
    }
}

use std::fmt;
use std::str::FromStr;

use launchpath_game::{CampaignState, Card, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Decision returned by a [`PlayerPolicy`].
#[derive(Debug, Clone)]
pub struct PolicyDecision {
    pub side: Side,
    pub rationale: Option<String>,
}

impl PolicyDecision {
    #[must_use]
    pub fn new(side: Side, rationale: Option<String>) -> Self {
        Self { side, rationale }
    }
}

/// Policy interface for automated play strategies.
pub trait PlayerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Select a side for the card awaiting a decision.
    fn pick_side(&mut self, state: &CampaignState, card: &Card) -> PolicyDecision;
}

/// Built-in gameplay strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameplayStrategy {
    Frugal,
    Growth,
    Balanced,
    Random,
}

impl GameplayStrategy {
    pub const ALL: [Self; 4] = [Self::Frugal, Self::Growth, Self::Balanced, Self::Random];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Frugal => "frugal",
            Self::Growth => "growth",
            Self::Balanced => "balanced",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn PlayerPolicy + Send> {
        match self {
            Self::Frugal => Box::new(FrugalPolicy),
            Self::Growth => Box::new(GrowthPolicy),
            Self::Balanced => Box::new(BalancedPolicy),
            Self::Random => Box::new(RandomPolicy::new(seed)),
        }
    }
}

impl fmt::Display for GameplayStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameplayStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.label() == s)
            .ok_or(())
    }
}

struct FrugalPolicy;
struct GrowthPolicy;
struct BalancedPolicy;

struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

const fn delta_total(effects: &launchpath_game::Effects) -> i32 {
    effects.budget + effects.audience + effects.satisfaction + effects.technology
}

impl PlayerPolicy for FrugalPolicy {
    fn name(&self) -> &'static str {
        "frugal"
    }

    fn pick_side(&mut self, _state: &CampaignState, card: &Card) -> PolicyDecision {
        let left = &card.left.effects;
        let right = &card.right.effects;
        let side = if left.budget > right.budget
            || (left.budget == right.budget && delta_total(left) >= delta_total(right))
        {
            Side::Left
        } else {
            Side::Right
        };
        PolicyDecision::new(
            side,
            Some(format!(
                "budget delta {} vs {}",
                left.budget, right.budget
            )),
        )
    }
}

impl PlayerPolicy for GrowthPolicy {
    fn name(&self) -> &'static str {
        "growth"
    }

    fn pick_side(&mut self, _state: &CampaignState, card: &Card) -> PolicyDecision {
        let left = &card.left.effects;
        let right = &card.right.effects;
        let side = if left.audience > right.audience
            || (left.audience == right.audience && left.satisfaction >= right.satisfaction)
        {
            Side::Left
        } else {
            Side::Right
        };
        PolicyDecision::new(
            side,
            Some(format!(
                "audience delta {} vs {}",
                left.audience, right.audience
            )),
        )
    }
}

impl PlayerPolicy for BalancedPolicy {
    fn name(&self) -> &'static str {
        "balanced"
    }

    fn pick_side(&mut self, state: &CampaignState, card: &Card) -> PolicyDecision {
        let score = |side: Side| {
            let mut projected = state.metrics();
            projected.apply(&card.choice(side).effects);
            let collapsing = [projected.budget, projected.audience, projected.satisfaction]
                .into_iter()
                .filter(|value| *value <= 0)
                .count();
            let total =
                projected.budget + projected.audience + projected.satisfaction + projected.technology;
            // Fewer collapsing meters dominates; total breaks ties.
            (collapsing, std::cmp::Reverse(total))
        };
        let side = if score(Side::Left) < score(Side::Right) {
            Side::Left
        } else {
            Side::Right
        };
        PolicyDecision::new(side, Some("projected meters".to_string()))
    }
}

impl PlayerPolicy for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn pick_side(&mut self, _state: &CampaignState, _card: &Card) -> PolicyDecision {
        let side = if self.rng.gen_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        };
        PolicyDecision::new(side, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchpath_game::{CampaignConfig, canonical};

    fn fresh_state() -> CampaignState {
        CampaignState::with_canonical_deck(CampaignConfig::default()).unwrap()
    }

    #[test]
    fn frugal_hoards_the_budget() {
        let state = fresh_state();
        let card = state.current_card().unwrap();
        let mut policy = FrugalPolicy;
        assert_eq!(policy.pick_side(&state, card).side, Side::Left);
    }

    #[test]
    fn growth_chases_the_audience() {
        let state = fresh_state();
        let card = state.current_card().unwrap();
        let mut policy = GrowthPolicy;
        assert_eq!(policy.pick_side(&state, card).side, Side::Right);
    }

    #[test]
    fn balanced_avoids_immediate_collapse() {
        let state = fresh_state();
        let card = state.current_card().unwrap();
        let mut policy = BalancedPolicy;
        // Left clamps audience and satisfaction at zero; right keeps both up.
        assert_eq!(policy.pick_side(&state, card).side, Side::Right);
    }

    #[test]
    fn random_is_deterministic_per_seed() {
        let state = fresh_state();
        let deck = canonical();
        let mut first = RandomPolicy::new(0xD00D);
        let mut second = RandomPolicy::new(0xD00D);
        for card in &deck.cards {
            assert_eq!(
                first.pick_side(&state, card).side,
                second.pick_side(&state, card).side
            );
        }
    }

    #[test]
    fn strategy_labels_round_trip() {
        for strategy in GameplayStrategy::ALL {
            assert_eq!(strategy.label().parse::<GameplayStrategy>(), Ok(strategy));
        }
        assert!("reckless".parse::<GameplayStrategy>().is_err());
    }
}

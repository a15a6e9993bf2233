use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Campaign meter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Budget,
    Audience,
    Satisfaction,
    Technology,
}

impl Metric {
    pub const ALL: [Self; 4] = [
        Self::Budget,
        Self::Audience,
        Self::Satisfaction,
        Self::Technology,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Audience => "audience",
            Self::Satisfaction => "satisfaction",
            Self::Technology => "technology",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "budget" => Ok(Self::Budget),
            "audience" => Ok(Self::Audience),
            "satisfaction" => Ok(Self::Satisfaction),
            "technology" => Ok(Self::Technology),
            _ => Err(()),
        }
    }
}

/// Flavor tag carried by every choice and tallied across a campaign.
///
/// The declaration order is load-bearing: it is the deterministic tie-break
/// used when picking the leading category for badge fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Strategic,
    Organized,
    PlatformUser,
    RelationshipFocused,
    Proactive,
    Creative,
    Inclusive,
    DataDriven,
    DataFocused,
    Balanced,
    MoneyFocused,
}

impl Category {
    pub const ALL: [Self; 11] = [
        Self::Strategic,
        Self::Organized,
        Self::PlatformUser,
        Self::RelationshipFocused,
        Self::Proactive,
        Self::Creative,
        Self::Inclusive,
        Self::DataDriven,
        Self::DataFocused,
        Self::Balanced,
        Self::MoneyFocused,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strategic => "strategic",
            Self::Organized => "organized",
            Self::PlatformUser => "platform_user",
            Self::RelationshipFocused => "relationship_focused",
            Self::Proactive => "proactive",
            Self::Creative => "creative",
            Self::Inclusive => "inclusive",
            Self::DataDriven => "data_driven",
            Self::DataFocused => "data_focused",
            Self::Balanced => "balanced",
            Self::MoneyFocused => "money_focused",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(())
    }
}

/// Which half of a card the player picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(()),
        }
    }
}

/// Metric deltas applied when a choice is selected. Absent keys mean zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Effects {
    #[serde(default)]
    pub budget: i32,
    #[serde(default)]
    pub audience: i32,
    #[serde(default)]
    pub satisfaction: i32,
    #[serde(default)]
    pub technology: i32,
}

impl Effects {
    #[must_use]
    pub const fn get(self, metric: Metric) -> i32 {
        match metric {
            Metric::Budget => self.budget,
            Metric::Audience => self.audience,
            Metric::Satisfaction => self.satisfaction,
            Metric::Technology => self.technology,
        }
    }
}

/// One half of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub category: Category,
    #[serde(default)]
    pub effects: Effects,
}

/// A binary decision point in the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub prompt: String,
    pub left: Choice,
    pub right: Choice,
}

impl Card {
    /// Resolve a side to its choice.
    #[must_use]
    pub const fn choice(&self, side: Side) -> &Choice {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Errors raised when a card table violates its construction invariants.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck JSON malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("deck holds no cards")]
    Empty,
    #[error("card {index} has a blank id")]
    BlankId { index: usize },
    #[error("card id '{id}' appears more than once")]
    DuplicateId { id: String },
}

/// Ordered container for all card data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DeckData {
    pub cards: Vec<Card>,
}

impl DeckData {
    /// Create an empty deck (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self { cards: Vec::new() }
    }

    /// Load and validate deck data from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or the resulting deck
    /// fails validation.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let deck: Self = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Create deck data from pre-built cards.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Check the construction invariants of the card table.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck is empty, a card id is blank, or two
    /// cards share an id.
    pub fn validate(&self) -> Result<(), DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::Empty);
        }
        let mut seen = HashSet::new();
        for (index, card) in self.cards.iter().enumerate() {
            if card.id.trim().is_empty() {
                return Err(DeckError::BlankId { index });
            }
            if !seen.insert(card.id.as_str()) {
                return Err(DeckError::DuplicateId {
                    id: card.id.clone(),
                });
            }
        }
        Ok(())
    }
}

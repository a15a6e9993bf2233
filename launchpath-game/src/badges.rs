//! Badge rule evaluation over final meters and accumulated categories.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::constants::{
    BUDGET_CONSCIOUS_BUDGET_MIN, BUDGET_CONSCIOUS_MONEY_BUDGET_MIN,
    BUDGET_CONSCIOUS_STRATEGIC_BUDGET_MIN, BUDGET_CONSCIOUS_STRATEGIC_MIN,
    DATA_MASTER_TECHNOLOGY_MIN, FALLBACK_BALANCED_SATISFACTION_MIN, FALLBACK_BUDGET_MIN,
    FALLBACK_SATISFACTION_MIN, FALLBACK_TECHNOLOGY_MIN, PEOPLE_PERSON_COMBO_SATISFACTION_MIN,
    PEOPLE_PERSON_SATISFACTION_MIN, PLATFORM_ADOPTER_ORGANIZED_MIN,
    PLATFORM_ADOPTER_TECHNOLOGY_MIN, PROBLEM_SOLVER_SATISFACTION_MIN,
    RELATIONSHIP_BUILDER_SATISFACTION_MIN, STRATEGIC_MIND_BUDGET_MIN,
    STRATEGIC_MIND_STRATEGIC_MIN, TECH_ENTHUSIAST_COMBO_TECHNOLOGY_MIN,
    TECH_ENTHUSIAST_TECHNOLOGY_MIN,
};
use crate::data::Category;
use crate::state::{CategoryCounts, Metrics};

/// End-of-campaign achievement identifiers.
///
/// Declaration order is evaluation order, so earned badges always come back
/// in a stable sequence. Display payloads (names, art, share text) live with
/// the presentation layer; the engine only deals in identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    PlatformAdopter,
    StrategicMind,
    RelationshipBuilder,
    ProblemSolver,
    DataMaster,
    TechEnthusiast,
    BudgetConscious,
    PeoplePerson,
}

impl Badge {
    pub const ALL: [Self; 8] = [
        Self::PlatformAdopter,
        Self::StrategicMind,
        Self::RelationshipBuilder,
        Self::ProblemSolver,
        Self::DataMaster,
        Self::TechEnthusiast,
        Self::BudgetConscious,
        Self::PeoplePerson,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlatformAdopter => "platform_adopter",
            Self::StrategicMind => "strategic_mind",
            Self::RelationshipBuilder => "relationship_builder",
            Self::ProblemSolver => "problem_solver",
            Self::DataMaster => "data_master",
            Self::TechEnthusiast => "tech_enthusiast",
            Self::BudgetConscious => "budget_conscious",
            Self::PeoplePerson => "people_person",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Earned badges, inline-allocated; at most one of each by construction.
pub type BadgeSet = SmallVec<[Badge; 8]>;

/// Map final state to the set of earned badges.
///
/// Rules are evaluated in [`Badge`] declaration order. When none matches,
/// the fallback path guarantees exactly one badge, so the result is never
/// empty.
#[must_use]
pub fn evaluate_badges(categories: &CategoryCounts, metrics: &Metrics) -> BadgeSet {
    let mut earned = BadgeSet::new();
    for badge in Badge::ALL {
        if rule_matches(badge, categories, metrics) {
            earned.push(badge);
        }
    }
    if earned.is_empty() {
        earned.push(fallback_badge(categories, metrics));
    }
    earned
}

fn rule_matches(badge: Badge, categories: &CategoryCounts, metrics: &Metrics) -> bool {
    let count = |category| categories.count(category);
    match badge {
        Badge::PlatformAdopter => {
            count(Category::PlatformUser) >= 1
                || (count(Category::Organized) >= PLATFORM_ADOPTER_ORGANIZED_MIN
                    && metrics.technology >= PLATFORM_ADOPTER_TECHNOLOGY_MIN)
        }
        Badge::StrategicMind => {
            count(Category::Strategic) >= STRATEGIC_MIND_STRATEGIC_MIN
                || (count(Category::DataDriven) >= 1 && count(Category::Organized) >= 1)
                || (count(Category::Strategic) >= 1 && metrics.budget >= STRATEGIC_MIND_BUDGET_MIN)
        }
        Badge::RelationshipBuilder => {
            count(Category::RelationshipFocused) >= 1
                || count(Category::Proactive) >= 1
                || (count(Category::Inclusive) >= 1
                    && metrics.satisfaction >= RELATIONSHIP_BUILDER_SATISFACTION_MIN)
        }
        Badge::ProblemSolver => {
            count(Category::Creative) >= 1
                || (count(Category::Inclusive) >= 1 && count(Category::Balanced) >= 1)
                || (metrics.satisfaction >= PROBLEM_SOLVER_SATISFACTION_MIN
                    && count(Category::Proactive) >= 1)
        }
        Badge::DataMaster => {
            (count(Category::DataDriven) >= 1 && count(Category::DataFocused) >= 1)
                || (count(Category::DataDriven) >= 1
                    && metrics.technology >= DATA_MASTER_TECHNOLOGY_MIN)
                || count(Category::DataFocused) >= 1
        }
        Badge::TechEnthusiast => {
            metrics.technology >= TECH_ENTHUSIAST_TECHNOLOGY_MIN
                || (count(Category::PlatformUser) >= 1
                    && metrics.technology >= TECH_ENTHUSIAST_COMBO_TECHNOLOGY_MIN
                    && count(Category::DataDriven) >= 1)
        }
        Badge::BudgetConscious => {
            metrics.budget >= BUDGET_CONSCIOUS_BUDGET_MIN
                || (count(Category::Strategic) >= BUDGET_CONSCIOUS_STRATEGIC_MIN
                    && metrics.budget >= BUDGET_CONSCIOUS_STRATEGIC_BUDGET_MIN)
                || (count(Category::MoneyFocused) >= 1
                    && metrics.budget >= BUDGET_CONSCIOUS_MONEY_BUDGET_MIN)
        }
        Badge::PeoplePerson => {
            metrics.satisfaction >= PEOPLE_PERSON_SATISFACTION_MIN
                || (count(Category::RelationshipFocused) >= 1
                    && count(Category::Proactive) >= 1
                    && metrics.satisfaction >= PEOPLE_PERSON_COMBO_SATISFACTION_MIN)
        }
    }
}

/// Pick exactly one badge when no rule matched, keyed off the leading
/// category and the final meters.
fn fallback_badge(categories: &CategoryCounts, metrics: &Metrics) -> Badge {
    match categories.leading() {
        Some(Category::Strategic | Category::Organized) => Badge::StrategicMind,
        Some(Category::PlatformUser) => Badge::PlatformAdopter,
        Some(Category::RelationshipFocused | Category::Proactive) => Badge::RelationshipBuilder,
        Some(Category::Creative | Category::Inclusive) => Badge::ProblemSolver,
        Some(Category::DataDriven | Category::DataFocused) => Badge::DataMaster,
        Some(Category::Balanced) => {
            if metrics.satisfaction >= FALLBACK_BALANCED_SATISFACTION_MIN {
                Badge::PeoplePerson
            } else {
                Badge::ProblemSolver
            }
        }
        Some(Category::MoneyFocused) | None => metric_fallback(metrics),
    }
}

fn metric_fallback(metrics: &Metrics) -> Badge {
    if metrics.technology >= FALLBACK_TECHNOLOGY_MIN {
        Badge::TechEnthusiast
    } else if metrics.budget >= FALLBACK_BUDGET_MIN {
        Badge::BudgetConscious
    } else if metrics.satisfaction >= FALLBACK_SATISFACTION_MIN {
        Badge::PeoplePerson
    } else {
        Badge::ProblemSolver
    }
}

//! The canonical LaunchPath deck.
//!
//! Ten cards in fixed order. The effect magnitudes are tuned balance
//! constants: changing any value shifts the reachable endings and badge
//! distribution, so edits here should come with a fresh tester sweep.
use std::sync::OnceLock;

use crate::data::{Card, Category, Choice, DeckData, Effects};

const fn effects(budget: i32, audience: i32, satisfaction: i32, technology: i32) -> Effects {
    Effects {
        budget,
        audience,
        satisfaction,
        technology,
    }
}

fn choice(label: &str, category: Category, effects: Effects) -> Choice {
    Choice {
        label: label.to_string(),
        category,
        effects,
    }
}

fn card(id: &str, prompt: &str, left: Choice, right: Choice) -> Card {
    Card {
        id: id.to_string(),
        prompt: prompt.to_string(),
        left,
        right,
    }
}

/// The canonical deck, built once per process.
#[must_use]
pub fn canonical() -> &'static DeckData {
    static DECK: OnceLock<DeckData> = OnceLock::new();
    DECK.get_or_init(build_canonical)
}

fn build_canonical() -> DeckData {
    DeckData::from_cards(vec![
        card(
            "venue-choice",
            "Where will the launch event happen?",
            choice(
                "Keep it in the office all-hands room",
                Category::MoneyFocused,
                effects(15, -5, -8, 2),
            ),
            choice(
                "Book the riverside conference venue",
                Category::Strategic,
                effects(-20, 15, 12, 8),
            ),
        ),
        card(
            "invite-list",
            "How do you fill the guest list?",
            choice(
                "Personally invite your warmest customer contacts",
                Category::RelationshipFocused,
                effects(-5, 10, 15, 0),
            ),
            choice(
                "Target lookalike audiences with paid social ads",
                Category::DataDriven,
                effects(-18, 25, 2, 6),
            ),
        ),
        card(
            "registration",
            "Registrations are rolling in. Where do they live?",
            choice(
                "A shared spreadsheet everyone can edit",
                Category::MoneyFocused,
                effects(5, 0, -6, -10),
            ),
            choice(
                "An event platform with automated confirmations",
                Category::PlatformUser,
                effects(-12, 8, 10, 20),
            ),
        ),
        card(
            "speaker-gap",
            "Your keynote speaker cancels a week out.",
            choice(
                "Quietly shrink the agenda to fit",
                Category::Balanced,
                effects(5, -8, -5, 0),
            ),
            choice(
                "Turn the empty slot into a live audience panel",
                Category::Creative,
                effects(0, 8, 14, 2),
            ),
        ),
        card(
            "promotion-push",
            "Seven days left and signups are flat.",
            choice(
                "Dig into the funnel and retarget the drop-offs",
                Category::DataDriven,
                effects(-10, 18, 0, 8),
            ),
            choice(
                "Work the phones through the lapsed prospect list",
                Category::Proactive,
                effects(-4, 10, 4, 0),
            ),
        ),
        card(
            "venue-extras",
            "The venue quote lists optional services.",
            choice(
                "Add live captions and step-free access",
                Category::Inclusive,
                effects(-12, 8, 18, 6),
            ),
            choice(
                "Trim the order down to the bare essentials",
                Category::Strategic,
                effects(10, -4, -10, 0),
            ),
        ),
        card(
            "checkin-flow",
            "How will guests check in on the day?",
            choice(
                "Printed badge wall and a run sheet",
                Category::Organized,
                effects(-4, 0, 6, -5),
            ),
            choice(
                "QR codes scanned straight into the event app",
                Category::PlatformUser,
                effects(-8, 5, 8, 15),
            ),
        ),
        card(
            "demo-outage",
            "The live demo loses wifi mid-keynote.",
            choice(
                "Switch to the rehearsed offline demo",
                Category::Proactive,
                effects(0, 4, 10, 5),
            ),
            choice(
                "Improvise a hands-on game with the audience",
                Category::Creative,
                effects(-2, 8, 12, -4),
            ),
        ),
        card(
            "follow-up",
            "The event is over. What happens Monday morning?",
            choice(
                "Hand-written thank-yous to your key accounts",
                Category::RelationshipFocused,
                effects(-6, 6, 15, 0),
            ),
            choice(
                "Survey every attendee and tag each lead",
                Category::DataFocused,
                effects(-4, 4, 5, 10),
            ),
        ),
        card(
            "retrospective",
            "Time to plan next quarter.",
            choice(
                "Write the playbook so anyone can rerun the event",
                Category::Organized,
                effects(6, 0, 6, 8),
            ),
            choice(
                "Co-design the next event with your best customers",
                Category::Inclusive,
                effects(-8, 10, 12, 4),
            ),
        ),
    ])
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Location,
    Pricing,
    Safety,
    Food,
    Information,
    Directions,
    Timings,
    Help,
    Fallback,
}

/// A trigger-keyword set paired with the intent it resolves to. Matching is
/// case-insensitive substring membership on the whole message.
#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub triggers: &'static [&'static str],
}

/// Evaluated top to bottom; the first matching rule wins. Keyword sets
/// overlap across rules, so this order is the only tie-break.
pub const INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Greeting,
        triggers: &["hello", "hi", "hey", "namaste"],
    },
    IntentRule {
        intent: Intent::Location,
        triggers: &["where", "nearby", "close", "near me", "what's around"],
    },
    IntentRule {
        intent: Intent::Pricing,
        triggers: &["price", "cost", "ticket", "how much", "entry fee"],
    },
    IntentRule {
        intent: Intent::Safety,
        triggers: &["safe", "scam", "careful", "cheat", "danger", "warning"],
    },
    IntentRule {
        intent: Intent::Food,
        triggers: &["food", "eat", "restaurant", "hungry", "lunch", "dinner"],
    },
    IntentRule {
        intent: Intent::Information,
        triggers: &["tell me", "history", "about", "info", "what is", "describe"],
    },
    IntentRule {
        intent: Intent::Directions,
        triggers: &["how to reach", "directions", "route"],
    },
    IntentRule {
        intent: Intent::Timings,
        triggers: &["open", "hours", "timing", "when", "closed"],
    },
    IntentRule {
        intent: Intent::Help,
        triggers: &["help", "what can you do"],
    },
];

pub fn classify(message: &str) -> Intent {
    let lower = message.to_lowercase();

    for rule in INTENT_RULES {
        if contains_any(&lower, rule.triggers) {
            return rule.intent;
        }
    }

    Intent::Fallback
}

fn contains_any(input: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| input.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_greeting() {
        assert_eq!(classify("Namaste, guide!"), Intent::Greeting);
    }

    #[test]
    fn classifies_pricing() {
        assert_eq!(classify("what is the entry fee?"), Intent::Pricing);
    }

    #[test]
    fn greeting_beats_pricing_by_rule_order() {
        assert_eq!(classify("hello, what is the price?"), Intent::Greeting);
    }

    #[test]
    fn unmatched_message_falls_through() {
        assert_eq!(classify("zzz qqq"), Intent::Fallback);
    }
}

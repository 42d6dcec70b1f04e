use serde_json::Value;

use crate::intent::{classify, Intent};
use crate::models::RankedMonument;

const INFO_CLIP_CHARS: usize = 200;
const LISTED_MONUMENTS: usize = 3;
const LISTED_WARNINGS: usize = 3;

const CAPABILITY_SUMMARY: &str =
    "I can help with history, prices, safety, food, directions, and timings. What would you like to know?";

const GENERIC_SAFETY_ADVICE: &str =
    "General safety tips: Use official guides, keep valuables secure, verify ticket counters, and trust your instincts.";

const FOOD_RECOMMENDATIONS: &str = "Food recommendations by area:\n\
• Old Delhi: Karim's (₹200-500), Chandni Chowk street food (₹50-150)\n\
• Connaught Place: Mid-range restaurants (₹300-800)\n\
• South Delhi: Cafes and fine dining (₹500-1500)\n\
Always choose busy stalls for street food!";

/// Deterministic fallback responder. Always produces a reply; `nearby` must
/// already be sorted ascending by distance.
pub fn respond(message: &str, nearby: &[RankedMonument]) -> String {
    match classify(message) {
        Intent::Greeting => greeting(nearby),
        Intent::Location => location(nearby),
        Intent::Pricing => pricing(nearby),
        Intent::Safety => safety(nearby),
        Intent::Food => FOOD_RECOMMENDATIONS.to_string(),
        Intent::Information => information(nearby),
        Intent::Directions => directions(nearby),
        Intent::Timings => timings(nearby),
        Intent::Help | Intent::Fallback => CAPABILITY_SUMMARY.to_string(),
    }
}

fn greeting(nearby: &[RankedMonument]) -> String {
    match nearby.first() {
        Some(nearest) => format!(
            "Namaste! Welcome to {}, {:.1} km away. Want to know about its history, ticket prices, or safety tips?",
            nearest.monument.name, nearest.distance_km
        ),
        None => "Namaste! Welcome to Delhi. Tell me where you are or what you'd like to explore!"
            .to_string(),
    }
}

fn location(nearby: &[RankedMonument]) -> String {
    if nearby.is_empty() {
        return "You're in Delhi! Popular areas to explore: Connaught Place (CP), Old Delhi/Chandni Chowk, and South Delhi monuments."
            .to_string();
    }

    let listing = nearby
        .iter()
        .take(LISTED_MONUMENTS)
        .map(|ranked| {
            format!(
                "• {} — {:.1} km ({})",
                ranked.monument.name, ranked.distance_km, ranked.monument.category
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Here are nearby attractions:\n{listing}")
}

fn pricing(nearby: &[RankedMonument]) -> String {
    let Some(nearest) = nearby.first() else {
        return "Please tell me which monument you're interested in for pricing information."
            .to_string();
    };

    let monument = &nearest.monument;
    let mut lines = vec![
        format!("Entry fees for {}:", monument.name),
        format!("• Indians: ₹{}", price_label(monument.pricing.indian.as_ref())),
        format!(
            "• Foreigners: ₹{}",
            price_label(monument.pricing.foreigner.as_ref())
        ),
        format!(
            "• Children under 15: {}",
            price_label(monument.pricing.children_under_15.as_ref())
        ),
    ];

    if !monument.fair_prices.is_empty() {
        lines.push(String::new());
        lines.push("Additional services:".to_string());
        for (service, price) in &monument.fair_prices {
            lines.push(format!(
                "• {}: {}",
                title_case(&service.replace('_', " ")),
                price_label(Some(price))
            ));
        }
    }

    lines.join("\n")
}

fn safety(nearby: &[RankedMonument]) -> String {
    // A nearest monument without warnings still falls through to the
    // generic advice.
    if let Some(nearest) = nearby.first() {
        if !nearest.monument.safety_warnings.is_empty() {
            let listing = nearest
                .monument
                .safety_warnings
                .iter()
                .take(LISTED_WARNINGS)
                .map(|warning| format!("• {warning}"))
                .collect::<Vec<_>>()
                .join("\n");

            return format!("Safety tips for {}:\n{listing}", nearest.monument.name);
        }
    }

    GENERIC_SAFETY_ADVICE.to_string()
}

fn information(nearby: &[RankedMonument]) -> String {
    let Some(nearest) = nearby.first() else {
        return "Please tell me which monument you'd like to know about.".to_string();
    };

    let monument = &nearest.monument;
    let combined = format!("{} {}", monument.description, monument.audio_script);

    format!("{}: {}", monument.name, clip(&combined, INFO_CLIP_CHARS))
}

fn directions(nearby: &[RankedMonument]) -> String {
    match nearby.first() {
        Some(nearest) => format!(
            "Coordinates for {}: {}, {}. Use Google Maps, Uber, or Delhi Metro for directions.",
            nearest.monument.name, nearest.monument.latitude, nearest.monument.longitude
        ),
        None => "Please specify which location you want directions to.".to_string(),
    }
}

fn timings(nearby: &[RankedMonument]) -> String {
    let Some(nearest) = nearby.first() else {
        return "Please specify which monument you're asking about.".to_string();
    };

    let monument = &nearest.monument;
    format!(
        "{} timings:\n• Hours: {}\n• Best time: {}",
        monument.name,
        monument.opening_hours.as_deref().unwrap_or("Not available"),
        monument
            .best_time_to_visit
            .as_deref()
            .unwrap_or("Not specified")
    )
}

fn price_label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
        None => "N/A".to_string(),
    }
}

fn title_case(input: &str) -> String {
    input
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect::<String>() + "..."
    }
}

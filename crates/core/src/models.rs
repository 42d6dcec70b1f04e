use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A monument record as loaded from the reference dataset. Immutable after
/// load; the authoritative set is read once at process start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monument {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub audio_script: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
    #[serde(default)]
    pub pricing: PricingTable,
    #[serde(default)]
    pub fair_prices: Map<String, Value>,
    #[serde(default)]
    pub safety_warnings: Vec<String>,
}

/// Entry fees per visitor class. Source data mixes numbers (fee in rupees)
/// and strings such as "Free", so the fields stay loosely typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub indian: Option<Value>,
    #[serde(default)]
    pub foreigner: Option<Value>,
    #[serde(default)]
    pub children_under_15: Option<Value>,
}

/// A monument annotated with its distance from a query point. Produced
/// transiently per query, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMonument {
    #[serde(flatten)]
    pub monument: Monument,
    pub distance_km: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SafetyData {
    #[serde(default)]
    pub general_tips: Vec<String>,
    #[serde(default)]
    pub area_specific: Vec<SafetyArea>,
    #[serde(default)]
    pub emergency_contacts: Map<String, Value>,
    #[serde(default)]
    pub transportation_scams: Vec<String>,
    #[serde(default)]
    pub shopping_scams: Vec<String>,
}

/// A location-triggered safety rule: its tips apply whenever the query point
/// falls within `radius_km` of the area center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyArea {
    #[serde(default)]
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
    #[serde(default)]
    pub tips: Vec<String>,
}

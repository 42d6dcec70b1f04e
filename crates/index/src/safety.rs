use std::path::Path;

use serde_json::{Map, Value};
use yatra_core::SafetyData;

use crate::geo::haversine_km;
use crate::{read_dataset, DatasetError};

/// Merges general safety tips with location-triggered area rules.
#[derive(Debug, Clone)]
pub struct SafetyAdvisor {
    data: SafetyData,
}

impl SafetyAdvisor {
    pub fn new(data: SafetyData) -> Self {
        Self { data }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Ok(Self::new(read_dataset(path)?))
    }

    /// General tips first, then tips of every area whose radius contains the
    /// query point. Deduplicated preserving first occurrence.
    pub fn resolve(&self, lat: f64, lon: f64) -> Vec<String> {
        let mut tips = self.data.general_tips.clone();

        for area in &self.data.area_specific {
            let distance = haversine_km(lat, lon, area.latitude, area.longitude);
            if distance <= area.radius_km {
                tips.extend(area.tips.iter().cloned());
            }
        }

        let mut unique = Vec::with_capacity(tips.len());
        for tip in tips {
            if !unique.contains(&tip) {
                unique.push(tip);
            }
        }

        unique
    }

    pub fn emergency_contacts(&self) -> &Map<String, Value> {
        &self.data.emergency_contacts
    }

    pub fn transportation_scams(&self) -> &[String] {
        &self.data.transportation_scams
    }

    pub fn shopping_scams(&self) -> &[String] {
        &self.data.shopping_scams
    }
}

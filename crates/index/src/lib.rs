pub mod geo;
pub mod safety;

use std::cmp::Ordering;
use std::path::Path;

use thiserror::Error;
use yatra_core::{Monument, RankedMonument};

pub use geo::haversine_km;
pub use safety::SafetyAdvisor;

/// Failure to load a reference dataset. Both datasets are startup-fatal for
/// the binaries; callers decide how to surface that.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed reading dataset file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in dataset file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub(crate) fn read_dataset<T: serde::de::DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<T, DatasetError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Read {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| DatasetError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Read-only monument catalog, queried by proximity and by identifier.
#[derive(Debug, Clone)]
pub struct MonumentIndex {
    monuments: Vec<Monument>,
}

impl MonumentIndex {
    pub fn new(monuments: Vec<Monument>) -> Self {
        Self { monuments }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Ok(Self::new(read_dataset(path)?))
    }

    /// Monuments within `radius_km` inclusive, ascending by distance. An
    /// empty result is valid, not an error.
    pub fn nearby(&self, lat: f64, lon: f64, radius_km: f64) -> Vec<RankedMonument> {
        let mut ranked = self
            .monuments
            .iter()
            .map(|monument| RankedMonument {
                distance_km: haversine_km(lat, lon, monument.latitude, monument.longitude),
                monument: monument.clone(),
            })
            .filter(|ranked| ranked.distance_km <= radius_km)
            .collect::<Vec<_>>();

        ranked.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(Ordering::Equal)
        });

        ranked
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Monument> {
        self.monuments.iter().find(|monument| monument.id == id)
    }

    /// Full catalog in load order.
    pub fn all(&self) -> &[Monument] {
        &self.monuments
    }

    pub fn len(&self) -> usize {
        self.monuments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monuments.is_empty()
    }
}

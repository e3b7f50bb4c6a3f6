//! Loading and lookup of station tables.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::Station;

use super::city::CityId;
use super::error::CatalogError;

/// Station table and line colours for one city.
///
/// Stations are kept in file order; ranking ties fall back to this order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityCatalog {
    /// Line identifier → display colour (e.g. `"2" → "#00A84D"`).
    #[serde(default)]
    pub line_colors: BTreeMap<String, String>,

    pub stations: Vec<Station>,
}

impl CityCatalog {
    /// Colour for a line, if the catalog defines one.
    pub fn line_color(&self, line: &str) -> Option<&str> {
        self.line_colors.get(line).map(String::as_str)
    }

    fn validate(&self, city: CityId) -> Result<(), CatalogError> {
        for station in &self.stations {
            station
                .position()
                .map_err(|e| CatalogError::InvalidStation {
                    city: city.to_string(),
                    name: station.name.clone(),
                    line: station.line.clone(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}

/// Immutable station catalogs for every supported city.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    cities: HashMap<CityId, CityCatalog>,
}

impl Catalog {
    /// Load catalogs from `{dir}/{city}.json` for every supported city.
    ///
    /// A missing file leaves that city with no stations. A file that
    /// exists but cannot be parsed, or that contains a station with
    /// invalid coordinates, is an error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        let mut cities = HashMap::new();

        for city in CityId::ALL {
            let path = dir.join(format!("{}.json", city.as_str()));

            if !path.is_file() {
                warn!(city = %city, path = ?path, "No station catalog found, city will be empty");
                continue;
            }

            let catalog = read_city(&path)?;
            catalog.validate(city)?;

            info!(city = %city, stations = catalog.stations.len(), "Loaded station catalog");
            cities.insert(city, catalog);
        }

        Ok(Self { cities })
    }

    /// Build a catalog from already-loaded tables.
    pub fn from_cities(
        cities: impl IntoIterator<Item = (CityId, CityCatalog)>,
    ) -> Result<Self, CatalogError> {
        let cities: HashMap<_, _> = cities.into_iter().collect();
        for (city, catalog) in &cities {
            catalog.validate(*city)?;
        }
        Ok(Self { cities })
    }

    /// The catalog for a city. Cities without data have an empty table.
    pub fn city(&self, city: CityId) -> &CityCatalog {
        static EMPTY: CityCatalog = CityCatalog {
            line_colors: BTreeMap::new(),
            stations: Vec::new(),
        };
        self.cities.get(&city).unwrap_or(&EMPTY)
    }

    /// Stations for a city, in catalog order.
    pub fn stations(&self, city: CityId) -> &[Station] {
        &self.city(city).stations
    }

    /// Total number of stations across all cities.
    pub fn len(&self) -> usize {
        self.cities.values().map(|c| c.stations.len()).sum()
    }

    /// Returns true if no city has any stations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn read_city(path: &Path) -> Result<CityCatalog, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|e| CatalogError::Json {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

//! Station records.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coord::{InvalidCoordinate, LatLng};

/// A station in a city catalog.
///
/// Catalog entries are reference data: loaded once and never mutated.
/// There is no numeric identifier; a station is identified by its
/// name and line together (see [`StationKey`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Name in the local language.
    pub name: String,

    /// Name in English, where the catalog has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,

    /// Line identifier (e.g. "2", "Central", "山手線").
    pub line: String,

    pub lat: f64,
    pub lng: f64,
}

impl Station {
    /// The station's position, validated.
    pub fn position(&self) -> Result<LatLng, InvalidCoordinate> {
        LatLng::new(self.lat, self.lng)
    }

    /// The key used to attach walking routes to this station.
    pub fn key(&self) -> StationKey {
        StationKey::new(&self.name, &self.line)
    }

    /// Name for display, with the English name appended when it differs.
    pub fn display_name(&self) -> String {
        match &self.name_en {
            Some(en) if en != &self.name => format!("{} ({})", self.name, en),
            _ => self.name.clone(),
        }
    }
}

/// A station with its straight-line distance from a query origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStation {
    #[serde(flatten)]
    pub station: Station,

    /// Great-circle distance from the origin in kilometres.
    pub distance: f64,
}

impl RankedStation {
    pub fn key(&self) -> StationKey {
        self.station.key()
    }
}

/// Composite name + line key.
///
/// Two different stations can share a name across lines, so the line is
/// part of the key. Two catalog entries sharing both collide.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationKey(String);

impl StationKey {
    pub fn new(name: &str, line: &str) -> Self {
        StationKey(format!("{name}-{line}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationKey({})", self.0)
    }
}

impl fmt::Display for StationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

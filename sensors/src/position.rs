use serde_json::{Map, Value};

use crate::{gps::Gps, number};

/// Positional sample as read from a stored payload.
///
/// Accepts `latitude`/`lat`, `longitude`/`lon`/`lng`, `altitude`/`alt` and
/// `speed` (km/h).
#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub altitude: Option<f64>,
    pub speed: Option<f64>,
}

impl PositionFix {
    /// Never fails: fields that are absent or not numbers are left empty.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let first = |keys: &[&str]| keys.iter().find_map(|key| number(payload, key));

        Self {
            latitude: first(&["latitude", "lat"]),
            longitude: first(&["longitude", "lon", "lng"]),
            altitude: first(&["altitude", "alt"]),
            speed: first(&["speed"]),
        }
    }

    /// Coordinates as a timestamped fix, if both are known.
    pub fn to_gps(&self, timestamp: std::time::Duration) -> Option<Gps> {
        Some(Gps {
            timestamp,
            latitude: self.latitude?,
            longitude: self.longitude?,
            altitude: self.altitude,
        })
    }
}

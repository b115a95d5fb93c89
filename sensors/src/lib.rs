//! Device-side views of telemetry payloads.
//!
//! Stored payloads are opaque JSON objects. The views here read the fields
//! derivations need and never reject a payload: anything absent or of the
//! wrong type is simply `None`.

pub mod gps;
pub mod imu;
pub mod nmea;
pub mod position;

pub use imu::{ImuReading, Triaxial};
pub use nmea::NmeaError;
pub use position::PositionFix;

use serde_json::{Map, Value};

/// Numeric field of a payload, if present.
fn number(payload: &Map<String, Value>, key: &str) -> Option<f64> {
    payload.get(key).and_then(Value::as_f64)
}

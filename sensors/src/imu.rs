use serde_json::{Map, Value};

use crate::number;

/// One three-axis measurement.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Triaxial {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Triaxial {
    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    /// Reads `{prefix}_x`, `{prefix}_y`, `{prefix}_z`, falling back to a nested
    /// `{prefix: {x, y, z}}` object.
    fn from_payload(payload: &Map<String, Value>, prefix: &str, bare_axes: bool) -> Option<Self> {
        let flat = |axis: &str| {
            number(payload, &format!("{prefix}_{axis}"))
                .or_else(|| bare_axes.then(|| number(payload, axis)).flatten())
        };

        if let (Some(x), Some(y), Some(z)) = (flat("x"), flat("y"), flat("z")) {
            return Some(Self { x, y, z });
        }

        let nested = payload.get(prefix)?.as_object()?;

        Some(Self {
            x: number(nested, "x")?,
            y: number(nested, "y")?,
            z: number(nested, "z")?,
        })
    }
}

/// Inertial sample as read from a stored payload.
///
/// Accepted shapes for acceleration (in g): `accel_x`/`accel_y`/`accel_z`,
/// bare `x`/`y`/`z`, or a nested `accel` object. Angular velocity
/// (deg/s) uses the `gyro` prefix the same way, without the bare form.
#[derive(Debug, Clone, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImuReading {
    pub acceleration: Option<Triaxial>,
    pub angular_velocity: Option<Triaxial>,
}

impl ImuReading {
    /// Never fails: fields that are absent or not numbers are left empty.
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        Self {
            acceleration: Triaxial::from_payload(payload, "accel", true),
            angular_velocity: Triaxial::from_payload(payload, "gyro", false),
        }
    }

    pub fn acceleration_magnitude(&self) -> Option<f64> {
        self.acceleration.map(|this| this.magnitude())
    }
}

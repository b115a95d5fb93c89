//! # Activity state
//!
//! Maps the current speed reading to a discrete activity.
//!
//! Brackets with default thresholds:
//!
//! - Idle - below `3` km/h
//! - Walking - from `3` up to (but excluding) `12` km/h
//! - Riding - `12` km/h and above
//!
//! Lower bounds belong to the upper bracket. There is no hysteresis: each
//! reading is classified on its own, so the state follows the input even
//! when it oscillates around a threshold.

/// Lower bound of the walking bracket in km/h
pub const WALKING_THRESHOLD_KMPHR: f64 = 3.0;
/// Lower bound of the riding bracket in km/h
pub const RIDING_THRESHOLD_KMPHR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ActivityState {
    Idle,
    Walking,
    Riding,
}

impl ActivityState {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActivityState::Idle => "idle",
            ActivityState::Walking => "walking",
            ActivityState::Riding => "riding",
        }
    }
}

impl std::fmt::Display for ActivityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Speed in km/h from which movement counts as walking
    pub walking_kmphr: f64,
    /// Speed in km/h from which movement counts as riding
    pub riding_kmphr: f64,
}

impl Thresholds {
    pub const fn new() -> Self {
        Self {
            walking_kmphr: WALKING_THRESHOLD_KMPHR,
            riding_kmphr: RIDING_THRESHOLD_KMPHR,
        }
    }

    pub const fn set_walking_kmphr(mut self, walking_kmphr: f64) -> Self {
        self.walking_kmphr = walking_kmphr;
        self
    }

    pub const fn set_riding_kmphr(mut self, riding_kmphr: f64) -> Self {
        self.riding_kmphr = riding_kmphr;
        self
    }

    /// Classify a single speed reading.
    ///
    /// # Params
    /// - `speed` - speed in km/h
    pub fn classify(&self, speed: f64) -> ActivityState {
        if speed < self.walking_kmphr {
            return ActivityState::Idle;
        }

        if speed < self.riding_kmphr {
            return ActivityState::Walking;
        }

        ActivityState::Riding
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify speed in km/h using default thresholds.
#[inline]
pub fn classify(speed: f64) -> ActivityState {
    Thresholds::new().classify(speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(2.99), ActivityState::Idle);
        assert_eq!(classify(3.0), ActivityState::Walking);
        assert_eq!(classify(11.99), ActivityState::Walking);
        assert_eq!(classify(12.0), ActivityState::Riding);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(classify(0.0), ActivityState::Idle);
        assert_eq!(classify(-1.0), ActivityState::Idle);
        assert_eq!(classify(50.0), ActivityState::Riding);
        assert_eq!(classify(f64::INFINITY), ActivityState::Riding);
    }

    #[test]
    fn test_nan_falls_through_to_riding() {
        assert_eq!(classify(f64::NAN), ActivityState::Riding);
    }

    #[test]
    fn test_same_input_same_output() {
        let readings = [2.5, 12.0, 7.0, 2.5, 12.0, 7.0];

        let actual = readings.iter().map(|this| classify(*this)).collect::<Vec<_>>();

        assert_eq!(actual[..3], actual[3..]);
    }

    #[test]
    fn test_oscillation_is_not_smoothed() {
        let readings = [2.9, 3.0, 2.9, 3.0];

        let expected = [
            ActivityState::Idle,
            ActivityState::Walking,
            ActivityState::Idle,
            ActivityState::Walking,
        ];
        let actual = readings.map(classify);

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = Thresholds::new()
            .set_walking_kmphr(1.0)
            .set_riding_kmphr(8.0);

        assert_eq!(thresholds.classify(0.5), ActivityState::Idle);
        assert_eq!(thresholds.classify(1.0), ActivityState::Walking);
        assert_eq!(thresholds.classify(7.99), ActivityState::Walking);
        assert_eq!(thresholds.classify(8.0), ActivityState::Riding);
    }

    #[test]
    fn test_display() {
        assert_eq!(ActivityState::Idle.to_string(), "idle");
        assert_eq!(ActivityState::Walking.to_string(), "walking");
        assert_eq!(ActivityState::Riding.to_string(), "riding");
    }
}

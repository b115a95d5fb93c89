//! Live chart feed and current activity derivation.

use activity_state::{ActivityState, Thresholds};
use sample_store::Sample;
use sensors::{PositionFix, gps};
use sliding_window::{SlidingWindow, WindowSample};
use time::{OffsetDateTime, macros::format_description};

/// One window per chart series.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveFeed {
    /// km/h, from positional samples
    speed: SlidingWindow,
    /// Acceleration magnitude in g, from inertial samples
    acceleration: SlidingWindow,
}

impl LiveFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            speed: SlidingWindow::new(capacity),
            acceleration: SlidingWindow::new(capacity),
        }
    }

    pub fn record_speed(&mut self, at: OffsetDateTime, speed: f64) {
        self.speed.push(reading(at, speed));
    }

    pub fn record_acceleration(&mut self, at: OffsetDateTime, magnitude: f64) {
        self.acceleration.push(reading(at, magnitude));
    }

    pub fn speed(&self) -> &SlidingWindow {
        &self.speed
    }

    pub fn acceleration(&self) -> &SlidingWindow {
        &self.acceleration
    }
}

fn reading(at: OffsetDateTime, value: f64) -> WindowSample {
    let time = at
        .format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_default();

    WindowSample::new(time, (value * 100.0).round() / 100.0)
}

/// Activity derived from the newest positional sample.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CurrentActivity {
    pub activity: Option<ActivityState>,
    /// km/h
    pub speed: Option<f64>,
}

impl CurrentActivity {
    pub fn from_speed(speed: Option<f64>, thresholds: &Thresholds) -> Self {
        Self {
            activity: speed.map(|this| thresholds.classify(this)),
            speed,
        }
    }
}

/// Speed of `latest` in km/h.
///
/// A reported `speed` field wins. Otherwise speed is inferred from the
/// distance to `previous` over the time between their receipt, which needs
/// coordinates on both samples.
pub fn current_speed(previous: Option<&Sample>, latest: &Sample) -> Option<f64> {
    let fix = PositionFix::from_payload(latest.payload());

    if let Some(speed) = fix.speed {
        return Some(speed);
    }

    let previous = previous?;
    let from = PositionFix::from_payload(previous.payload()).to_gps(previous.unix_timestamp())?;
    let to = fix.to_gps(latest.unix_timestamp())?;

    gps::speed_kmphr(&from, &to)
}

//! # Gateway
//!
//! HTTP surface of the telemetry pipeline.
//!
//! Samples posted by the device go straight into the [`SampleStore`]. Each
//! accepted sample also feeds the live chart windows, and the current
//! activity is derived on request from the newest positional sample.
//! Nothing is persisted: all state lives as long as the process.

pub mod config;
pub mod error;
pub mod live;
mod routes;

pub use config::Config;
pub use error::GatewayError;
pub use routes::router;

use activity_state::Thresholds;
use live::{CurrentActivity, LiveFeed};
use parking_lot::Mutex;
use sample_store::{Sample, SampleStore, Snapshot, StreamKind};
use sensors::ImuReading;
use serde_json::{Map, Value};

#[derive(Debug)]
pub struct Gateway {
    store: SampleStore,
    live: Mutex<LiveFeed>,
    thresholds: Thresholds,
}

impl Gateway {
    pub fn new(thresholds: Thresholds, window_capacity: usize) -> Self {
        Self {
            store: SampleStore::new(),
            live: Mutex::new(LiveFeed::new(window_capacity)),
            thresholds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.thresholds(), config.window_capacity)
    }

    /// Store a sample and push whatever it yields to the live feed.
    ///
    /// The live feed lock is held across the append so window order matches
    /// store order under concurrent submits.
    pub fn submit(&self, kind: StreamKind, payload: Map<String, Value>) -> Sample {
        let mut feed = self.live.lock();

        let sample = self.store.append(kind, payload);

        match kind {
            StreamKind::Gps => {
                let previous = self.store.get(kind, sample.id() - 1);

                if let Some(speed) = live::current_speed(previous.as_ref(), &sample) {
                    feed.record_speed(sample.received_at(), speed);
                }
            }
            StreamKind::Imu => {
                let reading = ImuReading::from_payload(sample.payload());

                if let Some(magnitude) = reading.acceleration_magnitude() {
                    feed.record_acceleration(sample.received_at(), magnitude);
                }
            }
        }

        sample
    }

    pub fn query(&self, kind: StreamKind) -> Snapshot {
        self.store.list_all(kind)
    }

    pub fn current_activity(&self) -> CurrentActivity {
        let speed = self.store.latest(StreamKind::Gps).and_then(|latest| {
            let previous = self.store.get(StreamKind::Gps, latest.id() - 1);

            live::current_speed(previous.as_ref(), &latest)
        });

        CurrentActivity::from_speed(speed, &self.thresholds)
    }

    /// Copy of the live feed.
    pub fn live(&self) -> LiveFeed {
        self.live.lock().clone()
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }
}

impl Default for Gateway {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn speed(value: u64) -> Map<String, Value> {
        json!({ "speed": value }).as_object().cloned().expect("object literal")
    }

    #[test]
    fn test_live_window_follows_store_order_under_concurrent_submits() {
        let threads = 8;
        let per_thread = 500;
        let gateway = Gateway::new(Thresholds::default(), threads * per_thread);

        std::thread::scope(|scope| {
            for t in 0..threads {
                let gateway = &gateway;

                scope.spawn(move || {
                    for i in 0..per_thread {
                        gateway.submit(StreamKind::Gps, speed((t * per_thread + i) as u64));
                    }
                });
            }
        });

        let expected = gateway
            .query(StreamKind::Gps)
            .samples
            .iter()
            .map(|this| this.payload()["speed"].as_f64().expect("numeric speed"))
            .collect::<Vec<_>>();

        let actual = gateway
            .live()
            .speed()
            .iter()
            .map(|this| this.value)
            .collect::<Vec<_>>();

        assert_eq!(expected.len(), threads * per_thread);
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_imu_without_axes_skips_live_feed() {
        let gateway = Gateway::default();

        let sample = gateway.submit(StreamKind::Imu, speed(1));

        assert_eq!(sample.id(), 1);
        assert!(gateway.live().acceleration().is_empty());
    }
}

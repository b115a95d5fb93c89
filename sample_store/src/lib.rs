//! # Sample store
//!
//! In-memory, append-only record of telemetry samples, one stream per
//! sensor kind.
//!
//! The store owns identity and receipt time: each sample gets
//! `id = stream length + 1` and the current UTC time, overriding any `id` or
//! `timestamp` the client sent. Payloads are otherwise stored verbatim, no
//! matter which fields they carry. Samples are never updated or removed and
//! live as long as the store.
//!
//! Every stream sits behind its own lock, so id assignment is atomic per
//! stream and the two streams never contend.

mod sample;
mod stream;

pub use sample::{RESERVED_KEYS, Sample};
pub use stream::Stream;

use parking_lot::RwLock;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StreamKind {
    /// Accelerometer and gyroscope readings
    Imu,
    /// Position, altitude and speed fixes
    Gps,
}

impl StreamKind {
    pub const fn label(self) -> &'static str {
        match self {
            StreamKind::Imu => "IMU",
            StreamKind::Gps => "GPS",
        }
    }
}

impl std::fmt::Display for StreamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Full copy of a stream at one point in time.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Snapshot {
    pub count: usize,
    pub samples: Vec<Sample>,
}

#[derive(Debug, Default)]
pub struct SampleStore {
    imu: RwLock<Stream>,
    gps: RwLock<Stream>,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn stream(&self, kind: StreamKind) -> &RwLock<Stream> {
        match kind {
            StreamKind::Imu => &self.imu,
            StreamKind::Gps => &self.gps,
        }
    }

    /// Store a payload and return it with its assigned id and receipt time.
    pub fn append(&self, kind: StreamKind, payload: Map<String, Value>) -> Sample {
        let sample = self.stream(kind).write().append(payload);

        tracing::debug!(
            stream = %kind,
            id = sample.id(),
            fields = sample.payload().len(),
            "sample stored"
        );

        sample
    }

    pub fn list_all(&self, kind: StreamKind) -> Snapshot {
        let stream = self.stream(kind).read();

        Snapshot {
            count: stream.len(),
            samples: stream.samples().to_vec(),
        }
    }

    pub fn len(&self, kind: StreamKind) -> usize {
        self.stream(kind).read().len()
    }

    pub fn is_empty(&self, kind: StreamKind) -> bool {
        self.stream(kind).read().is_empty()
    }

    pub fn latest(&self, kind: StreamKind) -> Option<Sample> {
        self.stream(kind).read().latest().cloned()
    }

    pub fn get(&self, kind: StreamKind, id: u64) -> Option<Sample> {
        self.stream(kind).read().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use time::{Duration, OffsetDateTime, format_description::well_known::Rfc3339, macros::datetime};

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn test_ids_are_dense_and_one_based() {
        let store = SampleStore::new();

        let expected = (1..=25).collect::<Vec<u64>>();

        let actual = (0..25)
            .map(|i| store.append(StreamKind::Imu, payload(json!({ "x": i }))).id())
            .collect::<Vec<_>>();

        assert_eq!(expected, actual);
        assert_eq!(store.len(StreamKind::Imu), 25);
    }

    #[test]
    fn test_append_only() {
        let store = SampleStore::new();

        store.append(StreamKind::Gps, payload(json!({"speed": 1.0})));
        store.append(StreamKind::Gps, payload(json!({"speed": 2.0})));

        let before = store.list_all(StreamKind::Gps);

        let stored = store.append(StreamKind::Gps, payload(json!({"speed": 3.0})));

        let after = store.list_all(StreamKind::Gps);

        assert_eq!(after.count, before.count + 1);
        assert_eq!(after.samples[..before.count], before.samples[..]);
        assert_eq!(after.samples.last(), Some(&stored));
    }

    #[test]
    fn test_streams_are_independent() {
        let store = SampleStore::new();

        store.append(StreamKind::Gps, payload(json!({"latitude": 1.0})));
        let gps = store.list_all(StreamKind::Gps);

        store.append(StreamKind::Imu, payload(json!({"x": 1})));
        store.append(StreamKind::Imu, payload(json!({"x": 2})));

        assert_eq!(store.list_all(StreamKind::Gps), gps);
        assert_eq!(store.len(StreamKind::Imu), 2);

        let first_gps_after = store.append(StreamKind::Gps, payload(json!({})));
        assert_eq!(first_gps_after.id(), 2);
    }

    #[test]
    fn test_client_id_and_timestamp_are_overridden() {
        let store = SampleStore::new();

        let sample = store.append(
            StreamKind::Imu,
            payload(json!({"id": 999, "timestamp": "bogus", "x": 1})),
        );

        assert_eq!(sample.id(), 1);
        assert_eq!(sample.payload().get("id"), None);
        assert_eq!(sample.payload().get("timestamp"), None);

        let serialized = serde_json::to_value(&sample).expect("serializable");

        assert_eq!(serialized["id"], 1);
        assert_ne!(serialized["timestamp"], "bogus");
        assert_eq!(serialized["x"], 1);
    }

    #[test]
    fn test_partial_payloads_are_stored() {
        let store = SampleStore::new();

        store.append(StreamKind::Gps, payload(json!({})));
        store.append(StreamKind::Gps, payload(json!({"latitude": null})));
        store.append(StreamKind::Gps, payload(json!({"note": "no fix yet", "nested": {"a": [1, 2]}})));

        let snapshot = store.list_all(StreamKind::Gps);

        assert_eq!(snapshot.count, 3);
        assert_eq!(snapshot.samples[1].payload()["latitude"], Value::Null);
        assert_eq!(snapshot.samples[2].payload()["nested"], json!({"a": [1, 2]}));
    }

    #[test]
    fn test_payload_keeps_submission_order() {
        let store = SampleStore::new();

        let sample = store.append(StreamKind::Imu, payload(json!({"z": 1, "a": 2, "m": 3})));

        let serialized = serde_json::to_string(&sample).expect("serializable");

        assert!(serialized.starts_with(r#"{"z":1,"a":2,"m":3,"timestamp":""#), "{serialized}");
        assert!(serialized.ends_with(r#","id":1}"#), "{serialized}");
    }

    #[test]
    fn test_receipt_time_never_goes_back() {
        let mut stream = Stream::new();

        let first = stream.append_at(Map::new(), datetime!(2025-01-01 12:00:00 UTC));
        let second = stream.append_at(Map::new(), datetime!(2025-01-01 11:59:00 UTC));
        let third = stream.append_at(Map::new(), datetime!(2025-01-01 12:00:05 UTC));

        assert_eq!(first.received_at(), datetime!(2025-01-01 12:00:00 UTC));
        assert_eq!(second.received_at(), first.received_at());
        assert_eq!(third.received_at(), datetime!(2025-01-01 12:00:05 UTC));
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let mut stream = Stream::new();

        let sample = stream.append_at(Map::new(), datetime!(2025-01-01 12:00:00.123 UTC));

        let serialized = serde_json::to_value(&sample).expect("serializable");

        assert_eq!(serialized["timestamp"], "2025-01-01T12:00:00.123Z");
    }

    #[test]
    fn test_live_timestamp_round_trips() {
        let store = SampleStore::new();
        let before = OffsetDateTime::now_utc() - Duration::seconds(1);

        let sample = store.append(StreamKind::Imu, Map::new());

        let serialized = serde_json::to_value(&sample).expect("serializable");
        let parsed = OffsetDateTime::parse(
            serialized["timestamp"].as_str().expect("string timestamp"),
            &Rfc3339,
        )
        .expect("rfc3339");

        assert_eq!(parsed, sample.received_at());
        assert!(parsed >= before);
        assert_eq!(parsed.nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn test_latest_and_get() {
        let store = SampleStore::new();

        assert_eq!(store.latest(StreamKind::Gps), None);
        assert!(store.is_empty(StreamKind::Gps));

        (1..=4).for_each(|i| {
            store.append(StreamKind::Gps, payload(json!({ "speed": i })));
        });

        assert_eq!(store.latest(StreamKind::Gps).map(|this| this.id()), Some(4));

        let third = store.get(StreamKind::Gps, 3).expect("stored");
        assert_eq!(third.payload()["speed"], 3);

        assert_eq!(store.get(StreamKind::Gps, 0), None);
        assert_eq!(store.get(StreamKind::Gps, 5), None);
        assert_eq!(store.get(StreamKind::Imu, 1), None);
    }

    #[test]
    fn test_concurrent_appends_get_unique_ids() {
        let store = SampleStore::new();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        store.append(StreamKind::Imu, Map::new());
                    }
                });
            }
        });

        let ids = store
            .list_all(StreamKind::Imu)
            .samples
            .iter()
            .map(Sample::id)
            .collect::<Vec<_>>();

        assert_eq!(ids, (1..=400).collect::<Vec<u64>>());
    }
}

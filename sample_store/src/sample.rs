use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Payload keys assigned by the store. Client values under these keys are dropped.
pub const RESERVED_KEYS: [&str; 2] = ["id", "timestamp"];

/// One stored record.
///
/// Serializes as the client payload with `timestamp` (RFC 3339) and `id`
/// appended.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Sample {
    #[serde(flatten)]
    payload: Map<String, Value>,
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    received_at: OffsetDateTime,
    id: u64,
}

impl Sample {
    pub(crate) fn new(mut payload: Map<String, Value>, received_at: OffsetDateTime, id: u64) -> Self {
        RESERVED_KEYS.iter().for_each(|key| {
            payload.remove(*key);
        });

        Self {
            payload,
            received_at,
            id,
        }
    }

    /// 1-based position in its stream
    pub const fn id(&self) -> u64 {
        self.id
    }

    pub const fn received_at(&self) -> OffsetDateTime {
        self.received_at
    }

    /// Client fields as submitted, minus [`RESERVED_KEYS`]
    pub const fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Receipt time as a duration since the UNIX epoch.
    pub fn unix_timestamp(&self) -> std::time::Duration {
        (self.received_at - OffsetDateTime::UNIX_EPOCH).unsigned_abs()
    }
}

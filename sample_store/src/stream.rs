use serde_json::{Map, Value};
use time::OffsetDateTime;

use crate::Sample;

/// Append-only log of one sensor's samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stream {
    samples: Vec<Sample>,
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a payload received now.
    pub fn append(&mut self, payload: Map<String, Value>) -> Sample {
        self.append_at(payload, now())
    }

    /// Store a payload received at `now`.
    ///
    /// Receipt time never goes backwards within a stream: if the clock
    /// stepped back, the previous sample's time is reused.
    pub fn append_at(&mut self, payload: Map<String, Value>, now: OffsetDateTime) -> Sample {
        let received_at = match self.samples.last() {
            Some(last) if last.received_at() > now => last.received_at(),
            _ => now,
        };

        let id = self.samples.len() as u64 + 1;
        let sample = Sample::new(payload, received_at, id);

        self.samples.push(sample.clone());

        sample
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Samples in insertion order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Sample with the given id, ids being 1-based positions.
    pub fn get(&self, id: u64) -> Option<&Sample> {
        let index = usize::try_from(id.checked_sub(1)?).ok()?;

        self.samples.get(index)
    }
}

/// Current UTC time truncated to milliseconds.
fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();

    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}

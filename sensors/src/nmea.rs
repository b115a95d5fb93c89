//! NMEA 0183 decoding for GPS receivers.
//!
//! Two sentences carry everything a positional sample needs:
//!
//! - `GGA` - fix time, latitude, longitude, fix quality, satellites in use, altitude
//! - `RMC` - speed over ground (knots) and date
//!
//! Coordinates arrive as `DDMM.MMMM` (latitude) or `DDDMM.MMMM` (longitude)
//! followed by a hemisphere letter and are converted to decimal degrees.
//! Other sentence types are recognised as [`Sentence::Other`] and ignored by
//! [`Receiver`].

use serde_json::{Map, Value};

/// Kilometers per hour in one knot
pub const KNOT_KMPHR: f64 = 1.852;

const GGA_FIELDS: usize = 15;
const RMC_FIELDS: usize = 10;
const COORDINATE_PRECISION: f64 = 1_000_000.0;
const MIN_SATELLITES_FOR_FIX: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NmeaError {
    #[error("sentence must start with '$': {0:?}")]
    MissingStart(String),
    #[error("checksum mismatch: sentence says {expected:02X}, computed {actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },
    #[error("malformed checksum {0:?}")]
    MalformedChecksum(String),
    #[error("{kind} sentence has {actual} fields, expected at least {expected}")]
    TooShort {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid {field} value {value:?}")]
    InvalidField { field: &'static str, value: String },
}

/// GGA: global positioning system fix data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gga {
    /// UTC time of fix as `HH:MM:SS`
    pub time: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// `0` means no fix
    pub fix_quality: u8,
    pub satellites: u8,
    /// Meters above mean sea level
    pub altitude: Option<f64>,
}

/// RMC: recommended minimum specific GNSS data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rmc {
    pub speed_kmphr: Option<f64>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sentence {
    Gga(Gga),
    Rmc(Rmc),
    /// Valid sentence of a type we don't decode, e.g. `GSV`
    Other(String),
}

/// Decode one sentence, verifying the `*hh` checksum when present.
pub fn parse(line: &str) -> Result<Sentence, NmeaError> {
    let line = line.trim();

    let body = line
        .strip_prefix('$')
        .ok_or_else(|| NmeaError::MissingStart(line.to_owned()))?;

    let body = match body.split_once('*') {
        Some((body, checksum)) => {
            verify_checksum(body, checksum)?;
            body
        }
        None => body,
    };

    let parts = body.split(',').collect::<Vec<_>>();
    let address = parts.first().copied().unwrap_or_default();

    // Talker id (GP, GN, GL, ...) is irrelevant, the type is the last three letters.
    let kind = address.get(address.len().saturating_sub(3)..).unwrap_or_default();

    match kind {
        "GGA" => parse_gga(&parts).map(Sentence::Gga),
        "RMC" => parse_rmc(&parts).map(Sentence::Rmc),
        _ => Ok(Sentence::Other(address.to_owned())),
    }
}

fn verify_checksum(body: &str, checksum: &str) -> Result<(), NmeaError> {
    let expected = u8::from_str_radix(checksum.trim(), 16)
        .map_err(|_| NmeaError::MalformedChecksum(checksum.to_owned()))?;

    let actual = body.bytes().fold(0u8, |acc, this| acc ^ this);

    if expected != actual {
        return Err(NmeaError::ChecksumMismatch { expected, actual });
    }

    Ok(())
}

fn parse_gga(parts: &[&str]) -> Result<Gga, NmeaError> {
    if parts.len() < GGA_FIELDS {
        return Err(NmeaError::TooShort {
            kind: "GGA",
            expected: GGA_FIELDS,
            actual: parts.len(),
        });
    }

    Ok(Gga {
        time: clock(parts[1]),
        latitude: coordinate(parts[2], parts[3])?,
        longitude: coordinate(parts[4], parts[5])?,
        fix_quality: integer("fix quality", parts[6])?,
        satellites: integer("satellites", parts[7])?,
        altitude: decimal("altitude", parts[9])?,
    })
}

fn parse_rmc(parts: &[&str]) -> Result<Rmc, NmeaError> {
    if parts.len() < RMC_FIELDS {
        return Err(NmeaError::TooShort {
            kind: "RMC",
            expected: RMC_FIELDS,
            actual: parts.len(),
        });
    }

    Ok(Rmc {
        speed_kmphr: decimal("speed", parts[7])?.map(|knots| knots * KNOT_KMPHR),
        date: date(parts[9]),
    })
}

/// `hhmmss.ss` -> `hh:mm:ss`
fn clock(raw: &str) -> Option<String> {
    let (hours, minutes, seconds) = (raw.get(0..2)?, raw.get(2..4)?, raw.get(4..6)?);

    Some(format!("{hours}:{minutes}:{seconds}"))
}

/// `ddmmyy` -> `20yy-mm-dd`
fn date(raw: &str) -> Option<String> {
    let (day, month, year) = (raw.get(0..2)?, raw.get(2..4)?, raw.get(4..6)?);

    Some(format!("20{year}-{month}-{day}"))
}

fn coordinate(raw: &str, direction: &str) -> Result<Option<f64>, NmeaError> {
    if raw.is_empty() || direction.is_empty() {
        return Ok(None);
    }

    let (degree_digits, field) = match direction {
        "N" | "S" => (2, "latitude"),
        "E" | "W" => (3, "longitude"),
        _ => {
            return Err(NmeaError::InvalidField {
                field: "hemisphere",
                value: direction.to_owned(),
            });
        }
    };

    let invalid = || NmeaError::InvalidField {
        field,
        value: raw.to_owned(),
    };

    let degrees = raw
        .get(..degree_digits)
        .and_then(|this| this.parse::<f64>().ok())
        .ok_or_else(invalid)?;
    let minutes = raw
        .get(degree_digits..)
        .and_then(|this| this.parse::<f64>().ok())
        .ok_or_else(invalid)?;

    let decimal = degrees + minutes / 60.0;
    let decimal = match direction {
        "S" | "W" => -decimal,
        _ => decimal,
    };

    Ok(Some((decimal * COORDINATE_PRECISION).round() / COORDINATE_PRECISION))
}

fn decimal(field: &'static str, raw: &str) -> Result<Option<f64>, NmeaError> {
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse().map(Some).map_err(|_| NmeaError::InvalidField {
        field,
        value: raw.to_owned(),
    })
}

fn integer(field: &'static str, raw: &str) -> Result<u8, NmeaError> {
    if raw.is_empty() {
        return Ok(0);
    }

    raw.parse().map_err(|_| NmeaError::InvalidField {
        field,
        value: raw.to_owned(),
    })
}

/// Accumulates the latest GGA and RMC data of one receiver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Receiver {
    gga: Option<Gga>,
    rmc: Option<Rmc>,
}

impl Receiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a line and keep what it carries. Blank lines and sentence types
    /// we don't decode are skipped.
    pub fn feed(&mut self, line: &str) -> Result<(), NmeaError> {
        if line.trim().is_empty() {
            return Ok(());
        }

        match parse(line)? {
            Sentence::Gga(gga) => self.gga = Some(gga),
            Sentence::Rmc(rmc) => self.rmc = Some(rmc),
            Sentence::Other(_) => {}
        }

        Ok(())
    }

    pub fn has_fix(&self) -> bool {
        self.gga
            .as_ref()
            .is_some_and(|this| this.fix_quality > 0 && this.satellites >= MIN_SATELLITES_FOR_FIX)
    }

    /// Positional payload built from everything received so far, `None` if no
    /// GGA or RMC sentence was decoded.
    pub fn payload(&self) -> Option<Map<String, Value>> {
        if self.gga.is_none() && self.rmc.is_none() {
            return None;
        }

        let mut payload = Map::new();
        let mut insert = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                payload.insert(key.to_owned(), value);
            }
        };

        if let Some(gga) = &self.gga {
            insert("latitude", gga.latitude.map(Value::from));
            insert("longitude", gga.longitude.map(Value::from));
            insert("altitude", gga.altitude.map(Value::from));
            insert("time", gga.time.clone().map(Value::from));
            insert("satellites", Some(gga.satellites.into()));
            insert("fix_quality", Some(gga.fix_quality.into()));
        }

        if let Some(rmc) = &self.rmc {
            insert("speed", rmc.speed_kmphr.map(Value::from));
            insert("date", rmc.date.clone().map(Value::from));
        }

        Some(payload)
    }
}

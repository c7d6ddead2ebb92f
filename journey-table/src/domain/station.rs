//! Station identifier types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Longest station code we accept (light rail codes are `LR` plus three digits).
const MAX_CODE_LEN: usize = 5;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A short, stable station or stop code such as `ADM` or `LR001`.
///
/// Codes are 1 to 5 characters drawn from uppercase ASCII letters and
/// digits. This type guarantees that any `StationCode` value is valid by
/// construction, and it is `Copy` so hops and table keys can hold it freely.
///
/// # Examples
///
/// ```
/// use journey_table::domain::StationCode;
///
/// let adm = StationCode::parse("ADM").unwrap();
/// assert_eq!(adm.as_str(), "ADM");
///
/// let stop = StationCode::parse("LR001").unwrap();
/// assert_eq!(stop.as_str(), "LR001");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("adm").is_err());
///
/// // Too long is rejected
/// assert!(StationCode::parse("LR0001").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode {
    // Unused trailing bytes are zero, so the derived ordering matches string ordering.
    bytes: [u8; MAX_CODE_LEN],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let raw = s.as_bytes();

        if raw.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if raw.len() > MAX_CODE_LEN {
            return Err(InvalidStationCode {
                reason: "must be at most 5 characters",
            });
        }

        if !raw
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidStationCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        let mut bytes = [0u8; MAX_CODE_LEN];
        bytes[..raw.len()].copy_from_slice(raw);

        Ok(StationCode {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Code for a light rail stop: `LR` followed by the zero-padded stop id.
    pub fn light_rail_stop(id: StationId) -> Result<Self, InvalidStationCode> {
        Self::parse(&format!("LR{:03}", id.0))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII letters and digits are ever stored.
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap_or_default()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StationCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Numeric station or stop identifier used by the journey API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(pub u32);

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

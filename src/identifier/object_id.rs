//! 12-byte document identifier
//!
//! Layout:
//! - bytes 0..4: seconds since the Unix epoch, big-endian
//! - bytes 4..9: random value fixed for the lifetime of the process
//! - bytes 9..12: counter, big-endian, randomly seeded, incremented per id

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use rand::{Rng, RngCore};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use super::errors::{IdentifierError, IdentifierResult};

const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

fn process_unique() -> &'static [u8; 5] {
    PROCESS_UNIQUE.get_or_init(|| {
        let mut bytes = [0u8; 5];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes
    })
}

fn next_count() -> u32 {
    let counter =
        COUNTER.get_or_init(|| AtomicU32::new(rand::thread_rng().gen_range(0..=COUNTER_MASK)));
    counter.fetch_add(1, Ordering::SeqCst) & COUNTER_MASK
}

/// Native document identifier
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Raw length in bytes
    pub const LEN: usize = 12;

    /// Length of the hexadecimal rendering
    pub const HEX_LEN: usize = 24;

    /// Generate a fresh identifier.
    ///
    /// Unique within the process even when called from many threads at once:
    /// the counter is shared and advanced atomically.
    pub fn new() -> Self {
        let secs = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let count = next_count();

        let mut bytes = [0u8; Self::LEN];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Parse a 24-character hexadecimal token
    pub fn parse(raw: &str) -> IdentifierResult<Self> {
        if raw.len() != Self::HEX_LEN {
            return Err(IdentifierError::InvalidLength {
                expected: Self::HEX_LEN,
                actual: raw.chars().count(),
            });
        }
        if let Some(bad) = raw.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(IdentifierError::InvalidCharacter(bad));
        }

        let mut bytes = [0u8; Self::LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            let pair = &raw[i * 2..i * 2 + 2];
            *byte = u8::from_str_radix(pair, 16)
                .map_err(|_| IdentifierError::InvalidCharacter(pair.chars().next().unwrap_or('?')))?;
        }
        Ok(Self(bytes))
    }

    /// Creation time encoded in the first four bytes
    pub fn timestamp(&self) -> DateTime<Utc> {
        let secs = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        Utc.timestamp_opt(secs as i64, 0).single().unwrap_or_default()
    }

    /// Lowercase hexadecimal rendering
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_hex_rendering_is_lowercase() {
        let id = ObjectId::parse("624724AF974AEF308FF7CC6A").unwrap();
        assert_eq!(id.to_string(), "624724af974aef308ff7cc6a");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        let err = ObjectId::parse("624724af").unwrap_err();
        assert_eq!(
            err,
            IdentifierError::InvalidLength {
                expected: 24,
                actual: 8
            }
        );
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        let err = ObjectId::parse("624724af974aef308ff7cc6z").unwrap_err();
        assert_eq!(err, IdentifierError::InvalidCharacter('z'));
    }

    #[test]
    fn test_parse_rejects_multibyte_input() {
        // 24 bytes, fewer chars
        let raw = "é".repeat(12);
        assert!(ObjectId::parse(&raw).is_err());
    }

    #[test]
    fn test_generated_ids_parse_back() {
        let id = ObjectId::new();
        assert_eq!(ObjectId::parse(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn test_timestamp_is_recent() {
        let before = Utc::now().timestamp();
        let id = ObjectId::new();
        let after = Utc::now().timestamp();

        let ts = id.timestamp().timestamp();
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn test_concurrent_generation_is_unique() {
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(|| (0..1000).map(|_| ObjectId::new()).collect::<Vec<_>>()))
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(seen.len(), 8000);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id = ObjectId::parse("624724af974aef308ff7cc6a").unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!("624724af974aef308ff7cc6a"));

        let back: ObjectId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);

        let bad: Result<ObjectId, _> = serde_json::from_value(serde_json::json!("nope"));
        assert!(bad.is_err());
    }
}

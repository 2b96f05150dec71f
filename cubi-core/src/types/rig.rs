//! Rig configuration and its payout address.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{COINBASE_ADDRESS_SIZE, COINBASE_HEX_LEN, COINBASE_PREFIX};
use crate::error::{CubiError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// RIG
// ═══════════════════════════════════════════════════════════════════════════════

/// A mining rig configuration.
///
/// This is what a miner POSTs and later fetches back, rendered as an install
/// script, through its word identifier. The record is immutable once stored.
///
/// # Example
/// ```
/// use cubi_core::Rig;
///
/// let rig = Rig::new("0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF");
/// assert!(rig.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rig {
    /// Payout address, as submitted (`0x` + 40 hex digits once validated)
    #[serde(default, alias = "Coinbase")]
    pub coinbase: String,
}

impl Rig {
    /// Creates a rig paying out to `coinbase`. No validation is performed.
    pub fn new(coinbase: impl Into<String>) -> Self {
        Self {
            coinbase: coinbase.into(),
        }
    }

    /// Decodes a rig from a JSON request body.
    ///
    /// Field names match without regard to case; an exact `coinbase` key wins
    /// over any other spelling. Unknown fields are ignored. A body holding
    /// nothing but whitespace ends before any field and yields the default
    /// rig, which then fails [`Rig::validate`].
    pub fn from_json(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let fields: Map<String, Value> = serde_json::from_slice(body).map_err(decode_error)?;

        let value = fields.get("coinbase").or_else(|| {
            fields
                .iter()
                .filter(|(name, _)| name.eq_ignore_ascii_case("coinbase"))
                .map(|(_, value)| value)
                .last()
        });

        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(value) => String::deserialize(value).map(Self::new).map_err(decode_error),
        }
    }

    /// Validates the payout address.
    pub fn validate(&self) -> Result<()> {
        CoinbaseAddress::parse(&self.coinbase).map(|_| ())
    }
}

fn decode_error(err: serde_json::Error) -> CubiError {
    CubiError::DecodeError(err.to_string())
}

// ═══════════════════════════════════════════════════════════════════════════════
// COINBASE ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// A 20-byte Ethereum payout address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoinbaseAddress {
    bytes: [u8; COINBASE_ADDRESS_SIZE],
}

impl CoinbaseAddress {
    /// Parses `0x` followed by exactly 40 hex digits (either case).
    ///
    /// The whole string must match; surrounding whitespace is rejected.
    pub fn parse(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix(COINBASE_PREFIX)
            .ok_or_else(|| CubiError::InvalidCoinbase(format!("missing {} prefix: {:?}", COINBASE_PREFIX, s)))?;

        if digits.len() != COINBASE_HEX_LEN {
            return Err(CubiError::InvalidCoinbase(format!(
                "expected {} hex digits, got {}",
                COINBASE_HEX_LEN,
                digits.len()
            )));
        }

        let mut bytes = [0u8; COINBASE_ADDRESS_SIZE];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| CubiError::InvalidCoinbase(format!("{}: {:?}", e, s)))?;
        Ok(Self { bytes })
    }

    /// Returns true if `s` is a well-formed coinbase address.
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the lowercase `0x`-prefixed hex form.
    pub fn to_hex_string(&self) -> String {
        format!("{}{}", COINBASE_PREFIX, hex::encode(self.bytes))
    }
}

impl std::fmt::Debug for CoinbaseAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CoinbaseAddress({})", self.to_hex_string())
    }
}

impl std::fmt::Display for CoinbaseAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl std::str::FromStr for CoinbaseAddress {
    type Err = CubiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const ADDR: &str = "0x1111111111111111111111111111111111111111";

    #[test_case("", false ; "empty")]
    #[test_case("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", false ; "missing prefix")]
    #[test_case("0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", true ; "upper case")]
    #[test_case("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd", true ; "lower case")]
    #[test_case("0xAbCdEf0123456789aBcDeF0123456789AbCdEf01", true ; "mixed case")]
    #[test_case("0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", false ; "39 digits")]
    #[test_case("0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", false ; "41 digits")]
    #[test_case("0xGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGGG", false ; "non hex")]
    #[test_case("0XFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", false ; "upper prefix")]
    #[test_case(" 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", false ; "leading space")]
    fn test_coinbase_validation(addr: &str, valid: bool) {
        assert_eq!(CoinbaseAddress::is_valid(addr), valid);
    }

    #[test]
    fn test_coinbase_display_is_lowercase() {
        let addr = CoinbaseAddress::parse("0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF").unwrap();
        assert_eq!(addr.to_string(), "0xffffffffffffffffffffffffffffffffffffffff");
        assert_eq!(addr.as_bytes(), &[0xff; COINBASE_ADDRESS_SIZE]);
    }

    #[test]
    fn test_rig_from_json() {
        let rig = Rig::from_json(format!(r#"{{"coinbase": "{}"}}"#, ADDR).as_bytes()).unwrap();
        assert_eq!(rig.coinbase, ADDR);
        assert!(rig.validate().is_ok());
    }

    #[test]
    fn test_rig_from_json_capitalized_field() {
        let rig = Rig::from_json(format!(r#"{{"Coinbase": "{}"}}"#, ADDR).as_bytes()).unwrap();
        assert_eq!(rig.coinbase, ADDR);
    }

    #[test_case("COINBASE" ; "upper")]
    #[test_case("coinBase" ; "camel")]
    #[test_case("CoInBaSe" ; "mixed")]
    fn test_rig_from_json_field_case_ignored(field: &str) {
        let rig = Rig::from_json(format!(r#"{{"{}": "{}"}}"#, field, ADDR).as_bytes()).unwrap();
        assert_eq!(rig.coinbase, ADDR);
    }

    #[test]
    fn test_rig_from_json_exact_field_wins() {
        let body = format!(r#"{{"COINBASE": "0x1234", "coinbase": "{}"}}"#, ADDR);
        assert_eq!(Rig::from_json(body.as_bytes()).unwrap().coinbase, ADDR);
    }

    #[test]
    fn test_rig_from_json_ignores_unknown_fields() {
        let body = format!(r#"{{"coinbase": "{}", "worker": "rig-01"}}"#, ADDR);
        assert_eq!(Rig::from_json(body.as_bytes()).unwrap().coinbase, ADDR);
    }

    #[test]
    fn test_rig_from_json_non_string_coinbase() {
        assert!(matches!(Rig::from_json(br#"{"coinbase": 5}"#), Err(CubiError::DecodeError(_))));
    }

    #[test]
    fn test_rig_empty_object_fails_validation() {
        let rig = Rig::from_json(b"{}").unwrap();
        assert_eq!(rig, Rig::default());
        assert!(matches!(rig.validate(), Err(CubiError::InvalidCoinbase(_))));
    }

    #[test]
    fn test_rig_blank_body_is_default() {
        let rig = Rig::from_json(b"  \n").unwrap();
        assert_eq!(rig, Rig::default());
    }

    #[test]
    fn test_rig_malformed_json() {
        assert!(matches!(Rig::from_json(b"{\"coinbase\":"), Err(CubiError::DecodeError(_))));
        assert!(matches!(Rig::from_json(b"[1, 2]"), Err(CubiError::DecodeError(_))));
    }

    #[test]
    fn test_rig_serializes_lowercase_field() {
        let json = serde_json::to_string(&Rig::new(ADDR)).unwrap();
        assert_eq!(json, format!(r#"{{"coinbase":"{}"}}"#, ADDR));
    }
}

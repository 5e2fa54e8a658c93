//! Parsing and serialization of 256-bit gas values

use crate::PrimitiveError;
use primitive_types::U256;

/// Parse a U256 from a decimal string or a `0x`-prefixed hex string.
///
/// Underscores are accepted as digit separators (`32_000`).
pub fn parse_u256(s: &str) -> Result<U256, PrimitiveError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(PrimitiveError::Empty);
    }
    let digits: String = trimmed.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() {
        return Err(PrimitiveError::InvalidNumber(s.to_string()));
    }

    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PrimitiveError::InvalidNumber(s.to_string()));
        }
        let significant = hex.trim_start_matches('0');
        if significant.len() > 64 {
            return Err(PrimitiveError::Overflow(s.to_string()));
        }
        if significant.is_empty() {
            return Ok(U256::zero());
        }
        return U256::from_str_radix(significant, 16)
            .map_err(|_| PrimitiveError::InvalidNumber(s.to_string()));
    }

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(PrimitiveError::InvalidNumber(s.to_string()));
    }
    // All characters are digits, so the only remaining failure is width.
    U256::from_dec_str(&digits).map_err(|_| PrimitiveError::Overflow(s.to_string()))
}

/// Serde adapter for U256 gas values.
///
/// Serializes values that fit in an `i64` as plain integers (so they stay
/// readable in TOML and JSON) and larger values as decimal strings.
/// Deserializes integers, decimal strings and `0x` hex strings.
#[cfg(feature = "serde")]
pub mod serde_u256 {
    use super::parse_u256;
    use primitive_types::U256;
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    /// Serialize a U256
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        if *value <= U256::from(i64::MAX as u64) {
            serializer.serialize_u64(value.low_u64())
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    /// Deserialize a U256
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        deserializer.deserialize_any(U256Visitor)
    }

    struct U256Visitor;

    impl<'de> Visitor<'de> for U256Visitor {
        type Value = U256;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a non-negative integer, decimal string or 0x-prefixed hex string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
            Ok(U256::from(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
            u64::try_from(v)
                .map(U256::from)
                .map_err(|_| E::custom(format!("negative gas value: {}", v)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
            parse_u256(v).map_err(E::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_u256("0").unwrap(), U256::zero());
        assert_eq!(parse_u256("32000").unwrap(), U256::from(32000u64));
        assert_eq!(parse_u256("32_000").unwrap(), U256::from(32000u64));
        assert_eq!(parse_u256("  7 ").unwrap(), U256::from(7u64));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_u256("0x20").unwrap(), U256::from(32u64));
        assert_eq!(parse_u256("0X0").unwrap(), U256::zero());
        assert_eq!(parse_u256("0x0000ff").unwrap(), U256::from(255u64));
        let max = format!("0x{}", "f".repeat(64));
        assert_eq!(parse_u256(&max).unwrap(), U256::MAX);
    }

    #[test]
    fn test_parse_max_decimal() {
        let max = U256::MAX.to_string();
        assert_eq!(parse_u256(&max).unwrap(), U256::MAX);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_u256(""), Err(PrimitiveError::Empty));
        assert!(matches!(parse_u256("-1"), Err(PrimitiveError::InvalidNumber(_))));
        assert!(matches!(parse_u256("12ab"), Err(PrimitiveError::InvalidNumber(_))));
        assert!(matches!(parse_u256("0x"), Err(PrimitiveError::InvalidNumber(_))));
        assert!(matches!(parse_u256("0xzz"), Err(PrimitiveError::InvalidNumber(_))));
        assert!(matches!(parse_u256("_"), Err(PrimitiveError::InvalidNumber(_))));
        assert!(matches!(parse_u256("___"), Err(PrimitiveError::InvalidNumber(_))));
        assert!(matches!(parse_u256("0x_"), Err(PrimitiveError::InvalidNumber(_))));

        let too_wide_hex = format!("0x1{}", "0".repeat(64));
        assert!(matches!(parse_u256(&too_wide_hex), Err(PrimitiveError::Overflow(_))));

        // 2^256
        let too_wide_dec =
            "115792089237316195423570985008687907853269984665640564039457584007913129639936";
        assert!(matches!(parse_u256(too_wide_dec), Err(PrimitiveError::Overflow(_))));
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::super::serde_u256;
        use primitive_types::U256;
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct Holder {
            #[serde(with = "serde_u256")]
            gas: U256,
        }

        #[test]
        fn test_json_integer_and_strings() {
            let h: Holder = serde_json::from_str(r#"{"gas": 500}"#).unwrap();
            assert_eq!(h.gas, U256::from(500u64));
            let h: Holder = serde_json::from_str(r#"{"gas": "0x1f4"}"#).unwrap();
            assert_eq!(h.gas, U256::from(500u64));
            let h: Holder = serde_json::from_str(r#"{"gas": "500"}"#).unwrap();
            assert_eq!(h.gas, U256::from(500u64));
        }

        #[test]
        fn test_json_negative_rejected() {
            assert!(serde_json::from_str::<Holder>(r#"{"gas": -1}"#).is_err());
        }

        #[test]
        fn test_separator_only_string_rejected() {
            assert!(serde_json::from_str::<Holder>(r#"{"gas": "_"}"#).is_err());
            assert!(toml::from_str::<Holder>(r#"gas = "0x_""#).is_err());
        }

        #[test]
        fn test_large_value_serialized_as_string() {
            let h = Holder { gas: U256::MAX };
            let json = serde_json::to_string(&h).unwrap();
            assert!(json.contains('"'));
            let back: Holder = serde_json::from_str(&json).unwrap();
            assert_eq!(back, h);
        }

        #[test]
        fn test_toml_integer() {
            let h: Holder = toml::from_str("gas = 20").unwrap();
            assert_eq!(h.gas, U256::from(20u64));
            let text = toml::to_string(&h).unwrap();
            assert!(text.contains("gas = 20"));
        }
    }
}

//! Helpers for reading and writing DTO mappings.
//!
//! Wide integers appear as `[low32, high32]` arrays (§ wide-int DTO codec);
//! narrow integers are plain JSON numbers and are range-checked on the way
//! in rather than silently truncated.

use crate::error::TransactionError;
use serde_json::{json, Map, Value};
use sirius_types::{dto_to_u64, u64_to_dto};

pub type DtoMap = Map<String, Value>;

/// The `[low, high]` JSON form of a u64.
pub fn u64_json(value: u64) -> Value {
    json!(u64_to_dto(value))
}

pub fn as_map<'a>(value: &'a Value, field: &str) -> Result<&'a DtoMap, TransactionError> {
    value
        .as_object()
        .ok_or_else(|| TransactionError::invalid(field, "expected an object"))
}

pub fn get_map<'a>(map: &'a DtoMap, key: &str) -> Result<&'a DtoMap, TransactionError> {
    as_map(map.get(key).ok_or_else(|| TransactionError::missing(key))?, key)
}

pub fn get_array<'a>(map: &'a DtoMap, key: &str) -> Result<&'a Vec<Value>, TransactionError> {
    map.get(key)
        .ok_or_else(|| TransactionError::missing(key))?
        .as_array()
        .ok_or_else(|| TransactionError::invalid(key, "expected an array"))
}

pub fn get_str<'a>(map: &'a DtoMap, key: &str) -> Result<&'a str, TransactionError> {
    map.get(key)
        .ok_or_else(|| TransactionError::missing(key))?
        .as_str()
        .ok_or_else(|| TransactionError::invalid(key, "expected a string"))
}

fn get_integer(map: &DtoMap, key: &str) -> Result<u64, TransactionError> {
    map.get(key)
        .ok_or_else(|| TransactionError::missing(key))?
        .as_u64()
        .ok_or_else(|| TransactionError::invalid(key, "expected an unsigned number"))
}

/// Read a plain JSON number that must fit in a u8.
pub fn get_u8(map: &DtoMap, key: &str) -> Result<u8, TransactionError> {
    let v = get_integer(map, key)?;
    u8::try_from(v).map_err(|_| TransactionError::invalid(key, "does not fit in 8 bits"))
}

/// Read a plain JSON number that must fit in a u16.
pub fn get_u16(map: &DtoMap, key: &str) -> Result<u16, TransactionError> {
    let v = get_integer(map, key)?;
    u16::try_from(v).map_err(|_| TransactionError::invalid(key, "does not fit in 16 bits"))
}

/// Read a plain JSON number that must fit in a u32.
pub fn get_u32(map: &DtoMap, key: &str) -> Result<u32, TransactionError> {
    let v = get_integer(map, key)?;
    u32::try_from(v).map_err(|_| TransactionError::invalid(key, "does not fit in 32 bits"))
}

/// Read a signed JSON number that must fit in an i8.
pub fn get_i8(map: &DtoMap, key: &str) -> Result<i8, TransactionError> {
    let v = map
        .get(key)
        .ok_or_else(|| TransactionError::missing(key))?
        .as_i64()
        .ok_or_else(|| TransactionError::invalid(key, "expected a number"))?;
    i8::try_from(v).map_err(|_| TransactionError::invalid(key, "does not fit in 8 bits"))
}

/// Decode a `[low32, high32]` array value into a u64.
pub fn uint64_value(value: &Value, field: &str) -> Result<u64, TransactionError> {
    let arr = value
        .as_array()
        .ok_or_else(|| TransactionError::invalid(field, "expected a [low, high] array"))?;
    if arr.len() != 2 {
        return Err(TransactionError::invalid(field, "expected exactly 2 words"));
    }
    let mut words = [0u32; 2];
    for (i, word) in arr.iter().enumerate() {
        let raw = word
            .as_u64()
            .ok_or_else(|| TransactionError::invalid(field, "expected unsigned words"))?;
        words[i] = u32::try_from(raw)
            .map_err(|_| TransactionError::invalid(field, "word does not fit in 32 bits"))?;
    }
    Ok(dto_to_u64(words))
}

/// Read a `[low32, high32]` u64 field.
pub fn get_uint64(map: &DtoMap, key: &str) -> Result<u64, TransactionError> {
    uint64_value(map.get(key).ok_or_else(|| TransactionError::missing(key))?, key)
}

/// Whether every listed key is present (the pre-decode DTO validation step).
pub fn has_keys(map: &DtoMap, keys: &[&str]) -> bool {
    keys.iter().all(|k| map.contains_key(*k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(value: Value) -> DtoMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn uint64_roundtrip() {
        let m = map(json!({ "fee": u64_json(0xdead_beef_0000_0001u64) }));
        assert_eq!(get_uint64(&m, "fee").unwrap(), 0xdead_beef_0000_0001);
    }

    #[test]
    fn missing_key_is_reported() {
        let m = map(json!({}));
        assert!(matches!(
            get_uint64(&m, "fee").unwrap_err(),
            TransactionError::MissingDtoField(k) if k == "fee"
        ));
    }

    #[test]
    fn narrow_numbers_fail_loudly_instead_of_truncating() {
        let m = map(json!({ "n": 300 }));
        assert!(get_u8(&m, "n").is_err());
        assert_eq!(get_u16(&m, "n").unwrap(), 300);
    }

    #[test]
    fn oversized_words_rejected() {
        let m = map(json!({ "fee": [u64::MAX, 0] }));
        assert!(get_uint64(&m, "fee").is_err());
    }

    #[test]
    fn wrong_arity_rejected() {
        let m = map(json!({ "fee": [1, 2, 3] }));
        assert!(get_uint64(&m, "fee").is_err());
    }

    #[test]
    fn has_keys_checks_presence_only() {
        let m = map(json!({ "a": 1, "b": null }));
        assert!(has_keys(&m, &["a", "b"]));
        assert!(!has_keys(&m, &["a", "c"]));
    }
}

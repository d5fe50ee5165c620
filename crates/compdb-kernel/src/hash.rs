//! Content-addressed identifiers.
//!
//! A record's identifier is the SHA-256 digest of its canonical JSON
//! encoding: object keys sorted, no insignificant whitespace. Two records
//! that serialize to the same canonical bytes are the same resource.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fmt;

/// Lowercase hex SHA-256 digest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(pub String);

impl ContentHash {
    /// Hash raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{hash:x}"))
    }

    /// Hash the canonical encoding of a JSON value.
    pub fn of_json(value: &Value) -> Self {
        Self::from_bytes(&canonical_json_bytes(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical JSON bytes: sorted object keys, compact separators.
pub fn canonical_json_bytes(value: &Value) -> Vec<u8> {
    let mut out = Vec::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut Vec<u8>) {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
        Value::String(s) => write_json_string(s, out),
        Value::Array(items) => {
            out.push(b'[');
            for (idx, item) in items.iter().enumerate() {
                if idx > 0 {
                    out.push(b',');
                }
                write_canonical(item, out);
            }
            out.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push(b'{');
            for (idx, (key, item)) in entries.into_iter().enumerate() {
                if idx > 0 {
                    out.push(b',');
                }
                write_json_string(key, out);
                out.push(b':');
                write_canonical(item, out);
            }
            out.push(b'}');
        }
    }
}

fn write_json_string(s: &str, out: &mut Vec<u8>) {
    // Display for a string Value is its escaped JSON form.
    out.extend_from_slice(Value::String(s.to_string()).to_string().as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_bytes_sort_object_keys() {
        let value = json!({"b": 1, "a": {"d": [true, null], "c": "x"}});
        assert_eq!(
            canonical_json_bytes(&value),
            br#"{"a":{"c":"x","d":[true,null]},"b":1}"#.to_vec()
        );
    }

    #[test]
    fn hash_is_insensitive_to_key_order() {
        let a = json!({"compiler": {"name": "solc", "version": "0.8.0"}, "sources": []});
        let b = json!({"sources": [], "compiler": {"version": "0.8.0", "name": "solc"}});
        assert_eq!(ContentHash::of_json(&a), ContentHash::of_json(&b));
    }

    #[test]
    fn hash_distinguishes_array_order() {
        let a = json!([1, 2]);
        let b = json!([2, 1]);
        assert_ne!(ContentHash::of_json(&a), ContentHash::of_json(&b));
    }

    #[test]
    fn strings_are_escaped() {
        let value = json!({"k": "line\n\"quoted\""});
        assert_eq!(
            canonical_json_bytes(&value),
            br#"{"k":"line\n\"quoted\""}"#.to_vec()
        );
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let hash = ContentHash::from_bytes(b"");
        assert_eq!(
            hash.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}

//! Large-object envelope codec.
//!
//! `value → JSON envelope → zlib → base64`. The result is printable ASCII and
//! can be stored in any plain string backend. Decoding is total: every
//! failure, including a payload written for another type or format version,
//! is a miss.

use std::any::type_name;
use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::CodecError;

/// Bumped whenever the envelope layout changes.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    kind: &'a str,
    version: u32,
    value: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    kind: String,
    version: u32,
    value: T,
}

/// Compresses and base64-encodes raw bytes.
pub fn encode_bytes(bytes: &[u8]) -> Result<String, CodecError> {
    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(bytes.len() / 2 + 16),
        Compression::default(),
    );
    encoder.write_all(bytes)?;
    let compressed = encoder.finish()?;
    Ok(BASE64.encode(compressed))
}

/// Reverses [`encode_bytes`]. Returns `None` on any failure.
pub fn decode_bytes(encoded: &str) -> Option<Vec<u8>> {
    let compressed = match BASE64.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Discarding envelope with invalid base64: {}", e);
            return None;
        }
    };

    let mut bytes = Vec::new();
    if let Err(e) = ZlibDecoder::new(compressed.as_slice()).read_to_end(&mut bytes) {
        debug!("Discarding envelope that failed to decompress: {}", e);
        return None;
    }

    Some(bytes)
}

/// Serializes, compresses and encodes a value.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let envelope = EnvelopeRef {
        kind: type_name::<T>(),
        version: FORMAT_VERSION,
        value,
    };
    let json =
        serde_json::to_vec(&envelope).map_err(|e| CodecError::Serialization(e.to_string()))?;
    encode_bytes(&json)
}

/// Decodes a value written by [`encode`].
///
/// Returns `None` if any stage fails or if the payload was written for a
/// different type or envelope version.
pub fn decode<T: DeserializeOwned>(encoded: &str) -> Option<T> {
    let bytes = decode_bytes(encoded)?;

    let envelope: Envelope<T> = match serde_json::from_slice(&bytes) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!("Discarding malformed envelope: {}", e);
            return None;
        }
    };

    let expected = type_name::<T>();
    if envelope.version != FORMAT_VERSION || envelope.kind != expected {
        debug!(
            "Discarding envelope of kind {} v{} (expected {} v{})",
            envelope.kind, envelope.version, expected, FORMAT_VERSION
        );
        return None;
    }

    Some(envelope.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Nested {
        name: String,
        weights: Vec<u32>,
        children: BTreeMap<String, Vec<u8>>,
        flag: Option<bool>,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Other {
        name: String,
    }

    #[test]
    fn test_encoded_output_is_printable_ascii() {
        let encoded = encode_bytes(&[0, 159, 146, 150, 255, 10, 13]).unwrap();
        assert!(encoded.bytes().all(|b| b.is_ascii_graphic()));
    }

    #[test]
    fn test_nested_structure_round_trip() {
        let mut children = BTreeMap::new();
        children.insert("raw".to_string(), vec![0xff, 0xfe, 0x00]);
        children.insert("empty".to_string(), vec![]);
        let value = Nested {
            name: "Grüße „quoted“".to_string(),
            weights: vec![1, 2, 3],
            children,
            flag: None,
        };

        let encoded = encode(&value).unwrap();
        assert_eq!(decode::<Nested>(&encoded), Some(value));
    }

    #[test]
    fn test_empty_string_round_trip() {
        let encoded = encode(&String::new()).unwrap();
        assert_eq!(decode::<String>(&encoded), Some(String::new()));
    }

    #[test]
    fn test_wrong_type_is_a_miss() {
        let encoded = encode(&Other {
            name: "x".to_string(),
        })
        .unwrap();

        assert_eq!(decode::<Nested>(&encoded), None);
        // Same shape, different type: still rejected by the type tag.
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Lookalike {
            name: String,
        }
        assert!(decode::<Lookalike>(&encoded).is_none());
    }

    #[test]
    fn test_version_mismatch_is_a_miss() {
        let json = serde_json::json!({
            "kind": type_name::<String>(),
            "version": FORMAT_VERSION + 1,
            "value": "text",
        });
        let encoded = encode_bytes(json.to_string().as_bytes()).unwrap();
        assert_eq!(decode::<String>(&encoded), None);
    }

    #[rstest]
    #[case::empty("")]
    #[case::not_base64("%%% not base64 %%%")]
    #[case::truncated_base64("eJzLSM3JyQcABiwCFQ")]
    #[case::base64_of_plain_text("aGVsbG8gd29ybGQ=")]
    fn test_malformed_input_is_a_miss(#[case] input: &str) {
        assert_eq!(decode::<String>(input), None);
    }

    #[test]
    fn test_valid_compression_of_invalid_payload_is_a_miss() {
        let encoded = encode_bytes(b"{not json").unwrap();
        assert_eq!(decode::<String>(&encoded), None);
    }

    proptest! {
        #[test]
        fn test_bytes_round_trip(bytes in any::<Vec<u8>>()) {
            let encoded = encode_bytes(&bytes).unwrap();
            prop_assert_eq!(decode_bytes(&encoded), Some(bytes));
        }

        #[test]
        fn test_value_round_trip(bytes in any::<Vec<u8>>(), text in any::<String>()) {
            let value = (bytes, text);
            let encoded = encode(&value).unwrap();
            prop_assert_eq!(decode::<(Vec<u8>, String)>(&encoded), Some(value));
        }

        #[test]
        fn test_arbitrary_input_never_panics(input in any::<String>()) {
            let _ = decode::<Vec<u8>>(&input);
        }

        #[test]
        fn test_truncated_envelope_is_a_miss(
            bytes in proptest::collection::vec(any::<u8>(), 1..256),
            cut in 1usize..4,
        ) {
            let encoded = encode(&bytes).unwrap();
            let truncated = &encoded[..encoded.len().saturating_sub(cut)];
            prop_assert_eq!(decode::<Vec<u8>>(truncated), None);
        }
    }
}

//! msgpack encoding of the canonical mapping
//!
//! Text stays msgpack str, `payload_bytes` travels as bin, `processors` as an
//! array of str.

use crate::codec::wire::WireMap;
use crate::errors::Result;

/// Encode a mapping as a msgpack map
///
/// # Errors
///
/// Returns `CmdMetaError::Serialization` if the encoder fails.
pub fn to_msgpack(map: &WireMap) -> Result<Vec<u8>> {
    let bytes = rmp_serde::to_vec(map)?;
    tracing::debug!(len = bytes.len(), "encoded wire map");
    Ok(bytes)
}

/// Decode a msgpack map
///
/// # Errors
///
/// Returns `CmdMetaError::Serialization` for malformed input or values outside
/// the wire value model (nested maps, floats, non-text list items).
pub fn from_msgpack(bytes: &[u8]) -> Result<WireMap> {
    Ok(rmp_serde::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::wire::WireValue;
    use crate::errors::CmdMetaError;

    #[test]
    fn test_bytes_are_encoded_as_bin() {
        let mut map = WireMap::new();
        map.insert("payload_bytes", vec![0xde_u8, 0xad]);
        let encoded = to_msgpack(&map).unwrap();

        // fixmap(1), fixstr(13) "payload_bytes", bin8 len 2
        assert_eq!(encoded[0], 0x81);
        let bin_at = 2 + "payload_bytes".len();
        assert_eq!(&encoded[bin_at..], &[0xc4, 0x02, 0xde, 0xad]);
    }

    #[test]
    fn test_decode_keeps_every_value_shape() {
        let mut map = WireMap::new();
        map.insert("nil", WireValue::Nil);
        map.insert("flag", true);
        map.insert("neg", -5_i64);
        map.insert("text", "hello");
        map.insert("blob", vec![1_u8, 2, 3]);
        map.insert("list", vec!["a".to_string(), "b".to_string()]);

        let decoded = from_msgpack(&to_msgpack(&map).unwrap()).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_nested_map_is_rejected() {
        // {"outer": {"inner": 1}}
        let bytes = [
            0x81, 0xa5, b'o', b'u', b't', b'e', b'r', 0x81, 0xa5, b'i', b'n', b'n', b'e', b'r',
            0x01,
        ];
        let err = from_msgpack(&bytes).unwrap_err();
        assert!(matches!(err, CmdMetaError::Serialization { .. }));
    }

    #[test]
    fn test_truncated_input_is_rejected() {
        let err = from_msgpack(&[0x82, 0xa1]).unwrap_err();
        assert!(matches!(err, CmdMetaError::Serialization { .. }));
    }
}

//! Binary UUID codec with configurable 8-byte block order
//!
//! The 128-bit value is written as two big-endian 8-byte blocks. Block order
//! is fixed at construction: most-significant half first by default, swapped
//! when the `mostSignificantBitsFirst` property is false.

use uuid::Uuid;

use crate::codec::{Codec, DecodedValue, Deserializer, RecordHeaders, Serializer, Slot};
use crate::config::PropertyResolver;
use crate::error::{ConfigurationError, FormatError};

/// Property controlling the block order, resolved once at construction.
pub const PROP_MOST_SIGNIFICANT_BITS_FIRST: &str = "mostSignificantBitsFirst";

/// Codec for 16-byte binary UUID payloads.
#[derive(Debug, Clone, Copy)]
pub struct UuidBinaryCodec {
    msb_first: bool,
}

impl UuidBinaryCodec {
    pub const fn new(msb_first: bool) -> Self {
        Self { msb_first }
    }

    /// Build from resolved properties, falling back to most-significant-first.
    pub fn from_properties(properties: &PropertyResolver) -> Result<Self, ConfigurationError> {
        let msb_first = properties.get_bool(PROP_MOST_SIGNIFICANT_BITS_FIRST, true)?;
        Ok(Self::new(msb_first))
    }
}

impl Default for UuidBinaryCodec {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Codec for UuidBinaryCodec {
    fn name(&self) -> &'static str {
        "UuidBinary"
    }

    fn can_serialize(&self, _stream: &str, _slot: Slot) -> bool {
        true
    }

    fn can_deserialize(&self, _stream: &str, _slot: Slot) -> bool {
        true
    }

    fn serializer(
        &self,
        _stream: &str,
        _slot: Slot,
    ) -> Result<Box<dyn Serializer>, ConfigurationError> {
        Ok(Box::new(UuidWire {
            msb_first: self.msb_first,
        }))
    }

    fn deserializer(
        &self,
        _stream: &str,
        _slot: Slot,
    ) -> Result<Box<dyn Deserializer>, ConfigurationError> {
        Ok(Box::new(UuidWire {
            msb_first: self.msb_first,
        }))
    }
}

struct UuidWire {
    msb_first: bool,
}

impl Serializer for UuidWire {
    fn serialize(&self, text: &str) -> Result<Vec<u8>, FormatError> {
        if text.is_empty() {
            return Err(FormatError::EmptyInput);
        }
        let uuid = Uuid::parse_str(text).map_err(|source| FormatError::UuidFormat {
            text: text.to_owned(),
            source,
        })?;
        let (msb, lsb) = uuid.as_u64_pair();
        let (first, second) = if self.msb_first { (msb, lsb) } else { (lsb, msb) };
        let mut out = Vec::with_capacity(16);
        out.extend_from_slice(&first.to_be_bytes());
        out.extend_from_slice(&second.to_be_bytes());
        Ok(out)
    }
}

impl Deserializer for UuidWire {
    fn deserialize(
        &self,
        _headers: &RecordHeaders,
        data: &[u8],
    ) -> Result<DecodedValue, FormatError> {
        let bytes: [u8; 16] = data.try_into().map_err(|_| FormatError::InvalidLength {
            expected: 16,
            actual: data.len(),
        })?;
        let packed = u128::from_be_bytes(bytes);
        let first = (packed >> 64) as u64;
        let second = packed as u64;
        let (msb, lsb) = if self.msb_first { (first, second) } else { (second, first) };
        let uuid = Uuid::from_u64_pair(msb, lsb);
        Ok(DecodedValue::text(uuid.hyphenated().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ValueKind;

    const SAMPLE: &str = "8f3b2a10-5c4d-4e6f-9a21-0d5e7c9b1f04";

    fn headers() -> RecordHeaders {
        RecordHeaders::new()
    }

    #[test]
    fn test_msb_first_serializer_writes_msb_block_first() {
        let uuid = Uuid::parse_str(SAMPLE).unwrap();
        let serializer = UuidBinaryCodec::default()
            .serializer("events", Slot::Key)
            .unwrap();
        let bytes = serializer.serialize(SAMPLE).unwrap();
        let (msb, lsb) = uuid.as_u64_pair();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[..8], msb.to_be_bytes());
        assert_eq!(bytes[8..], lsb.to_be_bytes());
    }

    #[test]
    fn test_msb_last_serializer_writes_lsb_block_first() {
        let uuid = Uuid::parse_str(SAMPLE).unwrap();
        let serializer = UuidBinaryCodec::new(false)
            .serializer("events", Slot::Key)
            .unwrap();
        let bytes = serializer.serialize(SAMPLE).unwrap();
        let (msb, lsb) = uuid.as_u64_pair();
        assert_eq!(bytes[..8], lsb.to_be_bytes());
        assert_eq!(bytes[8..], msb.to_be_bytes());
    }

    #[test]
    fn test_round_trip_with_either_ordering() {
        for msb_first in [true, false] {
            let codec = UuidBinaryCodec::new(msb_first);
            let bytes = codec
                .serializer("events", Slot::Value)
                .unwrap()
                .serialize(SAMPLE)
                .unwrap();
            let result = codec
                .deserializer("events", Slot::Value)
                .unwrap()
                .deserialize(&headers(), &bytes)
                .unwrap();
            assert_eq!(result.value.as_deref(), Some(SAMPLE));
            assert_eq!(result.kind, ValueKind::String);
            assert!(result.properties.is_empty());
        }
    }

    #[test]
    fn test_orderings_produce_swapped_blocks() {
        let msb = UuidBinaryCodec::new(true)
            .serializer("events", Slot::Value)
            .unwrap()
            .serialize(SAMPLE)
            .unwrap();
        let lsb = UuidBinaryCodec::new(false)
            .serializer("events", Slot::Value)
            .unwrap()
            .serialize(SAMPLE)
            .unwrap();
        assert_eq!(msb[..8], lsb[8..]);
        assert_eq!(msb[8..], lsb[..8]);
    }

    #[test]
    fn test_deserialize_requires_exactly_16_bytes() {
        let deserializer = UuidBinaryCodec::default()
            .deserializer("events", Slot::Value)
            .unwrap();
        for len in [0usize, 15, 17] {
            let err = deserializer
                .deserialize(&headers(), &vec![0u8; len])
                .unwrap_err();
            assert!(matches!(
                err,
                FormatError::InvalidLength { expected: 16, .. }
            ));
        }
    }

    #[test]
    fn test_serialize_rejects_malformed_text() {
        let serializer = UuidBinaryCodec::default()
            .serializer("events", Slot::Value)
            .unwrap();
        assert!(matches!(
            serializer.serialize("not-a-uuid").unwrap_err(),
            FormatError::UuidFormat { .. }
        ));
        assert!(matches!(
            serializer.serialize("").unwrap_err(),
            FormatError::EmptyInput
        ));
    }

    #[test]
    fn test_rendered_text_is_lowercase_canonical() {
        let codec = UuidBinaryCodec::default();
        let bytes = codec
            .serializer("events", Slot::Value)
            .unwrap()
            .serialize(&SAMPLE.to_uppercase())
            .unwrap();
        let result = codec
            .deserializer("events", Slot::Value)
            .unwrap()
            .deserialize(&headers(), &bytes)
            .unwrap();
        assert_eq!(result.value.as_deref(), Some(SAMPLE));
    }

    #[test]
    fn test_from_properties_defaults_to_msb_first() {
        let codec = UuidBinaryCodec::from_properties(&PropertyResolver::empty()).unwrap();
        assert!(codec.msb_first);

        let resolver =
            PropertyResolver::from_pairs([(PROP_MOST_SIGNIFICANT_BITS_FIRST, "false")]);
        let codec = UuidBinaryCodec::from_properties(&resolver).unwrap();
        assert!(!codec.msb_first);
    }
}

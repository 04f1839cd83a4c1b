//! Fixed-width big-endian integer codecs
//!
//! Payloads are exactly 4 or 8 bytes of big-endian two's-complement. The
//! serializer rejects text outside the declared width, so `"2147483648"`
//! fails for the 32-bit codec even though it is a valid 64-bit integer.

use crate::codec::{Codec, DecodedValue, Deserializer, RecordHeaders, Serializer, Slot};
use crate::error::{ConfigurationError, FormatError};

macro_rules! fixed_width_codec {
    ($codec:ident, $wire:ident, $int:ty, $width:expr, $len:expr, $name:literal) => {
        #[doc = concat!("Codec for ", stringify!($len), "-byte big-endian signed integers.")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $codec;

        impl Codec for $codec {
            fn name(&self) -> &'static str {
                $name
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
                Ok(Box::new($wire))
            }

            fn deserializer(
                &self,
                _stream: &str,
                _slot: Slot,
            ) -> Result<Box<dyn Deserializer>, ConfigurationError> {
                Ok(Box::new($wire))
            }
        }

        struct $wire;

        impl Serializer for $wire {
            fn serialize(&self, text: &str) -> Result<Vec<u8>, FormatError> {
                if text.is_empty() {
                    return Err(FormatError::EmptyInput);
                }
                let n: $int = text.parse().map_err(|_| FormatError::NumberFormat {
                    text: text.to_owned(),
                    width: $width,
                })?;
                Ok(n.to_be_bytes().to_vec())
            }
        }

        impl Deserializer for $wire {
            fn deserialize(
                &self,
                _headers: &RecordHeaders,
                data: &[u8],
            ) -> Result<DecodedValue, FormatError> {
                let bytes: [u8; $len] =
                    data.try_into().map_err(|_| FormatError::InvalidLength {
                        expected: $len,
                        actual: data.len(),
                    })?;
                // A bare decimal number is valid JSON.
                Ok(DecodedValue::json(<$int>::from_be_bytes(bytes).to_string()))
            }
        }
    };
}

fixed_width_codec!(Int32Codec, Int32Wire, i32, 32, 4, "Int32");
fixed_width_codec!(Int64Codec, Int64Wire, i64, 64, 8, "Int64");

//! Deserialize-only codec for payloads carrying an embedded Avro container
//!
//! The payload is a self-describing Avro object-container file: the writer
//! schema travels with the data, so no registry lookup is involved. The
//! decoder opens the container, decodes the first record against the embedded
//! schema, and renders it as structurally equivalent JSON. Avro type tags do
//! not leak into the output.

use apache_avro::Reader;

use crate::codec::{Codec, DecodedValue, Deserializer, RecordHeaders, Serializer, Slot};
use crate::error::{ConfigurationError, FormatError, Operation};

/// Codec for Avro object-container payloads. Deserialize-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvroEmbeddedCodec;

impl Codec for AvroEmbeddedCodec {
    fn name(&self) -> &'static str {
        "AvroEmbedded"
    }

    fn can_serialize(&self, _stream: &str, _slot: Slot) -> bool {
        false
    }

    fn can_deserialize(&self, _stream: &str, _slot: Slot) -> bool {
        true
    }

    fn serializer(
        &self,
        stream: &str,
        slot: Slot,
    ) -> Result<Box<dyn Serializer>, ConfigurationError> {
        Err(ConfigurationError::UnsupportedOperation {
            codec: self.name(),
            operation: Operation::Serialize,
            stream: stream.to_owned(),
            slot,
        })
    }

    fn deserializer(
        &self,
        _stream: &str,
        _slot: Slot,
    ) -> Result<Box<dyn Deserializer>, ConfigurationError> {
        Ok(Box::new(AvroEmbeddedWire))
    }
}

struct AvroEmbeddedWire;

impl Deserializer for AvroEmbeddedWire {
    fn deserialize(
        &self,
        _headers: &RecordHeaders,
        data: &[u8],
    ) -> Result<DecodedValue, FormatError> {
        // Reader::new validates the magic bytes and parses the embedded
        // schema eagerly; the reader lives only for this call and is dropped
        // on every exit path.
        let mut reader = Reader::new(data)?;
        let Some(record) = reader.next() else {
            // Header-only payload: schema present, zero records. Defined
            // degenerate case, not an error.
            return Ok(DecodedValue::null_json());
        };
        let json: serde_json::Value = record?.try_into()?;
        Ok(DecodedValue::json(json.to_string()))
    }
}

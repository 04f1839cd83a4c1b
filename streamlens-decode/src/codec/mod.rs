// Copyright 2026 Streamlens Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Pluggable message payload codecs
//!
//! A codec pairs a serializer and a deserializer for one wire format. Codecs
//! declare per stream and per slot which directions they support; the
//! [`CodecRegistry`] picks the active codec for a stream and defers to it.
//! External codecs plug in through the same [`Codec`] trait the built-ins
//! implement.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, FormatError};

pub mod avro_embedded;
pub mod integer;
pub mod registry;
pub mod uuid_binary;

pub use avro_embedded::AvroEmbeddedCodec;
pub use integer::{Int32Codec, Int64Codec};
pub use registry::CodecRegistry;
pub use uuid_binary::UuidBinaryCodec;

/// Which part of a message envelope a codec is processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Key,
    Value,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::Value => write!(f, "value"),
        }
    }
}

/// Semantic kind of a rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Json,
    String,
    Raw,
}

/// Result of decoding one payload slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedValue {
    /// Rendered text, always valid UTF-8. `None` means the payload was
    /// structurally valid but carried no record.
    pub value: Option<String>,
    /// Semantic kind of the rendered text.
    pub kind: ValueKind,
    /// Side-channel properties reported by the codec, e.g. provenance or a
    /// detected schema id. Empty for all built-ins.
    pub properties: BTreeMap<String, String>,
}

impl DecodedValue {
    /// A rendered value that is itself valid JSON (a bare number counts).
    pub fn json(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            kind: ValueKind::Json,
            properties: BTreeMap::new(),
        }
    }

    /// A rendered value that is plain text.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            kind: ValueKind::String,
            properties: BTreeMap::new(),
        }
    }

    /// The degenerate "no record present" result. Callers must treat this as
    /// an absent value, not as an error.
    pub const fn null_json() -> Self {
        Self {
            value: None,
            kind: ValueKind::Json,
            properties: BTreeMap::new(),
        }
    }
}

/// Immutable view of record headers handed to deserializers.
///
/// Deserializers receive a shared reference and cannot mutate the headers of
/// the record being decoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordHeaders {
    entries: BTreeMap<String, Vec<u8>>,
}

impl RecordHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, mainly for callers assembling test fixtures.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// A paired serializer/deserializer for one wire format.
///
/// Implementations are immutable after construction and safe to share across
/// threads without locking; `serialize`/`deserialize` never touch shared
/// state. The capability predicates are pure and must not fail.
pub trait Codec: Send + Sync {
    /// Stable name used in configuration and for display.
    fn name(&self) -> &'static str;

    /// Whether this codec can serialize text into the given slot of the
    /// given stream.
    fn can_serialize(&self, stream: &str, slot: Slot) -> bool;

    /// Whether this codec can deserialize bytes from the given slot of the
    /// given stream.
    fn can_deserialize(&self, stream: &str, slot: Slot) -> bool;

    /// Build a serializer for the given (stream, slot) combination.
    ///
    /// Callers must check [`Codec::can_serialize`] first; requesting a
    /// serializer for an unsupported combination is a contract violation and
    /// fails with [`ConfigurationError::UnsupportedOperation`].
    fn serializer(&self, stream: &str, slot: Slot)
        -> Result<Box<dyn Serializer>, ConfigurationError>;

    /// Build a deserializer for the given (stream, slot) combination.
    ///
    /// Same contract as [`Codec::serializer`].
    fn deserializer(
        &self,
        stream: &str,
        slot: Slot,
    ) -> Result<Box<dyn Deserializer>, ConfigurationError>;
}

impl std::fmt::Debug for dyn Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").field("name", &self.name()).finish()
    }
}

/// Converts human-readable text into wire bytes.
pub trait Serializer: Send + Sync {
    /// Fails with [`FormatError`] if `text` is empty or does not parse under
    /// the codec's grammar.
    fn serialize(&self, text: &str) -> Result<Vec<u8>, FormatError>;
}

/// Converts wire bytes into a [`DecodedValue`].
pub trait Deserializer: Send + Sync {
    /// Fails with [`FormatError`] if the byte length or structure is invalid
    /// for the format.
    fn deserialize(&self, headers: &RecordHeaders, data: &[u8])
        -> Result<DecodedValue, FormatError>;
}

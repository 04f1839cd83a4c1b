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
//! Error taxonomy for codec and query-result decoding
//!
//! Every failure in this crate is a deterministic configuration or format
//! violation: retrying the same call with the same input cannot change the
//! outcome, so no variant carries retry metadata. Messages name the violated
//! precondition (expected vs. actual length, the offending text) so callers
//! can render them without digging into the source chain.

use std::fmt;

use thiserror::Error;

use crate::codec::Slot;

/// Operation direction named in configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Serialize,
    Deserialize,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize => write!(f, "serialization"),
            Self::Deserialize => write!(f, "deserialization"),
        }
    }
}

/// A requested (stream, slot) combination is unsupported or unconfigured.
///
/// Fatal to the specific call and never retried. Callers are expected to
/// consult `can_serialize`/`can_deserialize` before requesting a factory, so
/// hitting `UnsupportedOperation` indicates a contract violation upstream.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("codec {codec:?} does not support {operation} for the {slot} of stream {stream:?}")]
    UnsupportedOperation {
        codec: &'static str,
        operation: Operation,
        stream: String,
        slot: Slot,
    },

    #[error("no codec configured for the {slot} of stream {stream:?}")]
    NoCodecForSlot { stream: String, slot: Slot },

    #[error("unknown codec name {name:?}")]
    UnknownCodec { name: String },

    #[error("invalid value for property {name:?}: {reason}")]
    InvalidProperty { name: String, reason: String },
}

/// Malformed input handed to a serializer or deserializer.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("invalid payload length: expected exactly {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("{text:?} is not a valid {width}-bit signed integer")]
    NumberFormat { text: String, width: u32 },

    #[error("{text:?} is not a valid UUID: {source}")]
    UuidFormat {
        text: String,
        #[source]
        source: uuid::Error,
    },

    #[error("malformed avro container: {0}")]
    AvroContainer(#[from] apache_avro::Error),

    #[error("cannot serialize empty input")]
    EmptyInput,
}

/// Union of the two failure classes, returned by registry entry points.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// A protocol frame lacks a field required by its classified kind.
///
/// The original protocol handling crashed with a null dereference when a
/// frame was missing expected structure; these variants are the typed
/// replacement.
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("frame classified as {frame:?} is missing required field {field:?}")]
    MissingField {
        frame: &'static str,
        field: &'static str,
    },

    #[error("frame is neither a header nor a row")]
    UnrecognizedFrame,
}

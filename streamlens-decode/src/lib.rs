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
//! Streamlens decoding core
//!
//! Exposes the codec registry and query-result parsing for use by the
//! REST layer and other tools

pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod query;

pub use codec::{
    AvroEmbeddedCodec, Codec, CodecRegistry, DecodedValue, Deserializer, Int32Codec, Int64Codec,
    RecordHeaders, Serializer, Slot, UuidBinaryCodec, ValueKind,
};
pub use config::{Config, PropertyResolver};
pub use error::{ConfigurationError, DecodeError, FormatError, ResponseError};
pub use query::{
    error_table_with_text, parse_error_response, parse_select_headers, parse_select_response,
    ResultTable,
};

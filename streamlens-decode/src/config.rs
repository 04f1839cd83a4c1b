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
//! Configuration for the decoding core
//!
//! Declares which codec handles the key and value of each stream, optional
//! per-codec properties, and logging options. Codec properties are exposed to
//! codec constructors through [`PropertyResolver`]; unknown property names
//! are ignored by design so that extension codecs can share a property table
//! with the built-ins.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::codec::Slot;
use crate::error::ConfigurationError;
use crate::logging::LogConfig;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Logging configuration
    pub logging: LogConfig,

    /// Per-codec property tables, keyed by codec name
    pub codecs: HashMap<String, CodecProperties>,

    /// Fallback codec selection for streams without an explicit entry
    pub defaults: SlotSelection,

    /// Per-stream codec selection
    pub streams: HashMap<String, SlotSelection>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Resolver over the property table of the named codec. Codecs without a
    /// table get an empty resolver, i.e. all defaults.
    pub fn properties_for(&self, codec: &str) -> PropertyResolver {
        self.codecs
            .get(codec)
            .map(|entry| PropertyResolver::from_toml(&entry.properties))
            .unwrap_or_else(PropertyResolver::empty)
    }
}

/// Property table attached to one codec.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CodecProperties {
    pub properties: HashMap<String, toml::Value>,
}

/// Codec selection for the key and value slots of one stream.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SlotSelection {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl SlotSelection {
    pub fn for_slot(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Key => self.key.as_deref(),
            Slot::Value => self.value.as_deref(),
        }
    }
}

/// Named string/boolean properties with defined defaults.
///
/// Lookups for names that were never set fall back to the caller-supplied
/// default; names present in the table but not understood by a codec are
/// simply never looked up. Only values that fail to parse as the requested
/// type are an error.
#[derive(Debug, Clone, Default)]
pub struct PropertyResolver {
    values: HashMap<String, String>,
}

impl PropertyResolver {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
        }
    }

    fn from_toml(table: &HashMap<String, toml::Value>) -> Self {
        Self {
            values: table
                .iter()
                .map(|(name, value)| (name.clone(), toml_value_to_string(value)))
                .collect(),
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Boolean property with a default. Fails only when a present value is
    /// neither `true` nor `false`.
    pub fn get_bool(&self, name: &str, default: bool) -> Result<bool, ConfigurationError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigurationError::InvalidProperty {
                    name: name.to_owned(),
                    reason: format!("expected true or false, got {raw:?}"),
                }),
        }
    }
}

fn toml_value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [logging]
            level = "debug"

            [codecs.UuidBinary.properties]
            mostSignificantBitsFirst = false

            [defaults]
            value = "Int64"

            [streams.payments]
            key = "UuidBinary"
            value = "AvroEmbedded"
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.defaults.value.as_deref(), Some("Int64"));
        assert_eq!(config.defaults.key, None);
        let payments = &config.streams["payments"];
        assert_eq!(payments.for_slot(Slot::Key), Some("UuidBinary"));
        assert_eq!(payments.for_slot(Slot::Value), Some("AvroEmbedded"));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.streams.is_empty());
        assert!(config.codecs.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_property_resolver_defaults_and_parsing() {
        let config: Config = toml::from_str(
            r#"
            [codecs.UuidBinary.properties]
            mostSignificantBitsFirst = false
            somebodyElsesProperty = "whatever"
            "#,
        )
        .unwrap();

        let resolver = config.properties_for("UuidBinary");
        assert_eq!(
            resolver.get_bool("mostSignificantBitsFirst", true).unwrap(),
            false
        );
        // Unset names fall back to the default.
        assert!(resolver.get_bool("neverSet", true).unwrap());
        // Unknown names are carried but harmless.
        assert_eq!(resolver.get_str("somebodyElsesProperty"), Some("whatever"));

        // Codecs without a table resolve everything to defaults.
        let resolver = config.properties_for("Int32");
        assert!(resolver.get_bool("anything", true).unwrap());
    }

    #[test]
    fn test_unparseable_bool_is_an_invalid_property() {
        let resolver = PropertyResolver::from_pairs([("mostSignificantBitsFirst", "maybe")]);
        let err = resolver
            .get_bool("mostSignificantBitsFirst", true)
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidProperty { .. }));
    }

    #[test]
    fn test_load_reads_a_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[streams.metrics]\nvalue = \"Int32\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.streams["metrics"].value.as_deref(), Some("Int32"));
    }

    #[test]
    fn test_load_missing_file_reports_the_path() {
        let err = Config::load(Path::new("/nonexistent/streamlens.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/streamlens.toml"));
    }
}

//! Per-stream, per-slot codec resolution
//!
//! The registry is built once from configuration and is a pure, stateless
//! dispatcher afterwards: the same (stream, slot) always resolves to the same
//! codec instance. No format sniffing happens here; auto-detection, where it
//! exists, is a property of an individual codec's `can_deserialize`.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::codec::{
    AvroEmbeddedCodec, Codec, DecodedValue, Int32Codec, Int64Codec, RecordHeaders, Slot,
    UuidBinaryCodec,
};
use crate::config::Config;
use crate::error::{ConfigurationError, DecodeError};

/// Active codec per slot for one stream.
#[derive(Clone, Default, Debug)]
struct SlotBinding {
    key: Option<Arc<dyn Codec>>,
    value: Option<Arc<dyn Codec>>,
}

impl SlotBinding {
    fn get(&self, slot: Slot) -> Option<&Arc<dyn Codec>> {
        match slot {
            Slot::Key => self.key.as_ref(),
            Slot::Value => self.value.as_ref(),
        }
    }
}

/// Resolves which codec is active for each stream and slot.
#[derive(Debug)]
pub struct CodecRegistry {
    /// Registration order: built-ins first, then extensions.
    codecs: Vec<Arc<dyn Codec>>,
    streams: HashMap<String, SlotBinding>,
    defaults: SlotBinding,
}

impl CodecRegistry {
    /// Build a registry with the built-in codec set only.
    pub fn from_config(config: &Config) -> Result<Self, ConfigurationError> {
        Self::with_extensions(config, Vec::new())
    }

    /// Build a registry with the built-ins plus external codecs.
    ///
    /// Extensions implement the same [`Codec`] trait as the built-ins and are
    /// addressed by [`Codec::name`] from the configuration. Built-ins are
    /// registered first, so an extension cannot shadow a built-in name.
    pub fn with_extensions(
        config: &Config,
        extensions: Vec<Arc<dyn Codec>>,
    ) -> Result<Self, ConfigurationError> {
        let mut codecs = builtin_codecs(config)?;
        codecs.extend(extensions);

        let lookup = |name: &str| -> Result<Arc<dyn Codec>, ConfigurationError> {
            codecs
                .iter()
                .find(|codec| codec.name() == name)
                .cloned()
                .ok_or_else(|| ConfigurationError::UnknownCodec {
                    name: name.to_owned(),
                })
        };

        let bind = |selection: &crate::config::SlotSelection| -> Result<SlotBinding, ConfigurationError> {
            Ok(SlotBinding {
                key: selection.for_slot(Slot::Key).map(&lookup).transpose()?,
                value: selection.for_slot(Slot::Value).map(&lookup).transpose()?,
            })
        };

        let defaults = bind(&config.defaults)?;
        let mut streams = HashMap::with_capacity(config.streams.len());
        for (stream, selection) in &config.streams {
            let binding = bind(selection)?;
            if let Some(codec) = binding.get(Slot::Key) {
                debug!(stream = stream.as_str(), slot = %Slot::Key, codec = codec.name(), "bound codec");
            }
            if let Some(codec) = binding.get(Slot::Value) {
                debug!(stream = stream.as_str(), slot = %Slot::Value, codec = codec.name(), "bound codec");
            }
            streams.insert(stream.clone(), binding);
        }

        Ok(Self {
            codecs,
            streams,
            defaults,
        })
    }

    /// The codec active for the given stream and slot.
    ///
    /// Resolution order: stream-specific binding, then the default binding.
    /// Deterministic for the lifetime of the registry.
    pub fn resolve(&self, stream: &str, slot: Slot) -> Result<Arc<dyn Codec>, ConfigurationError> {
        self.streams
            .get(stream)
            .and_then(|binding| binding.get(slot))
            .or_else(|| self.defaults.get(slot))
            .cloned()
            .ok_or_else(|| ConfigurationError::NoCodecForSlot {
                stream: stream.to_owned(),
                slot,
            })
    }

    /// Look up a registered codec by its configured name.
    pub fn codec_by_name(&self, name: &str) -> Option<&Arc<dyn Codec>> {
        self.codecs.iter().find(|codec| codec.name() == name)
    }

    /// Names of registered codecs able to deserialize the given slot, in
    /// registration order.
    pub fn codecs_for(&self, stream: &str, slot: Slot) -> Vec<&'static str> {
        self.codecs
            .iter()
            .filter(|codec| codec.can_deserialize(stream, slot))
            .map(|codec| codec.name())
            .collect()
    }

    /// Serialize text into wire bytes with the resolved codec.
    pub fn serialize(&self, stream: &str, slot: Slot, text: &str) -> Result<Vec<u8>, DecodeError> {
        let codec = self.resolve(stream, slot)?;
        let serializer = codec.serializer(stream, slot)?;
        Ok(serializer.serialize(text)?)
    }

    /// Deserialize wire bytes into a [`DecodedValue`] with the resolved codec.
    pub fn deserialize(
        &self,
        stream: &str,
        slot: Slot,
        headers: &RecordHeaders,
        data: &[u8],
    ) -> Result<DecodedValue, DecodeError> {
        let codec = self.resolve(stream, slot)?;
        let deserializer = codec.deserializer(stream, slot)?;
        Ok(deserializer.deserialize(headers, data)?)
    }
}

/// The built-in codec set, enumerated explicitly. No reflection, no dynamic
/// discovery.
fn builtin_codecs(config: &Config) -> Result<Vec<Arc<dyn Codec>>, ConfigurationError> {
    let uuid = UuidBinaryCodec::from_properties(&config.properties_for("UuidBinary"))?;
    Ok(vec![
        Arc::new(Int32Codec),
        Arc::new(Int64Codec),
        Arc::new(uuid),
        Arc::new(AvroEmbeddedCodec),
    ])
}

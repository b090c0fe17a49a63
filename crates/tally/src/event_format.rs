//! Event envelope format
//!
//! Ledger events travel as JSON envelopes:
//! - **id**: Stable event identifier assigned by the event source
//! - **name**: Event type (e.g. `"BetCreated"`, `"Voted"`)
//! - **payload**: Event fields, amounts as decimal strings
//! - **metadata**: Optional timestamp, correlation ID and custom fields
//!
//! # Example
//!
//! ```no_run
//! use tally::prelude::*;
//! use tally::event_format::{EventCodec, Envelope, JsonCodec};
//!
//! # fn main() -> Result<()> {
//! let bytes = br#"{"id":0,"name":"BetClosed","payload":{"betId":1}}"#;
//! let envelope = JsonCodec.decode(bytes)?;
//! let (id, event) = envelope.into_event()?;
//! assert_eq!(event.name(), "BetClosed");
//! # Ok(())
//! # }
//! ```

use crate::{EventId, LedgerEvent, Result, TallyError};
use serde::{Deserialize, Serialize};

/// Wire form of one ledger event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub id: EventId,

    pub name: String,

    #[serde(default)]
    pub payload: serde_json::Value,

    #[serde(default)]
    pub metadata: EventMetadata,
}

/// Event metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Timestamp (RFC 3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Correlation ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,

    /// Custom fields
    #[serde(flatten)]
    pub custom: std::collections::HashMap<String, serde_json::Value>,
}

impl Envelope {
    /// Wrap a typed event
    pub fn from_event(id: EventId, event: &LedgerEvent) -> Result<Self> {
        let mut tagged =
            serde_json::to_value(event).map_err(|e| TallyError::Serialization(e.to_string()))?;

        let payload = tagged
            .get_mut("payload")
            .map(serde_json::Value::take)
            .unwrap_or_default();

        Ok(Self {
            id,
            name: event.name().to_string(),
            payload,
            metadata: EventMetadata::default(),
        })
    }

    /// Add a timestamp
    pub fn with_timestamp(mut self) -> Self {
        self.metadata.timestamp = Some(chrono::Utc::now().to_rfc3339());
        self
    }

    /// Add a correlation ID
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.correlation_id = Some(id.into());
        self
    }

    /// Add custom metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.custom.insert(key.into(), value);
        self
    }

    /// Decode the payload into a typed event
    ///
    /// Unknown event names and malformed payloads are decode errors.
    pub fn into_event(self) -> Result<(EventId, LedgerEvent)> {
        let tagged = serde_json::json!({
            "name": self.name,
            "payload": self.payload,
        });

        let event: LedgerEvent = serde_json::from_value(tagged).map_err(|e| {
            TallyError::EventDecode(format!("event {} ({}): {}", self.id, self.name, e))
        })?;

        Ok((self.id, event))
    }
}

/// Envelope codec
pub trait EventCodec: Send + Sync {
    fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>>;

    fn decode(&self, bytes: &[u8]) -> Result<Envelope>;

    /// Codec name
    fn name(&self) -> &str;
}

/// JSON codec (one envelope per document)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl EventCodec for JsonCodec {
    fn encode(&self, envelope: &Envelope) -> Result<Vec<u8>> {
        serde_json::to_vec(envelope).map_err(|e| TallyError::Serialization(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Envelope> {
        serde_json::from_slice(bytes).map_err(|e| TallyError::EventDecode(e.to_string()))
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Encode a typed event with the default codec (JSON)
pub fn encode(id: EventId, event: &LedgerEvent) -> Result<Vec<u8>> {
    JsonCodec.encode(&Envelope::from_event(id, event)?)
}

/// Decode a typed event with the default codec (JSON)
pub fn decode(bytes: &[u8]) -> Result<(EventId, LedgerEvent)> {
    JsonCodec.decode(bytes)?.into_event()
}

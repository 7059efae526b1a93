//! Parameter and result transformation for routed calls.
//!
//! Every handler result passes through a [`ResponseTransformer`] before it is
//! placed in a JSONRPC success response. The default [`EnvelopeTransformer`]
//! wraps results into the `{data, metadata}` shape clients expect.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, Result};

/// Fixed execution time reported in every metadata block
pub const EXECUTION_TIME_MS: u64 = 50;

/// Version string reported in every metadata block
pub const RESPONSE_VERSION: &str = "1.0.0";

/// Trait for transforming JSONRPC parameters and results
pub trait ResponseTransformer: Send + Sync {
    /// Transform a result before it's returned in a JSONRPC response
    fn transform_result(&self, result: serde_json::Value) -> Result<serde_json::Value>;

    /// Transform JSONRPC parameters received from a request
    fn transform_params(&self, params: serde_json::Value) -> Result<serde_json::Value>;
}

/// Helper functions to serialize/deserialize with type checking
pub fn serialize<T: Serialize>(value: T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

/// Bind raw parameters to a handler's parameter type
pub fn deserialize<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::InvalidParam(e.to_string()))
}

/// Metadata attached to every successful result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Reported execution time in milliseconds (constant)
    pub execution_time: u64,
    /// Whether the result came from a cache (always false)
    pub cached: bool,
    /// Response format version
    pub version: String,
    /// Wall-clock Unix time in milliseconds at response construction
    pub response_time: i64,
}

impl ResponseMetadata {
    /// Metadata stamped with the current wall-clock time
    pub fn now() -> Self {
        Self {
            execution_time: EXECUTION_TIME_MS,
            cached: false,
            version: RESPONSE_VERSION.to_string(),
            response_time: chrono::Utc::now().timestamp_millis(),
        }
    }
}

/// Success result body: handler output plus metadata
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    /// Handler output
    pub data: serde_json::Value,
    /// Response metadata
    pub metadata: ResponseMetadata,
}

/// Wraps handler results into `{data, metadata}`, params pass through untouched
#[derive(Clone, Default)]
pub struct EnvelopeTransformer;

impl ResponseTransformer for EnvelopeTransformer {
    fn transform_result(&self, result: serde_json::Value) -> Result<serde_json::Value> {
        serialize(Envelope {
            data: result,
            metadata: ResponseMetadata::now(),
        })
    }

    fn transform_params(&self, params: serde_json::Value) -> Result<serde_json::Value> {
        Ok(params)
    }
}

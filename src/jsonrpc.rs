//! JSONRPC protocol structures and handling.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::{debug, warn};
use crate::transform::{EnvelopeTransformer, ResponseTransformer, deserialize, serialize};
use crate::{Error, Result, codes};

/// Protocol version every request must carry
pub const JSONRPC_VERSION: &str = "2.0";

/// Untyped JSONRPC request that passed envelope validation
#[derive(Debug, Clone, PartialEq)]
pub struct RawRequest {
    /// Method name used for routing
    pub method: String,
    /// Method parameters as raw JSON (`{}` when absent)
    pub params: Value,
    /// Request ID, echoed verbatim (`null` when absent)
    pub id: Value,
}

impl RawRequest {
    /// Validate a parsed JSON value as a request envelope.
    ///
    /// Checks run in order and the first failure wins: the protocol version,
    /// then the presence of a method.
    pub fn from_value(value: Value) -> Result<Self> {
        let id = request_id(&value);
        let Value::Object(mut fields) = value else {
            return Err(Error::InvalidRequest(
                "jsonrpc must be \"2.0\"".to_string(),
            ));
        };

        if fields.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(Error::InvalidRequest(
                "jsonrpc must be \"2.0\"".to_string(),
            ));
        }

        let method = match fields.remove("method") {
            Some(method) if !is_falsy(&method) => method_text(method),
            _ => return Err(Error::InvalidRequest("method required".to_string())),
        };

        let params = fields
            .remove("params")
            .unwrap_or_else(|| Value::Object(Default::default()));

        Ok(Self { method, params, id })
    }
}

/// Extract the request ID from a parsed value, `null` when absent
pub fn request_id(value: &Value) -> Value {
    value.get("id").cloned().unwrap_or(Value::Null)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

// Non-string methods route by their JSON text and never match the table.
fn method_text(method: Value) -> String {
    match method {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// JSONRPC success response structure
#[derive(Debug, Deserialize, Serialize)]
pub struct SuccessResponse<T> {
    /// JSONRPC version (should be "2.0")
    pub jsonrpc: String,
    /// Request ID (same as in the request)
    pub id: Value,
    /// Response result
    pub result: T,
}

/// JSONRPC error response structure
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    /// JSONRPC version (should be "2.0")
    pub jsonrpc: String,
    /// Request ID (same as in the request)
    pub id: Value,
    /// Error details
    pub error: RpcError,
}

/// JSONRPC error object
#[derive(Debug, Deserialize, Serialize)]
pub struct RpcError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Additional error data, `{}` when there is nothing to report
    pub data: Value,
}

/// JSONRPC response (either success or error)
#[derive(Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Response<T> {
    /// Success response
    Success(SuccessResponse<T>),
    /// Error response
    Error(ErrorResponse),
}

/// Create a JSONRPC success response
pub fn success<T>(result: T, id: Value) -> Response<T> {
    Response::Success(SuccessResponse {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id,
        result,
    })
}

/// Create a JSONRPC error response
pub fn error<T>(error: Error, id: Value) -> Response<T> {
    let code = error.code();
    let message = match &error {
        Error::Parse(err) => format!("Parse error: {}", err),
        Error::InvalidRequest(msg) => format!("Invalid Request: {}", msg),
        other => format!("Internal error: {}", other),
    };
    let data = if code == codes::INTERNAL_ERROR {
        let kind = error.kind();
        json!({
            "errorKind": kind,
            "traceback": format!("Mock traceback for {}", kind),
        })
    } else {
        json!({})
    };

    Response::Error(ErrorResponse {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id,
        error: RpcError {
            code,
            message,
            data,
        },
    })
}

/// Method handler function signature
pub type HandlerFn = Box<
    dyn Fn(Value) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Value>> + Send>>
        + Send
        + Sync,
>;

/// JSONRPC request dispatcher
pub struct Dispatcher {
    /// Method handlers keyed by exact method name
    handlers: HashMap<String, HandlerFn>,
    /// Result transformer
    transformer: Arc<dyn ResponseTransformer>,
    /// Calls that reached routing
    request_count: AtomicU64,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a new empty dispatcher with the envelope transformer
    pub fn new() -> Self {
        Self::with_transformer(Arc::new(EnvelopeTransformer))
    }

    /// Create a new empty dispatcher with a custom transformer
    pub fn with_transformer(transformer: Arc<dyn ResponseTransformer>) -> Self {
        Self {
            handlers: HashMap::new(),
            transformer,
            request_count: AtomicU64::new(0),
        }
    }

    /// Names of all registered methods
    pub fn method_names(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Number of calls that reached routing, including unknown methods
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Register a method handler
    pub fn register<F, Fut, P, O>(&mut self, method: &str, handler: F)
    where
        F: Fn(P) -> Fut + Send + Sync + Clone + 'static,
        Fut: std::future::Future<Output = Result<O>> + Send + 'static,
        P: DeserializeOwned + Send + Sync + 'static,
        O: Serialize + Send + 'static,
    {
        let method_name = method.to_string();
        let transformer = self.transformer.clone();

        let handler_fn: HandlerFn = Box::new(move |params: Value| {
            let handler_clone = handler.clone();
            let transformer_clone = transformer.clone();

            Box::pin(async move {
                let transformed_params = transformer_clone.transform_params(params)?;
                let typed_params: P = deserialize(transformed_params)?;
                let result = handler_clone(typed_params).await?;
                let json_result = serialize(result)?;
                transformer_clone.transform_result(json_result)
            })
        });

        self.handlers.insert(method_name, handler_fn);
    }

    /// Dispatch a JSONRPC request line given as text
    pub async fn dispatch(&self, request_str: &str) -> Result<String> {
        self.dispatch_bytes(request_str.as_bytes()).await
    }

    /// Dispatch a JSONRPC request line given as raw bytes.
    ///
    /// Every failure of the request itself becomes an error response; the
    /// only `Err` is a response that cannot be serialized.
    pub async fn dispatch_bytes(&self, request: &[u8]) -> Result<String> {
        let response = match serde_json::from_slice::<Value>(request) {
            Ok(value) => self.dispatch_value(value).await,
            Err(e) => {
                debug!("Rejecting unparseable request: {}", e);
                error(Error::Parse(e), Value::Null)
            }
        };

        Ok(serde_json::to_string(&response)?)
    }

    /// Dispatch an already parsed request value
    pub async fn dispatch_value(&self, value: Value) -> Response<Value> {
        let id = request_id(&value);
        let request = match RawRequest::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejecting invalid request (id {}): {}", id, e);
                return error(e, id);
            }
        };

        match self.call(&request.method, request.params).await {
            Ok(result) => success(result, request.id),
            Err(e) => {
                warn!("Method {} failed: {}", request.method, e);
                error(e, request.id)
            }
        }
    }

    /// Route a validated call to its handler
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let count = self.request_count.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Routing {} (request #{})", method, count);

        match self.handlers.get(method) {
            Some(handler) => handler(params).await,
            None => Err(Error::MethodNotFound(method.to_string())),
        }
    }
}

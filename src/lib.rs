//! Line-delimited JSON-RPC 2.0 fixture server.
//!
//! This library provides a JSONRPC dispatcher with a fixed table of canned
//! methods and a stdio loop that feeds it, so a client's request/response
//! handling can be exercised without a real backend.

use std::sync::Arc;

use thiserror::Error;

pub mod config;
pub mod jsonrpc;
pub mod logging;
pub mod methods;
pub mod server;
pub mod transform;

// Re-export key types
pub use config::{Cli, ServerConfig};
pub use jsonrpc::Dispatcher;
pub use server::Server;
pub use transform::{EnvelopeTransformer, ResponseTransformer};

/// JSONRPC 2.0 reserved error codes used by the server
pub mod codes {
    /// Invalid JSON was received
    pub const PARSE_ERROR: i32 = -32700;
    /// The JSON sent is not a valid request object
    pub const INVALID_REQUEST: i32 = -32600;
    /// Internal JSON-RPC error
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Custom error type for the library
#[derive(Debug, Error)]
pub enum Error {
    /// Input/output error on the transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The request line is not valid JSON
    #[error("{0}")]
    Parse(#[source] serde_json::Error),
    /// The request envelope is malformed
    #[error("{0}")]
    InvalidRequest(String),
    /// No handler is registered for the method
    #[error("Method not found: {0}")]
    MethodNotFound(String),
    /// Parameters could not be bound or are unusable
    #[error("Invalid parameter: {0}")]
    InvalidParam(String),
    /// Result serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Failure raised on purpose by a handler
    #[error("{0}")]
    Raised(String),
}

impl Error {
    /// JSONRPC error code reported for this error
    pub fn code(&self) -> i32 {
        match self {
            Error::Parse(_) => codes::PARSE_ERROR,
            Error::InvalidRequest(_) => codes::INVALID_REQUEST,
            _ => codes::INTERNAL_ERROR,
        }
    }

    /// Stable tag naming the kind of failure, reported in error data
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "IoError",
            Error::Parse(_) => "ParseError",
            Error::InvalidRequest(_) => "InvalidRequest",
            Error::MethodNotFound(_) => "MethodNotFound",
            Error::InvalidParam(_) => "InvalidParams",
            Error::Json(_) => "SerializationError",
            Error::Raised(_) => "HandlerFailure",
        }
    }
}

/// Type alias for library results
pub type Result<T> = std::result::Result<T, Error>;

/// Factory function to create a dispatcher with all fixture methods registered
pub fn create_default_dispatcher() -> jsonrpc::Dispatcher {
    create_dispatcher_with_transformer(EnvelopeTransformer::default())
}

/// Factory function to create a dispatcher with a custom transformer
pub fn create_dispatcher_with_transformer<T>(transformer: T) -> jsonrpc::Dispatcher
where
    T: ResponseTransformer + 'static,
{
    use methods::{Method, agent, diagnostics, extension_generator, pattern_learning};

    let mut dispatcher = jsonrpc::Dispatcher::with_transformer(Arc::new(transformer));

    // Pattern learning fixtures
    let recommendations = pattern_learning::GetRecommendations;
    dispatcher.register(
        recommendations.name(),
        move |params: pattern_learning::RecommendationParams| async move {
            recommendations.execute(params).await
        },
    );

    let find_similar = pattern_learning::FindSimilar;
    dispatcher.register(
        find_similar.name(),
        move |params: pattern_learning::SimilarParams| async move {
            find_similar.execute(params).await
        },
    );

    let statistics = pattern_learning::GetStatistics;
    dispatcher.register(
        statistics.name(),
        move |params: serde_json::Value| async move { statistics.execute(params).await },
    );

    // Extension generator fixtures
    let analyze = extension_generator::AnalyzeRequirements;
    dispatcher.register(
        analyze.name(),
        move |params: extension_generator::AnalyzeParams| async move {
            analyze.execute(params).await
        },
    );

    let generate = extension_generator::Generate;
    dispatcher.register(
        generate.name(),
        move |params: extension_generator::GenerateParams| async move {
            generate.execute(params).await
        },
    );

    // Agent fixtures
    let detect_type = agent::DetectType;
    dispatcher.register(
        detect_type.name(),
        move |params: serde_json::Value| async move { detect_type.execute(params).await },
    );

    // Diagnostic methods
    let echo = diagnostics::Echo;
    dispatcher.register(echo.name(), move |params: serde_json::Value| async move {
        echo.execute(params).await
    });

    let sleep = diagnostics::Sleep;
    dispatcher.register(
        sleep.name(),
        move |params: diagnostics::SleepParams| async move { sleep.execute(params).await },
    );

    let fail = diagnostics::Fail;
    dispatcher.register(
        fail.name(),
        move |params: diagnostics::FailParams| async move { fail.execute(params).await },
    );

    dispatcher
}

//! Fixture methods served by the dispatcher.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::Result;

/// Base trait for all method implementations
#[async_trait]
pub trait Method {
    /// The parameter type for the method
    type Params: DeserializeOwned + Send + Sync;

    /// The result type for the method
    type Output: Serialize + Send;

    /// The exact, case-sensitive method name used for routing
    fn name(&self) -> &'static str;

    /// Execute the method with the given parameters
    async fn execute(&self, params: Self::Params) -> Result<Self::Output>;
}

pub mod agent;
pub mod diagnostics;
pub mod extension_generator;
pub mod pattern_learning;

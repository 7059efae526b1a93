//! Diagnostic `test.*` methods for exercising client behaviour
//!
//! These methods exist to test the caller rather than to return fixtures:
//! `test.echo` reflects its params, `test.sleep` holds the dispatch loop for
//! a while to exercise timeouts, and `test.error` always fails.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time;

use super::Method;
use crate::logging::debug;
use crate::{Error, Result};

/// `test.echo`: returns params unchanged
#[derive(Clone, Copy)]
pub struct Echo;

#[async_trait]
impl Method for Echo {
    type Params = serde_json::Value;
    type Output = serde_json::Value;

    fn name(&self) -> &'static str {
        "test.echo"
    }

    async fn execute(&self, params: Self::Params) -> Result<Self::Output> {
        Ok(params)
    }
}

/// `test.sleep`: suspends the dispatch loop before answering
#[derive(Clone, Copy)]
pub struct Sleep;

fn default_duration() -> serde_json::Number {
    serde_json::Number::from(1)
}

/// Parameters for `test.sleep`
#[derive(Debug, Deserialize)]
pub struct SleepParams {
    /// Seconds to sleep, fractional values allowed
    #[serde(default = "default_duration")]
    pub duration: serde_json::Number,
}

/// Output of `test.sleep`
#[derive(Debug, Serialize)]
pub struct Slept {
    /// The requested duration, exactly as supplied
    pub slept: serde_json::Number,
}

/// Convert a requested number of seconds into a sleep duration
fn sleep_duration(seconds: &serde_json::Number) -> Result<Duration> {
    let secs = seconds
        .as_f64()
        .ok_or_else(|| Error::InvalidParam(format!("duration {} is not representable", seconds)))?;

    if secs < 0.0 {
        return Err(Error::InvalidParam(
            "sleep length must be non-negative".to_string(),
        ));
    }

    Duration::try_from_secs_f64(secs)
        .map_err(|e| Error::InvalidParam(format!("duration {} is out of range: {}", seconds, e)))
}

#[async_trait]
impl Method for Sleep {
    type Params = SleepParams;
    type Output = Slept;

    fn name(&self) -> &'static str {
        "test.sleep"
    }

    async fn execute(&self, params: Self::Params) -> Result<Self::Output> {
        let duration = sleep_duration(&params.duration)?;
        debug!("Sleeping for {:?}", duration);

        // Runs to completion; nothing cancels an in-flight sleep
        time::sleep(duration).await;

        Ok(Slept {
            slept: params.duration,
        })
    }
}

/// `test.error`: always fails
#[derive(Clone, Copy)]
pub struct Fail;

fn default_error_type() -> String {
    "ValueError".to_string()
}

/// Parameters for `test.error`
#[derive(Debug, Deserialize)]
pub struct FailParams {
    /// Label embedded in the error message; the failure kind never changes
    #[serde(rename = "type", default = "default_error_type")]
    pub error_type: String,
}

#[async_trait]
impl Method for Fail {
    type Params = FailParams;
    type Output = ();

    fn name(&self) -> &'static str {
        "test.error"
    }

    async fn execute(&self, params: Self::Params) -> Result<Self::Output> {
        Err(Error::Raised(format!("Mock {}", params.error_type)))
    }
}

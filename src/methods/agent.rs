//! Agent detection fixture

use async_trait::async_trait;
use serde::Serialize;

use super::Method;
use crate::Result;

/// `agent.detect_type`
#[derive(Clone, Copy)]
pub struct DetectType;

/// Output of `agent.detect_type`
#[derive(Debug, Serialize)]
pub struct AgentProfile {
    pub agent_type: &'static str,
    pub capabilities: &'static [&'static str],
    pub token_budget: u32,
    pub tier: &'static str,
}

static PROFILE: AgentProfile = AgentProfile {
    agent_type: "claude_code",
    capabilities: &["rich_feedback", "code_generation"],
    token_budget: 5000,
    tier: "development",
};

#[async_trait]
impl Method for DetectType {
    type Params = serde_json::Value;
    type Output = &'static AgentProfile;

    fn name(&self) -> &'static str {
        "agent.detect_type"
    }

    async fn execute(&self, _params: Self::Params) -> Result<Self::Output> {
        Ok(&PROFILE)
    }
}

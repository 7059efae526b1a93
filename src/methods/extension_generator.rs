//! Extension generator fixtures

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Method;
use crate::Result;

/// `extension_generator.analyze_requirements`
#[derive(Clone, Copy)]
pub struct AnalyzeRequirements;

/// Parameters for `extension_generator.analyze_requirements`
#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    /// Requested extension description, accepted but not reflected in the fixture
    #[serde(default)]
    pub description: String,
}

/// Requirements extracted from a description
#[derive(Debug, Serialize)]
pub struct Requirements {
    pub domain: &'static str,
    pub backend: &'static str,
    pub complexity: &'static str,
    pub estimated_time: &'static str,
}

/// Output of `extension_generator.analyze_requirements`
#[derive(Debug, Serialize)]
pub struct RequirementsAnalysis {
    pub requirements: Requirements,
    pub recommended_path: &'static str,
    pub confidence: f64,
}

static ANALYSIS: RequirementsAnalysis = RequirementsAnalysis {
    requirements: Requirements {
        domain: "analytics",
        backend: "python",
        complexity: "medium",
        estimated_time: "2-5 minutes",
    },
    recommended_path: "advanced_yaml",
    confidence: 0.88,
};

#[async_trait]
impl Method for AnalyzeRequirements {
    type Params = AnalyzeParams;
    type Output = &'static RequirementsAnalysis;

    fn name(&self) -> &'static str {
        "extension_generator.analyze_requirements"
    }

    async fn execute(&self, _params: Self::Params) -> Result<Self::Output> {
        Ok(&ANALYSIS)
    }
}

/// `extension_generator.generate`
#[derive(Clone, Copy)]
pub struct Generate;

fn default_backend() -> String {
    "python".to_string()
}

/// Parameters for `extension_generator.generate`
#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    /// Requested extension description, accepted but not reflected in the fixture
    #[serde(default)]
    pub description: String,

    /// Backend language of the generated extension
    #[serde(default = "default_backend")]
    pub backend_language: String,
}

/// Estimated performance of a generated extension
#[derive(Debug, Serialize)]
pub struct Performance {
    pub estimated_ops_per_sec: u32,
    pub memory_usage: u32,
}

/// Output of `extension_generator.generate`
#[derive(Debug, Serialize)]
pub struct GenerationResult {
    pub success: bool,
    pub extension_path: String,
    pub backend: String,
    pub generated_files: Vec<String>,
    pub test_suite: String,
    pub performance: Performance,
}

const PYTHON_OPS_PER_SEC: u32 = 10_000;
const NATIVE_OPS_PER_SEC: u32 = 100_000;
const MEMORY_USAGE: u32 = 1024;

#[async_trait]
impl Method for Generate {
    type Params = GenerateParams;
    type Output = GenerationResult;

    fn name(&self) -> &'static str {
        "extension_generator.generate"
    }

    async fn execute(&self, params: Self::Params) -> Result<Self::Output> {
        let backend = params.backend_language;
        let estimated_ops_per_sec = if backend == "python" {
            PYTHON_OPS_PER_SEC
        } else {
            NATIVE_OPS_PER_SEC
        };

        Ok(GenerationResult {
            success: true,
            extension_path: format!("/mock/path/extension_{}", backend),
            generated_files: vec![
                format!("extension_{}.py", backend),
                "tests.py".to_string(),
                "README.md".to_string(),
            ],
            test_suite: format!("tests_{}.py", backend),
            performance: Performance {
                estimated_ops_per_sec,
                memory_usage: MEMORY_USAGE,
            },
            backend,
        })
    }
}

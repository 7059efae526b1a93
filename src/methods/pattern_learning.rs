//! Pattern learning fixtures: recommendations, similarity search and statistics

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Method;
use crate::Result;

/// Recommendation fixture record, parameterized by domain at execution time
struct RecommendationTemplate {
    confidence_score: f64,
    success_rate: f64,
    avg_performance_ms: u32,
    usage_count: u32,
    description_prefix: &'static str,
    anti_patterns: &'static [&'static str],
}

const RECOMMENDATIONS: [RecommendationTemplate; 2] = [
    RecommendationTemplate {
        confidence_score: 0.95,
        success_rate: 0.92,
        avg_performance_ms: 150,
        usage_count: 42,
        description_prefix: "High-performance",
        anti_patterns: &[],
    },
    RecommendationTemplate {
        confidence_score: 0.87,
        success_rate: 0.85,
        avg_performance_ms: 200,
        usage_count: 28,
        description_prefix: "Robust",
        anti_patterns: &["avoid_blocking_io"],
    },
];

const RECOMMENDATION_EXECUTION_TIME_MS: u32 = 15;

/// `pattern_learning.get_recommendations`
#[derive(Clone, Copy)]
pub struct GetRecommendations;

fn default_domain() -> String {
    "general".to_string()
}

/// Parameters for `pattern_learning.get_recommendations`
#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    /// Domain the recommendations are generated for
    #[serde(default = "default_domain")]
    pub domain: String,
}

/// A recommended pattern
#[derive(Debug, Serialize, PartialEq)]
pub struct Recommendation {
    pub pattern_name: String,
    pub confidence_score: f64,
    pub domain: String,
    pub success_rate: f64,
    pub avg_performance_ms: u32,
    pub usage_count: u32,
    pub description: String,
    pub anti_patterns: Vec<String>,
}

/// Output of `pattern_learning.get_recommendations`
#[derive(Debug, Serialize)]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,
    pub total_patterns: usize,
    pub execution_time_ms: u32,
}

#[async_trait]
impl Method for GetRecommendations {
    type Params = RecommendationParams;
    type Output = Recommendations;

    fn name(&self) -> &'static str {
        "pattern_learning.get_recommendations"
    }

    async fn execute(&self, params: Self::Params) -> Result<Self::Output> {
        let domain = params.domain;
        let recommendations: Vec<Recommendation> = RECOMMENDATIONS
            .iter()
            .enumerate()
            .map(|(i, template)| Recommendation {
                pattern_name: format!("{}_pattern_{}", domain, i + 1),
                confidence_score: template.confidence_score,
                domain: domain.clone(),
                success_rate: template.success_rate,
                avg_performance_ms: template.avg_performance_ms,
                usage_count: template.usage_count,
                description: format!("{} {} pattern", template.description_prefix, domain),
                anti_patterns: template
                    .anti_patterns
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            })
            .collect();

        Ok(Recommendations {
            total_patterns: recommendations.len(),
            recommendations,
            execution_time_ms: RECOMMENDATION_EXECUTION_TIME_MS,
        })
    }
}

/// `pattern_learning.find_similar`
#[derive(Clone, Copy)]
pub struct FindSimilar;

/// Parameters for `pattern_learning.find_similar`
#[derive(Debug, Deserialize)]
pub struct SimilarParams {
    /// Free-text description to match against
    #[serde(default)]
    pub description: String,
}

/// A pattern similar to the given description
#[derive(Debug, Serialize)]
pub struct SimilarPattern {
    pub pattern_name: String,
    pub similarity_score: f64,
    pub description: String,
}

/// Output of `pattern_learning.find_similar`
#[derive(Debug, Serialize)]
pub struct SimilarPatterns {
    pub similar_patterns: Vec<SimilarPattern>,
}

#[async_trait]
impl Method for FindSimilar {
    type Params = SimilarParams;
    type Output = SimilarPatterns;

    fn name(&self) -> &'static str {
        "pattern_learning.find_similar"
    }

    async fn execute(&self, params: Self::Params) -> Result<Self::Output> {
        Ok(SimilarPatterns {
            similar_patterns: vec![SimilarPattern {
                pattern_name: "similar_pattern_1".to_string(),
                similarity_score: 0.89,
                description: format!("Pattern similar to: {}", params.description),
            }],
        })
    }
}

/// `pattern_learning.get_statistics`
#[derive(Clone, Copy)]
pub struct GetStatistics;

/// Pattern counts per domain
#[derive(Debug, Serialize)]
pub struct DomainCounts {
    pub finance: u32,
    pub analytics: u32,
    pub ml: u32,
    pub geospatial: u32,
    pub text: u32,
}

/// Output of `pattern_learning.get_statistics`
#[derive(Debug, Serialize)]
pub struct Statistics {
    pub total_patterns: u32,
    pub domains: DomainCounts,
    pub avg_success_rate: f64,
    pub total_usage: u32,
}

static STATISTICS: Statistics = Statistics {
    total_patterns: 156,
    domains: DomainCounts {
        finance: 42,
        analytics: 38,
        ml: 35,
        geospatial: 25,
        text: 16,
    },
    avg_success_rate: 0.91,
    total_usage: 1243,
};

#[async_trait]
impl Method for GetStatistics {
    // Any params are accepted and ignored
    type Params = serde_json::Value;
    type Output = &'static Statistics;

    fn name(&self) -> &'static str {
        "pattern_learning.get_statistics"
    }

    async fn execute(&self, _params: Self::Params) -> Result<Self::Output> {
        Ok(&STATISTICS)
    }
}

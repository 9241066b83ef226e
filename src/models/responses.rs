use serde::{Deserialize, Serialize};
use crate::models::domain::{
    CompatibilityGraph, CompatibilityResult, GraphSummary, RankedMatch, ScoreBreakdown,
};

/// Response for the compatibility endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "targetUserId")]
    pub target_user_id: String,
    #[serde(flatten)]
    pub result: CompatibilityResult,
    pub breakdown: Option<ScoreBreakdown>,
}

/// Response for ranked match lists and team recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub matches: Vec<RankedMatch>,
    /// Departments present among the ranked candidates, before filtering
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the graph endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResponse {
    #[serde(flatten)]
    pub graph: CompatibilityGraph,
    pub threshold: u8,
    pub summary: GraphSummary,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

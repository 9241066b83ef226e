// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    UserProfile, CompatibilityResult, ScoreBreakdown, RankedMatch, GraphNode, GraphEdge,
    CompatibilityGraph, GraphSummary, ScoreBucket, MatchFilters, NetworkStats, ScoringWeights,
    ScoreCompression, MatchingRules, REQUIREMENT_PROFILE_ID, FALLBACK_DISPLAY_NAME, sanitize_display_name,
};
pub use requests::{CompatibilityRequest, RankMatchesRequest, RecommendRequest, RequirementsRequest, GraphQuery};
pub use responses::{CompatibilityResponse, MatchListResponse, GraphResponse, HealthResponse, ErrorResponse};

// Core algorithm exports
pub mod filters;
pub mod graph;
pub mod matcher;
pub mod scoring;
pub mod stats;

pub use filters::{matches_filters, in_score_bucket, normalize_required_skills, has_requested_skill, available_departments};
pub use graph::{build_graph, build_graph_for_viewer, DEFAULT_GRAPH_THRESHOLD};
pub use matcher::{Matcher, rank_matches, recommend_for_skills, REQUESTED_SKILL_PREFIX};
pub use scoring::{Scorer, calculate_compatibility, score_optional, build_explanation, FALLBACK_EXPLANATION};
pub use stats::network_stats;

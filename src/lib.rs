//! Campus Match - compatibility scoring and graph construction for campus team matching
//!
//! This library scores how well two student profiles fit together, ranks
//! candidates for a viewer, recommends teammates for a skill wishlist and
//! builds the campus-wide compatibility graph. The scoring core is pure and
//! synchronous; profile storage sits behind the [`services::ProfileStore`] trait.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, Scorer, calculate_compatibility, build_graph, rank_matches, recommend_for_skills};
pub use crate::models::{UserProfile, CompatibilityResult, CompatibilityGraph, RankedMatch, MatchFilters, ScoreBucket};

use std::collections::HashSet;

use crate::core::{
    filters::{has_requested_skill, matches_filters, normalize_required_skills},
    graph::build_graph_for_viewer,
    scoring::Scorer,
};
use crate::models::{
    CompatibilityGraph, CompatibilityResult, MatchFilters, MatchingRules, RankedMatch, UserProfile,
};

/// Prefix marking a candidate that holds a requested skill
pub const REQUESTED_SKILL_PREFIX: &str = "Requested skill match. ";

/// Entry point for every ranking query
///
/// Holds only configuration; each call is a pure function of its arguments.
///
/// # Queries
/// 1. Pairwise score between two profiles
/// 2. Ranked match list for a viewer, with post-hoc filters
/// 3. Skill-targeted recommendations for a viewer or a requirement profile
/// 4. Compatibility graph over the roster
#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    scorer: Scorer,
    rules: MatchingRules,
}

impl Matcher {
    pub fn new(scorer: Scorer, rules: MatchingRules) -> Self {
        Self { scorer, rules }
    }

    pub fn with_default_rules() -> Self {
        Self::default()
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn rules(&self) -> &MatchingRules {
        &self.rules
    }

    pub fn score(&self, a: &UserProfile, b: &UserProfile) -> CompatibilityResult {
        self.scorer.score(a, b)
    }

    /// Rank every other profile against the viewer
    ///
    /// # Arguments
    /// * `viewer` - The profile the list is built for, excluded from the output
    /// * `users` - Roster snapshot; its order breaks score ties
    /// * `filters` - Score bucket, department and year filters
    ///
    /// # Returns
    /// Candidates sorted by score descending, filtered
    pub fn rank_matches(
        &self,
        viewer: &UserProfile,
        users: &[UserProfile],
        filters: &MatchFilters,
    ) -> Vec<RankedMatch> {
        self.rank_all(viewer, users)
            .into_iter()
            .filter(|m| matches_filters(m, filters, &self.rules))
            .collect()
    }

    /// Unfiltered ranking of every profile except the viewer
    pub fn rank_all(&self, viewer: &UserProfile, users: &[UserProfile]) -> Vec<RankedMatch> {
        let mut matches: Vec<RankedMatch> = users
            .iter()
            .filter(|candidate| candidate.id != viewer.id)
            .map(|candidate| {
                let result = self.scorer.score(viewer, candidate);
                RankedMatch {
                    user: candidate.clone(),
                    score: result.score,
                    explanation: result.explanation,
                }
            })
            .collect();

        // sort_by is stable: equal scores keep roster order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }

    /// Rank candidates holding at least one of `required_skills` against the viewer
    ///
    /// An empty wishlist yields an empty list rather than the whole roster.
    pub fn recommend_for_skills(
        &self,
        viewer: &UserProfile,
        users: &[UserProfile],
        required_skills: &[String],
    ) -> Vec<RankedMatch> {
        self.recommend(viewer, users, required_skills)
    }

    /// Rank candidates against a synthetic profile built from `required_skills`
    pub fn recommend_for_requirements(
        &self,
        users: &[UserProfile],
        required_skills: &[String],
    ) -> Vec<RankedMatch> {
        let required = normalize_required_skills(required_skills);
        let requirement = UserProfile::requirement_profile(&required);
        self.recommend(&requirement, users, &required)
    }

    fn recommend(
        &self,
        reference: &UserProfile,
        users: &[UserProfile],
        required_skills: &[String],
    ) -> Vec<RankedMatch> {
        let required: HashSet<String> = normalize_required_skills(required_skills)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect();
        if required.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<RankedMatch> = users
            .iter()
            .filter(|candidate| candidate.id != reference.id)
            .filter(|candidate| has_requested_skill(candidate, &required))
            .map(|candidate| {
                let result = self.scorer.score(reference, candidate);
                RankedMatch {
                    user: candidate.clone(),
                    score: result.score.saturating_add(self.rules.skill_bonus).min(100),
                    explanation: format!("{}{}", REQUESTED_SKILL_PREFIX, result.explanation),
                }
            })
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }

    /// Compatibility graph at the configured threshold
    pub fn graph(&self, users: &[UserProfile], viewer_id: Option<&str>) -> CompatibilityGraph {
        self.graph_with_threshold(users, self.rules.graph_threshold, viewer_id)
    }

    pub fn graph_with_threshold(
        &self,
        users: &[UserProfile],
        threshold: u8,
        viewer_id: Option<&str>,
    ) -> CompatibilityGraph {
        build_graph_for_viewer(users, threshold, viewer_id, &self.scorer)
    }
}

/// Rank matches with the default scorer and rules
pub fn rank_matches(viewer: &UserProfile, users: &[UserProfile], filters: &MatchFilters) -> Vec<RankedMatch> {
    Matcher::default().rank_matches(viewer, users, filters)
}

/// Skill-targeted recommendations with the default scorer and rules
pub fn recommend_for_skills(
    viewer: &UserProfile,
    users: &[UserProfile],
    required_skills: &[String],
) -> Vec<RankedMatch> {
    Matcher::default().recommend_for_skills(viewer, users, required_skills)
}

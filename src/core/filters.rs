use std::collections::HashSet;

use crate::models::{MatchFilters, MatchingRules, RankedMatch, ScoreBucket, UserProfile};

/// Check a ranked candidate against the match list filters
///
/// Filters are AND-combined. The year filter compares string forms so that
/// `2` and `"2"` agree; a candidate without a year never passes it.
#[inline]
pub fn matches_filters(candidate: &RankedMatch, filters: &MatchFilters, rules: &MatchingRules) -> bool {
    if !in_score_bucket(candidate.score, filters.score, rules) {
        return false;
    }

    if let Some(department) = &filters.department {
        if candidate.user.department != *department {
            return false;
        }
    }

    if let Some(year) = &filters.year {
        match candidate.user.year_of_study {
            Some(candidate_year) if candidate_year.to_string() == year.trim() => {}
            _ => return false,
        }
    }

    true
}

/// Check whether a score falls into a bucket
#[inline]
pub fn in_score_bucket(score: u8, bucket: ScoreBucket, rules: &MatchingRules) -> bool {
    match bucket {
        ScoreBucket::All => true,
        ScoreBucket::High => score >= rules.high_score,
        ScoreBucket::Medium => score >= rules.medium_score && score < rules.high_score,
    }
}

/// Trim a skill wishlist, dropping blanks and case-insensitive repeats
pub fn normalize_required_skills(required: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    required
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Check if a profile holds at least one requested skill, ignoring case
#[inline]
pub fn has_requested_skill(profile: &UserProfile, required_lower: &HashSet<String>) -> bool {
    profile
        .skills
        .iter()
        .any(|skill| required_lower.contains(&skill.trim().to_lowercase()))
}

/// Distinct non-empty departments in ranking order
pub fn available_departments(matches: &[RankedMatch]) -> Vec<String> {
    let mut departments: Vec<String> = Vec::new();
    for m in matches {
        if m.user.has_department() && !departments.contains(&m.user.department) {
            departments.push(m.user.department.clone());
        }
    }
    departments
}

use std::collections::HashSet;

use crate::models::{CompatibilityResult, ScoreBreakdown, ScoreCompression, ScoringWeights, UserProfile};

/// Explanation used when the score is nonzero but no named signal fired
pub const FALLBACK_EXPLANATION: &str = "Matched based on general profile data.";

const EXPLANATION_PREFIX: &str = "Matched because: ";

/// Number of shared skills named in an explanation
const CITED_SKILLS: usize = 2;

/// Complementary-skill fragment fires above this many distinct skills
const COMPLEMENTARY_MENTION_MIN: usize = 2;

/// Pairwise compatibility scorer
///
/// Scoring formula (default weights):
/// raw = (
///     department_match * 10 +                         # same department, case-insensitive
///     shared_skills / max(|skills|) * 40 +            # skill overlap
///     shared_interests / max(|interests|) * 30 +      # interest overlap
///     min(distinct_skills / 5, 1) * 20                # complementary skills
/// )
/// displayed = raw > 0 ? round(60 + raw * 0.35) : 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    weights: ScoringWeights,
    complementary_saturation: f64,
    compression: ScoreCompression,
}

impl Scorer {
    /// A saturation below 1 is raised to 1; `Settings::load` rejects such values
    pub fn new(
        weights: ScoringWeights,
        complementary_saturation: f64,
        compression: ScoreCompression,
    ) -> Self {
        Self {
            weights,
            complementary_saturation: complementary_saturation.max(1.0),
            compression,
        }
    }

    pub fn compression(&self) -> ScoreCompression {
        self.compression
    }

    /// Signal-by-signal breakdown, `None` for a self-comparison
    pub fn breakdown(&self, a: &UserProfile, b: &UserProfile) -> Option<ScoreBreakdown> {
        if a.id == b.id {
            return None;
        }

        let same_department = a.has_department()
            && b.has_department()
            && a.department.to_lowercase() == b.department.to_lowercase();
        let department = if same_department { self.weights.department } else { 0.0 };

        let a_skills = distinct_values(&a.skills);
        let b_skills = distinct_values(&b.skills);
        let shared_skills = intersection(&a_skills, &b_skills);
        let skills = overlap_score(shared_skills.len(), a_skills.len(), b_skills.len(), self.weights.skills);

        let a_interests = distinct_values(&a.interests);
        let b_interests = distinct_values(&b.interests);
        let shared_interests = intersection(&a_interests, &b_interests);
        let interests = overlap_score(
            shared_interests.len(),
            a_interests.len(),
            b_interests.len(),
            self.weights.interests,
        );

        // |A ∪ B| - |A ∩ B|
        let distinct_skills = a_skills.len() + b_skills.len() - 2 * shared_skills.len();
        let complementary = (self.weights.complementary * distinct_skills as f64
            / self.complementary_saturation)
            .min(self.weights.complementary);

        Some(ScoreBreakdown {
            same_department,
            department,
            skills,
            interests,
            complementary,
            shared_skills: shared_skills.into_iter().map(str::to_string).collect(),
            shared_interests: shared_interests.into_iter().map(str::to_string).collect(),
            distinct_skills,
        })
    }

    /// Score a pair of profiles
    pub fn score(&self, a: &UserProfile, b: &UserProfile) -> CompatibilityResult {
        let Some(breakdown) = self.breakdown(a, b) else {
            return CompatibilityResult::none();
        };

        let raw = breakdown.raw();
        CompatibilityResult {
            score: self.display_score(raw),
            raw_score: round_score(raw),
            explanation: build_explanation(&breakdown),
        }
    }

    /// Map a raw score onto the displayed scale
    pub fn display_score(&self, raw: f64) -> u8 {
        if raw <= 0.0 {
            return 0;
        }
        round_score(self.compression.floor + raw * self.compression.slope)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringWeights::default(), 5.0, ScoreCompression::default())
    }
}

/// Score two profiles with the default weights
pub fn calculate_compatibility(a: &UserProfile, b: &UserProfile) -> CompatibilityResult {
    Scorer::default().score(a, b)
}

/// Same as [`calculate_compatibility`], an absent profile on either side scores zero
pub fn score_optional(a: Option<&UserProfile>, b: Option<&UserProfile>) -> CompatibilityResult {
    match (a, b) {
        (Some(a), Some(b)) => calculate_compatibility(a, b),
        _ => CompatibilityResult::none(),
    }
}

/// Human-readable summary of the signals that fired
pub fn build_explanation(breakdown: &ScoreBreakdown) -> String {
    let mut fragments = Vec::new();

    if breakdown.same_department {
        fragments.push("Same Department".to_string());
    }
    if !breakdown.shared_skills.is_empty() {
        let cited: Vec<&str> = breakdown
            .shared_skills
            .iter()
            .take(CITED_SKILLS)
            .map(String::as_str)
            .collect();
        fragments.push(format!("Shared Skills ({})", cited.join(", ")));
    }
    if !breakdown.shared_interests.is_empty() {
        fragments.push("Shared Interests".to_string());
    }
    if breakdown.distinct_skills > COMPLEMENTARY_MENTION_MIN {
        fragments.push("Complementary Skills".to_string());
    }

    if fragments.is_empty() {
        FALLBACK_EXPLANATION.to_string()
    } else {
        format!("{}{}", EXPLANATION_PREFIX, fragments.join(" & "))
    }
}

/// Round half away from zero and clamp into 0..=100
#[inline]
pub(crate) fn round_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[inline]
fn overlap_score(shared: usize, len_a: usize, len_b: usize, weight: f64) -> f64 {
    let denom = len_a.max(len_b);
    if denom == 0 {
        return 0.0;
    }
    weight * shared as f64 / denom as f64
}

/// Set view over a stored list, keeping first-occurrence order
fn distinct_values(values: &[String]) -> Vec<&str> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .iter()
        .map(String::as_str)
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Elements of `a` also in `b`, in `a`'s order
fn intersection<'a>(a: &[&'a str], b: &[&str]) -> Vec<&'a str> {
    let b: HashSet<&str> = b.iter().copied().collect();
    a.iter().copied().filter(|v| b.contains(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, dept: &str, skills: &[&str], interests: &[&str]) -> UserProfile {
        UserProfile {
            department: dept.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            ..UserProfile::new(id)
        }
    }

    #[test]
    fn test_worked_example() {
        let viewer = profile("v", "CS", &["React", "Node"], &["AI"]);
        let candidate = profile("x", "CS", &["React", "Python"], &["AI"]);

        let breakdown = Scorer::default().breakdown(&viewer, &candidate).unwrap();
        assert_eq!(breakdown.department, 10.0);
        assert_eq!(breakdown.skills, 20.0);
        assert_eq!(breakdown.interests, 30.0);
        assert_eq!(breakdown.complementary, 8.0);
        assert_eq!(breakdown.raw(), 68.0);

        let result = calculate_compatibility(&viewer, &candidate);
        assert_eq!(result.score, 84);
        assert_eq!(result.raw_score, 68);
        assert_eq!(
            result.explanation,
            "Matched because: Same Department & Shared Skills (React) & Shared Interests"
        );
    }

    #[test]
    fn test_empty_viewer_scores_zero() {
        let viewer = UserProfile::new("v");
        let candidate = profile("x", "CS", &[], &["AI"]);

        let result = calculate_compatibility(&viewer, &candidate);
        assert_eq!(result.score, 0);
        assert_eq!(result.explanation, FALLBACK_EXPLANATION);
    }

    #[test]
    fn test_self_comparison() {
        let a = profile("same", "CS", &["Rust"], &["AI"]);
        assert_eq!(calculate_compatibility(&a, &a), CompatibilityResult::none());
        assert_eq!(score_optional(Some(&a), None), CompatibilityResult::none());
    }

    #[test]
    fn test_department_case_insensitive() {
        let a = profile("a", "Computer Science", &[], &[]);
        let b = profile("b", "computer science", &[], &[]);

        let breakdown = Scorer::default().breakdown(&a, &b).unwrap();
        assert!(breakdown.same_department);
        assert_eq!(calculate_compatibility(&a, &b).explanation, "Matched because: Same Department");
    }

    #[test]
    fn test_empty_departments_never_match() {
        let a = profile("a", "", &[], &[]);
        let b = profile("b", "  ", &[], &[]);
        assert!(!Scorer::default().breakdown(&a, &b).unwrap().same_department);
    }

    #[test]
    fn test_whitespace_departments_still_match() {
        let a = profile("a", " ", &[], &[]);
        let b = profile("b", " ", &[], &[]);

        let breakdown = Scorer::default().breakdown(&a, &b).unwrap();
        assert!(breakdown.same_department);
        assert_eq!(breakdown.raw(), 10.0);

        let result = calculate_compatibility(&a, &b);
        assert_eq!(result.raw_score, 10);
        assert!(result.score >= 60);
        assert_eq!(result.explanation, "Matched because: Same Department");
    }

    #[test]
    fn test_skill_comparison_is_case_sensitive() {
        let a = profile("a", "", &["rust"], &[]);
        let b = profile("b", "", &["Rust"], &[]);

        let breakdown = Scorer::default().breakdown(&a, &b).unwrap();
        assert!(breakdown.shared_skills.is_empty());
        assert_eq!(breakdown.distinct_skills, 2);
    }

    #[test]
    fn test_duplicate_skills_collapse() {
        let a = profile("a", "", &["Rust", "Rust"], &[]);
        let b = profile("b", "", &["Rust"], &[]);

        let breakdown = Scorer::default().breakdown(&a, &b).unwrap();
        assert_eq!(breakdown.skills, 40.0);
        assert_eq!(breakdown.distinct_skills, 0);
    }

    #[test]
    fn test_complementary_saturates() {
        let a = profile("a", "", &["A", "B", "C", "D"], &[]);
        let b = profile("b", "", &["E", "F", "G", "H"], &[]);

        let result = calculate_compatibility(&a, &b);
        // raw 20 -> 67
        assert_eq!(result.raw_score, 20);
        assert_eq!(result.score, 67);
        assert_eq!(result.explanation, "Matched because: Complementary Skills");
    }

    #[test]
    fn test_explanation_cites_two_skills() {
        let a = profile("a", "", &["Go", "Rust", "SQL"], &[]);
        let b = profile("b", "", &["Go", "Rust", "SQL"], &[]);

        let result = calculate_compatibility(&a, &b);
        assert_eq!(result.explanation, "Matched because: Shared Skills (Go, Rust)");
    }

    #[test]
    fn test_full_overlap_has_no_complementary_bonus() {
        let a = profile("a", "CS", &["A", "B", "C", "D", "E"], &["AI"]);
        let b = profile("b", "cs", &["A", "B", "C", "D", "E"], &["AI"]);

        let breakdown = Scorer::default().breakdown(&a, &b).unwrap();
        assert_eq!(breakdown.complementary, 0.0);
        assert_eq!(breakdown.raw(), 80.0);
        assert_eq!(calculate_compatibility(&a, &b).score, 88);
    }

    #[test]
    fn test_display_band() {
        let scorer = Scorer::default();
        assert_eq!(scorer.display_score(100.0), 95);
        assert_eq!(scorer.display_score(0.0), 0);
        assert_eq!(scorer.display_score(0.1), 60);
    }

    #[test]
    fn test_small_complementary_uses_fallback() {
        let a = profile("a", "", &["Rust"], &[]);
        let b = profile("b", "", &[], &[]);

        let result = calculate_compatibility(&a, &b);
        assert_eq!(result.raw_score, 4);
        assert_eq!(result.score, 61);
        assert_eq!(result.explanation, FALLBACK_EXPLANATION);
    }
}

// Unit tests for Campus Match

use campus_match::core::{
    build_graph,
    filters::in_score_bucket,
    matcher::{rank_matches, recommend_for_skills, Matcher},
    scoring::{calculate_compatibility, Scorer, FALLBACK_EXPLANATION},
};
use campus_match::models::{MatchFilters, MatchingRules, ScoreBucket, UserProfile};

const DEPARTMENTS: &[&str] = &["CS", "cs", "Math", "Physics", ""];
const SKILLS: &[&str] = &["React", "Node", "Python", "Rust", "SQL", "Figma", "Go"];
const INTERESTS: &[&str] = &["AI", "Games", "Music", "Climate"];

fn create_profile(id: &str, dept: &str, skills: &[&str], interests: &[&str]) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        display_name: format!("Student {}", id),
        department: dept.to_string(),
        year_of_study: None,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
    }
}

/// Deterministic spread of profiles covering empty and overlapping fields
fn roster(n: usize) -> Vec<UserProfile> {
    (0..n)
        .map(|i| {
            let skills: Vec<&str> = SKILLS
                .iter()
                .enumerate()
                .filter(|(j, _)| (i >> (j % 5)) & 1 == 1 || (i + j) % 4 == 0)
                .map(|(_, s)| *s)
                .collect();
            let interests: Vec<&str> = INTERESTS
                .iter()
                .enumerate()
                .filter(|(j, _)| (i + j) % 3 == 0)
                .map(|(_, s)| *s)
                .collect();
            let mut profile = create_profile(&i.to_string(), DEPARTMENTS[i % DEPARTMENTS.len()], &skills, &interests);
            profile.year_of_study = if i % 5 == 0 { None } else { Some((i % 4) as u32 + 1) };
            profile
        })
        .collect()
}

#[test]
fn test_score_is_symmetric() {
    let users = roster(24);
    for a in &users {
        for b in &users {
            assert_eq!(
                calculate_compatibility(a, b).score,
                calculate_compatibility(b, a).score,
                "asymmetric score for {} / {}",
                a.id,
                b.id
            );
        }
    }
}

#[test]
fn test_self_score_is_zero() {
    for user in roster(12) {
        let result = calculate_compatibility(&user, &user);
        assert_eq!(result.score, 0);
        assert_eq!(result.explanation, "");
    }
}

#[test]
fn test_scores_within_bounds() {
    let users = roster(24);
    for a in &users {
        for b in &users {
            let score = calculate_compatibility(a, b).score;
            assert!(score <= 95, "Score {} above compression ceiling", score);
            assert!(score == 0 || score >= 60, "Nonzero score {} below band", score);
        }
    }
}

#[test]
fn test_more_shared_skills_never_lowers_raw_score() {
    let scorer = Scorer::default();
    let mut a = create_profile("a", "CS", &["React", "Node", "Python"], &["AI"]);
    let mut b = create_profile("b", "Math", &["Go"], &["Games"]);

    let mut previous = scorer.breakdown(&a, &b).unwrap().raw();
    for shared in ["Rust", "SQL", "Figma", "Elixir", "Haskell", "C"] {
        a.skills.push(shared.to_string());
        b.skills.push(shared.to_string());

        let raw = scorer.breakdown(&a, &b).unwrap().raw();
        assert!(raw >= previous, "raw dropped from {} to {} after sharing {}", previous, raw, shared);
        previous = raw;
    }
}

#[test]
fn test_worked_example_scores_84() {
    let viewer = create_profile("viewer", "CS", &["React", "Node"], &["AI"]);
    let candidate = create_profile("x", "CS", &["React", "Python"], &["AI"]);

    let result = calculate_compatibility(&viewer, &candidate);
    assert_eq!(result.score, 84);
    assert!(result.explanation.contains("Same Department"));
    assert!(result.explanation.contains("Shared Skills (React)"));
    assert!(result.explanation.contains("Shared Interests"));
}

#[test]
fn test_empty_viewer_gets_fallback() {
    let viewer = create_profile("viewer", "", &[], &[]);
    let candidate = create_profile("x", "CS", &[], &["AI"]);

    let result = calculate_compatibility(&viewer, &candidate);
    assert_eq!(result.score, 0);
    assert_eq!(result.explanation, FALLBACK_EXPLANATION);
}

#[test]
fn test_graph_edges_match_threshold() {
    let users = roster(16);
    let scorer = Scorer::default();

    for threshold in [0u8, 60, 65, 70, 80, 90, 96] {
        let graph = build_graph(&users, threshold, &scorer);
        assert_eq!(graph.nodes.len(), users.len());

        for (i, a) in users.iter().enumerate() {
            for b in &users[i + 1..] {
                let expected = calculate_compatibility(a, b).score >= threshold;
                assert_eq!(graph.has_edge(&a.id, &b.id), expected, "edge {}-{} at {}", a.id, b.id, threshold);
            }
        }
    }
}

#[test]
fn test_raising_threshold_only_removes_edges() {
    let users = roster(16);
    let scorer = Scorer::default();

    let loose = build_graph(&users, 62, &scorer);
    let strict = build_graph(&users, 75, &scorer);

    assert!(strict.edges.len() <= loose.edges.len());
    for edge in &strict.edges {
        assert!(loose.has_edge(&edge.source, &edge.target));
    }
}

#[test]
fn test_three_user_graph_has_one_edge() {
    let users = vec![
        create_profile("1", "CS", &["React", "Node"], &["AI"]),
        create_profile("2", "CS", &["React", "Python"], &["AI"]),
        create_profile("3", "Music", &[], &[]),
    ];

    let graph = build_graph(&users, 65, &Scorer::default());
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 1);
    assert!(graph.has_edge("1", "2"));
}

#[test]
fn test_ranking_sorted_and_stable() {
    let users = roster(30);
    let viewer = users[7].clone();

    let matches = rank_matches(&viewer, &users, &MatchFilters::default());
    assert_eq!(matches.len(), users.len() - 1);

    let position = |id: &str| users.iter().position(|u| u.id == id).unwrap();
    for pair in matches.windows(2) {
        assert!(pair[0].score >= pair[1].score);
        if pair[0].score == pair[1].score {
            assert!(position(&pair[0].user.id) < position(&pair[1].user.id));
        }
    }
}

#[test]
fn test_ranking_filters_respected() {
    let users = roster(30);
    let viewer = users[3].clone();
    let rules = MatchingRules::default();

    let filters = MatchFilters {
        score: ScoreBucket::Medium,
        department: Some("Math".to_string()),
        year: Some("3".to_string()),
    };

    for m in rank_matches(&viewer, &users, &filters) {
        assert!(in_score_bucket(m.score, ScoreBucket::Medium, &rules));
        assert_eq!(m.user.department, "Math");
        assert_eq!(m.user.year_of_study, Some(3));
    }
}

#[test]
fn test_recommendations_hold_requested_skill() {
    let users = roster(30);
    let viewer = users[0].clone();
    let required = vec!["rust".to_string(), "FIGMA".to_string()];

    let matches = recommend_for_skills(&viewer, &users, &required);
    assert!(!matches.is_empty());

    for m in &matches {
        assert_ne!(m.user.id, viewer.id);
        assert!(m
            .user
            .skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case("rust") || s.eq_ignore_ascii_case("figma")));
        assert!(m.explanation.starts_with("Requested skill match. "));
    }
    for pair in matches.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_recommendation_bonus_over_base_score() {
    let viewer = create_profile("viewer", "CS", &["React"], &[]);
    let users = vec![create_profile("x", "Math", &["Rust"], &[])];

    let base = calculate_compatibility(&viewer, &users[0]).score;
    let matches = Matcher::default().recommend_for_skills(&viewer, &users, &["Rust".to_string()]);

    assert_eq!(matches[0].score, base + 10);
}

#[test]
fn test_empty_wishlist_returns_nothing() {
    let users = roster(10);
    assert!(recommend_for_skills(&users[0], &users, &[]).is_empty());
    assert!(Matcher::default().recommend_for_requirements(&users, &[]).is_empty());
}

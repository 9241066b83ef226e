use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Reserved identifier of the synthetic requirement profile.
///
/// Stored profiles never use it, so a requirement profile is never treated as
/// a self-comparison against a real student.
pub const REQUIREMENT_PROFILE_ID: &str = "__requirement__";

/// Label shown when a profile has neither a usable name nor an email
pub const FALLBACK_DISPLAY_NAME: &str = "Node User";

/// Student profile as published by the profile store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ProfileDocument")]
pub struct UserProfile {
    #[serde(rename = "uid")]
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub department: String,
    #[serde(rename = "year")]
    pub year_of_study: Option<u32>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
}

/// Profile document as the clients write it
#[derive(Deserialize)]
struct ProfileDocument {
    #[serde(rename = "uid", alias = "id", alias = "userId")]
    id: String,
    #[serde(rename = "displayName", default, deserialize_with = "null_as_default")]
    display_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    department: String,
    #[serde(
        rename = "year",
        alias = "yearOfStudy",
        default,
        deserialize_with = "lenient_year"
    )]
    year_of_study: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    interests: Vec<String>,
}

impl From<ProfileDocument> for UserProfile {
    fn from(doc: ProfileDocument) -> Self {
        Self {
            display_name: sanitize_display_name(&doc.display_name, &doc.email),
            id: doc.id,
            department: doc.department,
            year_of_study: doc.year_of_study,
            skills: doc.skills,
            interests: doc.interests,
        }
    }
}

/// Replace an empty or email-like display name with the email's local part
pub fn sanitize_display_name(name: &str, email: &str) -> String {
    if !name.is_empty() && !name.contains('@') {
        return name.to_string();
    }
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_string(),
        _ => FALLBACK_DISPLAY_NAME.to_string(),
    }
}

impl UserProfile {
    /// Minimal profile with only an identifier set
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            department: String::new(),
            year_of_study: None,
            skills: Vec::new(),
            interests: Vec::new(),
        }
    }

    /// Synthetic, non-persisted profile built from a project's skill wishlist
    pub fn requirement_profile(required_skills: &[String]) -> Self {
        Self {
            skills: required_skills.to_vec(),
            display_name: "Project requirements".to_string(),
            ..Self::new(REQUIREMENT_PROFILE_ID)
        }
    }

    /// Any non-empty department counts, whitespace included
    pub fn has_department(&self) -> bool {
        !self.department.is_empty()
    }

    /// Department used to group nodes in the compatibility graph
    pub fn group_key(&self) -> &str {
        if self.has_department() {
            &self.department
        } else {
            "Unknown"
        }
    }
}

/// Accepts `null` wherever a defaultable value is expected
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Year of study arrives as a number, a numeric string or an empty string
/// depending on which client wrote the document.
fn lenient_year<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(year_from_value))
}

pub(crate) fn year_from_value(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Outcome of comparing two profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// Displayed score, 0 or within the compression band
    pub score: u8,
    /// Uncompressed weighted sum, rounded
    #[serde(rename = "rawScore")]
    pub raw_score: u8,
    pub explanation: String,
}

impl CompatibilityResult {
    pub fn none() -> Self {
        Self {
            score: 0,
            raw_score: 0,
            explanation: String::new(),
        }
    }
}

/// Per-signal contributions behind a compatibility score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    #[serde(rename = "sameDepartment")]
    pub same_department: bool,
    pub department: f64,
    pub skills: f64,
    pub interests: f64,
    pub complementary: f64,
    #[serde(rename = "sharedSkills")]
    pub shared_skills: Vec<String>,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
    /// Skills held by exactly one side of the pair
    #[serde(rename = "distinctSkills")]
    pub distinct_skills: usize,
}

impl ScoreBreakdown {
    pub fn raw(&self) -> f64 {
        (self.department + self.skills + self.interests + self.complementary).clamp(0.0, 100.0)
    }
}

/// One candidate in a ranked list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub user: UserProfile,
    pub score: u8,
    pub explanation: String,
}

/// Graph node, one per profile in the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub group: String,
    #[serde(rename = "isCurrentUser")]
    pub is_current_user: bool,
    pub user: UserProfile,
}

/// Undirected edge between two sufficiently compatible profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub score: u8,
    pub explanation: String,
}

/// Sparse compatibility graph over a roster snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl CompatibilityGraph {
    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edges
            .iter()
            .any(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
    }

    pub fn summary(&self) -> GraphSummary {
        let mut groups: Vec<String> = Vec::new();
        for node in &self.nodes {
            if !groups.contains(&node.group) {
                groups.push(node.group.clone());
            }
        }

        GraphSummary {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            groups,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    #[serde(rename = "nodeCount")]
    pub node_count: usize,
    #[serde(rename = "edgeCount")]
    pub edge_count: usize,
    pub groups: Vec<String>,
}

/// Score bucket used by the match list filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBucket {
    #[default]
    All,
    High,
    Medium,
}

/// Post-ranking filters, AND-combined
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchFilters {
    pub score: ScoreBucket,
    pub department: Option<String>,
    pub year: Option<String>,
}

/// Campus-wide aggregates shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    #[serde(rename = "totalUsers")]
    pub total_users: usize,
    #[serde(rename = "mostCommonSkill")]
    pub most_common_skill: Option<String>,
    #[serde(rename = "topDepartment")]
    pub top_department: Option<String>,
    #[serde(rename = "departmentCounts")]
    pub department_counts: Vec<(String, usize)>,
}

/// Signal weights; the defaults sum to 100
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub department: f64,
    pub skills: f64,
    pub interests: f64,
    pub complementary: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            department: 10.0,
            skills: 40.0,
            interests: 30.0,
            complementary: 20.0,
        }
    }
}

/// Maps a nonzero raw score into the displayed band `floor + raw * slope`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreCompression {
    pub floor: f64,
    pub slope: f64,
}

impl Default for ScoreCompression {
    fn default() -> Self {
        Self {
            floor: 60.0,
            slope: 0.35,
        }
    }
}

/// Thresholds applied around the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingRules {
    pub graph_threshold: u8,
    pub skill_bonus: u8,
    pub high_score: u8,
    pub medium_score: u8,
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self {
            graph_threshold: 65,
            skill_bonus: 10,
            high_score: 80,
            medium_score: 60,
        }
    }
}

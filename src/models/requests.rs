use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::models::domain::{MatchFilters, ScoreBucket};

/// Request to score one profile against another
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompatibilityRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: String,
}

/// Request for the viewer's ranked match list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub score: ScoreBucket,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

impl RankMatchesRequest {
    /// "all" and empty strings mean no filter, mirroring the match page selects
    pub fn filters(&self) -> MatchFilters {
        MatchFilters {
            score: self.score,
            department: unless_all(self.department.as_deref()),
            year: unless_all(self.year.as_deref()),
        }
    }
}

fn unless_all(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Request for teammates holding specific skills
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(alias = "required_skills", rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
}

/// Request to rank the roster against a project's skill wishlist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementsRequest {
    #[serde(alias = "required_skills", rename = "requiredSkills", default)]
    pub required_skills: Vec<String>,
}

/// Query string of the graph endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQuery {
    pub threshold: Option<u8>,
    #[serde(rename = "viewerId")]
    pub viewer_id: Option<String>,
}

use crate::core::scoring::Scorer;
use crate::models::{CompatibilityGraph, GraphEdge, GraphNode, UserProfile};

/// Default minimum score for an edge to be drawn
pub const DEFAULT_GRAPH_THRESHOLD: u8 = 65;

/// Build the compatibility graph over a roster snapshot
///
/// Every unordered pair is scored, so this is O(n²) in the roster size. That is
/// the intended ceiling for a campus-sized population; edges come out in
/// `(i, j)` order with `i < j`, which callers rely on for stable rendering.
pub fn build_graph(users: &[UserProfile], threshold: u8, scorer: &Scorer) -> CompatibilityGraph {
    build_graph_for_viewer(users, threshold, None, scorer)
}

/// Same as [`build_graph`], flagging the node that belongs to `viewer_id`
pub fn build_graph_for_viewer(
    users: &[UserProfile],
    threshold: u8,
    viewer_id: Option<&str>,
    scorer: &Scorer,
) -> CompatibilityGraph {
    let nodes = users
        .iter()
        .map(|user| GraphNode {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
            group: user.group_key().to_string(),
            is_current_user: viewer_id.is_some_and(|id| id == user.id),
            user: user.clone(),
        })
        .collect();

    let mut edges = Vec::new();
    for (i, a) in users.iter().enumerate() {
        for b in &users[i + 1..] {
            let result = scorer.score(a, b);
            if result.score >= threshold {
                edges.push(GraphEdge {
                    source: a.id.clone(),
                    target: b.id.clone(),
                    score: result.score,
                    explanation: result.explanation,
                });
            }
        }
    }

    tracing::trace!(
        "Built compatibility graph: {} nodes, {} edges (threshold {})",
        users.len(),
        edges.len(),
        threshold
    );

    CompatibilityGraph { nodes, edges }
}

use crate::models::{NetworkStats, UserProfile};

/// Aggregate roster statistics for the dashboard
///
/// Ties are resolved in favour of the value seen first in the roster.
pub fn network_stats(users: &[UserProfile]) -> NetworkStats {
    let mut skill_counts: Vec<(String, usize)> = Vec::new();
    let mut department_counts: Vec<(String, usize)> = Vec::new();

    for user in users {
        for skill in &user.skills {
            bump(&mut skill_counts, skill);
        }
        if user.has_department() {
            bump(&mut department_counts, &user.department);
        }
    }

    NetworkStats {
        total_users: users.len(),
        most_common_skill: most_frequent(&skill_counts),
        top_department: most_frequent(&department_counts),
        department_counts,
    }
}

fn bump(counts: &mut Vec<(String, usize)>, key: &str) {
    match counts.iter_mut().find(|(k, _)| k == key) {
        Some((_, n)) => *n += 1,
        None => counts.push((key.to_string(), 1)),
    }
}

fn most_frequent(counts: &[(String, usize)]) -> Option<String> {
    counts
        .iter()
        .fold(None, |best: Option<&(String, usize)>, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
        .map(|(k, _)| k.clone())
}

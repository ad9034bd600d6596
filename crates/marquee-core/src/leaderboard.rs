//! Leaderboard view types and member-key helpers.
//!
//! Ranks are derived, never stored: a member's rank is its zero-based
//! position in descending score order plus one, recomputed on every query.

use serde::Serialize;

/// Sorted-set member prefix. Stored members carry it; callers never see it.
const MEMBER_PREFIX: &str = "user:";

/// A member's score and rank after a delta was applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreView {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: f64,
    pub rank: u64,
}

/// One row of a top-N query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub score: f64,
    pub rank: u64,
}

/// Sorted-set member for a user.
pub fn member_key(user_id: &str) -> String {
    format!("{MEMBER_PREFIX}{user_id}")
}

/// Strip the member prefix back off before returning to the caller.
pub fn strip_member_prefix(member: &str) -> String {
    member
        .strip_prefix(MEMBER_PREFIX)
        .unwrap_or(member)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_key_round_trip() {
        assert_eq!(member_key("alice"), "user:alice");
        assert_eq!(strip_member_prefix("user:alice"), "alice");
    }

    #[test]
    fn test_strip_leaves_unprefixed_members_alone() {
        assert_eq!(strip_member_prefix("alice"), "alice");
    }

    #[test]
    fn test_score_view_serializes_camel_case() {
        let view = ScoreView {
            user_id: "alice".to_string(),
            score: 10.0,
            rank: 1,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["userId"], "alice");
        assert_eq!(json["score"], 10.0);
        assert_eq!(json["rank"], 1);
    }
}

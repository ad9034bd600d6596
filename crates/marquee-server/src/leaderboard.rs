//! Globally ranked score aggregation over the sorted-set shape.

use marquee_core::{CoreError, LeaderboardRow, Result, ScoreView, member_key, strip_member_prefix};
use marquee_storage::{DynKeyedStore, KeyedStore};

/// The single global ranked set shared by all users.
pub const LEADERBOARD_KEY: &str = "lb:global";

/// Ranked-score aggregator.
///
/// Scores change only through relative deltas applied as one atomic store
/// command, so concurrent deltas from different callers never lose updates.
/// Ranks are derived on every query from descending score order, 1-based.
pub struct Leaderboard {
    store: DynKeyedStore,
    default_top_n: usize,
}

impl Leaderboard {
    pub fn new(store: DynKeyedStore, default_top_n: usize) -> Self {
        Self {
            store,
            default_top_n,
        }
    }

    /// Atomically apply a score delta (possibly negative) and report the
    /// member's new score and 1-based descending rank. A user with no prior
    /// score starts from zero.
    pub async fn apply_delta(&self, user_id: &str, delta: f64) -> Result<ScoreView> {
        if user_id.trim().is_empty() {
            return Err(CoreError::invalid_argument("user id must not be empty"));
        }
        if !delta.is_finite() {
            return Err(CoreError::invalid_argument("delta must be a finite number"));
        }

        let member = member_key(user_id);
        let score = self
            .store
            .sorted_incr(LEADERBOARD_KEY, &member, delta)
            .await?;
        let position = self
            .store
            .sorted_rev_rank(LEADERBOARD_KEY, &member)
            .await?
            .ok_or_else(|| {
                CoreError::unavailable("rank query missed a member that was just incremented")
            })?;

        Ok(ScoreView {
            user_id: user_id.to_string(),
            score,
            rank: position + 1,
        })
    }

    /// The first `n` members in descending score order, ranks derived from
    /// position. A missing or non-positive `n` falls back to the default.
    pub async fn top(&self, n: Option<i64>) -> Result<Vec<LeaderboardRow>> {
        let n = n
            .filter(|v| *v > 0)
            .map(|v| v as usize)
            .unwrap_or(self.default_top_n);

        let rows = self
            .store
            .sorted_rev_range(LEADERBOARD_KEY, 0, n as isize - 1)
            .await?;

        Ok(rows
            .into_iter()
            .enumerate()
            .map(|(position, (member, score))| LeaderboardRow {
                user_id: strip_member_prefix(&member),
                score,
                rank: position as u64 + 1,
            })
            .collect())
    }
}

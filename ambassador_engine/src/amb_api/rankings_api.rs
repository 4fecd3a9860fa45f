use std::fmt::Debug;

use log::*;

use crate::{amb_api::errors::OrderFlowError, db_types::RankingEntry, traits::RankingStore};

pub const DEFAULT_LEADERBOARD_SIZE: i64 = 100;
const MAX_LEADERBOARD_SIZE: i64 = 1000;

/// Read access to the ambassador leaderboard.
pub struct RankingsApi<R> {
    db: R,
}

impl<R> Debug for RankingsApi<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RankingsApi")
    }
}

impl<R: RankingStore> RankingsApi<R> {
    pub fn new(db: R) -> Self {
        Self { db }
    }

    /// The top `limit` ambassadors by cumulative revenue. `limit` is clamped to `1..=1000`.
    pub async fn leaderboard(&self, limit: Option<i64>) -> Result<Vec<RankingEntry>, OrderFlowError> {
        let limit = limit.unwrap_or(DEFAULT_LEADERBOARD_SIZE).clamp(1, MAX_LEADERBOARD_SIZE);
        trace!("🏆️ Fetching the top {limit} ambassadors");
        let entries = self.db.fetch_rankings(limit).await?;
        Ok(entries)
    }
}

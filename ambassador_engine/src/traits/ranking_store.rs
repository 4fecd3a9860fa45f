use std::future::Future;

use amb_common::Cents;

use crate::{db_types::RankingEntry, traits::StoreError};

/// The ambassador leaderboard.
pub trait RankingStore {
    /// Atomically adds `amount` to the score of `member`, creating the entry if necessary. Returns the new score.
    ///
    /// Implementations must not read-modify-write; concurrent increments for the same member must all be counted.
    fn increment_score(&self, member: &str, amount: Cents) -> impl Future<Output = Result<Cents, StoreError>> + Send;

    /// Returns up to `limit` entries, highest score first.
    fn fetch_rankings(&self, limit: i64) -> impl Future<Output = Result<Vec<RankingEntry>, StoreError>> + Send;
}

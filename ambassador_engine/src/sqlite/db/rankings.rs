use amb_common::Cents;
use sqlx::SqliteConnection;

use crate::db_types::RankingEntry;

/// Adds `amount` to the member's score in a single upsert and returns the new score.
pub async fn increment_score(member: &str, amount: Cents, conn: &mut SqliteConnection) -> Result<Cents, sqlx::Error> {
    sqlx::query_scalar(
        r#"
            INSERT INTO rankings (name, score) VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET
                score = score + excluded.score,
                updated_at = CURRENT_TIMESTAMP
            RETURNING score;
        "#,
    )
    .bind(member)
    .bind(amount)
    .fetch_one(conn)
    .await
}

pub async fn fetch_rankings(limit: i64, conn: &mut SqliteConnection) -> Result<Vec<RankingEntry>, sqlx::Error> {
    sqlx::query_as("SELECT name, score FROM rankings ORDER BY score DESC, name ASC LIMIT $1")
        .bind(limit)
        .fetch_all(conn)
        .await
}

pub async fn fetch_score(member: &str, conn: &mut SqliteConnection) -> Result<Option<Cents>, sqlx::Error> {
    sqlx::query_scalar("SELECT score FROM rankings WHERE name = $1").bind(member).fetch_optional(conn).await
}

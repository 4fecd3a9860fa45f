use sqlx::SqliteConnection;

use crate::db_types::ReferralLink;

/// Creates a referral link for the given user and returns it, with the owner's e-mail address filled in.
pub async fn insert_link(code: &str, user_id: i64, conn: &mut SqliteConnection) -> Result<ReferralLink, sqlx::Error> {
    let id: i64 = sqlx::query_scalar("INSERT INTO links (code, user_id) VALUES ($1, $2) RETURNING id")
        .bind(code)
        .bind(user_id)
        .fetch_one(&mut *conn)
        .await?;
    fetch_link_by_id(id, conn).await?.ok_or(sqlx::Error::RowNotFound)
}

pub async fn fetch_link_by_code(code: &str, conn: &mut SqliteConnection) -> Result<Option<ReferralLink>, sqlx::Error> {
    sqlx::query_as(
        r#"
            SELECT links.id, links.code, links.user_id, users.email AS owner_email
            FROM links JOIN users ON links.user_id = users.id
            WHERE links.code = $1
        "#,
    )
    .bind(code)
    .fetch_optional(conn)
    .await
}

async fn fetch_link_by_id(id: i64, conn: &mut SqliteConnection) -> Result<Option<ReferralLink>, sqlx::Error> {
    sqlx::query_as(
        r#"
            SELECT links.id, links.code, links.user_id, users.email AS owner_email
            FROM links JOIN users ON links.user_id = users.id
            WHERE links.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

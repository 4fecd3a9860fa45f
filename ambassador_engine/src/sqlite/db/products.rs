use sqlx::SqliteConnection;

use crate::db_types::{NewProduct, Product};

pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, sqlx::Error> {
    sqlx::query_as(
        r#"
            INSERT INTO products (title, description, image, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, image, price;
        "#,
    )
    .bind(product.title)
    .bind(product.description)
    .bind(product.image)
    .bind(product.price)
    .fetch_one(conn)
    .await
}

pub async fn fetch_product(id: i64, conn: &mut SqliteConnection) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as("SELECT id, title, description, image, price FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Changes the catalog price of a product. Line items already stored keep the price they were sold at.
pub async fn update_price(
    id: i64,
    price: amb_common::Cents,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as(
        r#"
            UPDATE products SET price = $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2
            RETURNING id, title, description, image, price;
        "#,
    )
    .bind(price)
    .bind(id)
    .fetch_optional(conn)
    .await
}

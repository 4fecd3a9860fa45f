//! Order and order line item queries.
//!
//! Order headers and their line items live in separate tables. Functions that return an [`Order`] with its `items`
//! populated say so; the rest return the header only.
use std::collections::HashMap;

use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::db_types::{NewOrder, NewOrderItem, Order, OrderItem};

/// Inserts the order header and all of its line items. This is not atomic on its own; run it inside a transaction
/// (pass `&mut tx`) if a partial order must never be visible.
pub async fn insert_order(order: NewOrder, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    let NewOrder { ambassador_id, code, ambassador_email, customer, items } = order;
    let mut inserted: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (
                ambassador_id,
                code,
                ambassador_email,
                first_name,
                last_name,
                email,
                address,
                city,
                country,
                zip
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *;
        "#,
    )
    .bind(ambassador_id)
    .bind(code)
    .bind(ambassador_email)
    .bind(customer.first_name)
    .bind(customer.last_name)
    .bind(customer.email)
    .bind(customer.address)
    .bind(customer.city)
    .bind(customer.country)
    .bind(customer.zip)
    .fetch_one(&mut *conn)
    .await?;
    trace!("🗃️ Order header #{} inserted", inserted.id);
    for item in items {
        let item = insert_order_item(inserted.id, item, conn).await?;
        inserted.items.push(item);
    }
    debug!("🗃️ Order #{} inserted with {} line items", inserted.id, inserted.items.len());
    Ok(inserted)
}

async fn insert_order_item(
    order_id: i64,
    item: NewOrderItem,
    conn: &mut SqliteConnection,
) -> Result<OrderItem, sqlx::Error> {
    sqlx::query_as(
        r#"
            INSERT INTO order_items (
                order_id,
                product_title,
                unit_price,
                quantity,
                platform_revenue,
                ambassador_revenue
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *;
        "#,
    )
    .bind(order_id)
    .bind(item.product_title)
    .bind(item.unit_price)
    .bind(item.quantity)
    .bind(item.platform_revenue)
    .bind(item.ambassador_revenue)
    .fetch_one(conn)
    .await
}

/// Sets the payment reference on an order that does not have one yet. Returns the updated header, or `None` if the
/// order does not exist or already carries a reference.
pub async fn attach_payment_reference(
    order_id: i64,
    reference: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(
        r#"
            UPDATE orders SET payment_reference = $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2 AND payment_reference IS NULL
            RETURNING *;
        "#,
    )
    .bind(reference)
    .bind(order_id)
    .fetch_optional(conn)
    .await
}

/// Conditionally flips `completed` from false to true. Only the caller that performs the transition gets `Some`; any
/// later (or concurrent, losing) caller gets `None`.
pub async fn mark_completed(order_id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(
        r#"
            UPDATE orders SET completed = 1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $1 AND completed = 0
            RETURNING *;
        "#,
    )
    .bind(order_id)
    .fetch_optional(conn)
    .await
}

/// Returns the order header only.
pub async fn fetch_order_header(id: i64, conn: &mut SqliteConnection) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id).fetch_optional(conn).await
}

/// Returns the order header only.
pub async fn fetch_order_header_by_reference(
    reference: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM orders WHERE payment_reference = $1").bind(reference).fetch_optional(conn).await
}

pub async fn fetch_order_items(order_id: i64, conn: &mut SqliteConnection) -> Result<Vec<OrderItem>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY id")
        .bind(order_id)
        .fetch_all(conn)
        .await
}

/// Fills in the line items of an order header.
pub async fn with_items(mut order: Order, conn: &mut SqliteConnection) -> Result<Order, sqlx::Error> {
    order.items = fetch_order_items(order.id, conn).await?;
    Ok(order)
}

/// Returns every order with its line items, in ascending id order.
pub async fn fetch_orders(conn: &mut SqliteConnection) -> Result<Vec<Order>, sqlx::Error> {
    let mut orders: Vec<Order> = sqlx::query_as("SELECT * FROM orders ORDER BY id").fetch_all(&mut *conn).await?;
    let items: Vec<OrderItem> = sqlx::query_as("SELECT * FROM order_items ORDER BY id").fetch_all(conn).await?;
    let mut by_order = items.into_iter().fold(HashMap::<i64, Vec<OrderItem>>::new(), |mut map, item| {
        map.entry(item.order_id).or_default().push(item);
        map
    });
    for order in &mut orders {
        order.items = by_order.remove(&order.id).unwrap_or_default();
    }
    Ok(orders)
}

pub async fn count_orders(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM orders").fetch_one(conn).await
}

pub async fn count_order_items(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM order_items").fetch_one(conn).await
}

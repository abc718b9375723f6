//! Row mapping trait and helpers for reducing boilerplate in queries.

use rusqlite::{Connection, OptionalExtension, Row, ToSql, types::Type};

use crate::models::*;

/// Trait for constructing a type from a database row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Query for a single optional result.
pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row)
        .optional()
        .map_err(Into::into)
}

/// Query for multiple results.
pub fn query_all<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, T::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Decode a JSON text column, surfacing bad data as a conversion error
/// instead of silently defaulting.
fn parse_json<T: serde::de::DeserializeOwned>(row: &Row, col: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(col)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(e)))
}

// ============ SQL SELECT Constants ============

pub const USER_COLS: &str = "id, email, name, is_admin, created_at";

pub const API_KEY_COLS: &str = "id, user_id, key_prefix, key_hash, created_at, revoked_at";

pub const PRODUCT_COLS: &str = "id, name, slug, category, image, price, purchase_price, cost, tag, brand, rating, num_reviews, count_in_stock, description, reviews, featured_image, is_featured, breed, weight, customer_name, customer_phone, customer_address, seller_name, seller_address, purchase_date, sell_date, created_at, updated_at";

// ============ FromRow Implementations ============

impl FromRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            name: row.get(2)?,
            is_admin: row.get::<_, i32>(3)? != 0,
            created_at: row.get(4)?,
        })
    }
}

impl FromRow for ApiKey {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(ApiKey {
            id: row.get(0)?,
            user_id: row.get(1)?,
            key_prefix: row.get(2)?,
            key_hash: row.get(3)?,
            created_at: row.get(4)?,
            revoked_at: row.get(5)?,
        })
    }
}

impl FromRow for Product {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Product {
            id: row.get(0)?,
            name: row.get(1)?,
            slug: row.get(2)?,
            category: row.get(3)?,
            image: row.get(4)?,
            price: row.get(5)?,
            purchase_price: row.get(6)?,
            cost: row.get(7)?,
            tag: row.get(8)?,
            brand: row.get(9)?,
            rating: row.get(10)?,
            num_reviews: row.get(11)?,
            count_in_stock: row.get(12)?,
            description: row.get(13)?,
            reviews: parse_json(row, 14)?,
            featured_image: row.get(15)?,
            is_featured: row.get::<_, i32>(16)? != 0,
            breed: row.get(17)?,
            weight: row.get(18)?,
            customer_name: row.get(19)?,
            customer_phone: row.get(20)?,
            customer_address: row.get(21)?,
            seller_name: row.get(22)?,
            seller_address: row.get(23)?,
            purchase_date: row.get(24)?,
            sell_date: row.get(25)?,
            created_at: row.get(26)?,
            updated_at: row.get(27)?,
        })
    }
}

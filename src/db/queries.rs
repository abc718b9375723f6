use chrono::{DateTime, Utc};
use rusqlite::{Connection, TransactionBehavior, params};

use crate::crypto::{KEY_PREFIX_LEN, generate_api_key, hash_secret};
use crate::error::{AppError, OrNotFound, Result, msg};
use crate::id::EntityType;
use crate::models::*;

use super::from_row::{API_KEY_COLS, PRODUCT_COLS, USER_COLS, query_all, query_one};

/// Attempts at inserting a placeholder before giving up on slug collisions.
const PLACEHOLDER_ATTEMPTS: usize = 3;

fn now() -> DateTime<Utc> {
    Utc::now()
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Map a UNIQUE violation to a 409 with `message`; pass other errors through.
fn conflict_on_unique(err: rusqlite::Error, message: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::Conflict(message.to_string())
    } else {
        AppError::Database(err)
    }
}

// ============ Users ============

pub fn create_user(conn: &Connection, input: &CreateUser) -> Result<User> {
    let id = EntityType::User.gen_id();
    let now = now();
    let email = input.email.trim().to_lowercase();

    conn.execute(
        "INSERT INTO users (id, email, name, is_admin, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![&id, &email, &input.name, input.is_admin, now],
    )
    .map_err(|e| conflict_on_unique(e, "Email already exists"))?;

    Ok(User {
        id,
        email,
        name: input.name.clone(),
        is_admin: input.is_admin,
        created_at: now,
    })
}

pub fn get_user_by_id(conn: &Connection, id: &str) -> Result<Option<User>> {
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE id = ?1", USER_COLS),
        &[&id],
    )
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let email = email.trim().to_lowercase();
    query_one(
        conn,
        &format!("SELECT {} FROM users WHERE email = ?1", USER_COLS),
        &[&email],
    )
}

pub fn count_admins(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users WHERE is_admin = 1", [], |row| {
        row.get(0)
    })
    .map_err(Into::into)
}

// ============ API Keys ============

/// Create an API key for a user. Returns the record and the plaintext key,
/// which is not recoverable afterwards.
pub fn create_api_key(conn: &Connection, user_id: &str) -> Result<(ApiKey, String)> {
    let id = EntityType::ApiKey.gen_id();
    let key = generate_api_key();
    let key_prefix: String = key.chars().take(KEY_PREFIX_LEN).collect();
    let key_hash = hash_secret(&key);
    let now = now();

    conn.execute(
        "INSERT INTO api_keys (id, user_id, key_prefix, key_hash, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![&id, user_id, &key_prefix, &key_hash, now],
    )?;

    Ok((
        ApiKey {
            id,
            user_id: user_id.to_string(),
            key_prefix,
            key_hash,
            created_at: now,
            revoked_at: None,
        },
        key,
    ))
}

/// Resolve a bearer key to its user. Revoked and unknown keys yield `None`.
pub fn get_user_by_api_key(conn: &Connection, api_key: &str) -> Result<Option<(User, ApiKey)>> {
    let hash = hash_secret(api_key);

    let key: Option<ApiKey> = query_one(
        conn,
        &format!(
            "SELECT {} FROM api_keys WHERE key_hash = ?1 AND revoked_at IS NULL",
            API_KEY_COLS
        ),
        &[&hash],
    )?;

    let Some(key) = key else {
        return Ok(None);
    };
    Ok(get_user_by_id(conn, &key.user_id)?.map(|user| (user, key)))
}

pub fn revoke_api_key(conn: &Connection, key_id: &str) -> Result<bool> {
    let affected = conn.execute(
        "UPDATE api_keys SET revoked_at = ?1 WHERE id = ?2 AND revoked_at IS NULL",
        params![now(), key_id],
    )?;
    Ok(affected > 0)
}

/// Revoke the key whose plaintext is `api_key`. Returns the revoked key, or
/// `None` if it is unknown or already revoked.
pub fn revoke_api_key_by_secret(conn: &Connection, api_key: &str) -> Result<Option<ApiKey>> {
    let Some((_, key)) = get_user_by_api_key(conn, api_key)? else {
        return Ok(None);
    };
    Ok(revoke_api_key(conn, &key.id)?.then_some(key))
}

// ============ Products ============

pub fn create_product(conn: &Connection, input: &NewProduct) -> Result<Product> {
    let id = EntityType::Product.gen_id();
    let now = now();

    conn.execute(
        "INSERT INTO products (id, name, slug, category, image, price, purchase_price, cost, tag, brand, rating, num_reviews, count_in_stock, description, reviews, featured_image, is_featured, breed, weight, customer_name, customer_phone, customer_address, seller_name, seller_address, purchase_date, sell_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, 0, ?11, ?12, '[]', ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?24)",
        params![
            &id,
            &input.name,
            &input.slug,
            &input.category,
            &input.image,
            input.price,
            input.purchase_price,
            input.cost,
            &input.tag,
            &input.brand,
            input.count_in_stock,
            &input.description,
            &input.featured_image,
            input.is_featured,
            &input.breed,
            &input.weight,
            &input.customer_name,
            &input.customer_phone,
            &input.customer_address,
            &input.seller_name,
            &input.seller_address,
            input.purchase_date,
            input.sell_date,
            now
        ],
    )
    .map_err(|e| conflict_on_unique(e, msg::SLUG_TAKEN))?;

    Ok(Product {
        id,
        name: input.name.clone(),
        slug: input.slug.clone(),
        category: input.category.clone(),
        image: input.image.clone(),
        price: input.price,
        purchase_price: input.purchase_price,
        cost: input.cost,
        tag: input.tag.clone(),
        brand: input.brand.clone(),
        rating: 0.0,
        num_reviews: 0,
        count_in_stock: input.count_in_stock,
        description: input.description.clone(),
        reviews: Vec::new(),
        featured_image: input.featured_image.clone(),
        is_featured: input.is_featured,
        breed: input.breed.clone(),
        weight: input.weight.clone(),
        customer_name: input.customer_name.clone(),
        customer_phone: input.customer_phone.clone(),
        customer_address: input.customer_address.clone(),
        seller_name: input.seller_name.clone(),
        seller_address: input.seller_address.clone(),
        purchase_date: input.purchase_date,
        sell_date: input.sell_date,
        created_at: now,
        updated_at: now,
    })
}

/// Insert a scaffold product with placeholder values and a random slug.
pub fn create_placeholder_product(conn: &Connection) -> Result<Product> {
    let mut last_err = None;
    for _ in 0..PLACEHOLDER_ATTEMPTS {
        match create_product(conn, &NewProduct::placeholder(now())) {
            Err(AppError::Conflict(m)) => {
                tracing::warn!("Placeholder slug collided, retrying");
                last_err = Some(AppError::Conflict(m));
            }
            other => return other,
        }
    }
    Err(last_err.unwrap_or_else(|| AppError::Internal("placeholder insert failed".into())))
}

pub fn get_product_by_id(conn: &Connection, id: &str) -> Result<Option<Product>> {
    query_one(
        conn,
        &format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLS),
        &[&id],
    )
}

pub fn get_product_by_slug(conn: &Connection, slug: &str) -> Result<Option<Product>> {
    query_one(
        conn,
        &format!("SELECT {} FROM products WHERE slug = ?1", PRODUCT_COLS),
        &[&slug],
    )
}

/// Every product, newest first. Unpaginated.
pub fn list_products(conn: &Connection) -> Result<Vec<Product>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM products ORDER BY created_at DESC, rowid DESC",
            PRODUCT_COLS
        ),
        &[],
    )
}

pub fn count_products(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))
        .map_err(Into::into)
}

/// Replace every editable field of a product. Returns false if no row matched.
pub fn update_product(conn: &Connection, id: &str, input: &UpdateProduct) -> Result<bool> {
    let affected = conn
        .execute(
            "UPDATE products SET
                name = ?1, slug = ?2, category = ?3, image = ?4, price = ?5,
                purchase_price = ?6, cost = ?7, tag = ?8, brand = ?9, count_in_stock = ?10,
                description = ?11, featured_image = ?12, is_featured = ?13, breed = ?14,
                weight = ?15, customer_name = ?16, customer_phone = ?17,
                customer_address = ?18, seller_name = ?19, seller_address = ?20,
                purchase_date = ?21, sell_date = ?22, updated_at = ?23
             WHERE id = ?24",
            params![
                &input.name,
                &input.slug,
                &input.category,
                &input.image,
                input.price,
                input.purchase_price,
                input.cost,
                &input.tag,
                &input.brand,
                input.count_in_stock,
                &input.description,
                &input.featured_image,
                input.is_featured,
                &input.breed,
                &input.weight,
                &input.customer_name,
                &input.customer_phone,
                &input.customer_address,
                &input.seller_name,
                &input.seller_address,
                input.purchase_date,
                input.sell_date,
                now(),
                id
            ],
        )
        .map_err(|e| conflict_on_unique(e, msg::SLUG_TAKEN))?;
    Ok(affected > 0)
}

/// Hard delete. Returns false if no row matched.
pub fn delete_product(conn: &Connection, id: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

// ============ Reviews ============

/// Write a product's review list and the aggregates derived from it.
fn save_reviews(conn: &Connection, product: &mut Product) -> Result<()> {
    product.recompute_rating();
    product.updated_at = now();
    let reviews_json = serde_json::to_string(&product.reviews)?;
    conn.execute(
        "UPDATE products SET reviews = ?1, rating = ?2, num_reviews = ?3, updated_at = ?4 WHERE id = ?5",
        params![
            &reviews_json,
            product.rating,
            product.num_reviews,
            product.updated_at,
            &product.id
        ],
    )?;
    Ok(())
}

/// Add `author`'s review, replacing any earlier review by the same user,
/// and recompute rating/numReviews in the same transaction.
pub fn upsert_review(
    conn: &mut Connection,
    product_id: &str,
    author: &User,
    input: &CreateReview,
) -> Result<Product> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut product = get_product_by_id(&tx, product_id)?.or_not_found(msg::PRODUCT_NOT_FOUND)?;
    let now = now();

    match product.reviews.iter_mut().find(|r| r.user == author.id) {
        Some(existing) => {
            existing.name = author.name.clone();
            existing.rating = input.rating;
            existing.comment = input.comment.trim().to_string();
            existing.updated_at = now;
        }
        None => product.reviews.push(Review {
            id: EntityType::Review.gen_id(),
            user: author.id.clone(),
            name: author.name.clone(),
            rating: input.rating,
            comment: input.comment.trim().to_string(),
            created_at: now,
            updated_at: now,
        }),
    }

    save_reviews(&tx, &mut product)?;
    tx.commit()?;
    Ok(product)
}

/// Remove one review and recompute the aggregates.
pub fn delete_review(conn: &mut Connection, product_id: &str, review_id: &str) -> Result<Product> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut product = get_product_by_id(&tx, product_id)?.or_not_found(msg::PRODUCT_NOT_FOUND)?;
    let before = product.reviews.len();
    product.reviews.retain(|r| r.id != review_id);
    if product.reviews.len() == before {
        return Err(AppError::NotFound(msg::REVIEW_NOT_FOUND.into()));
    }

    save_reviews(&tx, &mut product)?;
    tx.commit()?;
    Ok(product)
}

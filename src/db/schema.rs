use rusqlite::Connection;

/// Initialize the database schema.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Users (identity for the admin API)
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            is_admin INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        -- API keys (bearer credentials, stored hashed)
        CREATE TABLE IF NOT EXISTS api_keys (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            key_prefix TEXT NOT NULL,
            key_hash TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL,
            revoked_at TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_api_keys_user ON api_keys(user_id);

        -- Products (one row per listing document; reviews embedded as a JSON array)
        CREATE TABLE IF NOT EXISTS products (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            category TEXT NOT NULL,
            image TEXT NOT NULL,
            price REAL NOT NULL,
            purchase_price REAL NOT NULL,
            cost REAL NOT NULL,
            tag TEXT NOT NULL,
            brand TEXT NOT NULL,
            rating REAL NOT NULL DEFAULT 0 CHECK (rating >= 0 AND rating <= 5),
            num_reviews INTEGER NOT NULL DEFAULT 0 CHECK (num_reviews >= 0),
            count_in_stock INTEGER NOT NULL DEFAULT 0 CHECK (count_in_stock >= 0),
            description TEXT NOT NULL,
            reviews TEXT NOT NULL DEFAULT '[]',
            featured_image TEXT,
            is_featured INTEGER NOT NULL DEFAULT 0,
            breed TEXT NOT NULL,
            weight TEXT NOT NULL,
            customer_name TEXT NOT NULL,
            customer_phone TEXT NOT NULL,
            customer_address TEXT NOT NULL,
            seller_name TEXT NOT NULL,
            seller_address TEXT NOT NULL,
            purchase_date TEXT,
            sell_date TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_products_created ON products(created_at);
        CREATE INDEX IF NOT EXISTS idx_products_featured ON products(id) WHERE is_featured = 1;
        "#,
    )
}

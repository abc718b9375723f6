use std::sync::Arc;

use axum::Router;
use clap::Parser;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockyard::assets::{LocalAssetStore, PUBLIC_PREFIX};
use stockyard::config::Config;
use stockyard::db::{AppState, create_pool, init_db, queries};
use stockyard::handlers;
use stockyard::models::{CreateUser, NewProduct};

#[derive(Parser, Debug)]
#[command(name = "stockyard")]
#[command(about = "Admin API for livestock sale listings")]
struct Cli {
    /// Seed the database with sample listings and a dev admin (dev mode only)
    #[arg(long)]
    seed: bool,

    /// Delete the database on exit (dev mode only, useful for fresh starts)
    #[arg(long)]
    ephemeral: bool,

    /// Revoke the given API key and exit without starting the server
    #[arg(long, value_name = "API_KEY")]
    revoke_key: Option<String>,
}

fn revoke_key(state: &AppState, api_key: &str) {
    let conn = state.db.get().expect("Failed to get db connection for revoke");

    match queries::revoke_api_key_by_secret(&conn, api_key).expect("Failed to revoke API key") {
        Some(key) => tracing::info!(
            key_id = %key.id,
            user_id = %key.user_id,
            key_prefix = %key.key_prefix,
            "API key revoked"
        ),
        None => tracing::warn!("API key not found or already revoked"),
    }
}

fn bootstrap_first_admin(state: &AppState, email: &str) {
    let conn = state.db.get().expect("Failed to get db connection for bootstrap");

    let count = queries::count_admins(&conn).expect("Failed to count admins");
    if count > 0 {
        tracing::info!("Admins already exist, skipping bootstrap");
        return;
    }

    let input = CreateUser {
        email: email.to_string(),
        name: "Bootstrap Admin".to_string(),
        is_admin: true,
    };
    input.validate().expect("BOOTSTRAP_ADMIN_EMAIL is not a valid email");

    let user = queries::create_user(&conn, &input).expect("Failed to create bootstrap admin");
    let (_, api_key) =
        queries::create_api_key(&conn, &user.id).expect("Failed to create bootstrap API key");

    tracing::info!("============================================");
    tracing::info!("BOOTSTRAP ADMIN CREATED");
    tracing::info!("Email: {}", user.email);
    tracing::info!("API Key: {}", api_key);
    tracing::info!("============================================");
    tracing::info!("SAVE THIS API KEY - IT WILL NOT BE SHOWN AGAIN");
    tracing::info!("============================================");
}

/// Seeds a dev admin and a handful of listings. Skips if any listing exists.
fn seed_dev_data(state: &AppState) {
    let conn = state.db.get().expect("Failed to get db connection for seeding");

    if queries::count_products(&conn).expect("Failed to count products") > 0 {
        tracing::info!("Database already has listings, skipping seed");
        return;
    }

    tracing::info!("============================================");
    tracing::info!("SEEDING DEV DATA");
    tracing::info!("============================================");

    let admin = match queries::get_user_by_email(&conn, "dev@stockyard.local")
        .expect("Failed to look up dev admin")
    {
        Some(user) => user,
        None => queries::create_user(
            &conn,
            &CreateUser {
                email: "dev@stockyard.local".to_string(),
                name: "Dev Admin".to_string(),
                is_admin: true,
            },
        )
        .expect("Failed to create dev admin"),
    };
    let (_, api_key) = queries::create_api_key(&conn, &admin.id).expect("Failed to create dev key");
    tracing::info!("Admin: {} ({})", admin.email, admin.name);
    tracing::info!("Admin API Key: {}", api_key);

    let samples = [
        ("Brahman Bull", "brahman-bull", "Bull", "Brahman", "650 KG", 320_000.0),
        ("Sahiwal Cow", "sahiwal-cow", "Cow", "Sahiwal", "420 KG", 180_000.0),
        ("Boer Goat", "boer-goat", "Goat", "Boer", "70 KG", 45_000.0),
    ];
    for (i, (name, slug, category, breed, weight, price)) in samples.into_iter().enumerate() {
        let mut input = NewProduct::placeholder(chrono::Utc::now());
        input.name = name.to_string();
        input.slug = slug.to_string();
        input.category = category.to_string();
        input.breed = breed.to_string();
        input.weight = weight.to_string();
        input.price = price;
        input.purchase_price = price * 0.8;
        input.tag = format!("{}", 100 + i);
        input.is_featured = i == 0;

        let product = queries::create_product(&conn, &input).expect("Failed to create sample listing");
        tracing::info!("Listing: {} (id: {})", product.name, product.id);
    }
    tracing::info!("============================================");
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockyard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }

    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    let asset_store = LocalAssetStore::new(&config.upload_dir, &config.base_url)
        .expect("Failed to create upload directory");

    let state = AppState {
        db: db_pool,
        assets: Arc::new(asset_store),
    };

    if let Some(ref api_key) = cli.revoke_key {
        revoke_key(&state, api_key);
        return;
    }

    if cli.seed {
        if !config.dev_mode {
            tracing::warn!("--seed flag ignored: not in dev mode (set STOCKYARD_ENV=dev)");
        } else {
            seed_dev_data(&state);
        }
    }

    if let Some(ref email) = config.bootstrap_admin_email {
        bootstrap_first_admin(&state, email);
    }

    let app = Router::new()
        .merge(handlers::router(state.clone(), config.max_upload_bytes))
        .nest_service(PUBLIC_PREFIX, ServeDir::new(&config.upload_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    let cleanup_on_exit = cli.ephemeral && config.dev_mode;
    if cleanup_on_exit {
        tracing::info!("EPHEMERAL MODE: database will be deleted on exit");
    }

    tracing::info!("Stockyard server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    if cleanup_on_exit {
        let db_path = &config.database_path;
        tracing::info!("Cleaning up ephemeral database...");
        if let Err(e) = std::fs::remove_file(db_path) {
            tracing::warn!("Failed to remove {}: {}", db_path, e);
        }
        let _ = std::fs::remove_file(format!("{}-wal", db_path));
        let _ = std::fs::remove_file(format!("{}-shm", db_path));
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

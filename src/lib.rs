//! Stockyard - admin API for livestock sale listings
//!
//! Listing documents (with embedded reviews) live in SQLite; admins manage
//! them over a bearer-authenticated JSON API and upload listing images.

pub mod assets;
pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod id;
pub mod middleware;
pub mod models;
pub mod util;

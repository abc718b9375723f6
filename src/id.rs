//! Prefixed ID generation for Stockyard documents.
//!
//! Format: `sy_{entity}_{uuid_simple}` (32 hex chars, no hyphens)

use uuid::Uuid;

/// All known entity prefixes for validation.
const ALL_PREFIXES: &[&str] = &["sy_usr_", "sy_key_", "sy_prod_", "sy_rev_"];

/// Validate that a string is a well-formed Stockyard ID.
///
/// Used to reject garbage path segments before hitting the database.
pub fn is_valid_prefixed_id(s: &str) -> bool {
    let Some(prefix) = ALL_PREFIXES.iter().find(|p| s.starts_with(*p)) else {
        return false;
    };

    let hex_part = &s[prefix.len()..];
    hex_part.len() == 32 && hex_part.chars().all(|c| c.is_ascii_hexdigit())
}

#[derive(Debug, Clone, Copy)]
pub enum EntityType {
    User,
    ApiKey,
    Product,
    Review,
}

impl EntityType {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::User => "sy_usr",
            Self::ApiKey => "sy_key",
            Self::Product => "sy_prod",
            Self::Review => "sy_rev",
        }
    }

    pub fn gen_id(&self) -> String {
        format!("{}_{}", self.prefix(), Uuid::new_v4().as_simple())
    }
}

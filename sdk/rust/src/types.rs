//! Wire types for the Stockyard admin API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A livestock listing as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub image: String,
    pub price: f64,
    pub purchase_price: f64,
    pub cost: f64,
    pub tag: String,
    pub brand: String,
    pub rating: f64,
    pub num_reviews: i64,
    pub count_in_stock: i64,
    pub description: String,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub featured_image: Option<String>,
    pub is_featured: bool,
    pub breed: String,
    pub weight: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub seller_name: String,
    pub seller_address: String,
    pub purchase_date: Option<DateTime<Utc>>,
    pub sell_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub name: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /resource/products/{id}`: every editable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub image: String,
    pub price: f64,
    pub purchase_price: f64,
    pub cost: f64,
    pub tag: String,
    pub brand: String,
    pub count_in_stock: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    pub is_featured: bool,
    pub breed: String,
    pub weight: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub seller_name: String,
    pub seller_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_date: Option<DateTime<Utc>>,
}

/// Response of `POST /resource/products`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductResponse {
    pub message: String,
    pub product: Product,
}

/// Response of `POST /resource/upload`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResult {
    pub secure_url: String,
}

/// A file picked in a file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    /// MIME type reported by the picker (e.g., "image/jpeg")
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_owned),
            bytes,
        }
    }

    /// The reported MIME type, or one implied by a common image extension
    /// when the picker reported none.
    pub fn mime_type(&self) -> Option<&str> {
        if let Some(content_type) = &self.content_type {
            return Some(content_type);
        }
        let (_, ext) = self.file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            _ => None,
        }
    }
}

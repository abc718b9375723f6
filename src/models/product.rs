use chrono::{DateTime, Utc};
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result, msg};

/// Length of the random suffix on placeholder slugs.
const SLUG_SUFFIX_LEN: usize = 16;

/// A livestock sale listing, stored as one document with its reviews embedded.
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
    /// Mean review rating (0 when there are no reviews)
    pub rating: f64,
    pub num_reviews: i64,
    pub count_in_stock: i64,
    pub description: String,
    pub reviews: Vec<Review>,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Recompute `rating` and `num_reviews` from the embedded review list.
    pub fn recompute_rating(&mut self) {
        self.num_reviews = self.reviews.len() as i64;
        self.rating = if self.reviews.is_empty() {
            0.0
        } else {
            self.reviews.iter().map(|r| r.rating).sum::<f64>() / self.reviews.len() as f64
        };
    }
}

/// A customer review embedded in a product document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: String,
    /// ID of the user who wrote the review
    pub user: String,
    /// Reviewer display name at the time of writing
    pub name: String,
    pub rating: f64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReview {
    pub rating: f64,
    pub comment: String,
}

impl CreateReview {
    pub fn validate(&self) -> Result<()> {
        if !self.rating.is_finite() || !(0.0..=5.0).contains(&self.rating) {
            return Err(AppError::BadRequest(msg::RATING_RANGE.into()));
        }
        if self.comment.trim().is_empty() {
            return Err(AppError::BadRequest(msg::COMMENT_EMPTY.into()));
        }
        Ok(())
    }
}

/// Field values for a freshly inserted document.
#[derive(Debug, Clone)]
pub struct NewProduct {
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
}

impl NewProduct {
    /// Scaffold document created by `POST /resource/products`.
    ///
    /// The admin UI opens the edit view right after, so every value here is a
    /// stand-in. The slug gets a random suffix to stay unique.
    pub fn placeholder(now: DateTime<Utc>) -> Self {
        Self {
            name: "sample name".into(),
            slug: sample_slug(),
            category: "Bull".into(),
            image: "/images/p1.jpg".into(),
            price: 250_000.0,
            purchase_price: 200_000.0,
            cost: 10_000.0,
            tag: "120".into(),
            brand: "sample brand".into(),
            count_in_stock: 1,
            description: "sample description".into(),
            featured_image: None,
            is_featured: false,
            breed: "sample breed".into(),
            weight: "500 KG".into(),
            customer_name: "Customer name".into(),
            customer_phone: "Customer phone".into(),
            customer_address: "Customer address".into(),
            seller_name: "Seller name".into(),
            seller_address: "Seller address".into(),
            purchase_date: Some(now),
            sell_date: Some(now),
        }
    }
}

/// `sample-slug-<16 random lowercase alphanumerics>`
pub fn sample_slug() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SLUG_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("sample-slug-{}", suffix)
}

/// Full replacement of a product's editable fields (`PUT /resource/products/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
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
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub breed: String,
    pub weight: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub seller_name: String,
    pub seller_address: String,
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sell_date: Option<DateTime<Utc>>,
}

impl UpdateProduct {
    fn required_text(&self) -> [(&'static str, &str); 14] {
        [
            ("Name", &self.name),
            ("Slug", &self.slug),
            ("Category", &self.category),
            ("Image", &self.image),
            ("Brand", &self.brand),
            ("Tag", &self.tag),
            ("Breed", &self.breed),
            ("Weight", &self.weight),
            ("Description", &self.description),
            ("Customer name", &self.customer_name),
            ("Customer phone", &self.customer_phone),
            ("Customer address", &self.customer_address),
            ("Seller name", &self.seller_name),
            ("Seller address", &self.seller_address),
        ]
    }

    /// Check the rules the edit form enforces. Returns the first violation.
    pub fn validate(&self) -> Result<()> {
        for (label, value) in self.required_text() {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{} is required", label)));
            }
        }
        if !is_valid_slug(&self.slug) {
            return Err(AppError::BadRequest(msg::SLUG_INVALID.into()));
        }
        for (label, value) in [
            ("Price", self.price),
            ("Purchase price", self.purchase_price),
            ("Cost", self.cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::BadRequest(format!(
                    "{} must be a non-negative number",
                    label
                )));
            }
        }
        if self.count_in_stock < 0 {
            return Err(AppError::BadRequest(
                "Count in stock must not be negative".into(),
            ));
        }
        Ok(())
    }
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

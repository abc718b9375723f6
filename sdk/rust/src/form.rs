//! Edit-form state and its conversion into an update payload.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{Product, UpdateProduct};

/// Field name (camelCase, as on the wire) to the message shown under it.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Which image field an upload writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Image,
    FeaturedImage,
}

/// Values as the edit form holds them: text inputs are strings until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub category: String,
    pub image: String,
    pub featured_image: String,
    pub is_featured: bool,
    pub price: String,
    pub purchase_price: String,
    pub cost: String,
    pub tag: String,
    pub brand: String,
    pub count_in_stock: String,
    pub description: String,
    pub breed: String,
    pub weight: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub seller_name: String,
    pub seller_address: String,
    /// RFC 3339 or `YYYY-MM-DD`; blank means unset
    pub purchase_date: String,
    pub sell_date: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            featured_image: product.featured_image.clone().unwrap_or_default(),
            is_featured: product.is_featured,
            price: product.price.to_string(),
            purchase_price: product.purchase_price.to_string(),
            cost: product.cost.to_string(),
            tag: product.tag.clone(),
            brand: product.brand.clone(),
            count_in_stock: product.count_in_stock.to_string(),
            description: product.description.clone(),
            breed: product.breed.clone(),
            weight: product.weight.clone(),
            customer_name: product.customer_name.clone(),
            customer_phone: product.customer_phone.clone(),
            customer_address: product.customer_address.clone(),
            seller_name: product.seller_name.clone(),
            seller_address: product.seller_address.clone(),
            purchase_date: product.purchase_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
            sell_date: product.sell_date.map(|d| d.to_rfc3339()).unwrap_or_default(),
        }
    }

    pub fn set_image(&mut self, field: ImageField, url: String) {
        match field {
            ImageField::Image => self.image = url,
            ImageField::FeaturedImage => self.featured_image = url,
        }
    }

    pub fn image(&self, field: ImageField) -> &str {
        match field {
            ImageField::Image => &self.image,
            ImageField::FeaturedImage => &self.featured_image,
        }
    }

    /// All field errors; empty when the form can be submitted.
    pub fn validate(&self) -> FieldErrors {
        self.to_update().err().unwrap_or_default()
    }

    pub fn to_update(&self) -> Result<UpdateProduct, FieldErrors> {
        let mut errors = FieldErrors::new();

        for (key, label, value) in [
            ("name", "Name", &self.name),
            ("slug", "Slug", &self.slug),
            ("category", "Category", &self.category),
            ("image", "Image", &self.image),
            ("brand", "Brand", &self.brand),
            ("tag", "Tag", &self.tag),
            ("breed", "Breed", &self.breed),
            ("weight", "Weight", &self.weight),
            ("description", "Description", &self.description),
            ("customerName", "Customer name", &self.customer_name),
            ("customerPhone", "Customer phone", &self.customer_phone),
            ("customerAddress", "Customer address", &self.customer_address),
            ("sellerName", "Seller name", &self.seller_name),
            ("sellerAddress", "Seller address", &self.seller_address),
        ] {
            if value.trim().is_empty() {
                errors.insert(key, format!("{} is required", label));
            }
        }

        let slug = self.slug.trim();
        if !slug.is_empty()
            && !slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            errors.insert(
                "slug",
                "Slug may only contain lowercase letters, digits and hyphens".into(),
            );
        }

        let price = parse_amount(&mut errors, "price", "Price", &self.price);
        let purchase_price = parse_amount(&mut errors, "purchasePrice", "Purchase price", &self.purchase_price);
        let cost = parse_amount(&mut errors, "cost", "Cost", &self.cost);

        let count_in_stock = match self.count_in_stock.trim() {
            "" => Some(0),
            raw => match raw.parse::<i64>() {
                Ok(n) if n >= 0 => Some(n),
                _ => {
                    errors.insert("countInStock", "Count in stock must be a whole number".into());
                    None
                }
            },
        };

        let purchase_date = parse_date(&mut errors, "purchaseDate", "Purchase date", &self.purchase_date);
        let sell_date = parse_date(&mut errors, "sellDate", "Sell date", &self.sell_date);

        match (price, purchase_price, cost, count_in_stock, purchase_date, sell_date) {
            (
                Some(price),
                Some(purchase_price),
                Some(cost),
                Some(count_in_stock),
                Some(purchase_date),
                Some(sell_date),
            ) if errors.is_empty() => Ok(UpdateProduct {
                name: self.name.trim().to_string(),
                slug: slug.to_string(),
                category: self.category.trim().to_string(),
                image: self.image.trim().to_string(),
                price,
                purchase_price,
                cost,
                tag: self.tag.trim().to_string(),
                brand: self.brand.trim().to_string(),
                count_in_stock,
                description: self.description.trim().to_string(),
                featured_image: Some(self.featured_image.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned),
                is_featured: self.is_featured,
                breed: self.breed.trim().to_string(),
                weight: self.weight.trim().to_string(),
                customer_name: self.customer_name.trim().to_string(),
                customer_phone: self.customer_phone.trim().to_string(),
                customer_address: self.customer_address.trim().to_string(),
                seller_name: self.seller_name.trim().to_string(),
                seller_address: self.seller_address.trim().to_string(),
                purchase_date,
                sell_date,
            }),
            _ => Err(errors),
        }
    }
}

fn parse_amount(errors: &mut FieldErrors, key: &'static str, label: &str, raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => {
            errors.insert(key, format!("{} must be a number", label));
            None
        }
    }
}

/// `Some(None)` for a blank input, `None` when unparseable.
fn parse_date(
    errors: &mut FieldErrors,
    key: &'static str,
    label: &str,
    raw: &str,
) -> Option<Option<DateTime<Utc>>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Some(dt.with_timezone(&Utc)));
    }
    if let Some(dt) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(Some(dt.and_utc()));
    }
    errors.insert(key, format!("{} must be a date", label));
    None
}

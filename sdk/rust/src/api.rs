//! The narrow API surface the view controllers call.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CreateProductResponse, Product, SelectedFile, UpdateProduct, UploadResult};

/// Admin operations on the product resource. Every call carries the
/// caller's bearer token.
///
/// [`crate::HttpAdminApi`] talks to a live server; tests substitute a
/// scripted implementation.
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_products(&self, token: &str) -> Result<Vec<Product>>;

    async fn create_product(&self, token: &str) -> Result<CreateProductResponse>;

    async fn get_product(&self, token: &str, id: &str) -> Result<Product>;

    async fn update_product(&self, token: &str, id: &str, update: &UpdateProduct) -> Result<()>;

    async fn delete_product(&self, token: &str, id: &str) -> Result<()>;

    /// Upload one file and return where it is stored.
    async fn upload(&self, token: &str, file: &SelectedFile) -> Result<UploadResult>;
}

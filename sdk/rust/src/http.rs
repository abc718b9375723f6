//! reqwest-backed [`AdminApi`].

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::api::AdminApi;
use crate::error::{ClientError, ErrorCode, Result};
use crate::types::{CreateProductResponse, Product, SelectedFile, UpdateProduct, UploadResult};

/// Multipart part name the upload endpoint reads.
const FILE_PART: &str = "file";

/// Client for a Stockyard server.
///
/// # Example
/// ```rust,no_run
/// use stockyard_sdk::{AdminApi, HttpAdminApi};
///
/// # async fn run() -> Result<(), stockyard_sdk::ClientError> {
/// let api = HttpAdminApi::new("http://localhost:3000")?;
/// let products = api.list_products("sy_...").await?;
/// println!("{} listings", products.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpAdminApi {
    base_url: String,
    http: HttpClient,
}

impl HttpAdminApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, HttpClient::new())
    }

    /// Use a preconfigured reqwest client (timeouts, proxies).
    pub fn with_client(base_url: &str, http: HttpClient) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::new(ErrorCode::ValidationFailed, format!("Invalid base URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::new(
                ErrorCode::ValidationFailed,
                "Base URL must be http or https",
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn product_url(&self, id: &str) -> String {
        self.url(&format!("/resource/products/{}", id))
    }

    async fn send(&self, request: reqwest::RequestBuilder, token: &str) -> Result<reqwest::Response> {
        let response = request
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))?;

        if response.status().is_success() {
            return Ok(response);
        }
        Err(error_from_response(response).await)
    }

    async fn handle_json<T: for<'de> Deserialize<'de>>(&self, response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))
    }
}

/// Turn a non-2xx response into a [`ClientError`], preferring the server's
/// `{ message }` body.
async fn error_from_response(response: reqwest::Response) -> ClientError {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);

    tracing::debug!(status, ?message, "Request failed");
    ClientError::from_response(status, message)
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn list_products(&self, token: &str) -> Result<Vec<Product>> {
        let response = self
            .send(self.http.get(self.url("/resource/products")), token)
            .await?;
        self.handle_json(response).await
    }

    async fn create_product(&self, token: &str) -> Result<CreateProductResponse> {
        let response = self
            .send(self.http.post(self.url("/resource/products")), token)
            .await?;
        self.handle_json(response).await
    }

    async fn get_product(&self, token: &str, id: &str) -> Result<Product> {
        let response = self.send(self.http.get(self.product_url(id)), token).await?;
        self.handle_json(response).await
    }

    async fn update_product(&self, token: &str, id: &str, update: &UpdateProduct) -> Result<()> {
        self.send(self.http.put(self.product_url(id)).json(update), token)
            .await?;
        Ok(())
    }

    async fn delete_product(&self, token: &str, id: &str) -> Result<()> {
        self.send(self.http.delete(self.product_url(id)), token).await?;
        Ok(())
    }

    async fn upload(&self, token: &str, file: &SelectedFile) -> Result<UploadResult> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        if let Some(content_type) = file.mime_type() {
            part = part.mime_str(content_type).map_err(|e| {
                ClientError::new(ErrorCode::UploadFailure, format!("Invalid content type: {}", e))
            })?;
        }
        let form = Form::new().part(FILE_PART, part);

        let response = self
            .send(self.http.post(self.url("/resource/upload")).multipart(form), token)
            .await
            .map_err(ClientError::into_upload_failure)?;
        self.handle_json(response).await
    }
}

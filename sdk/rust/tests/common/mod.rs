//! Test doubles for controller tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

pub use stockyard_sdk::*;

pub const TOKEN: &str = "sy_test_token";

/// Build a listing with every field filled.
pub fn sample_product(id: &str, slug: &str) -> Product {
    let now = Utc::now();
    Product {
        id: id.to_string(),
        name: "sample name".into(),
        slug: slug.to_string(),
        category: "Bull".into(),
        image: "/images/p1.jpg".into(),
        price: 250_000.0,
        purchase_price: 200_000.0,
        cost: 10_000.0,
        tag: "120".into(),
        brand: "sample brand".into(),
        rating: 0.0,
        num_reviews: 0,
        count_in_stock: 1,
        description: "sample description".into(),
        reviews: vec![],
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
        sell_date: None,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory [`AdminApi`] that records calls and can be told to fail.
#[derive(Default)]
pub struct MockApi {
    products: Mutex<Vec<Product>>,
    calls: Mutex<Vec<String>>,
    /// One-shot failures keyed by operation name
    failures: Mutex<HashMap<&'static str, ClientError>>,
    /// Per-file upload latency, keyed by file name
    upload_delays: Mutex<HashMap<String, Duration>>,
    next_id: Mutex<u32>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_products(products: Vec<Product>) -> Arc<Self> {
        let api = Self::default();
        *api.products.lock().unwrap() = products;
        Arc::new(api)
    }

    pub fn fail_next(&self, op: &'static str, err: ClientError) {
        self.failures.lock().unwrap().insert(op, err);
    }

    pub fn delay_upload(&self, file_name: &str, delay: Duration) {
        self.upload_delays
            .lock()
            .unwrap()
            .insert(file_name.to_string(), delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == op).count()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str, token: &str) -> Result<()> {
        assert_eq!(token, TOKEN, "controller sent the wrong token");
        self.calls.lock().unwrap().push(op.to_string());
        match self.failures.lock().unwrap().remove(op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn not_found() -> ClientError {
        ClientError::from_response(404, Some("Product not found".into()))
    }
}

#[async_trait]
impl AdminApi for MockApi {
    async fn list_products(&self, token: &str) -> Result<Vec<Product>> {
        self.record("list", token)?;
        Ok(self.products())
    }

    async fn create_product(&self, token: &str) -> Result<CreateProductResponse> {
        self.record("create", token)?;
        let n = {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            *next
        };
        let product = sample_product(&format!("sy_prod_{}", n), &format!("sample-slug-{}", n));
        self.products.lock().unwrap().push(product.clone());
        Ok(CreateProductResponse {
            message: "Product Created".into(),
            product,
        })
    }

    async fn get_product(&self, token: &str, id: &str) -> Result<Product> {
        self.record("get", token)?;
        self.products()
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)
    }

    async fn update_product(&self, token: &str, id: &str, update: &UpdateProduct) -> Result<()> {
        self.record("update", token)?;
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(Self::not_found)?;
        product.name = update.name.clone();
        product.slug = update.slug.clone();
        product.price = update.price;
        product.image = update.image.clone();
        product.featured_image = update.featured_image.clone();
        Ok(())
    }

    async fn delete_product(&self, token: &str, id: &str) -> Result<()> {
        self.record("delete", token)?;
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(Self::not_found());
        }
        Ok(())
    }

    async fn upload(&self, token: &str, file: &SelectedFile) -> Result<UploadResult> {
        self.record("upload", token)?;
        let delay = self.upload_delays.lock().unwrap().get(&file.file_name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(UploadResult {
            secure_url: format!("http://assets.test/uploads/{}", file.file_name),
        })
    }
}

/// [`Shell`] that records everything and answers prompts with a fixed value.
pub struct RecordingShell {
    routes: Mutex<Vec<Route>>,
    notifications: Mutex<Vec<Notification>>,
    prompts: Mutex<Vec<String>>,
    answer: AtomicBool,
}

impl RecordingShell {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            routes: Mutex::new(vec![]),
            notifications: Mutex::new(vec![]),
            prompts: Mutex::new(vec![]),
            answer: AtomicBool::new(true),
        })
    }

    pub fn answer_prompts(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Shell for RecordingShell {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }

    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer.load(Ordering::SeqCst)
    }
}

pub fn signed_in_session() -> Session {
    Session::signed_in(Identity {
        token: TOKEN.into(),
        name: "Admin".into(),
        is_admin: true,
    })
}

pub fn context(api: &Arc<MockApi>, shell: &Arc<RecordingShell>, session: Session) -> ViewContext {
    ViewContext::new(api.clone(), shell.clone(), session)
}

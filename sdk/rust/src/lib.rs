//! # Stockyard SDK
//!
//! Client library for the Stockyard admin API, plus the view controllers an
//! admin front end drives.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stockyard_sdk::{
//!     HttpAdminApi, Identity, Notification, ProductListController, Route, Session, Shell,
//!     ViewContext,
//! };
//!
//! struct Console;
//!
//! impl Shell for Console {
//!     fn navigate(&self, route: Route) {
//!         println!("-> {:?}", route);
//!     }
//!     fn notify(&self, n: Notification) {
//!         println!("{:?}: {}", n.variant, n.message);
//!     }
//!     fn confirm(&self, _prompt: &str) -> bool {
//!         true
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::signed_in(Identity {
//!         token: "sy_...".into(),
//!         name: "Admin".into(),
//!         is_admin: true,
//!     });
//!     let api = Arc::new(HttpAdminApi::new("http://localhost:3000")?);
//!     let mut list = ProductListController::new(ViewContext::new(api, Arc::new(Console), session));
//!
//!     if let Err(redirect) = list.mount().await {
//!         println!("sign in first: {:?}", redirect.to);
//!     }
//!     println!("{} listings", list.products().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Layout
//!
//! - [`AdminApi`] is the request surface; [`HttpAdminApi`] implements it over HTTP.
//! - [`Phase`] tracks one async operation. Each controller keeps one per operation.
//! - [`authorize`] is the sign-in guard. Controllers return its [`Redirect`]
//!   and leave routing to the caller.
//! - [`Shell`] receives navigation, notifications and confirmation prompts.

pub mod api;
pub mod context;
pub mod edit;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod phase;
pub mod session;
pub mod shell;
pub mod types;

pub use api::AdminApi;
pub use context::ViewContext;
pub use edit::ProductEditController;
pub use error::{ClientError, ErrorCode, Result, map_status_to_error_code};
pub use form::{FieldErrors, ImageField, ProductForm};
pub use http::HttpAdminApi;
pub use list::{CONFIRM_PROMPT, ProductListController};
pub use phase::Phase;
pub use session::{Identity, Redirect, Route, Session, authorize};
pub use shell::{Notification, Shell, Variant};
pub use types::*;

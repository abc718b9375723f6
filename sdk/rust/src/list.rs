//! Controller behind the product list view.

use crate::context::ViewContext;
use crate::phase::Phase;
use crate::session::{Redirect, Route, authorize};
use crate::shell::Notification;
use crate::types::Product;

pub const CONFIRM_PROMPT: &str = "Are you sure?";

/// Drives the list view: fetch all listings, scaffold a new one, delete one.
///
/// Each operation owns its [`Phase`]. Methods that need a signed-in user
/// return `Err(Redirect)` before changing any state when there is none.
#[derive(Debug)]
pub struct ProductListController {
    ctx: ViewContext,
    fetch: Phase<Vec<Product>>,
    create: Phase<Product>,
    delete: Phase<()>,
    /// Raised by a successful delete; consumed once by [`Self::sync`].
    success_delete: bool,
}

impl ProductListController {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            fetch: Phase::Idle,
            create: Phase::Idle,
            delete: Phase::Idle,
            success_delete: false,
        }
    }

    pub fn fetch_phase(&self) -> &Phase<Vec<Product>> {
        &self.fetch
    }

    pub fn create_phase(&self) -> &Phase<Product> {
        &self.create
    }

    pub fn delete_phase(&self) -> &Phase<()> {
        &self.delete
    }

    pub fn success_delete(&self) -> bool {
        self.success_delete
    }

    /// Listings from the last successful fetch.
    pub fn products(&self) -> &[Product] {
        self.fetch.value().map(Vec::as_slice).unwrap_or_default()
    }

    pub async fn mount(&mut self) -> Result<(), Redirect> {
        let identity = authorize(&self.ctx.session)?;
        self.refetch(&identity.token).await;
        Ok(())
    }

    /// Consume the delete signal, if raised, and refetch. Returns whether a
    /// refetch ran.
    pub async fn sync(&mut self) -> Result<bool, Redirect> {
        if !self.success_delete {
            return Ok(false);
        }
        let identity = authorize(&self.ctx.session)?;
        self.success_delete = false;
        self.delete.reset();
        self.refetch(&identity.token).await;
        Ok(true)
    }

    /// Confirm, then scaffold a placeholder listing and open it for editing.
    pub async fn create(&mut self) -> Result<(), Redirect> {
        let identity = authorize(&self.ctx.session)?;
        if !self.ctx.shell.confirm(CONFIRM_PROMPT) {
            return Ok(());
        }

        self.create.begin();
        match self.ctx.api.create_product(&identity.token).await {
            Ok(created) => {
                let id = created.product.id.clone();
                tracing::debug!(product_id = %id, "Listing created");
                self.create.succeed(created.product);
                self.ctx
                    .shell
                    .notify(Notification::success("Product created successfully"));
                self.ctx.shell.navigate(Route::ProductEdit(id));
            }
            Err(e) => {
                self.create.fail(e.message());
                self.ctx.shell.notify(Notification::error(e.message()));
            }
        }
        Ok(())
    }

    /// Confirm, then delete `id`. Success raises the signal [`Self::sync`]
    /// consumes.
    pub async fn delete(&mut self, id: &str) -> Result<(), Redirect> {
        let identity = authorize(&self.ctx.session)?;
        if !self.ctx.shell.confirm(CONFIRM_PROMPT) {
            return Ok(());
        }

        self.delete.begin();
        match self.ctx.api.delete_product(&identity.token, id).await {
            Ok(()) => {
                self.delete.succeed(());
                self.success_delete = true;
                self.ctx
                    .shell
                    .notify(Notification::success("Product deleted successfully"));
            }
            Err(e) => {
                self.delete.fail(e.message());
                self.ctx.shell.notify(Notification::error(e.message()));
            }
        }
        Ok(())
    }

    async fn refetch(&mut self, token: &str) {
        self.fetch.begin();
        match self.ctx.api.list_products(token).await {
            Ok(products) => self.fetch.succeed(products),
            Err(e) => {
                tracing::debug!(error = %e, "Listing fetch failed");
                self.fetch.fail(e.message());
            }
        }
    }
}

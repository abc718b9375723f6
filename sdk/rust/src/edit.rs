//! Controller behind the product edit view.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::context::ViewContext;
use crate::form::{FieldErrors, ImageField, ProductForm};
use crate::phase::Phase;
use crate::session::{Redirect, Route, authorize};
use crate::shell::Notification;
use crate::types::{Product, SelectedFile};

#[derive(Debug, Default)]
struct EditState {
    fetch: Phase<Product>,
    update: Phase<()>,
    /// Shared by both image fields; the last upload to finish wins.
    upload: Phase<ImageField>,
    form: ProductForm,
    field_errors: FieldErrors,
}

/// Drives the edit view for one listing.
///
/// Methods take `&self` so that uploads to both image fields can be awaited
/// at once. The state lock is never held across an await point.
#[derive(Debug)]
pub struct ProductEditController {
    ctx: ViewContext,
    id: String,
    state: Mutex<EditState>,
}

impl ProductEditController {
    pub fn new(ctx: ViewContext, id: impl Into<String>) -> Self {
        Self {
            ctx,
            id: id.into(),
            state: Mutex::new(EditState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, EditState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn form(&self) -> ProductForm {
        self.state().form.clone()
    }

    /// Apply user edits to the form.
    pub fn edit_form(&self, edit: impl FnOnce(&mut ProductForm)) {
        edit(&mut self.state().form);
    }

    pub fn field_errors(&self) -> FieldErrors {
        self.state().field_errors.clone()
    }

    pub fn fetch_phase(&self) -> Phase<Product> {
        self.state().fetch.clone()
    }

    pub fn update_phase(&self) -> Phase<()> {
        self.state().update.clone()
    }

    pub fn upload_phase(&self) -> Phase<ImageField> {
        self.state().upload.clone()
    }

    /// Load the listing and fill the form with it.
    pub async fn mount(&self) -> Result<(), Redirect> {
        let identity = authorize(&self.ctx.session)?;
        self.state().fetch.begin();

        let result = self.ctx.api.get_product(&identity.token, &self.id).await;

        let mut state = self.state();
        match result {
            Ok(product) => {
                state.form = ProductForm::from_product(&product);
                state.field_errors.clear();
                state.fetch.succeed(product);
            }
            Err(e) => state.fetch.fail(e.message()),
        }
        Ok(())
    }

    /// Upload `file` and write its URL into `field`. `None` (nothing picked)
    /// does nothing. A failure leaves the field as it was.
    pub async fn upload(&self, file: Option<SelectedFile>, field: ImageField) -> Result<(), Redirect> {
        let Some(file) = file else {
            return Ok(());
        };
        let identity = authorize(&self.ctx.session)?;
        self.state().upload.begin();

        let result = self.ctx.api.upload(&identity.token, &file).await;

        let notification = {
            let mut state = self.state();
            match result {
                Ok(uploaded) => {
                    state.form.set_image(field, uploaded.secure_url);
                    state.upload.succeed(field);
                    Notification::success("File uploaded successfully")
                }
                Err(e) => {
                    tracing::debug!(error = %e, ?field, "Upload failed");
                    state.upload.fail(e.message());
                    Notification::error(e.message())
                }
            }
        };
        self.ctx.shell.notify(notification);
        Ok(())
    }

    /// Validate locally, then send the whole form. Invalid forms record
    /// per-field errors and send nothing.
    pub async fn submit(&self) -> Result<(), Redirect> {
        let identity = authorize(&self.ctx.session)?;

        let update = {
            let mut state = self.state();
            match state.form.to_update() {
                Ok(update) => {
                    state.field_errors.clear();
                    state.update.begin();
                    update
                }
                Err(errors) => {
                    state.field_errors = errors;
                    return Ok(());
                }
            }
        };

        let result = self
            .ctx
            .api
            .update_product(&identity.token, &self.id, &update)
            .await;

        match result {
            Ok(()) => {
                self.state().update.succeed(());
                self.ctx
                    .shell
                    .notify(Notification::success("Product updated successfully"));
                self.ctx.shell.navigate(Route::ProductList);
            }
            Err(e) => {
                self.state().update.fail(e.message());
                self.ctx.shell.notify(Notification::error(e.message()));
            }
        }
        Ok(())
    }
}

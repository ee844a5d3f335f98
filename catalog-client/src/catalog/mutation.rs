//! Product writes and cache reconciliation
//!
//! | Operation | Local state after 2xx |
//! |-----------|-----------------------|
//! | create | full reload (picks up server-assigned fields) |
//! | update | patch from the server echo, full reload if there is none |
//! | remove | `remove_local` |
//! | toggle_status | status-only patch, no reload |
//! | bulk_create | full reload, even on partial failure |
//!
//! Validation runs before any request. A rejected write leaves the cache
//! untouched.
//!
//! Every operation borrows the coordinator and the cache mutably until its
//! response has been reconciled, so writes never overlap and each patch
//! lands in the order the writes were issued.

use serde_json::Value;
use shared::{
    BulkResult, ProductId, ProductPatch, ProductPayload, ProductStatus, StatusLabels,
    StatusPayload,
};

use super::cache::CatalogCache;
use crate::error::{CatalogError, CatalogResult};
use crate::http::CatalogApi;
use crate::session::Session;
use crate::validation::{self, ImportPreview, ProductDraft};

#[derive(Debug)]
pub struct MutationCoordinator {
    labels: StatusLabels,
}

impl MutationCoordinator {
    pub fn new(labels: StatusLabels) -> Self {
        Self { labels }
    }

    pub fn status_labels(&self) -> &StatusLabels {
        &self.labels
    }

    fn ensure_allowed(session: &Session) -> CatalogResult<()> {
        if session.can_manage_products() {
            Ok(())
        } else {
            Err(CatalogError::NotPermitted(
                "this account cannot manage products".into(),
            ))
        }
    }

    /// Validate, submit, then reload the whole catalog
    pub async fn create<A: CatalogApi + ?Sized>(
        &mut self,
        api: &A,
        cache: &mut CatalogCache,
        session: &Session,
        draft: &ProductDraft,
    ) -> CatalogResult<()> {
        Self::ensure_allowed(session)?;
        let payload = validation::validate_into(draft).map_err(CatalogError::Validation)?;

        api.create_product(&payload)
            .await
            .map_err(|e| CatalogError::mutation(e, "Could not create the product"))?;
        tracing::info!(name = %payload.name, "product created");

        reload_after_write(api, cache).await
    }

    /// Validate, submit, then show the server-confirmed row
    pub async fn update<A: CatalogApi + ?Sized>(
        &mut self,
        api: &A,
        cache: &mut CatalogCache,
        session: &Session,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> CatalogResult<()> {
        Self::ensure_allowed(session)?;
        let payload = validation::validate_into(draft).map_err(CatalogError::Validation)?;

        let echo = api
            .update_product(id, &payload)
            .await
            .map_err(|e| CatalogError::mutation(e, "Could not update the product"))?;
        tracing::info!(%id, "product updated");

        match echo {
            Some(product) => {
                cache.apply_local_patch(id, ProductPatch::from_echo(product));
                Ok(())
            }
            None => reload_after_write(api, cache).await,
        }
    }

    /// Delete remotely, then drop the row locally.
    ///
    /// Confirmation is the caller's job.
    pub async fn remove<A: CatalogApi + ?Sized>(
        &mut self,
        api: &A,
        cache: &mut CatalogCache,
        session: &Session,
        id: &ProductId,
    ) -> CatalogResult<()> {
        Self::ensure_allowed(session)?;

        api.delete_product(id)
            .await
            .map_err(|e| CatalogError::mutation(e, "Could not delete the product"))?;

        cache.remove_local(id);
        tracing::info!(%id, "product deleted");
        Ok(())
    }

    /// Flip `current` and patch just the status field, without a reload.
    ///
    /// Returns the new status.
    pub async fn toggle_status<A: CatalogApi + ?Sized>(
        &mut self,
        api: &A,
        cache: &mut CatalogCache,
        session: &Session,
        id: &ProductId,
        current: ProductStatus,
    ) -> CatalogResult<ProductStatus> {
        Self::ensure_allowed(session)?;
        let next = current.toggled();
        let body = StatusPayload {
            status: self.labels.label(next).to_string(),
        };

        api.set_product_status(id, &body)
            .await
            .map_err(|e| CatalogError::mutation(e, "Could not change the product status"))?;

        cache.apply_local_patch(id, ProductPatch::status(next));
        tracing::info!(%id, status = next.as_str(), "product status changed");
        Ok(next)
    }

    /// Validate the whole batch, submit it, then reload.
    ///
    /// Any invalid entry blocks the import with zero requests sent.
    pub async fn bulk_create<A: CatalogApi + ?Sized>(
        &mut self,
        api: &A,
        cache: &mut CatalogCache,
        session: &Session,
        payload: &Value,
    ) -> CatalogResult<BulkResult> {
        Self::ensure_allowed(session)?;
        let items = validation::validate_batch(payload).map_err(CatalogError::BatchValidation)?;
        self.submit_bulk(api, cache, &items).await
    }

    /// [`bulk_create`](Self::bulk_create) from raw import text
    pub async fn bulk_create_text<A: CatalogApi + ?Sized>(
        &mut self,
        api: &A,
        cache: &mut CatalogCache,
        session: &Session,
        text: &str,
    ) -> CatalogResult<BulkResult> {
        Self::ensure_allowed(session)?;
        let items = validation::parse_import(text).map_err(CatalogError::BatchValidation)?;
        self.submit_bulk(api, cache, &items).await
    }

    async fn submit_bulk<A: CatalogApi + ?Sized>(
        &mut self,
        api: &A,
        cache: &mut CatalogCache,
        items: &[ProductPayload],
    ) -> CatalogResult<BulkResult> {
        let result = api
            .bulk_create_products(items)
            .await
            .map_err(|e| CatalogError::mutation(e, "Could not import the products"))?;

        if result.failed > 0 {
            tracing::warn!(
                successful = result.successful,
                failed = result.failed,
                "bulk import partially failed"
            );
        } else {
            tracing::info!(successful = result.successful, "bulk import done");
        }

        reload_after_write(api, cache).await?;
        Ok(result)
    }

    /// Parse and validate import text for display; sends nothing
    pub fn preview_import(&self, text: &str) -> ImportPreview {
        validation::preview_import(text)
    }
}

/// Full reload after a confirmed write.
///
/// The write already went through; a failure here only means the view is
/// stale, reported as [`CatalogError::Fetch`].
async fn reload_after_write<A: CatalogApi + ?Sized>(
    api: &A,
    cache: &mut CatalogCache,
) -> CatalogResult<()> {
    cache.load(api).await.map(|_| ())
}

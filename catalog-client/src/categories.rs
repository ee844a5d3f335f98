//! Category administration
//!
//! Every successful write reloads the list. Deleting a category does not
//! touch products referencing it; that is up to the backend.

use shared::{Category, CategoryId, CategoryPayload};

use crate::error::{CatalogError, CatalogResult};
use crate::http::CatalogApi;
use crate::session::Session;
use crate::validation::ValidationReport;

#[derive(Debug)]
pub struct CategoryStore<A: CatalogApi> {
    api: A,
    session: Session,
    categories: Vec<Category>,
}

impl<A: CatalogApi> CategoryStore<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            categories: Vec::new(),
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Display name for a category id
    pub fn name_of(&self, id: &CategoryId) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| &c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Resolve a category by name, ignoring case and surrounding spaces
    pub fn id_by_name(&self, name: &str) -> Option<&CategoryId> {
        let name = name.trim();
        self.categories
            .iter()
            .find(|c| c.name.trim().eq_ignore_ascii_case(name))
            .map(|c| &c.id)
    }

    /// Fetch the list; a failure keeps the previous one
    pub async fn load(&mut self) -> CatalogResult<&[Category]> {
        match self.api.list_categories().await {
            Ok(categories) => {
                tracing::info!(count = categories.len(), "categories loaded");
                self.categories = categories;
                Ok(&self.categories)
            }
            Err(e) => {
                tracing::warn!(error = %e, "category load failed, keeping cached list");
                Err(CatalogError::Fetch(e))
            }
        }
    }

    pub async fn create(&mut self, name: &str) -> CatalogResult<()> {
        let body = self.prepare(name)?;
        self.api
            .create_category(&body)
            .await
            .map_err(|e| CatalogError::mutation(e, "Could not create the category"))?;
        tracing::info!(name = %body.name, "category created");
        self.load().await.map(|_| ())
    }

    pub async fn rename(&mut self, id: &CategoryId, name: &str) -> CatalogResult<()> {
        let body = self.prepare(name)?;
        self.api
            .rename_category(id, &body)
            .await
            .map_err(|e| CatalogError::mutation(e, "Could not rename the category"))?;
        tracing::info!(%id, name = %body.name, "category renamed");
        self.load().await.map(|_| ())
    }

    pub async fn delete(&mut self, id: &CategoryId) -> CatalogResult<()> {
        self.ensure_allowed()?;
        self.api
            .delete_category(id)
            .await
            .map_err(|e| CatalogError::mutation(e, "Could not delete the category"))?;
        tracing::info!(%id, "category deleted");
        self.load().await.map(|_| ())
    }

    fn ensure_allowed(&self) -> CatalogResult<()> {
        if self.session.can_manage_categories() {
            Ok(())
        } else {
            Err(CatalogError::NotPermitted(
                "this account cannot manage categories".into(),
            ))
        }
    }

    fn prepare(&self, name: &str) -> CatalogResult<CategoryPayload> {
        self.ensure_allowed()?;
        let name = name.trim();
        if name.is_empty() {
            let mut report = ValidationReport::default();
            report
                .field_errors
                .insert("name".into(), "name is required".into());
            return Err(CatalogError::Validation(report));
        }
        Ok(CategoryPayload {
            name: name.to_string(),
        })
    }
}

use std::sync::Arc;

use tracing::info;

use crate::{
    catalog::{CatalogController, CatalogRefresh},
    config::Settings,
    draft::DraftFormController,
    transport::{CatalogApi, HttpCatalogApi},
    types::ErrorBanner,
};

/// One browsing session: both controllers sharing a transport and a banner.
pub struct BookHubSession {
    backend_url: String,
    banner: ErrorBanner,
    catalog: Arc<CatalogController>,
    draft: DraftFormController,
}

impl BookHubSession {
    pub async fn start(settings: &Settings) -> Self {
        Self::start_with_api(Arc::new(HttpCatalogApi::new(settings.backend_url.clone()))).await
    }

    /// Builds the controllers and runs the one automatic load with empty
    /// filters.
    pub async fn start_with_api(api: Arc<dyn CatalogApi>) -> Self {
        let backend_url = api.base_url().to_string();
        let banner = ErrorBanner::default();
        let catalog = Arc::new(CatalogController::new(Arc::clone(&api), banner.clone()));
        let refresh: Arc<dyn CatalogRefresh> = catalog.clone();
        let draft = DraftFormController::new(api, banner.clone(), refresh);

        info!(%backend_url, "starting book hub session");
        catalog.reload().await;

        Self {
            backend_url,
            banner,
            catalog,
            draft,
        }
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn catalog(&self) -> &Arc<CatalogController> {
        &self.catalog
    }

    pub fn draft(&self) -> &DraftFormController {
        &self.draft
    }

    pub async fn banner(&self) -> Option<String> {
        self.banner.current().await
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

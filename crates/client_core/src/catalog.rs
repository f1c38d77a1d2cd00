//! Filter state, the loaded book list, and the list-load lifecycle.

use std::sync::Arc;

use async_trait::async_trait;
use shared::domain::Book;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    transport::CatalogApi,
    types::{ErrorBanner, FilterCriteria, FilterField, RequestStatus},
};

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load books";

/// Something that can re-fetch the catalog after a write.
#[async_trait]
pub trait CatalogRefresh: Send + Sync {
    async fn refresh(&self);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub filters: FilterCriteria,
    pub books: Vec<Book>,
    pub status: RequestStatus,
}

#[derive(Default)]
struct CatalogState {
    filters: FilterCriteria,
    books: Vec<Book>,
    status: RequestStatus,
    /// Ticket of the most recently started load.
    latest_load: u64,
}

pub struct CatalogController {
    api: Arc<dyn CatalogApi>,
    banner: ErrorBanner,
    state: Mutex<CatalogState>,
}

impl CatalogController {
    pub fn new(api: Arc<dyn CatalogApi>, banner: ErrorBanner) -> Self {
        Self {
            api,
            banner,
            state: Mutex::new(CatalogState::default()),
        }
    }

    /// Updates one filter. The list is not reloaded until [`Self::reload`].
    pub async fn set_filter(&self, field: FilterField, value: impl Into<String>) {
        self.state.lock().await.filters.set(field, value.into());
    }

    /// Fetches the list for the current filters.
    ///
    /// Never fails: errors end up in the status and the banner, and the
    /// previously loaded books stay in place. When loads overlap, only the
    /// most recently started one is applied.
    pub async fn reload(&self) {
        let (ticket, query) = {
            let mut state = self.state.lock().await;
            state.latest_load += 1;
            state.status = RequestStatus::Loading;
            self.banner.clear().await;
            (state.latest_load, state.filters.to_query())
        };

        let result = self.api.list_books(&query).await;

        let mut state = self.state.lock().await;
        if state.latest_load != ticket {
            debug!(
                ticket,
                latest = state.latest_load,
                "discarding superseded book load"
            );
            return;
        }

        match result {
            Ok(books) => {
                info!(count = books.len(), "loaded books");
                state.books = books;
                state.status = RequestStatus::Succeeded;
            }
            Err(err) => {
                warn!(error = %err, "failed to load books");
                state.status = RequestStatus::Failed(LOAD_FAILURE_MESSAGE.into());
                self.banner.set(LOAD_FAILURE_MESSAGE).await;
            }
        }
    }

    pub async fn filters(&self) -> FilterCriteria {
        self.state.lock().await.filters.clone()
    }

    pub async fn books(&self) -> Vec<Book> {
        self.state.lock().await.books.clone()
    }

    pub async fn status(&self) -> RequestStatus {
        self.state.lock().await.status.clone()
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        let state = self.state.lock().await;
        CatalogSnapshot {
            filters: state.filters.clone(),
            books: state.books.clone(),
            status: state.status.clone(),
        }
    }
}

#[async_trait]
impl CatalogRefresh for CatalogController {
    async fn refresh(&self) {
        self.reload().await;
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;

//! Client-side data flow for the book hub: filter state, list loading, and the
//! create form, all coordinated against the remote `/api/books` collection.

pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod session;
pub mod transport;
pub mod types;

pub use catalog::{CatalogController, CatalogRefresh, CatalogSnapshot, LOAD_FAILURE_MESSAGE};
pub use config::{load_settings, Settings};
pub use draft::{
    parse_tags, DraftField, DraftForm, DraftFormController, SubmitOutcome, CREATE_FAILURE_MESSAGE,
};
pub use error::{CatalogError, SettingsError};
pub use session::BookHubSession;
pub use transport::{CatalogApi, HttpCatalogApi};
pub use types::{ErrorBanner, FilterCriteria, FilterField, RequestStatus};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

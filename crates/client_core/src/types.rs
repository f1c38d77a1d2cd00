use std::{str::FromStr, sync::Arc};

use shared::protocol::ListBooksQuery;
use tokio::sync::RwLock;

use crate::error::UnknownField;

/// Lifecycle of one request-issuing operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed(String),
}

impl RequestStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Genre,
    Query,
}

impl FromStr for FilterField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "genre" => Ok(Self::Genre),
            "q" | "query" => Ok(Self::Query),
            other => Err(UnknownField {
                kind: "filter",
                name: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub genre: String,
    pub query: String,
}

impl FilterCriteria {
    pub fn set(&mut self, field: FilterField, value: String) {
        match field {
            FilterField::Genre => self.genre = value,
            FilterField::Query => self.query = value,
        }
    }

    /// Query parameters for the list request. Empty criteria are left out
    /// entirely rather than sent as empty strings.
    pub fn to_query(&self) -> ListBooksQuery {
        let present = |v: &str| (!v.is_empty()).then(|| v.to_string());
        ListBooksQuery {
            genre: present(&self.genre),
            q: present(&self.query),
        }
    }
}

/// The single user-visible error slot shared by the list and create paths.
#[derive(Debug, Clone, Default)]
pub struct ErrorBanner {
    slot: Arc<RwLock<Option<String>>>,
}

impl ErrorBanner {
    pub async fn set(&self, message: impl Into<String>) {
        *self.slot.write().await = Some(message.into());
    }

    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }

    pub async fn current(&self) -> Option<String> {
        self.slot.read().await.clone()
    }
}

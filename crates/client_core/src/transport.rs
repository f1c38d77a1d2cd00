//! HTTP access to the book collection endpoint.

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::Book,
    protocol::{CreateBookRequest, ListBooksQuery, ListBooksResponse, BOOKS_PATH},
};
use tracing::debug;

use crate::error::CatalogError;

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Base address the endpoint paths are joined onto.
    fn base_url(&self) -> &str;
    async fn list_books(&self, query: &ListBooksQuery) -> Result<Vec<Book>, CatalogError>;
    async fn create_book(&self, request: &CreateBookRequest) -> Result<(), CatalogError>;
}

pub struct HttpCatalogApi {
    http: Client,
    base_url: String,
}

impl HttpCatalogApi {
    /// `base_url` is expected without a trailing slash, as produced by
    /// [`crate::config::load_settings`].
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn books_endpoint(&self) -> String {
        format!("{}{}", self.base_url, BOOKS_PATH)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_books(&self, query: &ListBooksQuery) -> Result<Vec<Book>, CatalogError> {
        let endpoint = self.books_endpoint();
        debug!(%endpoint, genre = ?query.genre, q = ?query.q, "listing books");
        let res = self
            .http
            .get(&endpoint)
            .query(query)
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                endpoint: endpoint.clone(),
                source,
            })?;
        let res = check_status(res).await?;
        let body = res
            .bytes()
            .await
            .map_err(|source| CatalogError::Transport { endpoint, source })?;
        let parsed: ListBooksResponse = serde_json::from_slice(&body)?;
        Ok(parsed.into_items())
    }

    async fn create_book(&self, request: &CreateBookRequest) -> Result<(), CatalogError> {
        let endpoint = self.books_endpoint();
        debug!(%endpoint, title = %request.title, "creating book");
        let res = self
            .http
            .post(&endpoint)
            .json(request)
            .send()
            .await
            .map_err(|source| CatalogError::Transport { endpoint, source })?;
        check_status(res).await?;
        Ok(())
    }
}

async fn check_status(res: Response) -> Result<Response, CatalogError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(CatalogError::Status { status, body })
}

//! Loopback book server and other fixtures shared by the unit tests.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use shared::{
    domain::{Book, BookId},
    protocol::{CreateBookRequest, ListBooksQuery},
};
use tokio::{net::TcpListener, sync::Mutex};

use crate::catalog::CatalogRefresh;

pub fn book(id: &str, title: &str, genre: &str) -> Book {
    Book {
        id: BookId(id.to_string()),
        title: title.to_string(),
        author: format!("author of {title}"),
        genre: genre.to_string(),
        description: None,
        cover_url: None,
        content: None,
        audio_summary_url: None,
        tags: None,
    }
}

#[derive(Default)]
struct BackendInner {
    books: Vec<Book>,
    /// Raw query string of every list request, `None` when the URL had none.
    list_queries: Vec<Option<String>>,
    created: Vec<CreateBookRequest>,
    list_failure: Option<StatusCode>,
    /// Sent with `200 OK` in place of the JSON list when set.
    list_body: Option<String>,
    create_failure: Option<(StatusCode, String)>,
}

/// In-memory stand-in for the book API, served over real HTTP.
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<Mutex<BackendInner>>,
}

impl FakeBackend {
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BackendInner {
                books,
                ..BackendInner::default()
            })),
        }
    }

    pub async fn fail_lists(&self, status: Option<StatusCode>) {
        self.inner.lock().await.list_failure = status;
    }

    pub async fn serve_list_body(&self, body: Option<&str>) {
        self.inner.lock().await.list_body = body.map(str::to_string);
    }

    pub async fn fail_creates(&self, status: StatusCode, body: &str) {
        self.inner.lock().await.create_failure = Some((status, body.to_string()));
    }

    pub async fn list_queries(&self) -> Vec<Option<String>> {
        self.inner.lock().await.list_queries.clone()
    }

    pub async fn created(&self) -> Vec<CreateBookRequest> {
        self.inner.lock().await.created.clone()
    }

    pub async fn spawn(&self) -> std::io::Result<String> {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = Router::new()
            .route("/api/books", get(handle_list_books).post(handle_create_book))
            .with_state(self.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(format!("http://{addr}"))
    }
}

async fn handle_list_books(
    State(backend): State<FakeBackend>,
    RawQuery(raw): RawQuery,
    Query(query): Query<ListBooksQuery>,
) -> Response {
    let mut inner = backend.inner.lock().await;
    inner.list_queries.push(raw);
    if let Some(status) = inner.list_failure {
        return (status, "database offline").into_response();
    }
    if let Some(body) = inner.list_body.clone() {
        return (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();
    }

    let items: Vec<&Book> = inner
        .books
        .iter()
        .filter(|book| query.genre.as_deref().map_or(true, |genre| book.genre == genre))
        .collect();
    Json(json!({ "items": items })).into_response()
}

async fn handle_create_book(
    State(backend): State<FakeBackend>,
    Json(request): Json<CreateBookRequest>,
) -> Response {
    let mut inner = backend.inner.lock().await;
    inner.created.push(request.clone());
    if let Some((status, body)) = inner.create_failure.clone() {
        return (status, body).into_response();
    }

    let id = BookId((inner.books.len() + 1).to_string());
    let non_empty = |v: String| (!v.is_empty()).then_some(v);
    inner.books.push(Book {
        id: id.clone(),
        title: request.title,
        author: request.author,
        genre: request.genre,
        description: non_empty(request.description),
        cover_url: non_empty(request.cover_url),
        content: non_empty(request.content),
        audio_summary_url: non_empty(request.audio_summary_url),
        tags: request.tags,
    });
    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

/// Address nothing is listening on.
pub async fn unreachable_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

#[derive(Default)]
pub struct CountingRefresh {
    calls: AtomicUsize,
}

impl CountingRefresh {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogRefresh for CountingRefresh {
    async fn refresh(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

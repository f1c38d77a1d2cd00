use std::sync::Arc;

use client_core::{CatalogApi, CatalogError};
use shared::{
    domain::{Book, BookId},
    protocol::{CreateBookRequest, ListBooksQuery},
};
use tokio::sync::Mutex;

use super::*;

#[derive(Default)]
struct MemoryApi {
    books: Mutex<Vec<Book>>,
    created: Mutex<Vec<CreateBookRequest>>,
}

#[async_trait::async_trait]
impl CatalogApi for MemoryApi {
    fn base_url(&self) -> &str {
        "http://memory.test"
    }

    async fn list_books(&self, query: &ListBooksQuery) -> Result<Vec<Book>, CatalogError> {
        let books = self.books.lock().await;
        Ok(books
            .iter()
            .filter(|b| query.genre.as_deref().map_or(true, |g| b.genre == g))
            .cloned()
            .collect())
    }

    async fn create_book(&self, request: &CreateBookRequest) -> Result<(), CatalogError> {
        self.created.lock().await.push(request.clone());
        let mut books = self.books.lock().await;
        let id = BookId((books.len() + 1).to_string());
        books.push(Book {
            id,
            title: request.title.clone(),
            author: request.author.clone(),
            genre: request.genre.clone(),
            description: None,
            cover_url: None,
            content: None,
            audio_summary_url: None,
            tags: request.tags.clone(),
        });
        Ok(())
    }
}

async fn run(session: &BookHubSession, line: &str) -> String {
    let command = parse_line(line).expect("parse").expect("command");
    match execute(session, command).await {
        Flow::Continue(output) => output,
        Flow::Quit => panic!("unexpected quit"),
    }
}

#[test]
fn parses_multi_word_values() {
    assert_eq!(
        parse_line("set title The Left Hand of Darkness"),
        Ok(Some(ShellCommand::Set {
            field: DraftField::Title,
            text: "The Left Hand of Darkness".into(),
        }))
    );
    assert_eq!(
        parse_line("filter q -dash"),
        Ok(Some(ShellCommand::Filter {
            field: FilterField::Query,
            text: "-dash".into(),
        }))
    );
}

#[test]
fn values_keep_their_whitespace() {
    assert_eq!(
        parse_line("set content line one   two  "),
        Ok(Some(ShellCommand::Set {
            field: DraftField::Content,
            text: "line one   two  ".into(),
        }))
    );
    assert_eq!(
        parse_line("  filter   q  le  guin"),
        Ok(Some(ShellCommand::Filter {
            field: FilterField::Query,
            text: " le  guin".into(),
        }))
    );
    assert_eq!(
        parse_line("filter genre"),
        Ok(Some(ShellCommand::Filter {
            field: FilterField::Genre,
            text: String::new(),
        }))
    );
}

#[test]
fn commands_without_values_reject_extra_words() {
    assert!(parse_line("apply now").is_err());
    assert!(parse_line("set").is_err());
}

#[tokio::test]
async fn set_and_filter_reach_the_session_unchanged() {
    let session = BookHubSession::start_with_api(Arc::new(MemoryApi::default())).await;

    run(&session, "set content line one   two  ").await;
    run(&session, "filter q le  guin").await;

    assert_eq!(session.draft().draft().await.content, "line one   two  ");
    assert_eq!(session.catalog().filters().await.query, "le  guin");
}

#[test]
fn blank_line_is_not_a_command() {
    assert_eq!(parse_line("   "), Ok(None));
}

#[test]
fn unknown_field_is_rejected() {
    let err = parse_line("set isbn 123").expect_err("unknown field");
    assert!(err.contains("isbn"), "{err}");
}

#[test]
fn exit_is_an_alias_for_quit() {
    assert_eq!(parse_line("exit"), Ok(Some(ShellCommand::Quit)));
}

#[tokio::test]
async fn filter_then_apply_narrows_the_list() {
    let api = Arc::new(MemoryApi::default());
    api.create_book(&CreateBookRequest {
        title: "Dune".into(),
        author: "Frank Herbert".into(),
        genre: "sci-fi".into(),
        ..CreateBookRequest::default()
    })
    .await
    .expect("seed");
    api.create_book(&CreateBookRequest {
        title: "Emma".into(),
        author: "Jane Austen".into(),
        genre: "classic".into(),
        ..CreateBookRequest::default()
    })
    .await
    .expect("seed");
    let session = BookHubSession::start_with_api(api).await;

    run(&session, "filter genre classic").await;
    let listed = run(&session, "list").await;
    assert!(listed.contains("Dune"), "filter alone must not reload");

    let applied = run(&session, "apply").await;
    assert!(applied.contains("Emma"));
    assert!(!applied.contains("Dune"));
}

#[tokio::test]
async fn save_requires_title_author_and_genre() {
    let api = Arc::new(MemoryApi::default());
    let session = BookHubSession::start_with_api(api.clone()).await;

    run(&session, "set author Ursula K. Le Guin").await;
    let output = run(&session, "save").await;

    assert_eq!(output, "Please fill in: title, genre");
    assert!(api.created.lock().await.is_empty());
}

#[tokio::test]
async fn save_submits_and_shows_reloaded_list() {
    let api = Arc::new(MemoryApi::default());
    let session = BookHubSession::start_with_api(api.clone()).await;
    assert!(run(&session, "list").await.contains(render::EMPTY_CATALOG));

    run(&session, "set title A Wizard of Earthsea").await;
    run(&session, "set author Ursula K. Le Guin").await;
    run(&session, "set genre fantasy").await;
    run(&session, "set tags  wizards ,  , islands").await;
    let output = run(&session, "save").await;

    assert!(output.starts_with("Saved."));
    assert!(output.contains("A Wizard of Earthsea"));
    assert!(output.contains("#wizards #islands"));
    assert_eq!(
        api.created.lock().await[0].tags,
        Some(vec!["wizards".to_string(), "islands".to_string()])
    );
    assert!(session.draft().draft().await.title.is_empty());
}

#[tokio::test]
async fn draft_view_shows_backend_address() {
    let session = BookHubSession::start_with_api(Arc::new(MemoryApi::default())).await;

    let output = run(&session, "draft").await;

    assert!(output.starts_with("Add a Book"));
    assert!(output.trim_end().ends_with("Backend: http://memory.test"));
}

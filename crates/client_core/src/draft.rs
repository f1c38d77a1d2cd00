//! The create-book form: raw draft text, the submit-time transform, and the
//! create request.

use std::{fmt, str::FromStr, sync::Arc};

use shared::protocol::CreateBookRequest;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    catalog::CatalogRefresh,
    error::UnknownField,
    transport::CatalogApi,
    types::{ErrorBanner, RequestStatus},
};

pub const CREATE_FAILURE_MESSAGE: &str = "Failed to create book";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Author,
    Genre,
    Description,
    CoverUrl,
    Content,
    AudioSummaryUrl,
    Tags,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        Self::Title,
        Self::Author,
        Self::Genre,
        Self::Description,
        Self::CoverUrl,
        Self::Content,
        Self::AudioSummaryUrl,
        Self::Tags,
    ];

    pub const REQUIRED: [DraftField; 3] = [Self::Title, Self::Author, Self::Genre];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Genre => "genre",
            Self::Description => "description",
            Self::CoverUrl => "cover_url",
            Self::Content => "content",
            Self::AudioSummaryUrl => "audio_summary_url",
            Self::Tags => "tags",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField {
                kind: "draft",
                name: s.to_string(),
            })
    }
}

/// Unsubmitted book, every field kept as the text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub cover_url: String,
    pub content: String,
    pub audio_summary_url: String,
    /// Comma separated.
    pub tags: String,
}

impl DraftForm {
    fn slot(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Author => &mut self.author,
            DraftField::Genre => &mut self.genre,
            DraftField::Description => &mut self.description,
            DraftField::CoverUrl => &mut self.cover_url,
            DraftField::Content => &mut self.content,
            DraftField::AudioSummaryUrl => &mut self.audio_summary_url,
            DraftField::Tags => &mut self.tags,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        *self.slot(field) = value;
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Author => &self.author,
            DraftField::Genre => &self.genre,
            DraftField::Description => &self.description,
            DraftField::CoverUrl => &self.cover_url,
            DraftField::Content => &self.content,
            DraftField::AudioSummaryUrl => &self.audio_summary_url,
            DraftField::Tags => &self.tags,
        }
    }

    /// Required fields that are still empty, in form order.
    pub fn missing_required(&self) -> Vec<DraftField> {
        DraftField::REQUIRED
            .into_iter()
            .filter(|field| self.get(*field).is_empty())
            .collect()
    }

    pub fn to_request(&self) -> CreateBookRequest {
        CreateBookRequest {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            description: self.description.clone(),
            cover_url: self.cover_url.clone(),
            content: self.content.clone(),
            audio_summary_url: self.audio_summary_url.clone(),
            tags: parse_tags(&self.tags),
        }
    }
}

/// Splits comma separated tag text. Returns `None` rather than an empty list
/// when no tag survives trimming.
pub fn parse_tags(raw: &str) -> Option<Vec<String>> {
    let tags: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();
    (!tags.is_empty()).then_some(tags)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Rejected(String),
}

#[derive(Default)]
struct DraftState {
    form: DraftForm,
    status: RequestStatus,
    /// Ticket of the most recently started submit.
    latest_submit: u64,
}

pub struct DraftFormController {
    api: Arc<dyn CatalogApi>,
    banner: ErrorBanner,
    catalog: Arc<dyn CatalogRefresh>,
    state: Mutex<DraftState>,
}

impl DraftFormController {
    pub fn new(
        api: Arc<dyn CatalogApi>,
        banner: ErrorBanner,
        catalog: Arc<dyn CatalogRefresh>,
    ) -> Self {
        Self {
            api,
            banner,
            catalog,
            state: Mutex::new(DraftState::default()),
        }
    }

    pub async fn set_field(&self, field: DraftField, value: impl Into<String>) {
        self.state.lock().await.form.set(field, value.into());
    }

    pub async fn draft(&self) -> DraftForm {
        self.state.lock().await.form.clone()
    }

    pub async fn status(&self) -> RequestStatus {
        self.state.lock().await.status.clone()
    }

    /// Sends the draft to the server.
    ///
    /// On success the draft is cleared and the catalog reloads under its
    /// current filters. On failure the draft is kept and the server's message
    /// goes to the banner. Required fields are not checked here.
    ///
    /// When submits overlap, only the most recently started one updates the
    /// draft, the status and the banner. A superseded success still reloads
    /// the catalog.
    pub async fn submit(&self) -> SubmitOutcome {
        let (ticket, request) = {
            let mut state = self.state.lock().await;
            state.latest_submit += 1;
            state.status = RequestStatus::Loading;
            self.banner.clear().await;
            (state.latest_submit, state.form.to_request())
        };

        let result = self.api.create_book(&request).await;

        let mut state = self.state.lock().await;
        let current = state.latest_submit == ticket;
        if !current {
            debug!(
                ticket,
                latest = state.latest_submit,
                "superseded submit leaves the draft alone"
            );
        }

        if let Err(err) = result {
            warn!(error = %err, "failed to create book");
            let message = err
                .server_message()
                .unwrap_or(CREATE_FAILURE_MESSAGE)
                .to_string();
            if current {
                state.status = RequestStatus::Failed(message.clone());
                self.banner.set(message.clone()).await;
            }
            return SubmitOutcome::Rejected(message);
        }

        info!(title = %request.title, "created book");
        if current {
            state.form = DraftForm::default();
            state.status = RequestStatus::Succeeded;
        }
        drop(state);
        self.catalog.refresh().await;
        SubmitOutcome::Created
    }
}

#[cfg(test)]
#[path = "tests/draft_tests.rs"]
mod tests;

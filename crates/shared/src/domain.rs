use serde::{Deserialize, Serialize};

/// Server-assigned book identifier. Opaque to the client; any JSON scalar is
/// accepted and kept in its text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBookId")]
pub struct BookId(pub String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBookId {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl From<RawBookId> for BookId {
    fn from(value: RawBookId) -> Self {
        match value {
            RawBookId::Text(text) => Self(text),
            RawBookId::Number(number) => Self(number.to_string()),
            RawBookId::Flag(flag) => Self(flag.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_summary_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Book {
    /// Tags in server order; absent and empty tag lists read the same.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::{Error, Result};

/// Title used for saved notes when the caller supplies none.
pub const UNTITLED_ARTICLE: &str = "Untitled Article";

/// Which study artifact to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Summary,
    Notes,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Summary, Mode::Notes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Summary => "summary",
            Mode::Notes => "notes",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "summary" => Ok(Mode::Summary),
            "notes" => Ok(Mode::Notes),
            _ => Err(Error::Validation("Type must be 'summary' or 'notes'".to_string())),
        }
    }
}

/// A validated absolute http(s) URL. Building one never touches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSource {
    url: Url,
}

impl ArticleSource {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::Validation("URL is required".to_string()));
        }

        let url = Url::parse(raw).map_err(|e| Error::Validation(format!("Invalid URL: {}", e)))?;
        match url.scheme() {
            "http" | "https" => Ok(Self { url }),
            other => Err(Error::Validation(format!(
                "Invalid URL: unsupported scheme '{}'",
                other
            ))),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ArticleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub mode: Mode,
    pub title: String,
    pub content: String,
}

impl GenerationRequest {
    pub fn new(mode: Mode, article: &ExtractedArticle) -> Self {
        Self {
            mode,
            title: article.title.clone(),
            content: article.content.clone(),
        }
    }
}

/// What the pipeline hands back to callers. Only requested modes are filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl GenerationResult {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            summary: None,
            notes: None,
        }
    }

    pub fn set(&mut self, mode: Mode, text: String) {
        match mode {
            Mode::Summary => self.summary = Some(text),
            Mode::Notes => self.notes = Some(text),
        }
    }

    pub fn get(&self, mode: Mode) -> Option<&str> {
        match mode {
            Mode::Summary => self.summary.as_deref(),
            Mode::Notes => self.notes.as_deref(),
        }
    }
}

/// Unvalidated save request as it arrives from a caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteDraft {
    pub article_url: Option<String>,
    pub article_title: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub note_type: Option<String>,
}

impl NoteDraft {
    pub fn validate(self) -> Result<NewNote> {
        let article_url = non_empty(self.article_url);
        let content = non_empty(self.content);
        let note_type = non_empty(self.note_type);

        let (Some(article_url), Some(content), Some(note_type)) = (article_url, content, note_type)
        else {
            return Err(Error::Validation("Missing required fields".to_string()));
        };

        Ok(NewNote {
            article_url,
            article_title: non_empty(self.article_title)
                .unwrap_or_else(|| UNTITLED_ARTICLE.to_string()),
            content,
            note_type: note_type.parse()?,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A note ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub article_url: String,
    pub article_title: String,
    pub content: String,
    pub note_type: Mode,
}

impl NewNote {
    /// Picks the content for `mode` out of a generation result.
    pub fn from_result(result: &GenerationResult, mode: Mode) -> Option<Self> {
        result.get(mode).map(|content| Self {
            article_url: result.url.clone(),
            article_title: result.title.clone(),
            content: content.to_string(),
            note_type: mode,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedNote {
    pub id: Uuid,
    pub owner_id: String,
    pub article_url: String,
    pub article_title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub note_type: Mode,
    pub created_at: DateTime<Utc>,
}

impl SavedNote {
    pub fn new(owner_id: &str, note: NewNote) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.to_string(),
            article_url: note.article_url,
            article_title: note.article_title,
            content: note.content,
            note_type: note.note_type,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> NoteSummary {
        NoteSummary {
            id: self.id,
            article_title: self.article_title.clone(),
            article_url: self.article_url.clone(),
            note_type: self.note_type,
            created_at: self.created_at,
        }
    }
}

/// Listing view of a saved note, without its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSummary {
    pub id: Uuid,
    pub article_title: String,
    pub article_url: String,
    #[serde(rename = "type")]
    pub note_type: Mode,
    pub created_at: DateTime<Utc>,
}

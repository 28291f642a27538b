//! Book model and related request/query types

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult, BookAction};

/// Book record as held on the shelf
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
    /// True when `readPage == pageCount`
    pub finished: bool,
    #[serde(serialize_with = "serialize_timestamp")]
    pub inserted_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Build a fresh record; both timestamps are set to `now`
    pub fn new(id: String, draft: BookDraft, now: DateTime<Utc>) -> Self {
        let finished = draft.is_finished();
        Self {
            id,
            name: draft.name,
            year: draft.year,
            author: draft.author,
            summary: draft.summary,
            publisher: draft.publisher,
            page_count: draft.page_count,
            read_page: draft.read_page,
            reading: draft.reading,
            finished,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field. `id` and `inserted_at` are kept.
    pub fn replace(&mut self, draft: BookDraft, now: DateTime<Utc>) {
        self.finished = draft.is_finished();
        self.name = draft.name;
        self.year = draft.year;
        self.author = draft.author;
        self.summary = draft.summary;
        self.publisher = draft.publisher;
        self.page_count = draft.page_count;
        self.read_page = draft.read_page;
        self.reading = draft.reading;
        self.updated_at = now;
    }
}

/// Timestamps go out as `2026-01-01T00:00:00.000Z`
fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Create / update request body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    /// Required, must not be empty
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    /// Absent or `null` reads as 0
    pub page_count: Option<u32>,
    /// Must not exceed `pageCount`; absent or `null` reads as 0
    pub read_page: Option<u32>,
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Check the payload for `action`: the name comes first, then the page range.
    pub fn validate(self, action: BookAction) -> AppResult<BookDraft> {
        let name = match self.name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(AppError::MissingName(action)),
        };

        let page_count = self.page_count.unwrap_or_default();
        let read_page = self.read_page.unwrap_or_default();
        if read_page > page_count {
            return Err(AppError::InvalidPageRange(action));
        }

        Ok(BookDraft {
            name,
            year: self.year,
            author: self.author,
            summary: self.summary,
            publisher: self.publisher,
            page_count,
            read_page,
            reading: self.reading.unwrap_or_default(),
        })
    }
}

/// A payload that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub name: String,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookDraft {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// Short book representation for lists
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Query parameters for listing books
#[derive(Debug, Default, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books being read, `0` for the others
    pub reading: Option<String>,
    /// `1` for finished books, `0` for the others
    pub finished: Option<String>,
}

impl BookQuery {
    /// Resolve the query into a single filter.
    ///
    /// Only one parameter applies: `name` wins over `reading`, which wins over
    /// `finished`. Empty values count as absent.
    pub fn filter(&self) -> BookFilter {
        if let Some(name) = non_empty(&self.name) {
            return BookFilter::Name(name.to_lowercase());
        }
        if let Some(reading) = non_empty(&self.reading) {
            return BookFilter::Reading(parse_flag(reading));
        }
        if let Some(finished) = non_empty(&self.finished) {
            return BookFilter::Finished(parse_flag(finished));
        }
        BookFilter::All
    }
}

/// Builds the query from raw key/value pairs. A repeated key keeps its first
/// value; unknown keys are ignored.
impl FromIterator<(String, String)> for BookQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = BookQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "name" => &mut query.name,
                "reading" => &mut query.reading,
                "finished" => &mut query.finished,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Read a `0`/`1` flag. Anything else yields `None`, which matches no book.
fn parse_flag(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    // blank reads as zero
    if raw.is_empty() {
        return Some(false);
    }
    match raw.parse::<f64>() {
        Ok(v) if v == 0.0 => Some(false),
        Ok(v) if v == 1.0 => Some(true),
        _ => None,
    }
}

/// Filter applied when listing books
#[derive(Debug, Clone, PartialEq)]
pub enum BookFilter {
    All,
    /// Lowercased needle
    Name(String),
    Reading(Option<bool>),
    Finished(Option<bool>),
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        match self {
            BookFilter::All => true,
            BookFilter::Name(needle) => book.name.to_lowercase().contains(needle.as_str()),
            BookFilter::Reading(flag) => *flag == Some(book.reading),
            BookFilter::Finished(flag) => *flag == Some(book.finished),
        }
    }
}

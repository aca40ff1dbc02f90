//! Typed client for the board API, plus the state and preferences a board
//! front end keeps between refreshes.

pub mod prefs;
pub mod state;

pub use prefs::{ClientPrefs, CollegeSelection, Student};
pub use state::AppState;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use reqwest::{Client, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::error::ErrorResponse;
use crate::handlers::claim::{ClaimRequest, ClaimResponse};
use crate::handlers::finder::{FinderDetailsResponse, MarkFoundRequest, MarkFoundResponse};
use crate::handlers::item::{CreateFoundItemRequest, CreateLostItemRequest, UpdateStatusRequest};
use crate::lifecycle::archive_candidates;
use crate::models::{BoardItem, FoundItem, ItemSnapshot, ItemType, LostItem};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed preferences: {0}")]
    Format(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Outcome of a bulk archive: every candidate is attempted, and failures
/// are collected rather than aborting the run.
#[derive(Debug, Default)]
pub struct ArchiveReport {
    pub attempted: usize,
    pub archived: Vec<String>,
    pub failures: Vec<(String, ClientError)>,
}

impl ArchiveReport {
    pub fn summary(&self) -> String {
        format!("{} of {} archived", self.archived.len(), self.attempted)
    }
}

#[derive(Clone)]
pub struct BoardClient {
    base_url: String,
    http: Client,
}

impl BoardClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    /// `{base}/api/{segments..}`. Each segment is percent-encoded, so
    /// college names and ids may contain `/`, `#` or spaces.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::Validation(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Validation(format!("base URL '{}' cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// All non-archived items, or one college's when `college` is given.
    pub async fn fetch_items(&self, college: Option<&str>) -> Result<ItemSnapshot, ClientError> {
        let url = match college {
            Some(c) => self.url(&["items", "college", c])?,
            None => self.url(&["items"])?,
        };
        let resp = self.http.get(url).send().await?;
        parse(resp).await
    }

    pub async fn report_lost(&self, req: &CreateLostItemRequest) -> Result<LostItem, ClientError> {
        self.post(&["items", "lost"], req).await
    }

    pub async fn post_found(&self, req: &CreateFoundItemRequest) -> Result<FoundItem, ClientError> {
        self.post(&["items", "found"], req).await
    }

    pub async fn update_status(
        &self,
        item_type: ItemType,
        id: &str,
        req: &UpdateStatusRequest,
    ) -> Result<BoardItem, ClientError> {
        let resp = self
            .http
            .put(self.url(&["items", item_type.as_str(), id])?)
            .json(req)
            .send()
            .await?;
        // The response is untagged; decode by the collection we asked for.
        Ok(match item_type {
            ItemType::Lost => BoardItem::Lost(parse(resp).await?),
            ItemType::Found => BoardItem::Found(parse(resp).await?),
        })
    }

    pub async fn mark_found(&self, req: &MarkFoundRequest) -> Result<MarkFoundResponse, ClientError> {
        self.post(&["finder-details"], req).await
    }

    pub async fn claim(&self, req: &ClaimRequest) -> Result<ClaimResponse, ClientError> {
        self.post(&["item-claim"], req).await
    }

    pub async fn finder_details(&self, item_id: &str) -> Result<FinderDetailsResponse, ClientError> {
        let resp = self
            .http
            .get(self.url(&["finder-details", item_id])?)
            .send()
            .await?;
        parse(resp).await
    }

    /// Archive every resolved item older than the archive window. Requests
    /// run concurrently; one failing does not stop the others.
    pub async fn archive_old_items(&self, items: &[BoardItem], now: DateTime<Utc>) -> ArchiveReport {
        let candidates = archive_candidates(items, now);
        let archive = UpdateStatusRequest {
            status: Some("archived".to_string()),
            finder_details: None,
        };

        let results = join_all(candidates.iter().map(|item| {
            let archive = &archive;
            async move {
                let id = item.id().to_string();
                let outcome = self.update_status(item.item_type(), &id, archive).await;
                (id, outcome)
            }
        }))
        .await;

        let mut report = ArchiveReport {
            attempted: candidates.len(),
            ..Default::default()
        };
        for (id, outcome) in results {
            match outcome {
                Ok(_) => report.archived.push(id),
                Err(e) => {
                    tracing::warn!(id = %id, "Failed to archive item: {}", e);
                    report.failures.push((id, e));
                }
            }
        }
        tracing::info!("{}", report.summary());
        report
    }

    async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.http.post(self.url(segments)?).json(body).send().await?;
        parse(resp).await
    }
}

async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.message)
        .unwrap_or(text);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

//! PokeAPI client

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::state::{LoadedPage, PageCursor, PokemonRecord};

const DETAIL_CONCURRENCY: usize = 16;

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("malformed payload from {url}: {reason}")]
    Malformed { url: String, reason: String },
    #[error("detail task failed: {0}")]
    Task(String),
}

/// Anything that can answer a GET with a JSON document
#[async_trait]
pub trait PokeSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// reqwest-backed source sharing one client per process
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self {
            client: http_client().clone(),
        }
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PokeSource for HttpSource {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Request {
                url: url.to_string(),
                reason: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|err| FetchError::Malformed {
                url: url.to_string(),
                reason: err.to_string(),
            })
    }
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

/// Process-wide source used by the effect handler
pub fn shared_source() -> Arc<dyn PokeSource> {
    static SOURCE: OnceLock<Arc<dyn PokeSource>> = OnceLock::new();
    SOURCE
        .get_or_init(|| Arc::new(HttpSource::new()))
        .clone()
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    count: Option<u32>,
    next: Option<String>,
    previous: Option<String>,
    results: Vec<ResourceLink>,
}

#[derive(Clone, Debug, Deserialize)]
struct ResourceLink {
    url: String,
}

/// Load a list page, then every detail record on it.
///
/// Details are requested concurrently and returned in list order. Any failed
/// detail fails the whole page and aborts the lookups still running.
pub async fn fetch_page(source: Arc<dyn PokeSource>, url: &str) -> Result<LoadedPage, FetchError> {
    let list: ListResponse = decode(source.get_json(url).await?, url)?;
    tracing::debug!(%url, items = list.results.len(), "list page loaded");
    let records = fetch_details(&source, &list.results).await?;
    Ok(LoadedPage {
        records,
        cursor: PageCursor {
            next: list.next,
            previous: list.previous,
        },
        total: list.count,
    })
}

async fn fetch_details(
    source: &Arc<dyn PokeSource>,
    links: &[ResourceLink],
) -> Result<Vec<PokemonRecord>, FetchError> {
    if links.is_empty() {
        return Ok(Vec::new());
    }

    let semaphore = Arc::new(Semaphore::new(DETAIL_CONCURRENCY));
    let mut join_set = JoinSet::new();
    for (index, link) in links.iter().enumerate() {
        let url = link.url.clone();
        let source = Arc::clone(source);
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| FetchError::Task("detail semaphore closed".to_string()))?;
            let record: PokemonRecord = decode(source.get_json(&url).await?, &url)?;
            Ok::<_, FetchError>((index, record))
        });
    }

    let mut slots: Vec<Option<PokemonRecord>> = vec![None; links.len()];
    while let Some(joined) = join_set.join_next().await {
        let (index, record) = joined.map_err(|err| FetchError::Task(err.to_string()))??;
        slots[index] = Some(record);
    }
    Ok(slots.into_iter().flatten().collect())
}

fn decode<T: DeserializeOwned>(value: Value, url: &str) -> Result<T, FetchError> {
    serde_json::from_value(value).map_err(|err| FetchError::Malformed {
        url: url.to_string(),
        reason: err.to_string(),
    })
}

//! Offset/limit pagination over workspace list endpoints.
//!
//! List endpoints answer `{"data": [...], "metadata": {"total_count": N}}`. Both keys
//! may be missing. Iteration stops on the first empty page no matter what the total
//! says, and only trusts `total_count` as a stop condition when it is positive.
//! A server that never sends an empty page is cut off after [`MAX_PAGES`] pages.

use crate::client::ApiClient;
use crate::error::V7Error;
use crate::normalize::{data_items, FromRecord};
use crate::transport::ApiRequest;
use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Page size used when materialising a whole collection.
pub const DEFAULT_PAGE_SIZE: usize = 100;
/// Page size for a single explicitly requested page.
pub const DEFAULT_PAGE_LIMIT: usize = 50;
/// Non-empty pages one iteration may consume before it fails.
pub const MAX_PAGES: usize = 10_000;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub offset: usize,
    pub limit: usize,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total_count
    }

    pub fn try_map<U, E, F>(self, f: F) -> Result<Page<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            total_count: self.total_count,
            offset: self.offset,
            limit: self.limit,
        })
    }
}

/// Body of a list response as the server sent it.
#[derive(Debug, Clone, PartialEq)]
struct RawPage {
    items: Vec<Value>,
    /// `None` when absent, non-integer or negative.
    total_count: Option<u64>,
}

impl RawPage {
    fn parse(response: &Value) -> Self {
        let total_count = response
            .get("metadata")
            .and_then(|meta| meta.get("total_count"))
            .and_then(Value::as_i64)
            .filter(|total| *total >= 0)
            .map(|total| total as u64);
        Self {
            items: data_items(response),
            total_count,
        }
    }
}

struct Cursor {
    paginator: Paginator,
    offset: usize,
    pages: usize,
    exhausted: bool,
}

/// Drives repeated page fetches against one list path.
///
/// Holds no cursor itself; each call owns its own offset, so a paginator can be
/// reused and cloned freely.
#[derive(Clone)]
pub struct Paginator {
    client: ApiClient,
    path: String,
    max_pages: usize,
}

impl Paginator {
    /// `path` is the full request path, workspace prefix included.
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            max_pages: MAX_PAGES,
        }
    }

    /// Override the [`MAX_PAGES`] cap. Zero is treated as one.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    async fn fetch_raw(&self, limit: usize, offset: usize) -> Result<RawPage, V7Error> {
        let request = ApiRequest::new(Method::GET, self.path.as_str())
            .with_query("limit", limit)
            .with_query("offset", offset);
        let response = self.client.send(request).await?;
        let page = RawPage::parse(&response);
        debug!(
            path = %self.path,
            offset,
            limit,
            returned = page.items.len(),
            total_count = ?page.total_count,
            "Fetched page"
        );
        Ok(page)
    }

    /// Lazily yield every record, in server order.
    ///
    /// A page size of zero is treated as one. A transport failure is yielded once
    /// and ends the stream; records already yielded stay valid. A non-empty page
    /// beyond the page cap is not yielded; the stream ends with a transport error.
    pub fn iterate(
        &self,
        page_size: usize,
    ) -> impl Stream<Item = Result<Value, V7Error>> + Send + 'static {
        let page_size = page_size.max(1);
        let start = Cursor {
            paginator: self.clone(),
            offset: 0,
            pages: 0,
            exhausted: false,
        };

        stream::try_unfold(start, move |mut cursor| async move {
            if cursor.exhausted {
                return Ok(None);
            }
            let page = cursor.paginator.fetch_raw(page_size, cursor.offset).await?;
            let returned = page.items.len();
            if returned == 0 {
                return Ok(None);
            }
            cursor.pages += 1;
            if cursor.pages > cursor.paginator.max_pages {
                warn!(
                    path = %cursor.paginator.path,
                    offset = cursor.offset,
                    max_pages = cursor.paginator.max_pages,
                    "Server never returned an empty page, giving up"
                );
                return Err(V7Error::Transport(format!(
                    "Pagination of {} exceeded {} pages without reaching the end",
                    cursor.paginator.path, cursor.paginator.max_pages
                )));
            }
            cursor.offset += returned;
            cursor.exhausted = matches!(
                page.total_count,
                Some(total) if total > 0 && cursor.offset as u64 >= total
            );
            Ok::<_, V7Error>(Some((page.items, cursor)))
        })
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<Value, V7Error>)))
        .try_flatten()
    }

    /// [`Paginator::iterate`], decoding each record.
    pub fn iterate_as<T>(
        &self,
        page_size: usize,
    ) -> impl Stream<Item = Result<T, V7Error>> + Send + 'static
    where
        T: FromRecord + Send + 'static,
    {
        self.iterate(page_size)
            .map(|record| record.and_then(T::from_record))
    }

    /// Materialise every record.
    pub async fn collect_all(&self, page_size: usize) -> Result<Vec<Value>, V7Error> {
        self.iterate(page_size).try_collect().await
    }

    pub async fn collect_all_as<T>(&self, page_size: usize) -> Result<Vec<T>, V7Error>
    where
        T: FromRecord + Send + 'static,
    {
        self.iterate_as(page_size).try_collect().await
    }

    /// Fetch exactly one page. `total_count` falls back to the page length when the
    /// server omits it.
    pub async fn fetch_page(&self, limit: usize, offset: usize) -> Result<Page<Value>, V7Error> {
        let raw = self.fetch_raw(limit, offset).await?;
        let total_count = raw
            .total_count
            .map(|total| total as usize)
            .unwrap_or(raw.items.len());
        Ok(Page {
            items: raw.items,
            total_count,
            offset,
            limit,
        })
    }

    pub async fn fetch_page_as<T: FromRecord>(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Page<T>, V7Error> {
        self.fetch_page(limit, offset).await?.try_map(T::from_record)
    }
}

//! Deferred data composition and streamed HTML responses.
//!
//! A route awaits its critical fetch, then wraps each secondary fetch in a
//! [`Deferred`]. Every template slot bound to a deferred value is rendered
//! twice: once in its pending state inside the first chunk of the response,
//! and once more when the fetch settles, streamed as a `<template>` that the
//! layout's `swapDeferred` script moves into place.
//!
//! ```text
//! chunk 0:  <html>...critical content...<div id="cart-main"><p>Loading cart ...</p></div>
//! chunk 1:  <template id="cart-main-resolved">...</template><script>swapDeferred("cart-main")</script>
//! chunk n:  </body></html>
//! ```

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures::future::{BoxFuture, FutureExt, Shared};
use futures::stream::{self, FuturesUnordered, StreamExt};
use prier_core::DeferredState;
use tokio::task::{JoinError, JoinHandle};
use tracing::Instrument;

/// A secondary fetch settled with an error.
///
/// The cause is logged when the fetch settles; templates only need to know
/// that it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchFailed;

impl fmt::Display for FetchFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("deferred fetch failed")
    }
}

/// Aborts the spawned fetch when the response that owns it is dropped.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Future for AbortOnDrop<T> {
    type Output = Result<T, JoinError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx)
    }
}

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

type SharedFetch<T> = Shared<BoxFuture<'static, Result<Arc<T>, FetchFailed>>>;

/// A secondary fetch running in the background.
///
/// Cloning is cheap and every clone observes the same fetch, so one cart
/// request can feed both the header badge and the cart aside.
pub struct Deferred<T> {
    fetch: SharedFetch<T>,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            fetch: self.fetch.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> Deferred<T> {
    /// Start `fetch` on its own task.
    ///
    /// Errors are logged under `name` and settle the value as failed.
    pub fn spawn<F, E>(name: &'static str, fetch: F) -> Self
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: fmt::Display + Send + 'static,
    {
        let task = AbortOnDrop(tokio::spawn(fetch.in_current_span()));

        let fetch = async move {
            match task.await {
                Ok(Ok(value)) => Ok(Arc::new(value)),
                Ok(Err(error)) => {
                    tracing::warn!(fetch = name, error = %error, "Deferred fetch failed");
                    Err(FetchFailed)
                }
                Err(error) => {
                    tracing::warn!(fetch = name, error = %error, "Deferred fetch task did not finish");
                    Err(FetchFailed)
                }
            }
        };

        Self::from_future(fetch)
    }

    /// A value that is already available.
    #[must_use]
    pub fn ready(value: T) -> Self {
        Self::from_future(futures::future::ready(Ok(Arc::new(value))))
    }

    /// A value that never settles.
    #[must_use]
    pub fn never() -> Self {
        Self::from_future(futures::future::pending())
    }

    fn from_future(
        fetch: impl Future<Output = Result<Arc<T>, FetchFailed>> + Send + 'static,
    ) -> Self {
        Self {
            fetch: fetch.boxed().shared(),
        }
    }

    /// Wait for the fetch to settle.
    pub async fn settled(&self) -> Result<Arc<T>, FetchFailed> {
        self.fetch.clone().await
    }
}

/// Placeholder for one deferred region, written into the page template.
///
/// Displays as the wrapper element holding the pending fallback.
#[derive(Debug, Clone)]
pub struct Slot {
    id: String,
    fallback: String,
}

impl Slot {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, r#"<div id="{}">{}</div>"#, self.id, self.fallback)
    }
}

/// Builder for a streamed page: the document plus one pending chunk per slot.
#[derive(Default)]
pub struct StreamedPage {
    pending: Vec<BoxFuture<'static, String>>,
}

impl StreamedPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a slot to a deferred value.
    ///
    /// `render` is called with `Pending` right away and again with the
    /// settled state once the fetch finishes.
    pub fn slot<T, R>(&mut self, id: impl Into<String>, deferred: &Deferred<T>, render: R) -> Slot
    where
        T: Send + Sync + 'static,
        R: Fn(DeferredState<&T, &FetchFailed>) -> askama::Result<String> + Send + 'static,
    {
        let id = id.into();
        let fallback = render_logged(&id, render(DeferredState::Pending));

        let deferred = deferred.clone();
        let chunk_id = id.clone();
        self.pending.push(
            async move {
                let settled = deferred.settled().await;
                let state = match &settled {
                    Ok(value) => DeferredState::Resolved(value.as_ref()),
                    Err(error) => DeferredState::Failed(error),
                };
                let html = render_logged(&chunk_id, render(state));
                format!(
                    r#"<template id="{chunk_id}-resolved">{html}</template><script>swapDeferred("{chunk_id}")</script>"#
                )
            }
            .boxed(),
        );

        Slot { id, fallback }
    }

    /// Stream `document` with a 200 status.
    pub fn into_response(self, document: String) -> Response {
        self.into_response_with_status(StatusCode::OK, document)
    }

    /// Stream `document`, then each settled slot, then the closing tags.
    ///
    /// The document is split before its last `</body>` so resolved slots
    /// land inside the body.
    pub fn into_response_with_status(self, status: StatusCode, document: String) -> Response {
        let (head, tail) = split_document(document);
        let settled: FuturesUnordered<_> = self.pending.into_iter().collect();

        let body = stream::once(futures::future::ready(head))
            .chain(settled)
            .chain(stream::once(futures::future::ready(tail)))
            .map(Ok::<_, Infallible>);

        (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            Body::from_stream(body),
        )
            .into_response()
    }
}

fn split_document(mut document: String) -> (String, String) {
    match document.rfind("</body>") {
        Some(index) => {
            let tail = document.split_off(index);
            (document, tail)
        }
        None => (document, String::new()),
    }
}

fn render_logged(id: &str, rendered: askama::Result<String>) -> String {
    rendered.unwrap_or_else(|error| {
        tracing::error!(slot = id, error = %error, "Failed to render deferred slot");
        String::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn render_count(state: DeferredState<&u32, &FetchFailed>) -> askama::Result<String> {
        Ok(match state {
            DeferredState::Pending => "Loading...".to_string(),
            DeferredState::Resolved(count) => format!("count={count}"),
            DeferredState::Failed(_) => "Failed".to_string(),
        })
    }

    async fn chunks(response: Response) -> Vec<String> {
        response
            .into_body()
            .into_data_stream()
            .map(|chunk| String::from_utf8(chunk.unwrap().to_vec()).unwrap())
            .collect()
            .await
    }

    #[test]
    fn test_split_document() {
        let (head, tail) = split_document("<body><p>x</p></body></html>".to_string());
        assert_eq!(head, "<body><p>x</p>");
        assert_eq!(tail, "</body></html>");

        let (head, tail) = split_document("fragment".to_string());
        assert_eq!(head, "fragment");
        assert!(tail.is_empty());
    }

    #[test]
    fn test_slot_display_wraps_fallback() {
        let slot = Slot {
            id: "cart-badge".to_string(),
            fallback: "Cart 0".to_string(),
        };
        assert_eq!(slot.to_string(), r#"<div id="cart-badge">Cart 0</div>"#);
    }

    #[tokio::test]
    async fn test_first_chunk_does_not_wait_for_secondary() {
        let mut page = StreamedPage::new();
        let slot = page.slot("recommended", &Deferred::<u32>::never(), render_count);
        let document = format!("<body><h1>Critical</h1>{slot}</body>");

        let response = page.into_response(document);
        assert_eq!(response.status(), StatusCode::OK);

        let mut body = response.into_body().into_data_stream();
        let first = tokio::time::timeout(Duration::from_millis(200), body.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        let first = String::from_utf8(first.to_vec()).unwrap();

        assert!(first.contains("<h1>Critical</h1>"));
        assert!(first.contains(r#"<div id="recommended">Loading...</div>"#));
        assert!(!first.contains("Failed"));

        // The secondary never settles, so nothing else arrives.
        let next = tokio::time::timeout(Duration::from_millis(50), body.next()).await;
        assert!(next.is_err());
    }

    #[tokio::test]
    async fn test_resolved_chunk_streams_before_tail() {
        let mut page = StreamedPage::new();
        let slot = page.slot("count", &Deferred::ready(7_u32), render_count);
        let response = page.into_response(format!("<body>{slot}</body></html>"));

        let chunks = chunks(response).await;
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], r#"<body><div id="count">Loading...</div>"#);
        assert_eq!(
            chunks[1],
            r#"<template id="count-resolved">count=7</template><script>swapDeferred("count")</script>"#
        );
        assert_eq!(chunks[2], "</body></html>");
    }

    #[tokio::test]
    async fn test_failed_fetch_renders_failed_state() {
        let deferred = Deferred::<u32>::spawn("test", async { Err::<u32, _>("boom") });
        assert_eq!(deferred.settled().await.unwrap_err(), FetchFailed);

        let mut page = StreamedPage::new();
        let slot = page.slot("count", &deferred, render_count);
        let chunks = chunks(page.into_response(format!("<body>{slot}</body>"))).await;
        assert!(chunks[1].contains(">Failed</template>"));
    }

    #[tokio::test]
    async fn test_clones_share_one_fetch() {
        let calls = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let deferred = Deferred::spawn("test", async move {
            counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok::<_, FetchFailed>(3_u32)
        });

        let other = deferred.clone();
        assert_eq!(*deferred.settled().await.unwrap(), 3);
        assert_eq!(*other.settled().await.unwrap(), 3);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pending_state_before_settle() {
        let deferred = Deferred::<u32>::never();
        let waited = tokio::time::timeout(Duration::from_millis(20), deferred.settled()).await;
        assert!(waited.is_err());
    }
}

//! HTTP delivery of order changes, partial-update style.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

use super::{HttpMethod, NotifyOutcome, OrderChange, OrderNotifier};
use crate::error::NotifyError;

/// Status and body of a delivered request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Sends an [`OrderChange`] over the wire.
#[async_trait]
pub trait OrderTransport: Send + Sync {
    async fn send(&self, change: &OrderChange) -> Result<TransportResponse, NotifyError>;
}

/// [`OrderTransport`] backed by a reqwest client.
///
/// Relative callback URLs are resolved against `base_url`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, NotifyError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(base_url)?,
            timeout: None,
        })
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn resolve(&self, url: &str) -> Result<Url, NotifyError> {
        Ok(self.base_url.join(url)?)
    }
}

#[async_trait]
impl OrderTransport for ReqwestTransport {
    async fn send(&self, change: &OrderChange) -> Result<TransportResponse, NotifyError> {
        let url = self.resolve(&change.url)?;
        let method = match change.method {
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
        };

        let mut request = self
            .client
            .request(method, url)
            .header("HX-Request", "true")
            .header("HX-Target", change.target.as_str())
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(change.payload.clone());

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| match self.timeout {
            Some(timeout) if e.is_timeout() => NotifyError::Timeout(timeout),
            _ => NotifyError::from(e),
        })?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// Deliver one change and classify the result.
pub async fn deliver<T: OrderTransport + ?Sized>(transport: &T, change: OrderChange) -> NotifyOutcome {
    match transport.send(&change).await {
        Ok(response) if (200..300).contains(&response.status) => NotifyOutcome::Applied {
            change,
            fragment: response.body,
        },
        Ok(response) if response.status == 409 || response.status == 412 => {
            log::warn!(
                "[notify] {} {} rejected as conflicting ({})",
                change.method.as_str(),
                change.url,
                response.status
            );
            NotifyOutcome::Conflict {
                change,
                message: "The record was modified by another user. Please reload the page."
                    .to_string(),
            }
        }
        Ok(response) => {
            log::warn!(
                "[notify] {} {} failed with HTTP {}",
                change.method.as_str(),
                change.url,
                response.status
            );
            NotifyOutcome::Failed {
                change,
                error: format!("HTTP {}", response.status),
            }
        }
        Err(e) => {
            log::warn!("[notify] {} {} failed: {e}", change.method.as_str(), change.url);
            NotifyOutcome::Failed {
                change,
                error: e.to_string(),
            }
        }
    }
}

/// [`OrderNotifier`] that delivers each change on a tokio task and reports
/// the outcome on a channel. Nothing is retried.
pub struct HttpNotifier<T: OrderTransport = ReqwestTransport> {
    transport: Arc<T>,
    runtime: Handle,
    outcomes: UnboundedSender<NotifyOutcome>,
}

impl<T: OrderTransport + 'static> HttpNotifier<T> {
    pub fn new(transport: T, runtime: Handle, outcomes: UnboundedSender<NotifyOutcome>) -> Self {
        Self {
            transport: Arc::new(transport),
            runtime,
            outcomes,
        }
    }
}

impl<T: OrderTransport + 'static> OrderNotifier for HttpNotifier<T> {
    fn notify(&self, change: OrderChange) {
        let transport = Arc::clone(&self.transport);
        let outcomes = self.outcomes.clone();
        log::debug!("[notify] {} {}", change.method.as_str(), change.url);
        self.runtime.spawn(async move {
            let outcome = deliver(transport.as_ref(), change).await;
            if outcomes.send(outcome).is_err() {
                log::debug!("[notify] outcome receiver dropped");
            }
        });
    }
}

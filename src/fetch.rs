//! HTTP fetch adapter.
//!
//! [`Fetcher`] is the seam between the search session and the network. The
//! session never awaits a fetch directly: it goes through [`spawn_fetch`],
//! which runs the request on its own task and reports exactly one
//! [`FetchOutcome`], or [`FetchOutcome::Cancelled`] once the returned handle
//! has been cancelled.

use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
   config::Config,
   error::{Result, StoreSearchError},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
   pub status: u16,
   pub body:   Bytes,
}

impl FetchResponse {
   pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
      Self { status, body: body.into() }
   }

   pub const fn is_ok(&self) -> bool {
      self.status == 200
   }

   /// Turns any status other than 200 into [`StoreSearchError::Status`].
   pub fn error_for_status(self) -> Result<Self> {
      if self.is_ok() {
         Ok(self)
      } else {
         Err(StoreSearchError::Status(self.status))
      }
   }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
   /// Issues a GET for `url`. Any HTTP status is a successful fetch; only
   /// transport failures are errors.
   async fn fetch(&self, url: &Url) -> Result<FetchResponse>;
}

#[derive(Debug)]
pub enum FetchOutcome {
   Completed(FetchResponse),
   Failed(StoreSearchError),
   Cancelled,
}

/// Handle to a fetch running on a background task.
#[derive(Debug)]
pub struct FetchHandle {
   token: CancellationToken,
}

impl FetchHandle {
   /// Requests cancellation. If the fetch has not completed yet, the
   /// completion fires with [`FetchOutcome::Cancelled`].
   pub fn cancel(&self) {
      self.token.cancel();
   }

   pub fn is_cancelled(&self) -> bool {
      self.token.is_cancelled()
   }
}

/// Runs `fetcher.fetch(url)` on a new task and hands the outcome to
/// `on_complete` exactly once. Must be called from within a tokio runtime.
pub fn spawn_fetch<F>(fetcher: Arc<dyn Fetcher>, url: Url, on_complete: F) -> FetchHandle
where
   F: FnOnce(FetchOutcome) + Send + 'static,
{
   let token = CancellationToken::new();
   let child = token.clone();

   tokio::spawn(async move {
      let outcome = tokio::select! {
         biased;
         () = child.cancelled() => FetchOutcome::Cancelled,
         result = fetcher.fetch(&url) => match result {
            Ok(response) => FetchOutcome::Completed(response),
            Err(e) => FetchOutcome::Failed(e),
         },
      };

      on_complete(outcome);
   });

   FetchHandle { token }
}

/// [`Fetcher`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
   client: reqwest::Client,
}

impl HttpFetcher {
   pub fn new(config: &Config) -> Result<Self> {
      let client = reqwest::Client::builder()
         .timeout(Duration::from_secs(config.timeout_secs))
         .user_agent(config.user_agent.as_str())
         .build()
         .map_err(|e| StoreSearchError::Http(format!("failed to build client: {e}")))?;

      Ok(Self { client })
   }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
   async fn fetch(&self, url: &Url) -> Result<FetchResponse> {
      tracing::debug!(%url, "fetching");

      let response = self
         .client
         .get(url.clone())
         .send()
         .await
         .map_err(|e| StoreSearchError::Http(format!("request to {url} failed: {e}")))?;

      let status = response.status().as_u16();
      let body = response
         .bytes()
         .await
         .map_err(|e| StoreSearchError::Http(format!("failed to read response: {e}")))?;

      tracing::debug!(%url, status, bytes = body.len(), "fetched");

      Ok(FetchResponse { status, body })
   }
}

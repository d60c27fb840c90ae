use std::sync::Arc;

use anyhow::{Result, bail};

use crate::{
   config,
   fetch::HttpFetcher,
   format::{self, NETWORK_ERROR, RenderOptions},
   search::SearchSession,
   types::Category,
};

pub async fn execute(
   query: String,
   category: Option<Category>,
   json: bool,
   plain: bool,
   urls: bool,
) -> Result<()> {
   let cfg = config::get();
   let category = category.unwrap_or(cfg.default_category);

   let fetcher = Arc::new(HttpFetcher::new(cfg)?);
   let session = SearchSession::new(fetcher, cfg.base_url()?);

   print!("{}", run(&session, &query, category, json, RenderOptions { plain, urls }).await?);
   Ok(())
}

/// Runs one search on `session` and renders the final state. A failed search
/// is returned as an error carrying the user-facing network message.
async fn run(
   session: &SearchSession,
   query: &str,
   category: Category,
   json: bool,
   opts: RenderOptions,
) -> Result<String> {
   let Some(success) = session.search(query, category).await else {
      bail!("search text must not be empty");
   };

   if !success {
      bail!(NETWORK_ERROR);
   }

   let state = session.state();
   if json {
      Ok(format!("{}\n", format::render_json(&state)?))
   } else {
      Ok(format::render_state(&state, opts))
   }
}

#[cfg(test)]
mod tests {
   use url::Url;

   use super::*;
   use crate::fetch::{FetchResponse, Fetcher};

   struct FixedFetcher(u16, &'static str);

   #[async_trait::async_trait]
   impl Fetcher for FixedFetcher {
      async fn fetch(&self, _url: &Url) -> crate::Result<FetchResponse> {
         Ok(FetchResponse::new(self.0, self.1))
      }
   }

   fn session(status: u16, body: &'static str) -> SearchSession {
      SearchSession::new(Arc::new(FixedFetcher(status, body)), Url::parse("http://localhost").unwrap())
   }

   const OPTS: RenderOptions = RenderOptions { plain: true, urls: false };

   #[tokio::test]
   async fn test_failed_search_returns_network_error() {
      let err = run(&session(503, ""), "abba", Category::Music, false, OPTS)
         .await
         .unwrap_err();
      assert_eq!(err.to_string(), NETWORK_ERROR);
   }

   #[tokio::test]
   async fn test_blank_query_is_rejected() {
      let err = run(&session(200, "{}"), "  ", Category::All, false, OPTS).await.unwrap_err();
      assert!(err.to_string().contains("must not be empty"));
   }

   #[tokio::test]
   async fn test_successful_search_renders_state() {
      let out = run(&session(200, r#"{"results": []}"#), "abba", Category::Music, false, OPTS)
         .await
         .unwrap();
      assert!(out.contains(format::NOTHING_FOUND));

      let json = run(&session(200, r#"{"results": []}"#), "abba", Category::Music, true, OPTS)
         .await
         .unwrap();
      assert!(json.ends_with('\n'));
   }
}

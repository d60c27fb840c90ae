//! Query URL construction for the catalog `search` endpoint.

use url::Url;

use crate::{Result, types::Category};

/// Result count ceiling sent with every request.
pub const RESULT_LIMIT: u32 = 200;

pub const DEFAULT_BASE_URL: &str = "https://itunes.apple.com";

/// Builds `{base}/search?term=..&limit=200&entity=..` for a search.
///
/// `text` is percent-encoded for a query component: everything outside the
/// unreserved set is escaped, so `&`, `=`, `+` and spaces cannot leak into
/// the other parameters.
pub fn build_url(base: &Url, text: &str, category: Category) -> Result<Url> {
   let raw = format!(
      "{}/search?term={}&limit={}&entity={}",
      base.as_str().trim_end_matches('/'),
      urlencoding::encode(text),
      RESULT_LIMIT,
      category.entity()
   );

   Ok(Url::parse(&raw)?)
}

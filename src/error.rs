use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreSearchError {
   #[error("http error: {0}")]
   Http(String),

   #[error("unexpected http status: {0}")]
   Status(u16),

   #[error("invalid url: {0}")]
   Url(#[from] url::ParseError),

   #[error("config error: {0}")]
   Config(String),
}

/// Failures raised while turning a catalog payload into result records.
///
/// Neither variant escapes the parser: a malformed payload degrades to an
/// empty result list and a record with a missing field is skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
   #[error("malformed payload: {0}")]
   MalformedPayload(String),

   #[error("required field missing: {0}")]
   RequiredFieldMissing(&'static str),
}

pub type Result<T, E = StoreSearchError> = std::result::Result<T, E>;

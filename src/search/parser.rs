//! Catalog response parsing.
//!
//! The catalog returns one `results` array mixing several record shapes.
//! Each element is routed through a small dispatch table keyed on its
//! `wrapperType` (or on `kind` for e-books, which carry no wrapper type) and
//! normalized into a [`SearchResult`].

use serde_json::{Map, Value};

use crate::{error::ParseError, types::SearchResult};

pub type Record = Map<String, Value>;
pub type RecordParser = fn(&Record) -> Result<SearchResult, ParseError>;

pub static WRAPPER_PARSERS: &[(&str, RecordParser)] = &[
   ("track", parse_track),
   ("audiobook", parse_audiobook),
   ("software", parse_software),
];

/// Parses a raw catalog payload into result records in payload order.
///
/// A payload that is not JSON or has no `results` array yields an empty list.
/// Records that are unrecognized or miss a required field are skipped.
pub fn parse(payload: &[u8]) -> Vec<SearchResult> {
   match try_parse(payload) {
      Ok(results) => results,
      Err(e) => {
         tracing::warn!("{e}");
         Vec::new()
      },
   }
}

/// Same as [`parse`] but reports a malformed payload instead of degrading.
pub fn try_parse(payload: &[u8]) -> Result<Vec<SearchResult>, ParseError> {
   let value: Value = serde_json::from_slice(payload)
      .map_err(|e| ParseError::MalformedPayload(format!("invalid json: {e}")))?;

   let records = value
      .get("results")
      .and_then(Value::as_array)
      .ok_or_else(|| ParseError::MalformedPayload("expected 'results' array".to_string()))?;

   let mut results = Vec::with_capacity(records.len());
   for (index, record) in records.iter().enumerate() {
      let Some(record) = record.as_object() else {
         tracing::debug!(index, "skipping non-object record");
         continue;
      };

      match parse_record(record) {
         Some(Ok(result)) => results.push(result),
         Some(Err(e)) => tracing::debug!(index, "skipping record: {e}"),
         None => tracing::trace!(index, "skipping unrecognized record"),
      }
   }

   Ok(results)
}

/// Parses one record. `None` means the record shape is not one we handle.
pub fn parse_record(record: &Record) -> Option<Result<SearchResult, ParseError>> {
   if let Some(wrapper_type) = record.get("wrapperType").and_then(Value::as_str) {
      return record_parser(wrapper_type).map(|parser| parser(record));
   }

   if record.get("kind").and_then(Value::as_str) == Some("ebook") {
      return Some(parse_ebook(record));
   }

   None
}

pub fn record_parser(wrapper_type: &str) -> Option<RecordParser> {
   WRAPPER_PARSERS
      .iter()
      .find(|(w, _)| *w == wrapper_type)
      .map(|(_, parser)| *parser)
}

fn parse_track(record: &Record) -> Result<SearchResult, ParseError> {
   Ok(SearchResult {
      name: required(record, "trackName")?,
      store_url: required(record, "trackViewUrl")?,
      kind: required(record, "kind")?,
      price: price(record, "trackPrice"),
      genre: optional(record, "primaryGenreName"),
      ..common(record)?
   })
}

fn parse_audiobook(record: &Record) -> Result<SearchResult, ParseError> {
   Ok(SearchResult {
      name: required(record, "collectionName")?,
      store_url: required(record, "collectionViewUrl")?,
      kind: "audiobook".to_string(),
      price: price(record, "collectionPrice"),
      genre: optional(record, "primaryGenreName"),
      ..common(record)?
   })
}

fn parse_software(record: &Record) -> Result<SearchResult, ParseError> {
   Ok(SearchResult {
      name: required(record, "trackName")?,
      store_url: required(record, "trackViewUrl")?,
      kind: required(record, "kind")?,
      price: price(record, "price"),
      genre: optional(record, "primaryGenreName"),
      ..common(record)?
   })
}

fn parse_ebook(record: &Record) -> Result<SearchResult, ParseError> {
   let genre = record
      .get("genres")
      .and_then(Value::as_array)
      .map(|genres| {
         genres
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", ")
      })
      .unwrap_or_default();

   Ok(SearchResult {
      name: required(record, "trackName")?,
      store_url: required(record, "trackViewUrl")?,
      kind: required(record, "kind")?,
      price: price(record, "price"),
      genre,
      ..common(record)?
   })
}

/// Fields every record shape shares. Shape specific fields are filled in by
/// the caller.
fn common(record: &Record) -> Result<SearchResult, ParseError> {
   Ok(SearchResult {
      name:            String::new(),
      artist_name:     required(record, "artistName")?,
      artwork_url_60:  required(record, "artworkUrl60")?,
      artwork_url_100: required(record, "artworkUrl100")?,
      store_url:       String::new(),
      kind:            String::new(),
      currency:        required(record, "currency")?,
      price:           0.0,
      genre:           String::new(),
   })
}

fn required(record: &Record, field: &'static str) -> Result<String, ParseError> {
   record
      .get(field)
      .and_then(Value::as_str)
      .map(str::to_string)
      .ok_or(ParseError::RequiredFieldMissing(field))
}

fn optional(record: &Record, field: &str) -> String {
   record
      .get(field)
      .and_then(Value::as_str)
      .map(str::to_string)
      .unwrap_or_default()
}

fn price(record: &Record, field: &str) -> f64 {
   record.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
   use serde_json::json;

   use super::*;

   fn object(value: Value) -> Record {
      value.as_object().cloned().unwrap()
   }

   fn track() -> Value {
      json!({
         "wrapperType": "track",
         "kind": "song",
         "trackName": "Dancing Queen",
         "artistName": "ABBA",
         "artworkUrl60": "https://example.com/60.jpg",
         "artworkUrl100": "https://example.com/100.jpg",
         "trackViewUrl": "https://example.com/track",
         "currency": "USD",
         "trackPrice": 1.29,
         "primaryGenreName": "Pop"
      })
   }

   #[test]
   fn test_parse_track() {
      let result = parse_record(&object(track())).unwrap().unwrap();
      assert_eq!(result.name, "Dancing Queen");
      assert_eq!(result.kind, "song");
      assert_eq!(result.price, 1.29);
      assert_eq!(result.genre, "Pop");
      assert_eq!(result.store_url, "https://example.com/track");
   }

   #[test]
   fn test_missing_required_field() {
      let mut record = object(track());
      record.remove("artworkUrl100");
      assert_eq!(
         parse_record(&record),
         Some(Err(ParseError::RequiredFieldMissing("artworkUrl100")))
      );
   }

   #[test]
   fn test_wrong_type_counts_as_missing() {
      let mut record = object(track());
      record.insert("trackName".to_string(), json!(42));
      assert_eq!(parse_record(&record), Some(Err(ParseError::RequiredFieldMissing("trackName"))));
   }

   #[test]
   fn test_optional_fields_default() {
      let mut record = object(track());
      record.remove("trackPrice");
      record.remove("primaryGenreName");
      let result = parse_record(&record).unwrap().unwrap();
      assert_eq!(result.price, 0.0);
      assert!(result.genre.is_empty());
   }

   #[test]
   fn test_integer_price() {
      let mut record = object(track());
      record.insert("trackPrice".to_string(), json!(2));
      assert_eq!(parse_record(&record).unwrap().unwrap().price, 2.0);
   }

   #[test]
   fn test_unrecognized_shapes() {
      let mut record = object(track());
      record.insert("wrapperType".to_string(), json!("collection"));
      assert!(parse_record(&record).is_none());

      let mut record = object(track());
      record.remove("wrapperType");
      assert!(parse_record(&record).is_none());
   }

   #[test]
   fn test_ebook_requires_kind_match_without_wrapper() {
      let mut record = object(track());
      record.remove("wrapperType");
      record.insert("kind".to_string(), json!("ebook"));
      record.insert("genres".to_string(), json!(["Fiction", "Mystery"]));
      let result = parse_record(&record).unwrap().unwrap();
      assert_eq!(result.kind, "ebook");
      assert_eq!(result.genre, "Fiction, Mystery");
   }

   #[test]
   fn test_malformed_payloads() {
      assert!(matches!(try_parse(b"not json"), Err(ParseError::MalformedPayload(_))));
      assert!(matches!(try_parse(b"{}"), Err(ParseError::MalformedPayload(_))));
      assert!(matches!(try_parse(br#"{"results": 3}"#), Err(ParseError::MalformedPayload(_))));
      assert!(parse(b"{}").is_empty());
      assert!(parse(b"").is_empty());
   }

   #[test]
   fn test_non_object_elements_are_skipped() {
      let payload = json!({ "resultCount": 3, "results": [1, "two", track()] });
      let results = parse(payload.to_string().as_bytes());
      assert_eq!(results.len(), 1);
   }

   #[test]
   fn test_dispatch_table() {
      assert!(record_parser("track").is_some());
      assert!(record_parser("audiobook").is_some());
      assert!(record_parser("software").is_some());
      assert!(record_parser("artist").is_none());
   }
}

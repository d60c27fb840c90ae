use std::fmt;

use serde::{Deserialize, Serialize};

/// Catalog filter applied to a search, one per store section.
#[derive(
   Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
   #[default]
   All,
   Music,
   Software,
   #[value(name = "ebooks")]
   EBooks,
}

impl Category {
   pub const ALL: [Self; 4] = [Self::All, Self::Music, Self::Software, Self::EBooks];

   /// Entity type token understood by the catalog `search` endpoint.
   pub const fn entity(self) -> &'static str {
      match self {
         Self::All => "",
         Self::Music => "musicTrack",
         Self::Software => "software",
         Self::EBooks => "ebook",
      }
   }

   pub const fn label(self) -> &'static str {
      match self {
         Self::All => "All",
         Self::Music => "Music",
         Self::Software => "Software",
         Self::EBooks => "E-Books",
      }
   }
}

impl fmt::Display for Category {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.label())
   }
}

pub static KIND_LABELS: &[(&str, &str)] = &[
   ("album", "Album"),
   ("audiobook", "Audio Book"),
   ("book", "Book"),
   ("ebook", "E-Book"),
   ("feature-movie", "Movie"),
   ("music-video", "Music Video"),
   ("podcast", "Podcast"),
   ("software", "App"),
   ("song", "Song"),
   ("tv-episode", "TV Episode"),
];

static CURRENCY_SYMBOLS: &[(&str, &str)] = &[
   ("USD", "$"),
   ("CAD", "CA$"),
   ("AUD", "A$"),
   ("NZD", "NZ$"),
   ("EUR", "€"),
   ("GBP", "£"),
   ("JPY", "¥"),
   ("CNY", "CN¥"),
   ("INR", "₹"),
   ("KRW", "₩"),
];

static ZERO_DECIMAL_CURRENCIES: &[&str] = &["JPY", "KRW", "CLP", "VND", "HUF", "TWD"];

pub const UNKNOWN_ARTIST: &str = "Unknown";

/// One normalized catalog entry.
///
/// Built by the response parser from a single raw record and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
   pub name:            String,
   pub artist_name:     String,
   pub artwork_url_60:  String,
   pub artwork_url_100: String,
   pub store_url:       String,
   pub kind:            String,
   pub currency:        String,
   pub price:           f64,
   pub genre:           String,
}

impl SearchResult {
   /// Human readable label for the record kind. Kinds outside the known
   /// vocabulary are returned as-is.
   pub fn kind_for_display(&self) -> &str {
      KIND_LABELS
         .iter()
         .find(|(kind, _)| *kind == self.kind)
         .map_or(self.kind.as_str(), |(_, label)| *label)
   }

   pub fn artist_for_display(&self) -> &str {
      if self.artist_name.is_empty() {
         UNKNOWN_ARTIST
      } else {
         &self.artist_name
      }
   }

   /// Second line of a result row: `"{artist} ({kind})"`.
   pub fn subtitle(&self) -> String {
      if self.artist_name.is_empty() {
         UNKNOWN_ARTIST.to_string()
      } else {
         format!("{} ({})", self.artist_name, self.kind_for_display())
      }
   }

   /// Price label for the buy button: `Free` for zero, otherwise the amount
   /// with the currency symbol when one is known.
   pub fn price_for_display(&self) -> String {
      if self.price == 0.0 {
         return "Free".to_string();
      }

      let code = self.currency.to_ascii_uppercase();
      let amount = if ZERO_DECIMAL_CURRENCIES.contains(&code.as_str()) {
         format!("{:.0}", self.price)
      } else {
         format!("{:.2}", self.price)
      };

      match CURRENCY_SYMBOLS.iter().find(|(c, _)| *c == code) {
         Some((_, symbol)) => format!("{symbol}{amount}"),
         None if code.is_empty() => amount,
         None => format!("{code} {amount}"),
      }
   }
}

/// Lifecycle of a search session as seen by observers.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
   #[default]
   NotSearchedYet,
   Loading,
   NoResults,
   /// Non-empty and already sorted by name.
   Results(Vec<SearchResult>),
}

impl SearchState {
   pub const fn is_loading(&self) -> bool {
      matches!(self, Self::Loading)
   }

   pub fn results(&self) -> &[SearchResult] {
      match self {
         Self::Results(results) => results,
         _ => &[],
      }
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   fn result(kind: &str, artist: &str, price: f64, currency: &str) -> SearchResult {
      SearchResult {
         name:            "Waterloo".to_string(),
         artist_name:     artist.to_string(),
         artwork_url_60:  String::new(),
         artwork_url_100: String::new(),
         store_url:       String::new(),
         kind:            kind.to_string(),
         currency:        currency.to_string(),
         price,
         genre:           String::new(),
      }
   }

   #[test]
   fn test_kind_for_display() {
      assert_eq!(result("song", "ABBA", 0.0, "USD").kind_for_display(), "Song");
      assert_eq!(result("software", "ABBA", 0.0, "USD").kind_for_display(), "App");
      assert_eq!(result("feature-movie", "ABBA", 0.0, "USD").kind_for_display(), "Movie");
      assert_eq!(result("tv-episode", "ABBA", 0.0, "USD").kind_for_display(), "TV Episode");
      assert_eq!(result("hologram", "ABBA", 0.0, "USD").kind_for_display(), "hologram");
   }

   #[test]
   fn test_artist_fallback() {
      let known = result("song", "ABBA", 0.0, "USD");
      assert_eq!(known.artist_for_display(), "ABBA");
      assert_eq!(known.subtitle(), "ABBA (Song)");

      let unknown = result("song", "", 0.0, "USD");
      assert_eq!(unknown.artist_for_display(), UNKNOWN_ARTIST);
      assert_eq!(unknown.subtitle(), UNKNOWN_ARTIST);
   }

   #[test]
   fn test_price_for_display() {
      assert_eq!(result("song", "ABBA", 0.0, "USD").price_for_display(), "Free");
      assert_eq!(result("song", "ABBA", 1.29, "USD").price_for_display(), "$1.29");
      assert_eq!(result("song", "ABBA", 0.99, "eur").price_for_display(), "€0.99");
      assert_eq!(result("song", "ABBA", 250.0, "JPY").price_for_display(), "¥250");
      assert_eq!(result("song", "ABBA", 9.0, "SEK").price_for_display(), "SEK 9.00");
   }

   #[test]
   fn test_category_entity_tokens() {
      assert_eq!(Category::All.entity(), "");
      assert_eq!(Category::Music.entity(), "musicTrack");
      assert_eq!(Category::Software.entity(), "software");
      assert_eq!(Category::EBooks.entity(), "ebook");
   }

   #[test]
   fn test_state_results_accessor() {
      assert!(SearchState::NotSearchedYet.results().is_empty());
      assert!(SearchState::Loading.is_loading());
      let state = SearchState::Results(vec![result("song", "ABBA", 0.0, "USD")]);
      assert_eq!(state.results().len(), 1);
   }
}

//! Terminal rendering of a finished search.

use std::fmt::Write as _;

use console::style;

use crate::types::{SearchResult, SearchState};

pub const NOTHING_FOUND: &str = "Nothing Found";
pub const NETWORK_ERROR: &str =
   "Whoops... There was an error reading from the store. Please try again.";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
   pub plain: bool,
   pub urls:  bool,
}

/// Renders the rows a result table would show for `state`.
pub fn render_state(state: &SearchState, opts: RenderOptions) -> String {
   match state {
      SearchState::NotSearchedYet => String::new(),
      SearchState::Loading => "Loading...\n".to_string(),
      SearchState::NoResults => {
         if opts.plain {
            format!("{NOTHING_FOUND}\n")
         } else {
            format!("{}\n", style(NOTHING_FOUND).yellow())
         }
      },
      SearchState::Results(results) => {
         let mut out = String::new();
         for result in results {
            render_row(&mut out, result, opts);
         }
         out
      },
   }
}

fn render_row(out: &mut String, result: &SearchResult, opts: RenderOptions) {
   let price = result.price_for_display();
   if opts.plain {
      let _ = writeln!(out, "{}\t{}\t{}\t{}", result.name, result.subtitle(), price, result.genre);
      if opts.urls {
         let _ = writeln!(out, "\t{}", result.store_url);
      }
      return;
   }

   let _ = writeln!(
      out,
      "{} {}",
      style(&result.name).bold(),
      style(format!("[{price}]")).green()
   );
   if result.genre.is_empty() {
      let _ = writeln!(out, "  {}", style(result.subtitle()).dim());
   } else {
      let _ = writeln!(out, "  {} {}", style(result.subtitle()).dim(), style(&result.genre).cyan());
   }
   if opts.urls {
      let _ = writeln!(out, "  {}", style(&result.store_url).underlined());
   }
}

/// Renders `state` as JSON: an array of results, empty unless `Results`.
pub fn render_json(state: &SearchState) -> serde_json::Result<String> {
   serde_json::to_string_pretty(state.results())
}

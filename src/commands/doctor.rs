use std::{sync::Arc, time::Instant};

use anyhow::Result;
use console::style;

use crate::{
   config::{self, Config},
   fetch::{Fetcher, HttpFetcher},
   search::{parser, query},
   types::Category,
   version,
};

const SAMPLE_TERM: &str = "abba";

struct Check {
   name:   &'static str,
   ok:     bool,
   detail: String,
}

impl Check {
   fn new(name: &'static str, ok: bool, detail: impl Into<String>) -> Self {
      Self { name, ok, detail: detail.into() }
   }
}

pub async fn execute() -> Result<()> {
   println!("{}\n", style("storesearch Doctor").bold());

   let cfg = config::get();
   let config_path = config::config_file_path();
   print_check(&Check::new("Config file", config_path.exists(), config_path.display().to_string()));

   let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(cfg)?);
   let checks = run_checks(cfg, fetcher.as_ref()).await;
   for check in &checks {
      print_check(check);
   }

   println!(
      "\n{} {} {} | storesearch {}",
      style("System:").dim(),
      std::env::consts::OS,
      std::env::consts::ARCH,
      version::long_version()
   );

   if checks.iter().all(|c| c.ok) {
      println!("\n{}", style("✓ All checks passed!").green().bold());
   } else {
      println!("\n{}", style("✗ The store catalog could not be queried.").red().bold());
   }

   Ok(())
}

/// Validates the base URL, then runs one sample search against the catalog
/// and checks that the payload parses. Stops at the first check that leaves
/// nothing to query.
async fn run_checks(cfg: &Config, fetcher: &dyn Fetcher) -> Vec<Check> {
   let mut checks = Vec::new();

   let base_url = match cfg.base_url() {
      Ok(url) => {
         checks.push(Check::new("Base URL", true, url.as_str()));
         url
      },
      Err(e) => {
         checks.push(Check::new("Base URL", false, e.to_string()));
         return checks;
      },
   };

   let url = match query::build_url(&base_url, SAMPLE_TERM, Category::Music) {
      Ok(url) => url,
      Err(e) => {
         checks.push(Check::new("Search URL", false, e.to_string()));
         return checks;
      },
   };

   let started = Instant::now();
   let response = match fetcher.fetch(&url).await.and_then(|r| r.error_for_status()) {
      Ok(response) => response,
      Err(e) => {
         checks.push(Check::new("Catalog reachable", false, e.to_string()));
         return checks;
      },
   };

   let elapsed = started.elapsed();
   checks.push(Check::new(
      "Catalog reachable",
      true,
      format!("HTTP {} in {elapsed:.2?}", response.status),
   ));

   match parser::try_parse(&response.body) {
      Ok(results) => checks.push(Check::new("Payload", true, format!("{} records parsed", results.len()))),
      Err(e) => checks.push(Check::new("Payload", false, e.to_string())),
   }

   checks
}

fn print_check(check: &Check) {
   let symbol = if check.ok {
      style("✓").green()
   } else {
      style("✗").red()
   };
   println!("{} {}: {}", symbol, check.name, style(&check.detail).dim());
}

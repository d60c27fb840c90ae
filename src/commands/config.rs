use anyhow::Result;
use console::style;

use crate::config;

pub fn execute() -> Result<()> {
   let cfg = config::get();

   println!("{} {}", style("Config file:").dim(), style(config::config_file_path().display()).cyan());
   println!();
   print!("{}", toml::to_string_pretty(cfg)?);

   Ok(())
}
